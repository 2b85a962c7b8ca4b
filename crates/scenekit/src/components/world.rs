//! Scene classification компоненты: ObjectTag, ObjectLayer, SpawnEffect, PrefabPath

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Тег объекта (строковая классификация, "Untagged" по умолчанию)
#[derive(Component, Debug, Clone, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct ObjectTag(pub String);

impl Default for ObjectTag {
    fn default() -> Self {
        Self(UNTAGGED.to_string())
    }
}

pub const UNTAGGED: &str = "Untagged";

/// Индекс слоя (0-31 маппятся в CollisionGroups, см. `collision_layers`)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct ObjectLayer(pub u32);

/// Маркер: spawn-эффект, прицепленный к instance при create_object
///
/// Pool снимает такие дети при release, чтобы reuse не копил эффекты.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct SpawnEffect;

/// Путь к prefab (data-driven)
///
/// Ключ в `PrefabLibrary`. Instantiated объект получает этот компонент,
/// чтобы pool/debug знали источник.
#[derive(Component, Debug, Clone, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(transparent)]
pub struct PrefabPath {
    pub path: String,
}

impl PrefabPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }
}

impl std::fmt::Display for PrefabPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}
