//! Object spawn templates
//!
//! `ObjectSpawnTemplate` — data-driven описание "как создать и одеть" объект:
//! spawn transform, physics, collider, материалы, tag/layer, pooling, эффекты.
//!
//! Поток:
//! - `create_object` → instantiate prefab (или lease из pool) → `configure_object` → spawn эффекты
//! - `configure_object` идемпотентен: повторный вызов перезаписывает, а не добавляет
//!
//! Template никогда не мутируется (все операции по `&self`).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::audio::AudioClipRef;
use crate::components::{
    ColliderShape, CollisionDetectionMode, InterpolationMode, MaterialRef, PrefabPath,
    RigidBodySettings, UNTAGGED,
};

pub mod configure;
pub mod events;
pub mod spawn;
pub mod systems;

#[cfg(test)]
mod spawn_tests;

pub use events::{ObjectConfigured, ObjectSpawned, SpawnFailed, SpawnRequest};
pub use systems::{process_spawn_requests, ObjectManagementPlugin};

/// Ошибки spawn/configure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpawnError {
    /// Template без prefab — spawn невозможен
    #[error("template has no source prefab")]
    MissingPrefab,
    /// Prefab path не зарегистрирован в PrefabLibrary
    #[error("prefab '{0}' is not registered")]
    UnknownPrefab(String),
    /// Instance не существует (despawn'ут или placeholder)
    #[error("target {0:?} does not exist")]
    NullTarget(Entity),
}

/// Тип collider'а в template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum ColliderType {
    /// Не трогать collider'ы instance
    None,
    #[default]
    Box,
    Sphere,
    Capsule,
    Mesh,
}

/// Template объекта
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectSpawnTemplate {
    // === Основные настройки ===
    /// Имя instance (пусто → имя prefab)
    pub object_name: String,
    pub prefab: Option<PrefabPath>,
    pub icon: Option<String>,
    pub description: String,

    // === Transform ===
    pub position: Vec3,
    /// Euler углы в градусах
    pub rotation: Vec3,
    pub scale: Vec3,

    // === Физика ===
    pub has_rigid_body: bool,
    pub mass: f32,
    pub drag: f32,
    pub angular_drag: f32,
    pub use_gravity: bool,
    pub is_kinematic: bool,
    pub collision_detection: CollisionDetectionMode,
    pub interpolation: InterpolationMode,

    // === Collider ===
    pub collider_type: ColliderType,
    pub is_trigger: bool,
    /// Полный размер box collider
    pub collider_size: Vec3,
    pub collider_radius: f32,
    pub collider_height: f32,

    // === Материалы ===
    /// Пусто → оставить материалы host'а
    pub materials: Vec<MaterialRef>,
    pub cast_shadows: bool,
    pub receive_shadows: bool,

    // === Теги и слои ===
    pub tag: String,
    pub layer: u32,

    // === Pool ===
    pub use_pooling: bool,
    pub pool_tag: String,
    pub pool_size: usize,

    // === Эффекты ===
    pub sounds: Vec<AudioClipRef>,
    /// Prefab'ы эффектов, спавнятся детьми instance
    pub effects: Vec<PrefabPath>,
}

impl Default for ObjectSpawnTemplate {
    fn default() -> Self {
        Self {
            object_name: String::new(),
            prefab: None,
            icon: None,
            description: String::new(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            has_rigid_body: false,
            mass: 1.0,
            drag: 0.0,
            angular_drag: 0.05,
            use_gravity: true,
            is_kinematic: false,
            collision_detection: CollisionDetectionMode::Discrete,
            interpolation: InterpolationMode::None,
            collider_type: ColliderType::Box,
            is_trigger: false,
            collider_size: Vec3::ONE,
            collider_radius: 0.5,
            collider_height: 2.0,
            materials: Vec::new(),
            cast_shadows: true,
            receive_shadows: true,
            tag: UNTAGGED.to_string(),
            layer: 0,
            use_pooling: true,
            pool_tag: String::new(),
            pool_size: 10,
            sounds: Vec::new(),
            effects: Vec::new(),
        }
    }
}

impl ObjectSpawnTemplate {
    pub fn new(prefab: impl Into<String>) -> Self {
        Self {
            prefab: Some(PrefabPath::new(prefab)),
            ..default()
        }
    }

    /// Spawn rotation по умолчанию (Euler градусы, порядок Z → X → Y extrinsic)
    pub fn spawn_rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.rotation.y.to_radians(),
            self.rotation.x.to_radians(),
            self.rotation.z.to_radians(),
        )
    }

    /// Rigid body настройки из physics полей
    pub fn rigid_body_settings(&self) -> RigidBodySettings {
        RigidBodySettings {
            mass: self.mass,
            drag: self.drag,
            angular_drag: self.angular_drag,
            use_gravity: self.use_gravity,
            is_kinematic: self.is_kinematic,
            collision_detection: self.collision_detection,
            interpolation: self.interpolation,
        }
    }

    /// Shape collider'а для `collider_type` (`None` → не трогаем)
    pub fn collider_shape(&self) -> Option<ColliderShape> {
        match self.collider_type {
            ColliderType::None => None,
            ColliderType::Box => Some(ColliderShape::Box {
                size: self.collider_size,
            }),
            ColliderType::Sphere => Some(ColliderShape::Sphere {
                radius: self.collider_radius,
            }),
            ColliderType::Capsule => Some(ColliderShape::Capsule {
                radius: self.collider_radius,
                height: self.collider_height,
            }),
            ColliderType::Mesh => Some(ColliderShape::Mesh),
        }
    }

    /// Pool path активен?
    pub fn wants_pool(&self) -> bool {
        self.use_pooling && !self.pool_tag.is_empty()
    }

    /// Имя для debug логов
    pub fn display_name(&self) -> &str {
        if !self.object_name.is_empty() {
            &self.object_name
        } else {
            self.prefab.as_ref().map(PrefabPath::as_str).unwrap_or("<no prefab>")
        }
    }
}
