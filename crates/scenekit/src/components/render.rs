//! Render компоненты: материалы и тени
//!
//! Рендер — на стороне host; ECS хранит только данные (material paths + flags).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Ссылка на материал host renderer'а
#[derive(Debug, Clone, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialRef(pub String);

impl MaterialRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }
}

/// Renderer на entity (mesh renderer, skinned renderer и т.п.)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Renderer {
    /// Упорядоченный список материалов (по submesh)
    pub materials: Vec<MaterialRef>,
    pub cast_shadows: bool,
    pub receive_shadows: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            materials: Vec::new(),
            cast_shadows: true,
            receive_shadows: true,
        }
    }
}

impl Renderer {
    pub fn with_materials(materials: impl IntoIterator<Item = MaterialRef>) -> Self {
        Self {
            materials: materials.into_iter().collect(),
            ..default()
        }
    }
}
