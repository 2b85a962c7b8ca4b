//! Template events
//!
//! - `ObjectConfigured` — observer event, триггерится на instance и потомках
//! - `SpawnRequest` → `process_spawn_requests` → `ObjectSpawned` / `SpawnFailed`

use bevy::prelude::*;
use std::sync::Arc;

use super::{ObjectSpawnTemplate, SpawnError};

/// Instance сконфигурирован template'ом
///
/// Подписка: `world.add_observer(|trigger: Trigger<ObjectConfigured>| ...)`
/// или `commands.entity(e).observe(...)` для конкретного entity.
#[derive(Event, Debug, Clone)]
pub struct ObjectConfigured {
    pub template: Arc<ObjectSpawnTemplate>,
}

/// Запрос на spawn (обрабатывается в FixedUpdate)
#[derive(Event, Debug, Clone)]
pub struct SpawnRequest {
    pub template: Arc<ObjectSpawnTemplate>,
    /// None → template.position
    pub position: Option<Vec3>,
    /// None → template.rotation
    pub rotation: Option<Quat>,
}

impl SpawnRequest {
    pub fn at_default_pose(template: Arc<ObjectSpawnTemplate>) -> Self {
        Self {
            template,
            position: None,
            rotation: None,
        }
    }
}

#[derive(Event, Debug, Clone)]
pub struct ObjectSpawned {
    pub entity: Entity,
    pub template: Arc<ObjectSpawnTemplate>,
}

#[derive(Event, Debug, Clone)]
pub struct SpawnFailed {
    pub template: Arc<ObjectSpawnTemplate>,
    pub error: SpawnError,
}
