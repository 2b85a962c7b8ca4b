//! Spawn systems + plugin

use bevy::prelude::*;

use super::{ObjectSpawned, SpawnFailed, SpawnRequest};
use crate::prefab::PrefabLibrary;

/// Система: SpawnRequest → create_object
///
/// Exclusive (нужен `&mut World` для instantiate + configure).
/// Ошибки логируются и уходят в `SpawnFailed`.
pub fn process_spawn_requests(world: &mut World) {
    let Some(mut requests) = world.get_resource_mut::<Events<SpawnRequest>>() else {
        return;
    };
    let requests: Vec<SpawnRequest> = requests.drain().collect();

    for request in requests {
        match request
            .template
            .create_object(world, request.position, request.rotation)
        {
            Ok(entity) => {
                world.send_event(ObjectSpawned {
                    entity,
                    template: request.template,
                });
            }
            Err(error) => {
                crate::logger::log_warning(&format!(
                    "Spawn of '{}' failed: {}",
                    request.template.display_name(),
                    error
                ));
                world.send_event(SpawnFailed {
                    template: request.template,
                    error,
                });
            }
        }
    }
}

/// Object management plugin
///
/// Регистрирует spawn events, PrefabLibrary и `process_spawn_requests` в FixedUpdate.
pub struct ObjectManagementPlugin;

impl Plugin for ObjectManagementPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SpawnRequest>()
            .add_event::<ObjectSpawned>()
            .add_event::<SpawnFailed>()
            .init_resource::<PrefabLibrary>()
            .add_systems(FixedUpdate, process_spawn_requests);
    }
}
