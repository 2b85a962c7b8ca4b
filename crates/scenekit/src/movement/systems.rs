//! Movement systems + plugin

use bevy::prelude::*;

use super::{install_dispatcher, MovementDispatcher, MovementFailed, MovementRequest};

/// Система: MovementRequest → MovementDispatcher::apply
///
/// Exclusive, FixedUpdate. `Time` внутри FixedUpdate = Time<Fixed>,
/// поэтому MoveToPosition шагает на fixed delta.
pub fn process_movement_requests(world: &mut World) {
    let Some(mut requests) = world.get_resource_mut::<Events<MovementRequest>>() else {
        return;
    };
    let requests: Vec<MovementRequest> = requests.drain().collect();
    if requests.is_empty() {
        return;
    }

    let Some(dispatcher) = world.get_resource::<MovementDispatcher>().copied() else {
        crate::logger::log_error(&format!(
            "No MovementDispatcher installed, dropping {} movement requests",
            requests.len()
        ));
        return;
    };

    for request in requests {
        if let Err(error) = dispatcher.apply(world, request.target, request.event) {
            crate::logger::log_warning(&format!(
                "{:?} on {:?} failed: {}",
                request.event.kind(),
                request.target,
                error
            ));
            world.send_event(MovementFailed {
                target: request.target,
                event: request.event,
                error,
            });
        }
    }
}

/// Movement plugin
///
/// Ставит единственный MovementDispatcher (первый выигрывает),
/// регистрирует events и `process_movement_requests` в FixedUpdate.
pub struct MovementDispatcherPlugin;

impl Plugin for MovementDispatcherPlugin {
    fn build(&self, app: &mut App) {
        install_dispatcher(app.world_mut(), MovementDispatcher::new());

        app.add_event::<MovementRequest>()
            .add_event::<MovementFailed>()
            .add_systems(FixedUpdate, process_movement_requests);
    }
}
