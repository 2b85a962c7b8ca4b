//! Movement events

use bevy::prelude::*;

use super::{MovementError, MovementEvent};

/// Event: запрос на движение target
///
/// Генерируется:
/// - gameplay/AI системы (teleport, knockback, движение по точкам)
///
/// Обрабатывается:
/// - process_movement_requests (FixedUpdate) через MovementDispatcher
#[derive(Event, Debug, Clone)]
pub struct MovementRequest {
    pub target: Entity,
    pub event: MovementEvent,
}

/// Event: движение не применено (мир не изменён)
#[derive(Event, Debug, Clone)]
pub struct MovementFailed {
    pub target: Entity,
    pub event: MovementEvent,
    pub error: MovementError,
}
