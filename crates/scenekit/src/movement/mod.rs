//! Movement domain — runtime перемещение живых scene objects
//!
//! Содержит:
//! - MovementDispatcher (один на процесс, resource)
//! - MovementEvent (typed команда: Teleport / PushInDirection / MoveToPosition)
//! - MovementRequest / MovementFailed (ECS events)
//!
//! Каждый вызов независим и синхронен: никакого состояния между вызовами,
//! никакой очереди. MoveToPosition вызывается владельцем каждый тик до прибытия.

use bevy::prelude::*;

pub mod dispatcher;
pub mod events;
pub mod systems;


pub use dispatcher::{install_dispatcher, move_towards, MovementDispatcher};
pub use events::{MovementFailed, MovementRequest};
pub use systems::{process_movement_requests, MovementDispatcherPlugin};

/// Тип движения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum MovementKind {
    /// Мгновенно поставить в точку (без физики)
    Teleport,
    /// [Некинематик] Impulse в rigid body (опционально — сначала teleport в start)
    PushInDirection,
    /// [Кинематик] Шаг к цели с постоянной скоростью
    MoveToPosition,
}

/// Провалидированная команда движения
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum MovementEvent {
    Teleport { end: Vec3 },
    PushInDirection { impulse: Vec3, start: Option<Vec3> },
    /// `speed` — m/s, шаг = speed × frame delta
    MoveToPosition { end: Vec3, speed: f32 },
}

impl MovementEvent {
    /// Собрать команду из "плоских" аргументов (kind + optional поля)
    pub fn from_parts(
        kind: MovementKind,
        end: Option<Vec3>,
        start: Option<Vec3>,
        speed: Option<f32>,
    ) -> Result<Self, MovementError> {
        let missing = |argument| MovementError::MissingArgument { kind, argument };

        match kind {
            MovementKind::Teleport => Ok(Self::Teleport {
                end: end.ok_or_else(|| missing("end"))?,
            }),
            MovementKind::PushInDirection => Ok(Self::PushInDirection {
                impulse: end.ok_or_else(|| missing("end"))?,
                start,
            }),
            MovementKind::MoveToPosition => Ok(Self::MoveToPosition {
                end: end.ok_or_else(|| missing("end"))?,
                speed: speed.ok_or_else(|| missing("speed"))?,
            }),
        }
    }

    pub fn kind(&self) -> MovementKind {
        match self {
            Self::Teleport { .. } => MovementKind::Teleport,
            Self::PushInDirection { .. } => MovementKind::PushInDirection,
            Self::MoveToPosition { .. } => MovementKind::MoveToPosition,
        }
    }
}

/// Результат успешного движения
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementOutcome {
    Teleported { position: Vec3 },
    Pushed { impulse: Vec3 },
    /// `remaining` = 0 → прибыли
    Moved { position: Vec3, remaining: f32 },
}

impl MovementOutcome {
    pub fn arrived(&self) -> bool {
        match self {
            Self::Moved { remaining, .. } => *remaining <= 0.0,
            _ => true,
        }
    }
}

/// Ошибки движения (мир не изменяется)
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MovementError {
    #[error("target {0:?} does not exist")]
    NullTarget(Entity),
    #[error("target {0:?} has no rigid body to push")]
    MissingRigidBody(Entity),
    #[error("{kind:?} requires '{argument}'")]
    MissingArgument {
        kind: MovementKind,
        argument: &'static str,
    },
    #[error("speed must be finite and non-negative, got {0}")]
    InvalidSpeed(f32),
    #[error("no Time resource in world, cannot step MoveToPosition")]
    MissingClock,
    #[error("target {0:?} has no Transform, MoveToPosition has no start")]
    MissingTransform(Entity),
}
