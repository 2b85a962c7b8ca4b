//! MovementDispatcher — применение MovementEvent к target
//!
//! Один логический dispatcher на процесс: `install_dispatcher` оставляет первый,
//! все последующие отбрасываются. Dispatcher stateless (кроме id).

use bevy::prelude::*;
use bevy_rapier3d::prelude::{ExternalImpulse, RigidBody};
use std::sync::atomic::{AtomicU64, Ordering};

use super::{MovementError, MovementEvent, MovementKind, MovementOutcome};
use crate::shared::{set_world_position, world_position};

static NEXT_DISPATCHER_ID: AtomicU64 = AtomicU64::new(1);

/// Допуск прибытия в epsilon'ах от масштаба координат
const ARRIVAL_ULPS: f32 = 64.0;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementDispatcher {
    id: u64,
}

impl Default for MovementDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MovementDispatcher {
    pub fn new() -> Self {
        Self {
            id: NEXT_DISPATCHER_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Точка входа с "плоскими" аргументами
    ///
    /// - Teleport: `end`
    /// - PushInDirection: `end` = impulse, `start` опционально
    /// - MoveToPosition: `end` + `speed`
    pub fn execute_event(
        &self,
        world: &mut World,
        kind: MovementKind,
        target: Entity,
        end: Option<Vec3>,
        start: Option<Vec3>,
        speed: Option<f32>,
    ) -> Result<MovementOutcome, MovementError> {
        ensure_target(world, target)?;
        let event = MovementEvent::from_parts(kind, end, start, speed)?;
        self.apply(world, target, event)
    }

    /// Применить typed команду
    pub fn apply(
        &self,
        world: &mut World,
        target: Entity,
        event: MovementEvent,
    ) -> Result<MovementOutcome, MovementError> {
        ensure_target(world, target)?;

        match event {
            MovementEvent::Teleport { end } => {
                set_world_position(world, target, end);
                Ok(MovementOutcome::Teleported { position: end })
            }
            MovementEvent::PushInDirection { impulse, start } => {
                push_in_direction(world, target, impulse, start)
            }
            MovementEvent::MoveToPosition { end, speed } => move_to_position(world, target, end, speed),
        }
    }
}

fn ensure_target(world: &World, target: Entity) -> Result<(), MovementError> {
    match world.get_entity(target) {
        Ok(_) => Ok(()),
        Err(_) => Err(MovementError::NullTarget(target)),
    }
}

/// [Некинематик] impulse в rigid body
///
/// Rigid body проверяется ДО teleport в start: провал не оставляет следов.
/// Траекторию дальше ведёт Rapier integrator.
fn push_in_direction(
    world: &mut World,
    target: Entity,
    impulse: Vec3,
    start: Option<Vec3>,
) -> Result<MovementOutcome, MovementError> {
    if world.get::<RigidBody>(target).is_none() {
        return Err(MovementError::MissingRigidBody(target));
    }

    if let Some(start) = start {
        set_world_position(world, target, start);
    }

    let mut entity = world.entity_mut(target);
    match entity.get_mut::<ExternalImpulse>() {
        // Rapier сбрасывает impulse после шага, в пределах тика — накапливаем
        Some(mut external) => external.impulse += impulse,
        None => {
            entity.insert(ExternalImpulse {
                impulse,
                torque_impulse: Vec3::ZERO,
            });
        }
    }

    Ok(MovementOutcome::Pushed { impulse })
}

/// [Кинематик] один шаг к `end` длиной не больше speed × dt
fn move_to_position(
    world: &mut World,
    target: Entity,
    end: Vec3,
    speed: f32,
) -> Result<MovementOutcome, MovementError> {
    if !speed.is_finite() || speed < 0.0 {
        return Err(MovementError::InvalidSpeed(speed));
    }
    let delta = world
        .get_resource::<Time>()
        .ok_or(MovementError::MissingClock)?
        .delta_secs();

    let current = world_position(world, target).ok_or(MovementError::MissingTransform(target))?;
    let next = move_towards(current, end, speed * delta);
    set_world_position(world, target, next);

    Ok(MovementOutcome::Moved {
        position: next,
        remaining: next.distance(end),
    })
}

/// Прямолинейный шаг к цели без перелёта
///
/// Остаток в пределах float погрешности координат считается прибытием:
/// иначе накопленная ошибка шагов даёт лишний микро-шаг в конце.
pub fn move_towards(current: Vec3, target: Vec3, max_distance_delta: f32) -> Vec3 {
    let to_target = target - current;
    let distance = to_target.length();
    let tolerance = ARRIVAL_ULPS * f32::EPSILON * (current.length() + target.length()).max(1.0);

    if distance == 0.0 || distance - max_distance_delta <= tolerance {
        return target;
    }

    current + to_target / distance * max_distance_delta
}

/// Поставить dispatcher в мир, если его там ещё нет
///
/// Возвращает false, если уже есть другой (новый отбрасывается).
pub fn install_dispatcher(world: &mut World, dispatcher: MovementDispatcher) -> bool {
    if let Some(existing) = world.get_resource::<MovementDispatcher>() {
        crate::logger::log_warning(&format!(
            "MovementDispatcher #{} discarded, #{} is already installed",
            dispatcher.id(),
            existing.id()
        ));
        return false;
    }

    world.insert_resource(dispatcher);
    crate::logger::log_info(&format!("MovementDispatcher #{} installed", dispatcher.id()));
    true
}
