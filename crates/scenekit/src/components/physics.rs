//! Physics компоненты: настройки rigid body, которые мы зеркалим в Rapier
//!
//! `RigidBodySettings` — наш "find-or-create" компонент.
//! Rapier компоненты (RigidBody, Damping, GravityScale, ...) выводятся из него
//! в `template::configure`, solver их потом интегрирует сам.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Режим collision detection (дискретный или CCD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum CollisionDetectionMode {
    #[default]
    Discrete,
    Continuous,
    ContinuousDynamic,
    ContinuousSpeculative,
}

impl CollisionDetectionMode {
    /// Любой continuous режим → Rapier CCD
    pub fn uses_ccd(self) -> bool {
        !matches!(self, CollisionDetectionMode::Discrete)
    }
}

/// Интерполяция transform между physics тиками (читает host renderer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum InterpolationMode {
    #[default]
    None,
    Interpolate,
    Extrapolate,
}

/// Настройки rigid body на instance
///
/// Один на entity (ECS гарантирует уникальность компонента).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct RigidBodySettings {
    /// Масса (kg)
    pub mass: f32,
    /// Linear damping
    pub drag: f32,
    /// Angular damping
    pub angular_drag: f32,
    pub use_gravity: bool,
    /// true → KinematicPositionBased (position-driven, без forces)
    pub is_kinematic: bool,
    pub collision_detection: CollisionDetectionMode,
    pub interpolation: InterpolationMode,
}

impl Default for RigidBodySettings {
    fn default() -> Self {
        Self {
            mass: 1.0,
            drag: 0.0,
            angular_drag: 0.05,
            use_gravity: true,
            is_kinematic: false,
            collision_detection: CollisionDetectionMode::Discrete,
            interpolation: InterpolationMode::None,
        }
    }
}

impl RigidBodySettings {
    pub fn gravity_scale(&self) -> f32 {
        if self.use_gravity {
            1.0
        } else {
            0.0
        }
    }
}
