//! Configure instance по template
//!
//! Порядок фиксирован:
//! 1. scale
//! 2. tag + layer
//! 3. physics (только если has_rigid_body)
//! 4. collider (только если collider_type != None), CollisionGroups по layer
//! 5. материалы (только если список не пуст)
//! 6. ObjectConfigured на instance и потомках
//!
//! Каждый шаг перезаписывает состояние → повторный configure ничего не накапливает.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use std::sync::Arc;

use super::{ObjectConfigured, ObjectSpawnTemplate, SpawnError};
use crate::collision_layers::{get_layer_name, groups_for_layer};
use crate::components::{
    ColliderShape, MeshGeometry, ObjectLayer, ObjectTag, Renderer, RigidBodySettings, ShapedCollider,
};
use crate::shared::self_and_descendants;

impl ObjectSpawnTemplate {
    /// Одеть уже существующий instance (идемпотентно)
    ///
    /// Несуществующий entity → `SpawnError::NullTarget`, мир не трогаем.
    pub fn configure_object(&self, world: &mut World, instance: Entity) -> Result<(), SpawnError> {
        if world.get_entity(instance).is_err() {
            return Err(SpawnError::NullTarget(instance));
        }

        self.apply_scale(world, instance);
        self.apply_classification(world, instance);
        self.configure_physics(world, instance);
        self.configure_collider(world, instance);
        self.configure_materials(world, instance);
        self.notify_configured(world, instance);

        Ok(())
    }

    /// Local scale (position/rotation ставятся только при spawn)
    fn apply_scale(&self, world: &mut World, instance: Entity) {
        match world.get_mut::<Transform>(instance) {
            Some(mut transform) => transform.scale = self.scale,
            None => {
                world
                    .entity_mut(instance)
                    .insert(Transform::from_scale(self.scale));
            }
        }
    }

    fn apply_classification(&self, world: &mut World, instance: Entity) {
        world
            .entity_mut(instance)
            .insert((ObjectTag(self.tag.clone()), ObjectLayer(self.layer)));
    }

    /// Find-or-create RigidBodySettings + зеркало в Rapier
    fn configure_physics(&self, world: &mut World, instance: Entity) {
        if !self.has_rigid_body {
            return;
        }

        let settings = self.rigid_body_settings();
        let mut entity = world.entity_mut(instance);

        match entity.get_mut::<RigidBodySettings>() {
            Some(mut existing) => *existing = settings,
            None => {
                entity.insert(settings);
            }
        }

        let body = if settings.is_kinematic {
            RigidBody::KinematicPositionBased
        } else {
            RigidBody::Dynamic
        };

        entity.insert((
            body,
            // Масса только из template (collider density не добавляет)
            AdditionalMassProperties::Mass(settings.mass),
            ColliderMassProperties::Density(0.0),
            Damping {
                linear_damping: settings.drag,
                angular_damping: settings.angular_drag,
            },
            GravityScale(settings.gravity_scale()),
            Ccd {
                enabled: settings.collision_detection.uses_ccd(),
            },
        ));

        // Runtime состояние переживает reconfigure
        if !entity.contains::<Velocity>() {
            entity.insert(Velocity::zero());
        }
        if !entity.contains::<ExternalImpulse>() {
            entity.insert(ExternalImpulse::default());
        }
    }

    /// Collider (если задан) + CollisionGroups по текущему layer
    fn configure_collider(&self, world: &mut World, instance: Entity) {
        // None → существующие collider'ы остаются как есть
        if let Some(shape) = self.collider_shape() {
            self.replace_collider(world, instance, shape);
        }
        self.refresh_collision_groups(world, instance);
    }

    /// Снести все collider'ы instance и повесить ровно один
    fn replace_collider(&self, world: &mut World, instance: Entity, shape: ColliderShape) {
        let mut entity = world.entity_mut(instance);
        entity.remove::<(Collider, Sensor, ShapedCollider, CollisionGroups)>();

        let collider = match &shape {
            ColliderShape::Box { size } => Some(Collider::cuboid(
                size.x * 0.5,
                size.y * 0.5,
                size.z * 0.5,
            )),
            ColliderShape::Sphere { radius } => Some(Collider::ball(*radius)),
            ColliderShape::Capsule { radius, height } => {
                let half_segment = (height * 0.5 - radius).max(0.0);
                Some(Collider::capsule_y(half_segment, *radius))
            }
            ColliderShape::Mesh => entity
                .get::<MeshGeometry>()
                .and_then(|mesh| Collider::convex_hull(&mesh.points)),
        };

        match collider {
            Some(collider) => {
                entity.insert(collider);
            }
            None => crate::logger::log_warning(&format!(
                "Mesh collider for {:?} ('{}'): no usable MeshGeometry, shape not built",
                instance,
                self.display_name()
            )),
        }

        entity.insert(ShapedCollider {
            shape,
            is_trigger: self.is_trigger,
        });
        if self.is_trigger {
            entity.insert(Sensor);
        }
    }

    /// Membership из layer; instance без collider'а не трогаем
    fn refresh_collision_groups(&self, world: &mut World, instance: Entity) {
        let mut entity = world.entity_mut(instance);
        if !entity.contains::<Collider>() && !entity.contains::<ShapedCollider>() {
            return;
        }

        match groups_for_layer(self.layer) {
            Some(groups) => {
                entity.insert(groups);
            }
            None => {
                entity.remove::<CollisionGroups>();
                crate::logger::log_warning(&format!(
                    "Layer {} ({}) has no collision group, {:?} collides with defaults",
                    self.layer,
                    get_layer_name(self.layer),
                    instance
                ));
            }
        }
    }

    /// Заменить материалы на всех Renderer'ах instance и потомков
    fn configure_materials(&self, world: &mut World, instance: Entity) {
        if self.materials.is_empty() {
            return;
        }

        for entity in self_and_descendants(world, instance) {
            if let Some(mut renderer) = world.get_mut::<Renderer>(entity) {
                renderer.materials = self.materials.clone();
                renderer.cast_shadows = self.cast_shadows;
                renderer.receive_shadows = self.receive_shadows;
            }
        }
    }

    /// ObjectConfigured → observers на instance и потомках (ноль observers — ок)
    fn notify_configured(&self, world: &mut World, instance: Entity) {
        let targets = self_and_descendants(world, instance);
        world.trigger_targets(
            ObjectConfigured {
                template: Arc::new(self.clone()),
            },
            targets,
        );
    }
}
