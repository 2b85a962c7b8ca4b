//! Tests for create_object.

#[cfg(test)]
mod tests {
    use crate::audio::{AudioClipRef, AudioPlayer, SpawnAudio};
    use crate::components::*;
    use crate::pool::{release_to_pool, ObjectPools, Pooled};
    use crate::prefab::{PrefabBlueprint, PrefabLibrary};
    use crate::template::{ColliderType, ObjectSpawnTemplate, SpawnError};
    use crate::DeterministicRng;
    use bevy::prelude::*;
    use bevy_rapier3d::prelude::*;
    use std::sync::{Arc, Mutex};

    /// Audio double: запоминает запрошенные clip'ы
    #[derive(Clone, Default)]
    struct RecordingAudio {
        played: Arc<Mutex<Vec<(AudioClipRef, Entity)>>>,
    }

    impl AudioPlayer for RecordingAudio {
        fn play_one_shot(&self, clip: &AudioClipRef, emitter: Entity, _position: Vec3) {
            self.played.lock().unwrap().push((clip.clone(), emitter));
        }
    }

    fn test_world() -> (World, RecordingAudio) {
        let mut world = World::new();
        let mut library = PrefabLibrary::default();
        library
            .register("props/barrel", PrefabBlueprint::new("barrel").with_renderer(Renderer::default()))
            .register("fx/sparks", PrefabBlueprint::new("sparks"))
            .register("fx/smoke", PrefabBlueprint::new("smoke"));
        world.insert_resource(library);
        world.insert_resource(DeterministicRng::new(7));

        let audio = RecordingAudio::default();
        world.insert_resource(SpawnAudio::new(audio.clone()));
        (world, audio)
    }

    fn entity_count(world: &mut World) -> usize {
        world.query::<Entity>().iter(world).count()
    }

    #[test]
    fn test_scenario_sphere_rigid_body_default_pose() {
        let (mut world, _audio) = test_world();
        let template = ObjectSpawnTemplate {
            position: Vec3::new(1.0, 2.0, 3.0),
            has_rigid_body: true,
            mass: 2.0,
            collider_type: ColliderType::Sphere,
            collider_radius: 0.5,
            ..ObjectSpawnTemplate::new("props/barrel")
        };

        let entity = template.create_object(&mut world, None, None).unwrap();

        let transform = world.get::<Transform>(entity).unwrap();
        assert_eq!(transform.translation, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.rotation, Quat::IDENTITY);
        assert_eq!(
            world.get::<ShapedCollider>(entity).map(|c| c.shape.clone()),
            Some(ColliderShape::Sphere { radius: 0.5 })
        );
        assert!(world.get::<Collider>(entity).is_some());
        assert_eq!(world.get::<RigidBodySettings>(entity).unwrap().mass, 2.0);
        assert!(matches!(world.get::<RigidBody>(entity), Some(RigidBody::Dynamic)));
    }

    #[test]
    fn test_missing_prefab_is_inert() {
        let (mut world, audio) = test_world();
        let template = ObjectSpawnTemplate {
            sounds: vec![AudioClipRef::new("sfx/pop")],
            effects: vec![PrefabPath::new("fx/sparks")],
            ..default()
        };
        let before = entity_count(&mut world);

        let result = template.create_object(&mut world, None, None);

        assert_eq!(result, Err(SpawnError::MissingPrefab));
        assert_eq!(entity_count(&mut world), before);
        assert!(audio.played.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_prefab_is_inert() {
        let (mut world, audio) = test_world();
        let template = ObjectSpawnTemplate {
            sounds: vec![AudioClipRef::new("sfx/pop")],
            ..ObjectSpawnTemplate::new("props/nope")
        };
        let before = entity_count(&mut world);

        let result = template.create_object(&mut world, None, None);

        assert_eq!(result, Err(SpawnError::UnknownPrefab("props/nope".into())));
        assert_eq!(entity_count(&mut world), before);
        assert!(audio.played.lock().unwrap().is_empty());
    }

    #[test]
    fn test_explicit_pose_overrides_template() {
        let (mut world, _audio) = test_world();
        let template = ObjectSpawnTemplate {
            position: Vec3::new(5.0, 5.0, 5.0),
            rotation: Vec3::new(0.0, 90.0, 0.0),
            ..ObjectSpawnTemplate::new("props/barrel")
        };
        let rotation = Quat::from_rotation_z(0.5);

        let entity = template
            .create_object(&mut world, Some(Vec3::new(-1.0, 0.0, 0.0)), Some(rotation))
            .unwrap();

        let transform = world.get::<Transform>(entity).unwrap();
        assert_eq!(transform.translation, Vec3::new(-1.0, 0.0, 0.0));
        assert!(transform.rotation.angle_between(rotation) < 1e-5);
    }

    #[test]
    fn test_template_euler_rotation_in_degrees() {
        let template = ObjectSpawnTemplate {
            rotation: Vec3::new(0.0, 90.0, 0.0),
            ..default()
        };

        let expected = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        assert!(template.spawn_rotation().angle_between(expected) < 1e-5);
    }

    #[test]
    fn test_name_falls_back_to_prefab() {
        let (mut world, _audio) = test_world();

        let unnamed = ObjectSpawnTemplate::new("props/barrel")
            .create_object(&mut world, None, None)
            .unwrap();
        let named = ObjectSpawnTemplate {
            object_name: "Explosive Barrel".into(),
            ..ObjectSpawnTemplate::new("props/barrel")
        }
        .create_object(&mut world, None, None)
        .unwrap();

        assert_eq!(world.get::<Name>(unnamed).map(|n| n.as_str()), Some("barrel"));
        assert_eq!(world.get::<Name>(named).map(|n| n.as_str()), Some("Explosive Barrel"));
        assert_eq!(
            world.get::<PrefabPath>(named),
            Some(&PrefabPath::new("props/barrel"))
        );
    }

    #[test]
    fn test_spawn_plays_one_sound() {
        let (mut world, audio) = test_world();
        let sounds = vec![AudioClipRef::new("sfx/a"), AudioClipRef::new("sfx/b")];
        let template = ObjectSpawnTemplate {
            sounds: sounds.clone(),
            ..ObjectSpawnTemplate::new("props/barrel")
        };

        let entity = template.create_object(&mut world, None, None).unwrap();

        let played = audio.played.lock().unwrap();
        assert_eq!(played.len(), 1);
        assert_eq!(played[0].1, entity);
        assert!(sounds.contains(&played[0].0));
    }

    #[test]
    fn test_spawn_without_audio_player_still_succeeds() {
        let (mut world, _audio) = test_world();
        world.remove_resource::<SpawnAudio>();
        let template = ObjectSpawnTemplate {
            sounds: vec![AudioClipRef::new("sfx/a")],
            ..ObjectSpawnTemplate::new("props/barrel")
        };

        assert!(template.create_object(&mut world, None, None).is_ok());
    }

    #[test]
    fn test_effects_spawn_as_children_at_instance_pose() {
        let (mut world, _audio) = test_world();
        let template = ObjectSpawnTemplate {
            effects: vec![
                PrefabPath::new("fx/sparks"),
                PrefabPath::new("fx/unregistered"),
                PrefabPath::new("fx/smoke"),
            ],
            ..ObjectSpawnTemplate::new("props/barrel")
        };

        let entity = template
            .create_object(&mut world, Some(Vec3::new(4.0, 0.0, 0.0)), None)
            .unwrap();

        let children = world.get::<Children>(entity).unwrap().to_vec();
        assert_eq!(children.len(), 2, "Незарегистрированный эффект должен быть пропущен");
        for child in children {
            assert_eq!(world.get::<Transform>(child), Some(&Transform::IDENTITY));
            assert_eq!(world.get::<ChildOf>(child).map(|c| c.parent()), Some(entity));
        }
    }

    #[test]
    fn test_pooled_template_leases_and_reuses() {
        let (mut world, _audio) = test_world();
        let template = ObjectSpawnTemplate {
            use_pooling: true,
            pool_tag: "barrels".into(),
            pool_size: 2,
            ..ObjectSpawnTemplate::new("props/barrel")
        };

        assert_eq!(template.register_pool(&mut world), Ok(true));
        let first = template.create_object(&mut world, None, None).unwrap();
        assert!(world.get::<Pooled>(first).is_none());

        let mut pooled = world.query_filtered::<Entity, With<Pooled>>();
        assert_eq!(pooled.iter(&world).count(), 1);

        assert!(release_to_pool(&mut world, "barrels", first));
        let second = template.create_object(&mut world, None, None).unwrap();
        assert_eq!(second, first);
    }

    #[test]
    fn test_reused_instance_starts_fresh() {
        let (mut world, _audio) = test_world();
        let template = ObjectSpawnTemplate {
            use_pooling: true,
            pool_tag: "barrels".into(),
            pool_size: 1,
            has_rigid_body: true,
            effects: vec![PrefabPath::new("fx/sparks")],
            ..ObjectSpawnTemplate::new("props/barrel")
        };
        template.register_pool(&mut world).unwrap();

        let effect_count = |world: &World, entity: Entity| {
            world
                .get::<Children>(entity)
                .map(|children| children.to_vec())
                .unwrap_or_default()
                .into_iter()
                .filter(|child| world.get::<SpawnEffect>(*child).is_some())
                .count()
        };

        let mut previous = None;
        for _ in 0..3 {
            let entity = template.create_object(&mut world, None, None).unwrap();
            if let Some(previous) = previous {
                assert_eq!(entity, previous, "Pool должен отдавать тот же instance");
            }
            previous = Some(entity);

            assert_eq!(effect_count(&world, entity), 1);
            assert_eq!(world.get::<Velocity>(entity).unwrap().linvel, Vec3::ZERO);
            assert!(world.get::<RigidBodyDisabled>(entity).is_none());

            // Объект полетел, потом вернулся в pool
            world.get_mut::<Velocity>(entity).unwrap().linvel = Vec3::new(9.0, 0.0, 0.0);
            assert!(release_to_pool(&mut world, "barrels", entity));
            assert!(world.get::<RigidBodyDisabled>(entity).is_some());
        }

        let mut effects = world.query_filtered::<Entity, With<SpawnEffect>>();
        assert_eq!(effects.iter(&world).count(), 0);
    }

    #[test]
    fn test_pool_tag_without_pool_falls_back_to_fresh() {
        let (mut world, _audio) = test_world();
        let template = ObjectSpawnTemplate {
            use_pooling: true,
            pool_tag: "unregistered".into(),
            ..ObjectSpawnTemplate::new("props/barrel")
        };

        let entity = template.create_object(&mut world, None, None).unwrap();

        assert!(world.get_resource::<ObjectPools>().is_none());
        assert_eq!(world.get::<Name>(entity).map(|n| n.as_str()), Some("barrel"));
    }

    #[test]
    fn test_register_pool_disabled() {
        let (mut world, _audio) = test_world();
        let template = ObjectSpawnTemplate {
            use_pooling: false,
            pool_tag: "barrels".into(),
            ..ObjectSpawnTemplate::new("props/barrel")
        };

        assert_eq!(template.register_pool(&mut world), Ok(false));
        assert!(world.get_resource::<ObjectPools>().is_none());
    }

    #[test]
    fn test_create_never_mutates_template() {
        let (mut world, _audio) = test_world();
        let template = ObjectSpawnTemplate {
            has_rigid_body: true,
            materials: vec![MaterialRef::new("M1")],
            ..ObjectSpawnTemplate::new("props/barrel")
        };
        let pristine = template.clone();

        template.create_object(&mut world, None, None).unwrap();
        template.create_object(&mut world, None, None).unwrap();

        assert_eq!(template, pristine);
    }
}
