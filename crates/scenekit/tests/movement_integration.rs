//! Movement integration test
//!
//! Проверяем:
//! - Ровно один MovementDispatcher после plugin (повторный install отброшен)
//! - MovementRequest → process_movement_requests → движение / MovementFailed
//! - Spawn из template + движение без связи между компонентами

use std::time::Duration;

use bevy::prelude::*;
use bevy_rapier3d::prelude::ExternalImpulse;
use scenekit::movement::{install_dispatcher, MovementFailed};
use scenekit::*;

fn create_movement_app() -> App {
    let mut app = create_headless_app(42);
    app.add_plugins(SceneKitPlugin);
    app
}

#[test]
fn test_plugin_installs_single_dispatcher() {
    let mut app = create_movement_app();
    let installed = app.world().resource::<MovementDispatcher>().id();

    assert!(!install_dispatcher(app.world_mut(), MovementDispatcher::new()));
    assert_eq!(app.world().resource::<MovementDispatcher>().id(), installed);
}

#[test]
fn test_teleport_request_moves_target() {
    let mut app = create_movement_app();
    let target = app.world_mut().spawn(Transform::from_xyz(5.0, 0.0, 5.0)).id();

    app.world_mut().send_event(MovementRequest {
        target,
        event: MovementEvent::Teleport {
            end: Vec3::new(1.0, 2.0, 3.0),
        },
    });
    app.world_mut().run_schedule(FixedUpdate);

    assert_eq!(
        app.world().get::<Transform>(target).unwrap().translation,
        Vec3::new(1.0, 2.0, 3.0)
    );
}

#[test]
fn test_push_request_without_body_emits_failure() {
    let mut app = create_movement_app();
    let target = app.world_mut().spawn(Transform::IDENTITY).id();

    app.world_mut().send_event(MovementRequest {
        target,
        event: MovementEvent::PushInDirection {
            impulse: Vec3::new(0.0, 5.0, 0.0),
            start: None,
        },
    });
    app.world_mut().run_schedule(FixedUpdate);

    let failures: Vec<MovementError> = app
        .world()
        .resource::<Events<MovementFailed>>()
        .iter_current_update_events()
        .map(|failed| failed.error)
        .collect();
    assert_eq!(failures, vec![MovementError::MissingRigidBody(target)]);
    assert_eq!(app.world().get::<Transform>(target).unwrap().translation, Vec3::ZERO);
}

#[test]
fn test_spawned_object_can_be_pushed_and_moved() {
    let mut app = create_movement_app();
    app.world_mut()
        .resource_mut::<PrefabLibrary>()
        .register("props/ball", PrefabBlueprint::new("ball"));

    let template = ObjectSpawnTemplate {
        has_rigid_body: true,
        collider_type: ColliderType::Sphere,
        ..ObjectSpawnTemplate::new("props/ball")
    };
    let ball = template.create_object(app.world_mut(), None, None).unwrap();
    let dispatcher = *app.world().resource::<MovementDispatcher>();

    dispatcher
        .execute_event(
            app.world_mut(),
            MovementKind::PushInDirection,
            ball,
            Some(Vec3::new(0.0, 5.0, 0.0)),
            None,
            None,
        )
        .unwrap();
    assert_eq!(
        app.world().get::<ExternalImpulse>(ball).unwrap().impulse,
        Vec3::new(0.0, 5.0, 0.0)
    );

    // dt = 0.25s, speed 4 → шаг 1m; 3m → ровно 3 вызова
    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_millis(250));
    app.world_mut().insert_resource(time);

    let end = Vec3::new(0.0, 0.0, -3.0);
    let mut calls = 0;
    while !dispatcher
        .execute_event(app.world_mut(), MovementKind::MoveToPosition, ball, Some(end), None, Some(4.0))
        .unwrap()
        .arrived()
    {
        calls += 1;
        assert!(calls < 10);
    }

    assert_eq!(calls + 1, 3);
    assert_eq!(app.world().get::<Transform>(ball).unwrap().translation, end);
}
