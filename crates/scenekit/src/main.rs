//! Headless демо scenekit
//!
//! Spawn'ит объект из template и ведёт его MoveToPosition до цели.

use std::sync::Arc;

use bevy::prelude::*;
use scenekit::audio::LoggingAudioPlayer;
use scenekit::movement::MovementOutcome;
use scenekit::*;

fn main() {
    let seed = 42;
    println!("Starting scenekit headless demo (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SceneKitPlugin)
        .insert_resource(SpawnAudio::new(LoggingAudioPlayer));

    app.world_mut()
        .resource_mut::<PrefabLibrary>()
        .register(
            "props/crate",
            PrefabBlueprint::new("crate").with_renderer(Renderer::default()),
        );

    let template = Arc::new(ObjectSpawnTemplate {
        object_name: "Demo Crate".into(),
        has_rigid_body: true,
        is_kinematic: true,
        collider_type: ColliderType::Box,
        materials: vec![MaterialRef::new("materials/wood")],
        sounds: vec![AudioClipRef::new("sfx/spawn")],
        ..ObjectSpawnTemplate::new("props/crate")
    });

    let entity = match template.create_object(app.world_mut(), None, None) {
        Ok(entity) => entity,
        Err(error) => {
            eprintln!("Spawn failed: {}", error);
            return;
        }
    };

    let dispatcher = *app.world().resource::<MovementDispatcher>();
    let target = Vec3::new(3.0, 0.0, 0.0);

    // Время в демо не тикает само — двигаем fixed delta руками
    let mut time = Time::<()>::default();
    time.advance_by(Time::<Fixed>::from_hz(60.0).timestep());
    app.world_mut().insert_resource(time);

    for tick in 0..1000 {
        match dispatcher.execute_event(
            app.world_mut(),
            MovementKind::MoveToPosition,
            entity,
            Some(target),
            None,
            Some(2.0),
        ) {
            Ok(MovementOutcome::Moved { position, remaining }) => {
                if tick % 20 == 0 || remaining <= 0.0 {
                    println!("Tick {}: {:?} (remaining {:.3})", tick, position, remaining);
                }
                if remaining <= 0.0 {
                    break;
                }
            }
            Ok(other) => println!("Tick {}: {:?}", tick, other),
            Err(error) => {
                eprintln!("Move failed: {}", error);
                break;
            }
        }
    }

    println!("Demo complete!");
}
