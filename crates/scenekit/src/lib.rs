//! scenekit — scene object utilities
//!
//! ECS-слой на Bevy 0.16 (headless) + Rapier компоненты.
//!
//! Два независимых компонента, общий только `World`:
//! - template: `ObjectSpawnTemplate` → instantiate + configure prefab
//! - movement: `MovementDispatcher` → teleport / push / move-to для живых объектов

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod audio;
pub mod collision_layers;
pub mod components;
pub mod logger;
pub mod movement;
pub mod pool;
pub mod prefab;
pub mod shared;
pub mod template;

// Re-export для удобства
pub use audio::{AudioClipRef, AudioPlayer, SpawnAudio};
pub use components::*;
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel};
pub use movement::{
    MovementDispatcher, MovementDispatcherPlugin, MovementError, MovementEvent, MovementKind,
    MovementOutcome, MovementRequest,
};
pub use prefab::{Prefab, PrefabBlueprint, PrefabLibrary};
pub use template::{ColliderType, ObjectManagementPlugin, ObjectSpawnTemplate, SpawnError, SpawnRequest};

/// Главный plugin (объединяет spawn + movement)
pub struct SceneKitPlugin;

impl Plugin for SceneKitPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz: MoveToPosition шагает на Time<Fixed>::delta
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_plugins((ObjectManagementPlugin, MovementDispatcherPlugin));

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless работы
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot компонентов `T` в мире (для сравнения состояний)
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
