//! Audio capability для spawn-эффектов
//!
//! Проигрывание — забота host audio. Мы только просим "сыграй clip один раз"
//! через `AudioPlayer`, который кладётся в resource `SpawnAudio`.
//! Нет resource → звук пропускается (headless режим).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Ссылка на audio clip host'а
#[derive(Debug, Clone, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioClipRef(pub String);

impl AudioClipRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }
}

/// One-shot playback (non-blocking, lifecycle звука — на host)
pub trait AudioPlayer: Send + Sync {
    fn play_one_shot(&self, clip: &AudioClipRef, emitter: Entity, position: Vec3);
}

/// Injected audio player
#[derive(Resource)]
pub struct SpawnAudio(pub Box<dyn AudioPlayer>);

impl SpawnAudio {
    pub fn new(player: impl AudioPlayer + 'static) -> Self {
        Self(Box::new(player))
    }
}

/// AudioPlayer, который только пишет в лог (для headless демо)
pub struct LoggingAudioPlayer;

impl AudioPlayer for LoggingAudioPlayer {
    fn play_one_shot(&self, clip: &AudioClipRef, emitter: Entity, position: Vec3) {
        crate::logger::log(&format!(
            "🔊 play_one_shot '{}' for {:?} at {:?}",
            clip.0, emitter, position
        ));
    }
}
