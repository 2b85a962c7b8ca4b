//! Spawn instance из template
//!
//! Preconditions проверяются ДО любых изменений мира:
//! prefab задан и зарегистрирован в PrefabLibrary. Иначе — ошибка и ноль мутаций.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use std::sync::Arc;

use super::{ObjectSpawnTemplate, SpawnError};
use crate::audio::{AudioClipRef, SpawnAudio};
use crate::components::SpawnEffect;
use crate::pool::{lease_from_pools, ObjectPools, PrefabPool};
use crate::prefab::{resolve_prefab, Prefab};
use crate::DeterministicRng;

impl ObjectSpawnTemplate {
    /// Создать и одеть новый instance
    ///
    /// `position`/`rotation` = None → поза из template.
    /// Возвращённый entity принадлежит миру.
    pub fn create_object(
        &self,
        world: &mut World,
        position: Option<Vec3>,
        rotation: Option<Quat>,
    ) -> Result<Entity, SpawnError> {
        let prefab = self.resolve_source(world)?;

        let transform = Transform::from_translation(position.unwrap_or(self.position))
            .with_rotation(rotation.unwrap_or_else(|| self.spawn_rotation()));

        let instance = self.obtain_instance(world, prefab.as_ref(), transform);

        let name = if self.object_name.is_empty() {
            prefab.name().to_string()
        } else {
            self.object_name.clone()
        };
        let mut entity = world.entity_mut(instance);
        entity.insert(Name::new(name));
        if let Some(path) = &self.prefab {
            entity.insert(path.clone());
        }

        self.configure_object(world, instance)?;
        self.play_spawn_effects(world, instance);

        crate::logger::log(&format!(
            "✨ Spawned '{}' as {:?} at {:?}",
            self.display_name(),
            instance,
            transform.translation
        ));

        Ok(instance)
    }

    /// Prefab из PrefabLibrary (MissingPrefab / UnknownPrefab)
    fn resolve_source(&self, world: &World) -> Result<Arc<dyn Prefab>, SpawnError> {
        let path = self.prefab.as_ref().ok_or(SpawnError::MissingPrefab)?;
        resolve_prefab(world, path).ok_or_else(|| SpawnError::UnknownPrefab(path.path.clone()))
    }

    /// Pool lease (если template pooled и pool есть) или fresh instantiate
    fn obtain_instance(&self, world: &mut World, prefab: &dyn Prefab, transform: Transform) -> Entity {
        if self.wants_pool() {
            if let Some(entity) = lease_from_pools(world, &self.pool_tag, transform) {
                return entity;
            }
            crate::logger::log(&format!(
                "Pool '{}' unavailable for '{}', instantiating fresh",
                self.pool_tag,
                self.display_name()
            ));
        }

        prefab.instantiate(world, transform)
    }

    /// Зарегистрировать `PrefabPool` (pool_size копий) под `pool_tag`
    ///
    /// Уже зарегистрированный pool не трогаем. `Ok(false)` — pooling выключен.
    pub fn register_pool(&self, world: &mut World) -> Result<bool, SpawnError> {
        if !self.wants_pool() {
            return Ok(false);
        }

        let prefab = self.resolve_source(world)?;
        let mut pools = world.get_resource_or_insert_with(ObjectPools::default);
        if !pools.contains(&self.pool_tag) {
            pools.insert(self.pool_tag.clone(), PrefabPool::new(prefab, self.pool_size));
        }

        Ok(true)
    }

    /// Звук (случайный из sounds) + эффекты детьми instance
    fn play_spawn_effects(&self, world: &mut World, instance: Entity) {
        if let Some(clip) = self.pick_sound(world) {
            let position = crate::shared::world_position(world, instance).unwrap_or(Vec3::ZERO);
            match world.get_resource::<SpawnAudio>() {
                Some(audio) => audio.0.play_one_shot(&clip, instance, position),
                None => crate::logger::log(&format!(
                    "No SpawnAudio installed, skipping '{}'",
                    clip.0
                )),
            }
        }

        for path in &self.effects {
            let Some(effect) = resolve_prefab(world, path) else {
                crate::logger::log_warning(&format!(
                    "Spawn effect '{}' of '{}' is not registered, skipped",
                    path,
                    self.display_name()
                ));
                continue;
            };

            // Identity local transform = поза instance
            let child = effect.instantiate(world, Transform::IDENTITY);
            world.entity_mut(child).insert(SpawnEffect);
            world.entity_mut(instance).add_child(child);
        }
    }

    /// Равновероятный выбор звука (DeterministicRng, если он есть)
    fn pick_sound(&self, world: &mut World) -> Option<AudioClipRef> {
        if self.sounds.is_empty() {
            return None;
        }

        match world.get_resource_mut::<DeterministicRng>() {
            Some(mut rng) => self.sounds.choose(&mut rng.rng).cloned(),
            None => self.sounds.choose(&mut rand::thread_rng()).cloned(),
        }
    }
}
