//! Object pools: "выдай instance в позе P с тегом T"
//!
//! Template с `use_pooling` + непустым `pool_tag` берёт instance отсюда,
//! а не instantiate'ит новый. Нет pool'а для тега → fresh instantiate.
//!
//! Idle instance: `Pooled` + выключенные rigid body / colliders (вся иерархия).
//! Release снимает spawn-эффекты, lease обнуляет velocity и impulse.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{ColliderDisabled, ExternalImpulse, RigidBodyDisabled, Velocity};
use std::collections::HashMap;
use std::sync::Arc;

use crate::components::SpawnEffect;
use crate::prefab::Prefab;
use crate::shared::self_and_descendants;

/// Маркер: instance лежит в pool и не участвует в сцене
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Pooled;

/// Pool контракт
pub trait ObjectPool: Send + Sync {
    /// Выдать instance в позе `transform`; `None` если pool не может
    fn lease(&mut self, world: &mut World, tag: &str, transform: Transform) -> Option<Entity>;

    /// Вернуть instance в pool
    fn release(&mut self, world: &mut World, entity: Entity);
}

/// Stock pool: prewarm `capacity` копий prefab, растёт при нехватке
pub struct PrefabPool {
    prefab: Arc<dyn Prefab>,
    capacity: usize,
    idle: Vec<Entity>,
    prewarmed: bool,
}

impl PrefabPool {
    pub fn new(prefab: Arc<dyn Prefab>, capacity: usize) -> Self {
        Self {
            prefab,
            capacity,
            idle: Vec::new(),
            prewarmed: false,
        }
    }

    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    /// Создать `capacity` спящих instance'ов (один раз)
    pub fn prewarm(&mut self, world: &mut World) {
        if self.prewarmed {
            return;
        }
        self.prewarmed = true;

        for _ in 0..self.capacity {
            let entity = self.prefab.instantiate(world, Transform::IDENTITY);
            park(world, entity);
            self.idle.push(entity);
        }
    }
}

impl ObjectPool for PrefabPool {
    fn lease(&mut self, world: &mut World, tag: &str, transform: Transform) -> Option<Entity> {
        self.prewarm(world);

        // Entity мог быть despawn'ут снаружи, пока лежал в pool
        while let Some(entity) = self.idle.pop() {
            if world.get_entity(entity).is_ok() {
                wake(world, entity, transform);
                crate::logger::log(&format!("♻️ Pool '{}' leased {:?}", tag, entity));
                return Some(entity);
            }
        }

        crate::logger::log(&format!("♻️ Pool '{}' empty, growing", tag));
        Some(self.prefab.instantiate(world, transform))
    }

    fn release(&mut self, world: &mut World, entity: Entity) {
        if world.get_entity(entity).is_err() {
            return;
        }

        despawn_spawn_effects(world, entity);
        park(world, entity);
        self.idle.push(entity);
    }
}

/// Усыпить instance: Pooled + физика выключена на всей иерархии
fn park(world: &mut World, entity: Entity) {
    world.entity_mut(entity).insert(Pooled);
    for part in self_and_descendants(world, entity) {
        world
            .entity_mut(part)
            .insert((RigidBodyDisabled, ColliderDisabled));
    }
}

/// Разбудить instance в позе `transform` с нулевым runtime движением
fn wake(world: &mut World, entity: Entity, transform: Transform) {
    for part in self_and_descendants(world, entity) {
        world
            .entity_mut(part)
            .remove::<(RigidBodyDisabled, ColliderDisabled)>();
    }

    let mut entity_mut = world.entity_mut(entity);
    entity_mut.remove::<Pooled>();
    entity_mut.insert(transform);
    if let Some(mut velocity) = entity_mut.get_mut::<Velocity>() {
        *velocity = Velocity::zero();
    }
    if let Some(mut impulse) = entity_mut.get_mut::<ExternalImpulse>() {
        *impulse = ExternalImpulse::default();
    }
}

/// Despawn детей-эффектов от прошлых spawn'ов
fn despawn_spawn_effects(world: &mut World, entity: Entity) {
    let effects: Vec<Entity> = world
        .get::<Children>(entity)
        .map(|children| children.to_vec())
        .unwrap_or_default()
        .into_iter()
        .filter(|child| world.get::<SpawnEffect>(*child).is_some())
        .collect();

    for effect in effects {
        world.entity_mut(effect).despawn();
    }
}

/// Pools по тегу
#[derive(Resource, Default)]
pub struct ObjectPools {
    pools: HashMap<String, Box<dyn ObjectPool>>,
}

impl ObjectPools {
    pub fn insert(&mut self, tag: impl Into<String>, pool: impl ObjectPool + 'static) -> &mut Self {
        self.pools.insert(tag.into(), Box::new(pool));
        self
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.pools.contains_key(tag)
    }

    pub fn get_mut(&mut self, tag: &str) -> Option<&mut (dyn ObjectPool + 'static)> {
        self.pools.get_mut(tag).map(|pool| pool.as_mut())
    }
}

/// Lease из `ObjectPools` мира; `None` если pool'а нет или он пуст
pub fn lease_from_pools(world: &mut World, tag: &str, transform: Transform) -> Option<Entity> {
    if !world.get_resource::<ObjectPools>()?.contains(tag) {
        return None;
    }

    world.resource_scope(|world, mut pools: Mut<ObjectPools>| {
        pools.get_mut(tag)?.lease(world, tag, transform)
    })
}

/// Вернуть instance в pool по тегу
pub fn release_to_pool(world: &mut World, tag: &str, entity: Entity) -> bool {
    let has_pool = world
        .get_resource::<ObjectPools>()
        .is_some_and(|pools| pools.contains(tag));
    if !has_pool {
        return false;
    }

    world.resource_scope(|world, mut pools: Mut<ObjectPools>| match pools.get_mut(tag) {
        Some(pool) => {
            pool.release(world, entity);
            true
        }
        None => false,
    })
}
