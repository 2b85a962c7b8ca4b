//! Prefab source: что именно instantiate'ить по `PrefabPath`
//!
//! Архитектура:
//! - `Prefab` trait — host-specific сборка entity (меш, визуалы, скрипты)
//! - `PrefabBlueprint` — stock data-driven реализация
//! - `PrefabLibrary` resource — path → prefab

use bevy::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use crate::components::{ColliderShape, MeshGeometry, PrefabPath, Renderer, ShapedCollider};

/// Источник instance'ов
pub trait Prefab: Send + Sync {
    /// Имя prefab (default имя instance)
    fn name(&self) -> &str;

    /// Создать одну копию в мире с заданным transform (root, без parent)
    fn instantiate(&self, world: &mut World, transform: Transform) -> Entity;
}

/// Data-driven prefab
///
/// Root entity: Transform + Name + (Renderer, MeshGeometry, ShapedCollider — если заданы).
/// `child_renderers` спавнятся детьми root'а (части модели).
#[derive(Debug, Clone, Default)]
pub struct PrefabBlueprint {
    pub name: String,
    pub renderer: Option<Renderer>,
    pub child_renderers: Vec<Renderer>,
    pub mesh: Option<MeshGeometry>,
    /// Collider "из коробки" (template может его заменить)
    pub collider: Option<ColliderShape>,
}

impl PrefabBlueprint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..default()
        }
    }

    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_child_renderer(mut self, renderer: Renderer) -> Self {
        self.child_renderers.push(renderer);
        self
    }

    pub fn with_mesh(mut self, points: Vec<Vec3>) -> Self {
        self.mesh = Some(MeshGeometry { points });
        self
    }

    pub fn with_collider(mut self, shape: ColliderShape) -> Self {
        self.collider = Some(shape);
        self
    }
}

impl Prefab for PrefabBlueprint {
    fn name(&self) -> &str {
        &self.name
    }

    fn instantiate(&self, world: &mut World, transform: Transform) -> Entity {
        let mut root = world.spawn((transform, Name::new(self.name.clone())));

        if let Some(renderer) = &self.renderer {
            root.insert(renderer.clone());
        }
        if let Some(mesh) = &self.mesh {
            root.insert(mesh.clone());
        }
        if let Some(shape) = &self.collider {
            root.insert(ShapedCollider {
                shape: shape.clone(),
                is_trigger: false,
            });
        }
        let root = root.id();

        for (index, renderer) in self.child_renderers.iter().enumerate() {
            let part = world
                .spawn((
                    Transform::IDENTITY,
                    Name::new(format!("{}/part{}", self.name, index)),
                    renderer.clone(),
                ))
                .id();
            world.entity_mut(root).add_child(part);
        }

        root
    }
}

/// Реестр prefab'ов по пути
#[derive(Resource, Default, Clone)]
pub struct PrefabLibrary {
    prefabs: HashMap<PrefabPath, Arc<dyn Prefab>>,
}

impl PrefabLibrary {
    pub fn register(&mut self, path: impl Into<String>, prefab: impl Prefab + 'static) -> &mut Self {
        self.prefabs.insert(PrefabPath::new(path), Arc::new(prefab));
        self
    }

    pub fn get(&self, path: &PrefabPath) -> Option<Arc<dyn Prefab>> {
        self.prefabs.get(path).cloned()
    }

    pub fn contains(&self, path: &PrefabPath) -> bool {
        self.prefabs.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.prefabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefabs.is_empty()
    }
}

/// Найти prefab по пути в `PrefabLibrary` мира
pub fn resolve_prefab(world: &World, path: &PrefabPath) -> Option<Arc<dyn Prefab>> {
    world.get_resource::<PrefabLibrary>()?.get(path)
}
