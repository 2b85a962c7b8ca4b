//! Collider компоненты: какой shape висит на instance
//!
//! `ShapedCollider` — запись о collider в терминах template (Box/Sphere/...).
//! Рядом лежит `bevy_rapier3d::Collider` с реальной геометрией.

use bevy::prelude::*;

/// Геометрия collider (уже разрешённая из template полей)
#[derive(Debug, Clone, PartialEq, Reflect)]
pub enum ColliderShape {
    /// Полный размер (не half-extents)
    Box { size: Vec3 },
    Sphere { radius: f32 },
    /// `height` — полная высота вместе с полусферами
    Capsule { radius: f32, height: f32 },
    /// Convex hull по `MeshGeometry` instance
    Mesh,
}

impl ColliderShape {
    pub fn label(&self) -> &'static str {
        match self {
            ColliderShape::Box { .. } => "Box",
            ColliderShape::Sphere { .. } => "Sphere",
            ColliderShape::Capsule { .. } => "Capsule",
            ColliderShape::Mesh => "Mesh",
        }
    }
}

/// Collider, прикреплённый template'ом (или prefab'ом)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ShapedCollider {
    pub shape: ColliderShape,
    pub is_trigger: bool,
}

/// Точки меша для Mesh collider
///
/// Host кладёт сюда vertex positions визуального меша (local space).
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MeshGeometry {
    pub points: Vec<Vec3>,
}
