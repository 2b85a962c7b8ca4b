//! ECS компоненты scene objects
//!
//! Организация по доменам:
//! - world: классификация (ObjectTag, ObjectLayer, PrefabPath)
//! - physics: настройки rigid body (RigidBodySettings)
//! - collider: shape collider'а (ShapedCollider, MeshGeometry)
//! - render: материалы и тени (Renderer, MaterialRef)

pub mod collider;
pub mod physics;
pub mod render;
pub mod world;

// Re-exports для удобного импорта
pub use collider::*;
pub use physics::*;
pub use render::*;
pub use world::*;
