//! Hierarchy helpers: потомки entity и world-space позиция

use bevy::prelude::*;

/// Entity + все потомки (breadth-first, root первым)
pub fn self_and_descendants(world: &World, root: Entity) -> Vec<Entity> {
    let mut result = vec![root];
    let mut cursor = 0;

    while cursor < result.len() {
        if let Some(children) = world.get::<Children>(result[cursor]) {
            result.extend(children.to_vec());
        }
        cursor += 1;
    }

    result
}

/// GlobalTransform parent'а (None для root entity)
fn parent_global(world: &World, entity: Entity) -> Option<GlobalTransform> {
    let parent = world.get::<ChildOf>(entity)?.parent();
    world.get::<GlobalTransform>(parent).copied()
}

/// World position entity (local translation через parent GlobalTransform)
pub fn world_position(world: &World, entity: Entity) -> Option<Vec3> {
    let local = world.get::<Transform>(entity)?.translation;
    Some(match parent_global(world, entity) {
        Some(parent) => parent.transform_point(local),
        None => local,
    })
}

/// Поставить entity в world position (Transform добавляется, если его нет)
pub fn set_world_position(world: &mut World, entity: Entity, position: Vec3) {
    let local = match parent_global(world, entity) {
        Some(parent) => parent.affine().inverse().transform_point3(position),
        None => position,
    };

    match world.get_mut::<Transform>(entity) {
        Some(mut transform) => transform.translation = local,
        None => {
            world.entity_mut(entity).insert(Transform::from_translation(local));
        }
    }
}
