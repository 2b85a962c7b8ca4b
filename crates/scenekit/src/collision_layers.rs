//! Collision Layers
//!
//! `ObjectLayer` (0-31) → Rapier `CollisionGroups`.
//!
//! ## Архитектура:
//! - **Membership (битовая маска):** на каком слое объект находится (`1 << layer`)
//! - **Filter (битовая маска):** с какими слоями коллидирует (по умолчанию все)
//!
//! ## Использование:
//! ```rust
//! use scenekit::collision_layers::*;
//!
//! let groups = groups_for_layer(3).expect("layer < 32");
//! assert_eq!(groups.memberships.bits(), 0b1000);
//! ```

use bevy_rapier3d::prelude::{CollisionGroups, Group};

/// Количество слоёв (u32 битовая маска)
pub const LAYER_COUNT: u32 = 32;

/// Layer 0: Default
pub const LAYER_DEFAULT: u32 = 0;

/// Membership бит для слоя, `None` если слой вне 0..32
pub fn layer_bit(layer: u32) -> Option<u32> {
    1u32.checked_shl(layer)
}

/// CollisionGroups для объекта на слое `layer`
///
/// Filter = все слои (матрица слоёв — забота host physics settings).
pub fn groups_for_layer(layer: u32) -> Option<CollisionGroups> {
    let bit = layer_bit(layer)?;
    Some(CollisionGroups::new(Group::from_bits_truncate(bit), Group::ALL))
}

/// Название слоя для debug логов
pub fn get_layer_name(layer: u32) -> &'static str {
    match layer {
        LAYER_DEFAULT => "Default",
        l if l < LAYER_COUNT => "User",
        _ => "Invalid",
    }
}
