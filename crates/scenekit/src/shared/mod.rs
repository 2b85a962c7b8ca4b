//! Shared helpers — cross-cutting утилиты
//!
//! - hierarchy: обход потомков, world position с учётом parent

pub mod hierarchy;

pub use hierarchy::*;
