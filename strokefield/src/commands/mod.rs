//! Command implementations

pub mod config;
pub mod mask;
pub mod palettes;
pub mod render;
pub mod simulate;
