//! Shared utilities for the strokefield CLI

pub mod progress;
pub mod table;

pub use progress::*;
pub use table::*;
