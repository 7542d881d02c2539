//! # Utilities Module
//!
//! Small geometric helpers shared by generation, visibility, and AI.

pub mod math;
pub mod reachability;

pub use math::*;
pub use reachability::*;
