//! Drum notation WASM API
//!
//! This module provides the JavaScript-facing API for the notation core.
//!
//! # Module Structure
//!
//! - `helpers`: logging macros, serialization and error conversion
//! - `notation`: grid editing, notation derivation and playhead functions

pub mod helpers;
pub mod notation;

pub use notation::{
    analyze_beat, create_empty_grid, cycle_step, derive_notation, initial_pattern,
    playhead_position, resize_grid, subdivision_info, total_steps,
};
