//! Models module for the drum notation core
//!
//! This module contains the grid, pattern and derived notation data
//! structures.

pub mod drums;
pub mod grid;
pub mod notation;
pub mod pattern;
pub mod subdivision;

// Re-export commonly used types
pub use drums::{Drum, DRUM_ORDER};
pub use grid::{Grid, Step, DEFAULT_VELOCITY};
pub use notation::*;
pub use pattern::Pattern;
pub use subdivision::{Subdivision, BEATS_PER_BAR};
