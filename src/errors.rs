//! Error types for the notation core
//!
//! Nothing in notation derivation itself fails: unknown subdivisions fall
//! back to a default rhythm table and missing anchors hide the playhead.
//! These errors come from parsing identifiers and editing the grid.

use thiserror::Error;

use crate::models::drums::Drum;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NotationError {
    #[error("Unknown subdivision: {0}")]
    UnknownSubdivision(String),

    #[error("Unknown drum: {0}")]
    UnknownDrum(String),

    /// Step index past the end of a drum row
    #[error("Step {step} out of range for {drum} (grid has {len} steps)")]
    StepOutOfRange { drum: Drum, step: usize, len: usize },

    /// Anchor step and x arrays from the layout stage differ in length
    #[error("Anchor arrays differ in length: {steps} steps, {xs} x positions")]
    MismatchedAnchors { steps: usize, xs: usize },
}
