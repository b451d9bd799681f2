//! Notation configuration
//!
//! Tunables passed in from JavaScript. Every field has a default so the host
//! may send a partial object, or nothing at all.

use serde::{Deserialize, Serialize};

/// Configuration for notation derivation and the playhead
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct NotationConfig {
    /// Velocities at or below this are ghost notes
    pub ghost_max_velocity: f32,

    /// Velocities at or above this are accents
    pub accent_min_velocity: f32,

    /// Pixels per step used to extrapolate the playhead when the rendered
    /// anchors do not give a usable ratio
    pub fallback_px_per_step: f64,
}

impl Default for NotationConfig {
    fn default() -> Self {
        Self {
            ghost_max_velocity: 0.35,
            accent_min_velocity: 0.95,
            fallback_px_per_step: 20.0,
        }
    }
}
