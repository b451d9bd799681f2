//! Drum kit definitions
//!
//! The kit is a fixed set of five voices. Their declaration order is the
//! display order used for grid rows, chord members and staff placement.

use serde::{Deserialize, Serialize};

use crate::errors::NotationError;

/// One voice of the drum kit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Drum {
    HiHat = 0,
    Rack = 1,
    Snare = 2,
    Floor = 3,
    Kick = 4,
}

/// Top of the staff to the bottom
pub const DRUM_ORDER: [Drum; 5] = [Drum::HiHat, Drum::Rack, Drum::Snare, Drum::Floor, Drum::Kick];

/// Staff key used for rests (middle line)
pub const REST_STAFF_KEY: &str = "c/5";

impl Drum {
    /// Stable identifier used in serialized grids
    pub fn id(self) -> &'static str {
        match self {
            Drum::HiHat => "hihat",
            Drum::Rack => "rack",
            Drum::Snare => "snare",
            Drum::Floor => "floor",
            Drum::Kick => "kick",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Drum::HiHat => "Hi-Hat",
            Drum::Rack => "Rack Tom",
            Drum::Snare => "Snare",
            Drum::Floor => "Floor Tom",
            Drum::Kick => "Kick",
        }
    }

    /// Percussion staff key in `note/octave[/notehead]` form
    ///
    /// The hi-hat sits on the top line with an x notehead; everything else
    /// uses a regular notehead in the spaces and on the middle line.
    pub fn staff_key(self) -> &'static str {
        match self {
            Drum::HiHat => "g/5/x2",
            Drum::Rack => "e/5",
            Drum::Snare => "c/5",
            Drum::Floor => "a/4",
            Drum::Kick => "f/4",
        }
    }

    /// Parse a drum identifier
    pub fn from_id(id: &str) -> Result<Drum, NotationError> {
        DRUM_ORDER
            .iter()
            .copied()
            .find(|drum| drum.id() == id)
            .ok_or_else(|| NotationError::UnknownDrum(id.to_string()))
    }
}

impl std::fmt::Display for Drum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
