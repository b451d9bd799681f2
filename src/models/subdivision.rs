//! Grid resolutions
//!
//! A subdivision fixes how many grid positions make up one beat, whether
//! those positions are triplets, and which token the playback clock uses to
//! advance one step.

use serde::{Deserialize, Serialize};

use crate::errors::NotationError;

/// Beats per bar (4/4 throughout)
pub const BEATS_PER_BAR: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subdivision {
    #[serde(rename = "8th")]
    Eighth = 0,
    #[serde(rename = "8th-triplet")]
    EighthTriplet = 1,
    #[default]
    #[serde(rename = "16th")]
    Sixteenth = 2,
    #[serde(rename = "16th-triplet")]
    SixteenthTriplet = 3,
    #[serde(rename = "32nd")]
    ThirtySecond = 4,
}

pub const ALL_SUBDIVISIONS: [Subdivision; 5] = [
    Subdivision::Eighth,
    Subdivision::EighthTriplet,
    Subdivision::Sixteenth,
    Subdivision::SixteenthTriplet,
    Subdivision::ThirtySecond,
];

impl Subdivision {
    pub fn id(self) -> &'static str {
        match self {
            Subdivision::Eighth => "8th",
            Subdivision::EighthTriplet => "8th-triplet",
            Subdivision::Sixteenth => "16th",
            Subdivision::SixteenthTriplet => "16th-triplet",
            Subdivision::ThirtySecond => "32nd",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Subdivision::Eighth => "8th Notes",
            Subdivision::EighthTriplet => "8th Triplets",
            Subdivision::Sixteenth => "16th Notes",
            Subdivision::SixteenthTriplet => "16th Triplets",
            Subdivision::ThirtySecond => "32nd Notes",
        }
    }

    /// Grid positions in one beat
    pub fn positions_per_beat(self) -> usize {
        match self {
            Subdivision::Eighth => 2,
            Subdivision::EighthTriplet => 3,
            Subdivision::Sixteenth => 4,
            Subdivision::SixteenthTriplet => 6,
            Subdivision::ThirtySecond => 8,
        }
    }

    pub fn steps_per_bar(self) -> usize {
        self.positions_per_beat() * BEATS_PER_BAR
    }

    pub fn is_triplet(self) -> bool {
        matches!(self, Subdivision::EighthTriplet | Subdivision::SixteenthTriplet)
    }

    /// Step length token understood by the playback clock
    pub fn playback_token(self) -> &'static str {
        match self {
            Subdivision::Eighth => "8n",
            Subdivision::EighthTriplet => "8t",
            Subdivision::Sixteenth => "16n",
            Subdivision::SixteenthTriplet => "16t",
            Subdivision::ThirtySecond => "32n",
        }
    }

    /// Seconds between two steps at the given tempo
    pub fn step_interval_secs(self, tempo_bpm: f64) -> f64 {
        60.0 / tempo_bpm / self.positions_per_beat() as f64
    }

    /// Strict parse of a subdivision id
    pub fn from_id(id: &str) -> Result<Subdivision, NotationError> {
        ALL_SUBDIVISIONS
            .iter()
            .copied()
            .find(|s| s.id() == id)
            .ok_or_else(|| NotationError::UnknownSubdivision(id.to_string()))
    }
}

/// Steps in one bar; unknown ids count as 16 steps
pub fn steps_per_bar(subdivision: Option<Subdivision>) -> usize {
    subdivision.unwrap_or_default().steps_per_bar()
}

pub fn total_steps(bars: usize, subdivision: Option<Subdivision>) -> usize {
    steps_per_bar(subdivision) * bars
}

/// Metadata handed to the front end for selectors and the playback clock
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubdivisionInfo {
    pub id: String,
    pub label: String,
    pub positions_per_beat: usize,
    pub steps_per_bar: usize,
    pub triplet: bool,
    pub playback_token: String,
}

impl From<Subdivision> for SubdivisionInfo {
    fn from(subdivision: Subdivision) -> Self {
        Self {
            id: subdivision.id().to_string(),
            label: subdivision.label().to_string(),
            positions_per_beat: subdivision.positions_per_beat(),
            steps_per_bar: subdivision.steps_per_bar(),
            triplet: subdivision.is_triplet(),
            playback_token: subdivision.playback_token().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_per_bar() {
        assert_eq!(Subdivision::Eighth.steps_per_bar(), 8);
        assert_eq!(Subdivision::EighthTriplet.steps_per_bar(), 12);
        assert_eq!(Subdivision::Sixteenth.steps_per_bar(), 16);
        assert_eq!(Subdivision::SixteenthTriplet.steps_per_bar(), 24);
        assert_eq!(Subdivision::ThirtySecond.steps_per_bar(), 32);
    }

    #[test]
    fn test_unknown_subdivision_counts_as_sixteenth() {
        assert_eq!(steps_per_bar(None), 16);
        assert_eq!(total_steps(2, None), 32);
        assert_eq!(total_steps(2, Some(Subdivision::EighthTriplet)), 24);
    }

    #[test]
    fn test_ids_match_serde() {
        for subdivision in ALL_SUBDIVISIONS {
            let json = serde_json::to_string(&subdivision).unwrap();
            assert_eq!(json, format!("\"{}\"", subdivision.id()));
            assert_eq!(Subdivision::from_id(subdivision.id()).unwrap(), subdivision);
        }
        assert!(Subdivision::from_id("64th").is_err());
    }

    #[test]
    fn test_triplets() {
        let triplets: Vec<_> = ALL_SUBDIVISIONS.iter().filter(|s| s.is_triplet()).collect();
        assert_eq!(triplets, vec![&Subdivision::EighthTriplet, &Subdivision::SixteenthTriplet]);
    }

    #[test]
    fn test_step_interval() {
        // 120 bpm, 4 steps per beat -> 0.125s
        assert!((Subdivision::Sixteenth.step_interval_secs(120.0) - 0.125).abs() < 1e-9);
        assert!((Subdivision::Eighth.step_interval_secs(60.0) - 0.5).abs() < 1e-9);
    }
}
