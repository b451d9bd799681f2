//! Grid to percussion-staff derivation
//!
//! # Module Structure
//!
//! - **duration**: gap-to-value lookup tables per subdivision
//! - **beat**: per-beat analysis into rests and chords
//! - **beams**: per-beat beam grouping
//!
//! [`derive_notation`] runs all three over every beat of a pattern and
//! returns a [`Notation`] for the staff renderer.

pub mod beams;
pub mod beat;
pub mod duration;

pub use beams::{beam_for_beat, beamable_indices};
pub use beat::{analyze_beat, analyze_beat_with_config};
pub use duration::RhythmTable;

use serde::{Deserialize, Serialize};

use crate::config::NotationConfig;
use crate::models::grid::Grid;
use crate::models::notation::{BeamGroup, BeatGroup, NotationEvent};
use crate::models::subdivision::{Subdivision, BEATS_PER_BAR};

/// Derived staff content for a whole pattern
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notation {
    /// `None` when the pattern used an unrecognized subdivision
    pub subdivision: Option<Subdivision>,

    pub bars: usize,

    pub positions_per_beat: usize,

    /// One group per beat, `BEATS_PER_BAR * bars` in total
    pub beats: Vec<BeatGroup>,

    /// Beat indexes followed by a barline (every bar but the last)
    pub barlines_after: Vec<usize>,
}

/// Derive notation with the default configuration
pub fn derive_notation(grid: &Grid, rhythm: &RhythmTable, bars: usize) -> Notation {
    derive_notation_with_config(grid, rhythm, bars, &NotationConfig::default())
}

pub fn derive_notation_with_config(
    grid: &Grid,
    rhythm: &RhythmTable,
    bars: usize,
    config: &NotationConfig,
) -> Notation {
    let positions_per_beat = rhythm.positions_per_beat;
    let total_beats = BEATS_PER_BAR * bars;

    let beats: Vec<BeatGroup> = (0..total_beats)
        .map(|index| {
            let start_step = index * positions_per_beat;
            let events = analyze_beat_with_config(grid, start_step, rhythm, config);
            let beam = beam_for_beat(&events);
            BeatGroup {
                index,
                start_step,
                width: positions_per_beat,
                events,
                beam,
            }
        })
        .collect();

    let barlines_after = (1..bars).map(|bar| bar * BEATS_PER_BAR - 1).collect();

    log::debug!(
        "derived {} beats ({} events) for {} bar(s)",
        beats.len(),
        beats.iter().map(|b| b.events.len()).sum::<usize>(),
        bars
    );

    Notation {
        subdivision: rhythm.subdivision,
        bars,
        positions_per_beat,
        beats,
        barlines_after,
    }
}

impl Notation {
    pub fn total_steps(&self) -> usize {
        self.beats.len() * self.positions_per_beat
    }

    /// All events in render order
    pub fn events(&self) -> impl Iterator<Item = &NotationEvent> {
        self.beats.iter().flat_map(|b| b.events.iter())
    }

    /// Step of every event in render order
    ///
    /// The layout stage pairs this with the x position it gives each event
    /// to build the playhead anchors.
    pub fn anchor_steps(&self) -> Vec<usize> {
        self.events().map(NotationEvent::step).collect()
    }

    /// The event sounding (or resting) at a global step
    pub fn event_at_step(&self, step: usize) -> Option<&NotationEvent> {
        self.beats
            .iter()
            .find(|b| b.contains(step))
            .and_then(|b| b.events.iter().find(|e| e.covers(step)))
    }

    pub fn beat_at_step(&self, step: usize) -> Option<&BeatGroup> {
        self.beats.get(step / self.positions_per_beat.max(1))
    }

    pub fn has_barline_after(&self, beat_index: usize) -> bool {
        self.barlines_after.contains(&beat_index)
    }

    /// Every beam in render order, with the beat it belongs to
    pub fn beams(&self) -> impl Iterator<Item = (&BeatGroup, &BeamGroup)> {
        self.beats
            .iter()
            .filter_map(|beat| beat.beam.as_ref().map(|beam| (beat, beam)))
    }

    pub fn beam_count(&self) -> usize {
        self.beams().count()
    }
}
