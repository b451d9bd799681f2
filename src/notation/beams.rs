// Beam grouping - functions for picking the beamed notes of a beat

use crate::models::notation::{BeamGroup, NotationEvent};

/// Minimum beamable notes for a beam to be drawn
pub const MIN_BEAM_NOTES: usize = 2;

/// Indexes of the notes in a beat that carry a flag or beam
/// Rests and quarter notes are skipped
pub fn beamable_indices(events: &[NotationEvent]) -> Vec<usize> {
    events
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_beamable())
        .map(|(i, _)| i)
        .collect()
}

/// Beam for one beat, if it has enough beamable notes
/// Beams never span beats, so only the given events are considered
pub fn beam_for_beat(events: &[NotationEvent]) -> Option<BeamGroup> {
    let members = beamable_indices(events);
    if members.len() >= MIN_BEAM_NOTES {
        Some(BeamGroup { members })
    } else {
        None
    }
}
