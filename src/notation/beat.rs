//! Beat analysis
//!
//! Turns the grid positions of one beat into rests and chord events. This
//! is the core rhythm calculation: every event's written value comes from
//! the distance to the next onset, looked up in the beat's [`RhythmTable`].

use crate::config::NotationConfig;
use crate::models::grid::Grid;
use crate::models::notation::{Articulation, ChordMember, NotationEvent, NoteValue};

use super::duration::RhythmTable;

/// An onset within a beat: local position, global step and sounding drums
struct Onset {
    position: usize,
    step: usize,
    chord: Vec<ChordMember>,
}

/// Collect the positions of a beat that have at least one active drum
fn collect_onsets(
    grid: &Grid,
    beat_start_step: usize,
    positions_per_beat: usize,
    config: &NotationConfig,
) -> Vec<Onset> {
    (0..positions_per_beat)
        .filter_map(|position| {
            // positions past usize::MAX cannot hold a hit
            let step = beat_start_step.checked_add(position)?;
            let chord: Vec<ChordMember> = grid
                .hits_at(step)
                .into_iter()
                .map(|(drum, velocity)| ChordMember {
                    drum,
                    velocity,
                    articulation: Articulation::from_velocity(velocity, config),
                })
                .collect();
            if chord.is_empty() {
                None
            } else {
                Some(Onset { position, step, chord })
            }
        })
        .collect()
}

/// Analyze one beat with the default configuration
pub fn analyze_beat(grid: &Grid, beat_start_step: usize, rhythm: &RhythmTable) -> Vec<NotationEvent> {
    analyze_beat_with_config(grid, beat_start_step, rhythm, &NotationConfig::default())
}

/// Analyze one beat and return its events in time order
///
/// - A beat with no onsets is a single quarter rest.
/// - Silence before the first onset becomes one leading rest.
/// - Each onset becomes a chord lasting until the next onset or the end of
///   the beat.
pub fn analyze_beat_with_config(
    grid: &Grid,
    beat_start_step: usize,
    rhythm: &RhythmTable,
    config: &NotationConfig,
) -> Vec<NotationEvent> {
    let positions_per_beat = rhythm.positions_per_beat;
    let onsets = collect_onsets(grid, beat_start_step, positions_per_beat, config);

    if onsets.is_empty() {
        return vec![NotationEvent::Rest {
            value: NoteValue::QUARTER,
            step: beat_start_step,
            span: positions_per_beat,
        }];
    }

    let mut events = Vec::with_capacity(onsets.len() + 1);

    let lead = onsets[0].position;
    if lead > 0 {
        events.push(NotationEvent::Rest {
            value: rhythm.value_for_gap(lead),
            step: beat_start_step,
            span: lead,
        });
    }

    let next_positions: Vec<usize> = onsets
        .iter()
        .skip(1)
        .map(|o| o.position)
        .chain(std::iter::once(positions_per_beat))
        .collect();

    for (onset, next) in onsets.into_iter().zip(next_positions) {
        let gap = next - onset.position;
        events.push(NotationEvent::Note {
            value: rhythm.value_for_gap(gap),
            step: onset.step,
            span: gap,
            chord: onset.chord,
        });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::drums::Drum;
    use crate::models::grid::Step;
    use crate::models::notation::NoteDuration;
    use crate::models::subdivision::Subdivision;

    #[test]
    fn test_silent_beat_is_one_quarter_rest() {
        let grid = Grid::empty(16);
        let events = analyze_beat(&grid, 4, Subdivision::Sixteenth.rhythm());
        assert_eq!(
            events,
            vec![NotationEvent::Rest { value: NoteValue::QUARTER, step: 4, span: 4 }]
        );
    }

    #[test]
    fn test_kick_then_hat_are_eighths() {
        let mut grid = Grid::empty(16);
        grid.set(Drum::Kick, 0, Step::hit(0.7));
        grid.set(Drum::HiHat, 2, Step::hit(0.7));

        let events = analyze_beat(&grid, 0, Subdivision::Sixteenth.rhythm());
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].duration(), NoteDuration::Eighth);
        assert_eq!(events[0].drums(), vec![Drum::Kick]);
        assert_eq!(events[1].duration(), NoteDuration::Eighth);
        assert_eq!(events[1].drums(), vec![Drum::HiHat]);
        assert_eq!(events[1].step(), 2);
    }

    #[test]
    fn test_leading_rest() {
        let mut grid = Grid::empty(16);
        grid.set(Drum::Snare, 6, Step::hit(0.7));

        let events = analyze_beat(&grid, 4, Subdivision::Sixteenth.rhythm());
        assert_eq!(events.len(), 2);
        assert!(events[0].is_rest());
        assert_eq!(events[0].step(), 4);
        assert_eq!(events[0].span(), 2);
        assert_eq!(events[0].duration(), NoteDuration::Eighth);
        assert_eq!(events[1].step(), 6);
        assert_eq!(events[1].span(), 2);
    }

    #[test]
    fn test_chord_members_carry_articulation() {
        let mut grid = Grid::empty(8);
        grid.set(Drum::Kick, 0, Step::hit(1.0));
        grid.set(Drum::HiHat, 0, Step::hit(0.3));

        let events = analyze_beat(&grid, 0, Subdivision::Eighth.rhythm());
        assert_eq!(events.len(), 1);
        let chord = events[0].chord();
        assert_eq!(chord[0].drum, Drum::HiHat);
        assert_eq!(chord[0].articulation, Articulation::Ghost);
        assert_eq!(chord[1].drum, Drum::Kick);
        assert_eq!(chord[1].articulation, Articulation::Accent);
        assert_eq!(events[0].duration(), NoteDuration::Quarter);
    }

    #[test]
    fn test_custom_articulation_thresholds() {
        let mut grid = Grid::empty(8);
        grid.set(Drum::Snare, 0, Step::hit(0.5));
        let config = NotationConfig { ghost_max_velocity: 0.5, ..NotationConfig::default() };

        let events = analyze_beat_with_config(&grid, 0, Subdivision::Eighth.rhythm(), &config);
        assert_eq!(events[0].chord()[0].articulation, Articulation::Ghost);
    }

    #[test]
    fn test_beat_start_near_usize_max_is_silent() {
        let mut grid = Grid::empty(16);
        grid.set(Drum::Kick, 0, Step::hit(0.7));
        let events = analyze_beat(&grid, usize::MAX - 1, Subdivision::Sixteenth.rhythm());
        assert_eq!(
            events,
            vec![NotationEvent::Rest { value: NoteValue::QUARTER, step: usize::MAX - 1, span: 4 }]
        );
    }

    #[test]
    fn test_inactive_steps_with_odd_velocity_ignored() {
        let mut grid = Grid::empty(16);
        grid.set(Drum::Snare, 1, Step { active: false, velocity: 1.0 });
        let events = analyze_beat(&grid, 0, Subdivision::Sixteenth.rhythm());
        assert_eq!(events.len(), 1);
        assert!(events[0].is_rest());
    }
}
