//! Notation models for derived staff content
//!
//! This module defines the events, chords and beat groups produced by the
//! notation deriver. None of it is persisted; it is rebuilt from the grid on
//! every change.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use super::drums::{Drum, REST_STAFF_KEY};
use crate::config::NotationConfig;

/// Written note length
///
/// Serialized as its denominator (`4`, `8`, `16`, `32`), which is also the
/// duration code the staff renderer expects.
#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NoteDuration {
    Quarter = 4,
    Eighth = 8,
    Sixteenth = 16,
    ThirtySecond = 32,
}

impl NoteDuration {
    pub fn denominator(self) -> u8 {
        self as u8
    }

    /// Anything shorter than a quarter carries a flag or a beam
    pub fn is_beamable(self) -> bool {
        self < NoteDuration::Quarter
    }
}

/// Longer durations compare greater
impl Ord for NoteDuration {
    fn cmp(&self, other: &Self) -> Ordering {
        other.denominator().cmp(&self.denominator())
    }
}

impl PartialOrd for NoteDuration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A duration plus whether it is written inside a triplet
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NoteValue {
    pub duration: NoteDuration,
    pub triplet: bool,
}

impl NoteValue {
    pub const fn plain(duration: NoteDuration) -> Self {
        Self { duration, triplet: false }
    }

    pub const fn triplet(duration: NoteDuration) -> Self {
        Self { duration, triplet: true }
    }

    pub const QUARTER: NoteValue = NoteValue::plain(NoteDuration::Quarter);
}

/// How a hit is drawn, derived from its velocity
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Articulation {
    Normal,
    /// Parenthesized notehead
    Ghost,
    /// `>` above the beam
    Accent,
}

impl Articulation {
    pub fn from_velocity(velocity: f32, config: &NotationConfig) -> Self {
        if velocity <= config.ghost_max_velocity {
            Articulation::Ghost
        } else if velocity >= config.accent_min_velocity {
            Articulation::Accent
        } else {
            Articulation::Normal
        }
    }
}

/// One drum sounding in a note event
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ChordMember {
    pub drum: Drum,
    pub velocity: f32,
    pub articulation: Articulation,
}

/// A rest or a (possibly single-member) chord
///
/// `step` is the global grid step the event starts on and `span` the number
/// of grid positions it covers within its beat.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NotationEvent {
    Rest {
        value: NoteValue,
        step: usize,
        span: usize,
    },
    Note {
        value: NoteValue,
        step: usize,
        span: usize,
        chord: Vec<ChordMember>,
    },
}

impl NotationEvent {
    pub fn value(&self) -> NoteValue {
        match self {
            NotationEvent::Rest { value, .. } | NotationEvent::Note { value, .. } => *value,
        }
    }

    pub fn duration(&self) -> NoteDuration {
        self.value().duration
    }

    pub fn step(&self) -> usize {
        match self {
            NotationEvent::Rest { step, .. } | NotationEvent::Note { step, .. } => *step,
        }
    }

    pub fn span(&self) -> usize {
        match self {
            NotationEvent::Rest { span, .. } | NotationEvent::Note { span, .. } => *span,
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, NotationEvent::Rest { .. })
    }

    /// Chord members in display order; empty for rests
    pub fn chord(&self) -> &[ChordMember] {
        match self {
            NotationEvent::Rest { .. } => &[],
            NotationEvent::Note { chord, .. } => chord,
        }
    }

    pub fn drums(&self) -> Vec<Drum> {
        self.chord().iter().map(|m| m.drum).collect()
    }

    /// Notes shorter than a quarter; rests never beam
    pub fn is_beamable(&self) -> bool {
        match self {
            NotationEvent::Rest { .. } => false,
            NotationEvent::Note { value, .. } => value.duration.is_beamable(),
        }
    }

    /// Whether `step` falls inside this event
    pub fn covers(&self, step: usize) -> bool {
        step >= self.step() && step < self.step() + self.span()
    }

    /// Staff keys to draw; rests sit on the middle line
    pub fn staff_keys(&self) -> Vec<&'static str> {
        match self {
            NotationEvent::Rest { .. } => vec![REST_STAFF_KEY],
            NotationEvent::Note { chord, .. } => chord.iter().map(|m| m.drum.staff_key()).collect(),
        }
    }

    /// Duration code for the staff renderer, e.g. `"8"` or `"4r"`
    pub fn duration_code(&self) -> String {
        let denominator = self.duration().denominator();
        if self.is_rest() {
            format!("{}r", denominator)
        } else {
            denominator.to_string()
        }
    }

    /// True when any member is accented
    pub fn is_accented(&self) -> bool {
        self.chord().iter().any(|m| m.articulation == Articulation::Accent)
    }
}

/// Notes within one beat that share a beam, by index into the beat's events
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BeamGroup {
    pub members: Vec<usize>,
}

/// The events of one beat
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BeatGroup {
    /// Beat number from the start of the pattern
    pub index: usize,

    /// First global step of the beat
    pub start_step: usize,

    /// Grid positions in the beat
    pub width: usize,

    pub events: Vec<NotationEvent>,

    pub beam: Option<BeamGroup>,
}

impl BeatGroup {
    /// Check if this beat contains a given global step
    pub fn contains(&self, step: usize) -> bool {
        step >= self.start_step && step < self.start_step + self.width
    }

    /// Events joined by this beat's beam, in order
    pub fn beamed_events(&self) -> Vec<&NotationEvent> {
        match &self.beam {
            Some(beam) => beam.members.iter().filter_map(|&i| self.events.get(i)).collect(),
            None => Vec::new(),
        }
    }
}
