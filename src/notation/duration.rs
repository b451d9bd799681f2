// Gap-to-duration tables
//
// A note rings until the next onset in its beat, so its written value is a
// function of that gap alone. Each subdivision owns a table of descending
// (min_gap, value) thresholds; the first threshold the gap reaches wins.

use crate::models::notation::{NoteDuration, NoteValue};
use crate::models::subdivision::Subdivision;

use NoteDuration::*;

/// Duration lookup for one grid resolution
#[derive(Debug, PartialEq)]
pub struct RhythmTable {
    /// `None` for the fallback table used with unrecognized subdivisions
    pub subdivision: Option<Subdivision>,

    pub positions_per_beat: usize,

    /// Descending `(min_gap, value)` thresholds
    pub thresholds: &'static [(usize, NoteValue)],
}

/// Written value when no threshold matches
pub const FALLBACK_VALUE: NoteValue = NoteValue::plain(Sixteenth);

pub static EIGHTH_TABLE: RhythmTable = RhythmTable {
    subdivision: Some(Subdivision::Eighth),
    positions_per_beat: 2,
    thresholds: &[(2, NoteValue::plain(Quarter)), (1, NoteValue::plain(Eighth))],
};

pub static EIGHTH_TRIPLET_TABLE: RhythmTable = RhythmTable {
    subdivision: Some(Subdivision::EighthTriplet),
    positions_per_beat: 3,
    thresholds: &[(3, NoteValue::plain(Quarter)), (1, NoteValue::triplet(Eighth))],
};

pub static SIXTEENTH_TABLE: RhythmTable = RhythmTable {
    subdivision: Some(Subdivision::Sixteenth),
    positions_per_beat: 4,
    thresholds: &[
        (4, NoteValue::plain(Quarter)),
        (2, NoteValue::plain(Eighth)),
        (1, NoteValue::plain(Sixteenth)),
    ],
};

pub static SIXTEENTH_TRIPLET_TABLE: RhythmTable = RhythmTable {
    subdivision: Some(Subdivision::SixteenthTriplet),
    positions_per_beat: 6,
    thresholds: &[
        (6, NoteValue::plain(Quarter)),
        (3, NoteValue::plain(Eighth)),
        (1, NoteValue::triplet(Sixteenth)),
    ],
};

pub static THIRTY_SECOND_TABLE: RhythmTable = RhythmTable {
    subdivision: Some(Subdivision::ThirtySecond),
    positions_per_beat: 8,
    thresholds: &[
        (8, NoteValue::plain(Quarter)),
        (4, NoteValue::plain(Eighth)),
        (2, NoteValue::plain(Sixteenth)),
        (1, NoteValue::plain(ThirtySecond)),
    ],
};

/// Grid of 16ths with every gap written as a sixteenth
pub static FALLBACK_TABLE: RhythmTable = RhythmTable {
    subdivision: None,
    positions_per_beat: 4,
    thresholds: &[],
};

impl RhythmTable {
    pub fn for_subdivision(subdivision: Subdivision) -> &'static RhythmTable {
        match subdivision {
            Subdivision::Eighth => &EIGHTH_TABLE,
            Subdivision::EighthTriplet => &EIGHTH_TRIPLET_TABLE,
            Subdivision::Sixteenth => &SIXTEENTH_TABLE,
            Subdivision::SixteenthTriplet => &SIXTEENTH_TRIPLET_TABLE,
            Subdivision::ThirtySecond => &THIRTY_SECOND_TABLE,
        }
    }

    /// Table for a subdivision id; unknown ids get the fallback table
    pub fn for_id(id: &str) -> &'static RhythmTable {
        match Subdivision::from_id(id) {
            Ok(subdivision) => RhythmTable::for_subdivision(subdivision),
            Err(e) => {
                log::warn!("{}, writing every gap as a sixteenth", e);
                &FALLBACK_TABLE
            }
        }
    }

    /// Written value for a gap measured in grid positions
    pub fn value_for_gap(&self, gap: usize) -> NoteValue {
        self.thresholds
            .iter()
            .find(|(min_gap, _)| gap >= *min_gap)
            .map(|(_, value)| *value)
            .unwrap_or(FALLBACK_VALUE)
    }

    pub fn is_triplet(&self) -> bool {
        self.subdivision.map_or(false, Subdivision::is_triplet)
    }
}

impl Subdivision {
    pub fn rhythm(self) -> &'static RhythmTable {
        RhythmTable::for_subdivision(self)
    }
}
