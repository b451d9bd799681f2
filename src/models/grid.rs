//! Step grid model
//!
//! A grid holds one row of steps per drum. Rows are keyed by [`Drum`] so the
//! serialized form is the `{ "hihat": [...], "kick": [...] }` map the front
//! end stores and shares.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::drums::{Drum, DRUM_ORDER};
use crate::errors::NotationError;

/// Velocity of a freshly placed hit
pub const DEFAULT_VELOCITY: f32 = 0.7;
pub const ACCENT_VELOCITY: f32 = 1.0;
pub const GHOST_VELOCITY: f32 = 0.3;

/// One grid slot
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub active: bool,
    pub velocity: f32,
}

impl Step {
    pub const fn off() -> Self {
        Self { active: false, velocity: DEFAULT_VELOCITY }
    }

    pub const fn hit(velocity: f32) -> Self {
        Self { active: true, velocity }
    }

    /// Next state in the click cycle: off -> regular -> accent -> ghost -> off
    pub fn cycled(self) -> Self {
        if !self.active {
            Step::hit(DEFAULT_VELOCITY)
        } else if (0.6..=0.8).contains(&self.velocity) {
            Step::hit(ACCENT_VELOCITY)
        } else if self.velocity >= 0.9 {
            Step::hit(GHOST_VELOCITY)
        } else {
            Step::off()
        }
    }
}

impl Default for Step {
    fn default() -> Self {
        Step::off()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: BTreeMap<Drum, Vec<Step>>,
}

impl Grid {
    /// Every drum present, every step off
    pub fn empty(total_steps: usize) -> Self {
        let rows = DRUM_ORDER
            .iter()
            .map(|&drum| (drum, vec![Step::off(); total_steps]))
            .collect();
        Self { rows }
    }

    /// One bar of 16ths: hats on the 8ths, kick on 1 and 3, snare on 2 and 4
    pub fn default_beat() -> Self {
        let mut grid = Grid::empty(16);
        for step in (0..16).step_by(2) {
            grid.set(Drum::HiHat, step, Step::hit(DEFAULT_VELOCITY));
        }
        for step in [0, 8] {
            grid.set(Drum::Kick, step, Step::hit(DEFAULT_VELOCITY));
        }
        for step in [4, 12] {
            grid.set(Drum::Snare, step, Step::hit(DEFAULT_VELOCITY));
        }
        grid
    }

    /// Row for a drum, if the provider supplied one
    pub fn row(&self, drum: Drum) -> Option<&[Step]> {
        self.rows.get(&drum).map(Vec::as_slice)
    }

    /// Step lookup; missing rows and indexes past the end read as `None`
    pub fn step(&self, drum: Drum, index: usize) -> Option<&Step> {
        self.rows.get(&drum).and_then(|row| row.get(index))
    }

    pub fn is_active(&self, drum: Drum, index: usize) -> bool {
        self.step(drum, index).map_or(false, |s| s.active)
    }

    /// Length of the longest row
    pub fn len(&self) -> usize {
        self.rows.values().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overwrite a step; rows grow as needed
    pub fn set(&mut self, drum: Drum, index: usize, step: Step) {
        let row = self.rows.entry(drum).or_default();
        if row.len() <= index {
            row.resize(index + 1, Step::off());
        }
        row[index] = step;
    }

    /// Advance a step through the click cycle and return its new state
    pub fn cycle_step(&mut self, drum: Drum, index: usize) -> Result<Step, NotationError> {
        let len = self.len();
        let current = self
            .rows
            .get_mut(&drum)
            .and_then(|row| row.get_mut(index))
            .ok_or(NotationError::StepOutOfRange { drum, step: index, len })?;
        *current = current.cycled();
        Ok(*current)
    }

    /// Copy of this grid with every row at `new_len` steps
    ///
    /// Existing steps keep their index, new slots are off, and steps past
    /// the new end are dropped. Drums missing from the source get a fresh row.
    pub fn resize(&self, new_len: usize) -> Grid {
        let rows = DRUM_ORDER
            .iter()
            .map(|&drum| {
                let old = self.row(drum).unwrap_or(&[]);
                let row = (0..new_len)
                    .map(|i| old.get(i).copied().unwrap_or_default())
                    .collect();
                (drum, row)
            })
            .collect();
        Grid { rows }
    }

    pub fn clear(&mut self) {
        for row in self.rows.values_mut() {
            row.fill(Step::off());
        }
    }

    /// Active drums at a step in display order, with their velocities
    pub fn hits_at(&self, index: usize) -> Vec<(Drum, f32)> {
        DRUM_ORDER
            .iter()
            .filter_map(|&drum| match self.step(drum, index) {
                Some(step) if step.active => Some((drum, step.velocity)),
                _ => None,
            })
            .collect()
    }
}
