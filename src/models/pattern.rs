//! Pattern state: the grid plus the transport settings it was written for

use serde::{Deserialize, Deserializer, Serialize};

use super::grid::Grid;
use super::subdivision::Subdivision;

pub const DEFAULT_TEMPO: u32 = 96;
pub const MIN_TEMPO: u32 = 40;
pub const MAX_TEMPO: u32 = 240;
pub const MIN_BARS: usize = 1;
pub const MAX_BARS: usize = 2;

/// Missing fields take their defaults, so a partial shared pattern still loads
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pattern {
    pub grid: Grid,
    pub tempo: u32,
    pub bars: usize,
    #[serde(deserialize_with = "lenient_subdivision")]
    pub subdivision: Subdivision,
}

/// Unknown subdivision ids load as the default resolution
fn lenient_subdivision<'de, D>(deserializer: D) -> Result<Subdivision, D::Error>
where
    D: Deserializer<'de>,
{
    let id = String::deserialize(deserializer)?;
    Ok(Subdivision::from_id(&id).unwrap_or_else(|e| {
        log::warn!("{}, loading pattern as {}", e, Subdivision::default().id());
        Subdivision::default()
    }))
}

impl Default for Pattern {
    fn default() -> Self {
        Self {
            grid: Grid::default_beat(),
            tempo: DEFAULT_TEMPO,
            bars: MIN_BARS,
            subdivision: Subdivision::default(),
        }
    }
}

pub fn clamp_tempo(tempo: u32) -> u32 {
    tempo.clamp(MIN_TEMPO, MAX_TEMPO)
}

pub fn clamp_bars(bars: usize) -> usize {
    bars.clamp(MIN_BARS, MAX_BARS)
}

impl Pattern {
    /// Starting state for a session
    ///
    /// `shared` is whatever pattern the host decoded at bootstrap (a shared
    /// link, a saved slot). Without one the default beat is used.
    pub fn initial(shared: Option<Pattern>) -> Pattern {
        let mut pattern = shared.unwrap_or_default();
        pattern.tempo = clamp_tempo(pattern.tempo);
        pattern.bars = clamp_bars(pattern.bars);
        pattern.grid = pattern.grid.resize(pattern.total_steps());
        log::debug!(
            "initial pattern: {} bar(s) of {} at {} bpm",
            pattern.bars,
            pattern.subdivision.id(),
            pattern.tempo
        );
        pattern
    }

    pub fn total_steps(&self) -> usize {
        self.subdivision.steps_per_bar() * self.bars
    }

    pub fn set_tempo(&mut self, tempo: u32) {
        self.tempo = clamp_tempo(tempo);
    }

    /// Change the bar count, resizing the grid
    ///
    /// Returns the playback cursor, reset to 0 if it no longer fits.
    pub fn set_bars(&mut self, bars: usize, cursor: usize) -> usize {
        self.bars = clamp_bars(bars);
        self.fit_grid(cursor)
    }

    /// Change the grid resolution, resizing the grid by step index
    pub fn set_subdivision(&mut self, subdivision: Subdivision, cursor: usize) -> usize {
        self.subdivision = subdivision;
        self.fit_grid(cursor)
    }

    /// Seconds per step for the playback clock
    pub fn step_interval_secs(&self) -> f64 {
        self.subdivision.step_interval_secs(self.tempo as f64)
    }

    fn fit_grid(&mut self, cursor: usize) -> usize {
        let total = self.total_steps();
        self.grid = self.grid.resize(total);
        if cursor >= total {
            0
        } else {
            cursor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::drums::Drum;

    #[test]
    fn test_initial_without_shared_pattern() {
        let pattern = Pattern::initial(None);
        assert_eq!(pattern.tempo, DEFAULT_TEMPO);
        assert_eq!(pattern.bars, 1);
        assert_eq!(pattern.subdivision, Subdivision::Sixteenth);
        assert_eq!(pattern.grid.len(), 16);
        assert!(pattern.grid.is_active(Drum::Kick, 0));
    }

    #[test]
    fn test_initial_clamps_shared_pattern() {
        let shared = Pattern {
            grid: Grid::empty(8),
            tempo: 500,
            bars: 7,
            subdivision: Subdivision::Eighth,
        };
        let pattern = Pattern::initial(Some(shared));
        assert_eq!(pattern.tempo, MAX_TEMPO);
        assert_eq!(pattern.bars, MAX_BARS);
        assert_eq!(pattern.grid.len(), 16);
    }

    #[test]
    fn test_partial_shared_pattern_fills_defaults() {
        let json = r#"{"grid":{"kick":[{"active":true,"velocity":0.7}]},"bars":2}"#;
        let shared: Pattern = serde_json::from_str(json).unwrap();
        assert_eq!(shared.tempo, DEFAULT_TEMPO);
        assert_eq!(shared.subdivision, Subdivision::Sixteenth);

        let pattern = Pattern::initial(Some(shared));
        assert_eq!(pattern.bars, 2);
        assert_eq!(pattern.grid.len(), 32);
        assert!(pattern.grid.is_active(Drum::Kick, 0));
    }

    #[test]
    fn test_unknown_shared_subdivision_loads_as_sixteenth() {
        let json = r#"{"tempo":120,"bars":1,"subdivision":"64th"}"#;
        let pattern = Pattern::initial(Some(serde_json::from_str(json).unwrap()));
        assert_eq!(pattern.subdivision, Subdivision::Sixteenth);
        assert_eq!(pattern.tempo, 120);
        // no grid supplied: the default beat
        assert!(pattern.grid.is_active(Drum::Snare, 4));
    }

    #[test]
    fn test_set_bars_resets_cursor_past_end() {
        let mut pattern = Pattern::initial(None);
        assert_eq!(pattern.set_bars(2, 12), 12);
        assert_eq!(pattern.grid.len(), 32);
        assert_eq!(pattern.set_bars(1, 20), 0);
        assert_eq!(pattern.grid.len(), 16);
    }

    #[test]
    fn test_set_subdivision_resizes() {
        let mut pattern = Pattern::initial(None);
        let cursor = pattern.set_subdivision(Subdivision::Eighth, 10);
        assert_eq!(cursor, 0);
        assert_eq!(pattern.grid.len(), 8);
        // index-preserving: step 0 kick survives
        assert!(pattern.grid.is_active(Drum::Kick, 0));
    }

    #[test]
    fn test_tempo_clamp() {
        let mut pattern = Pattern::default();
        pattern.set_tempo(10);
        assert_eq!(pattern.tempo, MIN_TEMPO);
        pattern.set_tempo(120);
        assert!((pattern.step_interval_secs() - 0.125).abs() < 1e-9);
    }
}
