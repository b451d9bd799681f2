//! Playhead positioning
//!
//! The staff renderer spaces events unevenly, so the playhead cannot move a
//! fixed distance per step. Instead the renderer reports the x position it
//! gave each event (an anchor) and the playhead is interpolated between the
//! anchors around the current step.

use serde::{Deserialize, Serialize};

use crate::config::NotationConfig;
use crate::errors::NotationError;

/// Rendered x position of the event starting at `step`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct NotePosition {
    pub step: usize,
    pub x: f64,
}

/// Sorted anchors for one rendering of the staff
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PlayheadTrack {
    anchors: Vec<NotePosition>,
}

impl PlayheadTrack {
    /// Build a track, sorting anchors by step
    pub fn new(mut anchors: Vec<NotePosition>) -> Self {
        anchors.sort_by_key(|a| a.step);
        Self { anchors }
    }

    /// Build a track from parallel step / x arrays
    pub fn from_rendered(steps: &[usize], xs: &[f64]) -> Result<Self, NotationError> {
        if steps.len() != xs.len() {
            return Err(NotationError::MismatchedAnchors { steps: steps.len(), xs: xs.len() });
        }
        let anchors = steps
            .iter()
            .zip(xs)
            .map(|(&step, &x)| NotePosition { step, x })
            .collect();
        Ok(Self::new(anchors))
    }

    pub fn anchors(&self) -> &[NotePosition] {
        &self.anchors
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Average pixels per step across the whole track
    fn average_step_width(&self, fallback: f64) -> f64 {
        match (self.anchors.first(), self.anchors.last()) {
            (Some(first), Some(last)) if last.step > first.step => {
                (last.x - first.x) / (last.step - first.step) as f64
            }
            _ => fallback,
        }
    }

    /// Playhead x at `current_step` with the default configuration
    pub fn position(&self, current_step: usize, total_steps: usize) -> Option<f64> {
        self.position_with_config(current_step, total_steps, &NotationConfig::default())
    }

    /// Playhead x at `current_step`, or `None` when it should be hidden
    ///
    /// Hidden when there are no anchors or the step is outside the pattern.
    /// Between two anchors the position is interpolated linearly; before the
    /// first or after the last it is extrapolated at the average step width.
    pub fn position_with_config(
        &self,
        current_step: usize,
        total_steps: usize,
        config: &NotationConfig,
    ) -> Option<f64> {
        if self.anchors.is_empty() || current_step >= total_steps {
            return None;
        }

        let prev = self.anchors.iter().rev().find(|a| a.step <= current_step);
        let next = self.anchors.iter().find(|a| a.step >= current_step);

        match (prev, next) {
            (Some(p), Some(n)) if p.step != n.step => {
                let fraction = (current_step - p.step) as f64 / (n.step - p.step) as f64;
                Some(p.x + (n.x - p.x) * fraction)
            }
            (Some(p), _) if p.step == current_step => Some(p.x),
            (_, Some(n)) if n.step == current_step => Some(n.x),
            (Some(p), None) => {
                let width = self.average_step_width(config.fallback_px_per_step);
                Some(p.x + (current_step - p.step) as f64 * width)
            }
            (None, Some(n)) => {
                let width = self.average_step_width(config.fallback_px_per_step);
                Some(n.x - (n.step - current_step) as f64 * width)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(points: &[(usize, f64)]) -> PlayheadTrack {
        PlayheadTrack::new(points.iter().map(|&(step, x)| NotePosition { step, x }).collect())
    }

    #[test]
    fn test_interpolates_between_anchors() {
        let t = track(&[(5, 100.0), (9, 180.0)]);
        assert_eq!(t.position(7, 16), Some(140.0));
        assert_eq!(t.position(6, 16), Some(120.0));
    }

    #[test]
    fn test_exact_anchor() {
        let t = track(&[(0, 10.0), (5, 100.0), (9, 180.0)]);
        assert_eq!(t.position(5, 16), Some(100.0));
        assert_eq!(t.position(0, 16), Some(10.0));
    }

    #[test]
    fn test_extrapolates_past_last_anchor() {
        // average width = (180 - 100) / (9 - 5) = 20
        let t = track(&[(5, 100.0), (9, 180.0)]);
        assert_eq!(t.position(11, 16), Some(220.0));
    }

    #[test]
    fn test_extrapolates_before_first_anchor() {
        let t = track(&[(4, 100.0), (8, 140.0)]);
        assert_eq!(t.position(2, 16), Some(80.0));
    }

    #[test]
    fn test_single_anchor_uses_fallback_width() {
        let t = track(&[(4, 100.0)]);
        assert_eq!(t.position(6, 16), Some(140.0));
        let config = NotationConfig { fallback_px_per_step: 5.0, ..NotationConfig::default() };
        assert_eq!(t.position_with_config(2, 16, &config), Some(90.0));
    }

    #[test]
    fn test_hidden() {
        assert_eq!(PlayheadTrack::default().position(0, 16), None);
        let t = track(&[(0, 10.0)]);
        assert_eq!(t.position(16, 16), None);
    }

    #[test]
    fn test_unsorted_anchors_are_sorted() {
        let t = track(&[(9, 180.0), (5, 100.0)]);
        assert_eq!(t.anchors()[0].step, 5);
        assert_eq!(t.position(7, 16), Some(140.0));
    }

    #[test]
    fn test_from_rendered_length_mismatch() {
        let err = PlayheadTrack::from_rendered(&[0, 4], &[10.0]).unwrap_err();
        assert_eq!(err, NotationError::MismatchedAnchors { steps: 2, xs: 1 });
        let t = PlayheadTrack::from_rendered(&[4, 0], &[50.0, 10.0]).unwrap();
        assert_eq!(t.position(2, 8), Some(30.0));
    }
}
