//! Notation and grid API functions
//!
//! Grids, patterns and derived notation cross the boundary as plain JS
//! objects in the shape the front end already keeps in state.

use wasm_bindgen::prelude::*;

use super::helpers::{deserialize, deserialize_optional, notation_error, serialize};
use crate::config::NotationConfig;
use crate::models::drums::Drum;
use crate::models::grid::Grid;
use crate::models::pattern::Pattern;
use crate::models::subdivision::{total_steps as steps_for, Subdivision, SubdivisionInfo};
use crate::notation::{analyze_beat_with_config, derive_notation_with_config, RhythmTable};
use crate::playhead::PlayheadTrack;
use crate::{wasm_info, wasm_log};

/// Derive the full staff for a grid
///
/// Unknown subdivision ids fall back to a 16th grid written all in
/// sixteenths. `config` may be `undefined`.
#[wasm_bindgen(js_name = deriveNotation)]
pub fn derive_notation(
    grid_js: JsValue,
    subdivision: &str,
    bars: usize,
    config_js: JsValue,
) -> Result<JsValue, JsValue> {
    let grid: Grid = deserialize(grid_js, "Failed to deserialize grid")?;
    let config: NotationConfig =
        deserialize_optional(config_js, "Failed to deserialize config")?.unwrap_or_default();

    let rhythm = RhythmTable::for_id(subdivision);
    let notation = derive_notation_with_config(&grid, rhythm, bars, &config);
    wasm_log!(
        "deriveNotation: {} bar(s) of {}, {} beams",
        bars,
        subdivision,
        notation.beam_count()
    );
    serialize(&notation, "Failed to serialize notation")
}

/// Events for a single beat
#[wasm_bindgen(js_name = analyzeBeat)]
pub fn analyze_beat(
    grid_js: JsValue,
    beat_start_step: usize,
    subdivision: &str,
) -> Result<JsValue, JsValue> {
    let grid: Grid = deserialize(grid_js, "Failed to deserialize grid")?;
    let events = analyze_beat_with_config(
        &grid,
        beat_start_step,
        RhythmTable::for_id(subdivision),
        &NotationConfig::default(),
    );
    serialize(&events, "Failed to serialize beat events")
}

/// Playhead x for the current step, or `undefined` when it should be hidden
///
/// `steps` and `xs` are the rendered anchors, parallel arrays in any order.
#[wasm_bindgen(js_name = playheadPosition)]
pub fn playhead_position(
    steps: Vec<u32>,
    xs: Vec<f64>,
    current_step: usize,
    total_steps: usize,
) -> Result<Option<f64>, JsValue> {
    let steps: Vec<usize> = steps.into_iter().map(|s| s as usize).collect();
    let track = PlayheadTrack::from_rendered(&steps, &xs).map_err(notation_error)?;
    Ok(track.position(current_step, total_steps))
}

#[wasm_bindgen(js_name = createEmptyGrid)]
pub fn create_empty_grid(total_steps: usize) -> Result<JsValue, JsValue> {
    serialize(&Grid::empty(total_steps), "Failed to serialize grid")
}

#[wasm_bindgen(js_name = resizeGrid)]
pub fn resize_grid(grid_js: JsValue, new_step_count: usize) -> Result<JsValue, JsValue> {
    let grid: Grid = deserialize(grid_js, "Failed to deserialize grid")?;
    serialize(&grid.resize(new_step_count), "Failed to serialize grid")
}

/// Advance one cell through off / regular / accent / ghost
#[wasm_bindgen(js_name = cycleStep)]
pub fn cycle_step(grid_js: JsValue, drum: &str, step: usize) -> Result<JsValue, JsValue> {
    let mut grid: Grid = deserialize(grid_js, "Failed to deserialize grid")?;
    let drum = Drum::from_id(drum).map_err(notation_error)?;
    let new_state = grid.cycle_step(drum, step).map_err(notation_error)?;
    wasm_log!("cycleStep: {} step {} -> {:?}", drum, step, new_state);
    serialize(&grid, "Failed to serialize grid")
}

/// Starting pattern, optionally seeded from a pattern the host decoded
#[wasm_bindgen(js_name = initialPattern)]
pub fn initial_pattern(shared_js: JsValue) -> Result<JsValue, JsValue> {
    let shared: Option<Pattern> = deserialize_optional(shared_js, "Failed to deserialize pattern")?;
    wasm_info!("initialPattern: shared pattern {}", if shared.is_some() { "present" } else { "absent" });
    serialize(&Pattern::initial(shared), "Failed to serialize pattern")
}

#[wasm_bindgen(js_name = subdivisionInfo)]
pub fn subdivision_info(subdivision: &str) -> Result<JsValue, JsValue> {
    let subdivision = Subdivision::from_id(subdivision).map_err(notation_error)?;
    serialize(&SubdivisionInfo::from(subdivision), "Failed to serialize subdivision info")
}

#[wasm_bindgen(js_name = totalSteps)]
pub fn total_steps(bars: usize, subdivision: &str) -> usize {
    steps_for(bars, Subdivision::from_id(subdivision).ok())
}
