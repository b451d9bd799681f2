//! Drum Notation WASM Module
//!
//! Turns a drum machine's step grid into percussion-staff notation: rests,
//! chords, note values and per-beat beams, plus playhead positioning over
//! the rendered staff.

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod notation;
pub mod playhead;

// Re-export commonly used types
pub use config::NotationConfig;
pub use errors::NotationError;
pub use models::*;
pub use notation::{derive_notation, Notation, RhythmTable};
pub use playhead::{NotePosition, PlayheadTrack};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Drum notation WASM module initialized");
}
