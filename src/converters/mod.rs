//! Format converters
//!
//! This module contains converters from MIDI into grandMA2 import files.

pub mod midi_to_ma2;

// Re-export for convenience
pub use midi_to_ma2::{
    export,
    extract_markers,
    ExportSettings,
    ExportSummary,
    FrameRate,
    MaError,
    MidiMarkers,
    Result,
};
