//! MIDI to grandMA2 timecode converter
//!
//! Reads the markers of a MIDI file and produces the two files a grandMA2
//! console imports: a timecode show that fires one Go per marker, and a
//! macro that stores the matching cues and assigns the sequence to an executor.

pub mod converters;
pub mod renderers;

// Re-export commonly used types
pub use converters::midi_to_ma2::*;
pub use renderers::ma2::{MacroScript, TimecodeEvent, TimecodeTrack, XmlElement};
