//! grandMA2 XML output
//!
//! Builds the two files the console imports from the extracted MIDI markers:
//! a timecode show and a setup macro. Both share the `<MA>` document header.
//!
//! # Usage
//! ```rust,ignore
//! use ma2_timecode::renderers::ma2::{MacroScript, TimecodeTrack};
//!
//! let track = TimecodeTrack::build(&settings, frame_rate, &markers);
//! let script = MacroScript::build(&settings, "song_tc.xml", &markers);
//! let timecode_xml = track.to_xml()?;
//! let macro_xml = script.to_xml()?;
//! ```

pub mod defaults;
pub mod macros;
pub mod timecode;
pub mod xml;

pub use macros::MacroScript;
pub use timecode::{TimecodeEvent, TimecodeTrack};
pub use xml::XmlElement;
