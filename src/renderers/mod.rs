//! Renderers module
//!
//! This module contains the export logic that turns extracted markers
//! into console import files.

pub mod ma2;

// Re-export commonly used types
pub use ma2::{MacroScript, TimecodeTrack};
