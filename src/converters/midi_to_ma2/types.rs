//! Type definitions for MIDI to grandMA2 conversion
//!
//! This module defines the values that flow through the pipeline:
//! - Run-level settings (ExportSettings)
//! - Markers extracted from the MIDI file (TempoMarker, CueMarker, MidiMarkers)
//! - The timecode frame rate and the seconds-to-frames conversion

use serde::{Deserialize, Serialize};

use super::MaError;

// ============================================================================
// RUN SETTINGS
// ============================================================================

/// Configuration for one conversion run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Label for the sequence, executor and timecode pool entry
    pub label: String,

    /// Sequence pool number to overwrite
    pub sequence_number: u32,

    /// Timecode pool number to overwrite
    pub timecode_number: u32,

    /// Executor page the sequence is assigned on
    pub exec_page: u32,

    /// Executor number on that page
    pub exec_number: u32,

    /// Frame rate override; wins over whatever the MIDI file carries
    pub frame_rate: Option<FrameRate>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            label: "My Song".to_string(),
            sequence_number: 101,
            timecode_number: 1,
            exec_page: 1,
            exec_number: 101,
            frame_rate: None,
        }
    }
}

// ============================================================================
// FRAME RATE
// ============================================================================

/// Timecode frame rates the console accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum FrameRate {
    Fps24,
    Fps25,
    Fps30,
}

impl FrameRate {
    /// Fallback when neither an override nor a usable hint exists
    pub const DEFAULT: FrameRate = FrameRate::Fps30;

    pub fn fps(self) -> u16 {
        match self {
            FrameRate::Fps24 => 24,
            FrameRate::Fps25 => 25,
            FrameRate::Fps30 => 30,
        }
    }

    /// Pick the effective rate for a run.
    ///
    /// An override always wins. Otherwise the hint from the MIDI file is used
    /// if it names one of the valid rates, and anything else falls back to 30.
    pub fn resolve(override_rate: Option<FrameRate>, hint: Option<u16>) -> FrameRate {
        if let Some(rate) = override_rate {
            return rate;
        }
        match hint.map(FrameRate::try_from) {
            Some(Ok(rate)) => rate,
            Some(Err(_)) => {
                log::warn!(
                    "MIDI frame rate {} is not usable for timecode, falling back to {} FPS",
                    hint.unwrap_or_default(),
                    FrameRate::DEFAULT.fps()
                );
                FrameRate::DEFAULT
            }
            None => FrameRate::DEFAULT,
        }
    }
}

impl TryFrom<u16> for FrameRate {
    type Error = MaError;

    fn try_from(fps: u16) -> Result<Self, Self::Error> {
        match fps {
            24 => Ok(FrameRate::Fps24),
            25 => Ok(FrameRate::Fps25),
            30 => Ok(FrameRate::Fps30),
            other => Err(MaError::InvalidFrameRate(other)),
        }
    }
}

impl From<FrameRate> for u16 {
    fn from(rate: FrameRate) -> u16 {
        rate.fps()
    }
}

impl std::fmt::Display for FrameRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.fps())
    }
}

/// Convert elapsed seconds to a whole frame count.
///
/// Rounds half to even, so 162.5 frames becomes 162. Track length and every
/// cue offset go through this one function.
pub fn frames_of(seconds: f64, rate: FrameRate) -> u64 {
    let frames = (seconds * f64::from(rate.fps())).round_ties_even();
    if frames <= 0.0 {
        0
    } else {
        frames as u64
    }
}

// ============================================================================
// MARKERS
// ============================================================================

/// Tempo change found in the MIDI file
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TempoMarker {
    /// Seconds since the start of the file
    pub time: f64,
    /// Beats per minute, rounded to the nearest integer
    pub tempo: u32,
}

/// Marker meta event found in the MIDI file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CueMarker {
    /// Seconds since the start of the file
    pub time: f64,
    /// Raw marker text (not sanitized)
    pub label: String,
}

/// Everything the builders need from one MIDI file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MidiMarkers {
    /// Playback length in seconds as reported by the decoder
    pub total_length: f64,
    /// Frame rate carried by an SMPTE offset event, if any
    pub frame_rate_hint: Option<u16>,
    pub tempos: Vec<TempoMarker>,
    pub cues: Vec<CueMarker>,
}

/// Strip characters that break console labels.
///
/// Double quotes delimit labels in command lines, so they are removed (not
/// escaped).
pub fn sanitize_label(label: &str) -> String {
    label.replace('"', "")
}
