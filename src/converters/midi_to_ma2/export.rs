use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::converters::midi_to_ma2::{extract_markers, types::*, MaError, Result};
use crate::renderers::ma2::{MacroScript, TimecodeTrack};

/// Output path that means "write to stdout"
const STDOUT_PATH: &str = "-";

/// What a run extracted and wrote
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSummary {
    pub frame_rate: FrameRate,
    /// Show length in frames
    pub total_frames: u64,
    /// Frame offset of each cue, in cue order
    pub cue_frames: Vec<u64>,
    pub markers: MidiMarkers,
}

/// File name the macro imports the timecode show from
pub fn timecode_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Write one finished document, or print it when the path is `-`
pub fn write_document(path: &Path, document: &str) -> Result<()> {
    let written = if path == Path::new(STDOUT_PATH) {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(document.as_bytes())
            .and_then(|_| stdout.flush())
    } else {
        fs::write(path, document)
    };

    written.map_err(|source| MaError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Convert MIDI bytes into the timecode show and setup macro files.
///
/// Both documents are rendered before anything is written. The two writes
/// are independent: if the macro write fails the timecode file stays.
pub fn export(
    settings: &ExportSettings,
    midi: &[u8],
    timecode_path: &Path,
    macro_path: &Path,
) -> Result<ExportSummary> {
    let markers = extract_markers(midi)?;
    let frame_rate = FrameRate::resolve(settings.frame_rate, markers.frame_rate_hint);

    let track = TimecodeTrack::build(settings, frame_rate, &markers);
    let script = MacroScript::build(settings, &timecode_file_name(timecode_path), &markers);

    let timecode_xml = track.to_xml()?;
    let macro_xml = script.to_xml()?;

    write_document(timecode_path, &timecode_xml)?;
    log::info!(
        "Wrote timecode {} ({} events, {} frames at {} FPS) to {}",
        settings.timecode_number,
        track.events.len(),
        track.length,
        frame_rate,
        timecode_path.display()
    );

    write_document(macro_path, &macro_xml)?;
    log::info!(
        "Wrote macro \"{}\" ({} lines) to {}",
        script.label,
        script.lines.len(),
        macro_path.display()
    );

    Ok(ExportSummary {
        frame_rate,
        total_frames: track.length,
        cue_frames: markers
            .cues
            .iter()
            .map(|cue| frames_of(cue.time, frame_rate))
            .collect(),
        markers,
    })
}
