mod export;
mod parse;
mod types;

pub use export::{export, timecode_file_name, write_document, ExportSummary};
pub use parse::{decode_playback, extract_markers, markers_from_playback, EventKind, Playback, PlaybackEvent};
pub use types::*;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaError {
    #[error("midi decode error: {0}")]
    Decode(String),
    #[error("unsupported midi file: {0}")]
    UnsupportedFormat(String),
    #[error("invalid frame rate {0} (expected 24, 25 or 30)")]
    InvalidFrameRate(u16),
    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("xml write error: {0}")]
    Xml(String),
}

pub type Result<T> = std::result::Result<T, MaError>;

impl From<midly::Error> for MaError {
    fn from(err: midly::Error) -> Self {
        MaError::Decode(err.to_string())
    }
}
