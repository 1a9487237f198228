use crate::converters::midi_to_ma2::{
    types::*, MaError, Result,
};
use midly::{Format, MetaMessage, Smf, Timing, TrackEventKind};

/// Tempo in force before the first tempo event (120 BPM)
const DEFAULT_US_PER_BEAT: u32 = 500_000;

/// The subset of MIDI events the extractor cares about
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// Set Tempo, microseconds per beat
    Tempo(u32),
    /// Marker meta event text
    Marker(String),
    /// SMPTE offset frame rate (24, 25, 29 or 30)
    SmpteOffset(u8),
    EndOfTrack,
    Other,
}

/// One event of the merged playback stream
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackEvent {
    /// Seconds since the previous event
    pub delta: f64,
    pub kind: EventKind,
}

/// A MIDI file flattened into a single timeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playback {
    /// Playback length in seconds
    pub length: f64,
    pub events: Vec<PlaybackEvent>,
}

/// Decode SMF bytes into one merged, seconds-timed event stream.
///
/// Tracks are merged by absolute tick; ties keep track order. Per-track
/// End Of Track events collapse into a single one at the latest tick.
pub fn decode_playback(bytes: &[u8]) -> Result<Playback> {
    let smf = Smf::parse(bytes)?;

    if smf.header.format == Format::Sequential {
        return Err(MaError::UnsupportedFormat(
            "type 2 (sequential) files have no single timeline".to_string(),
        ));
    }

    let mut merged: Vec<(u64, EventKind)> = Vec::new();
    let mut end_tick = 0u64;

    for track in &smf.tracks {
        let mut tick = 0u64;
        for event in track {
            tick += u64::from(event.delta.as_int());
            match classify(event.kind) {
                EventKind::EndOfTrack => end_tick = end_tick.max(tick),
                kind => merged.push((tick, kind)),
            }
        }
    }

    // Stable sort keeps source order for events on the same tick
    merged.sort_by_key(|(tick, _)| *tick);
    if let Some((last, _)) = merged.last() {
        end_tick = end_tick.max(*last);
    }
    merged.push((end_tick, EventKind::EndOfTrack));

    let mut playback = Playback {
        length: 0.0,
        events: Vec::with_capacity(merged.len()),
    };
    let mut us_per_beat = DEFAULT_US_PER_BEAT;
    let mut previous_tick = 0u64;

    for (tick, kind) in merged {
        let delta = ticks_to_seconds(tick - previous_tick, smf.header.timing, us_per_beat)?;
        previous_tick = tick;
        playback.length += delta;

        // A tempo change only affects the deltas that follow it
        if let EventKind::Tempo(tempo) = kind {
            us_per_beat = tempo;
        }
        playback.events.push(PlaybackEvent { delta, kind });
    }

    log::debug!(
        "Decoded {} tracks into {} events ({:.3}s)",
        smf.tracks.len(),
        playback.events.len(),
        playback.length
    );

    Ok(playback)
}

/// Walk the playback stream and collect tempo changes, markers and the
/// SMPTE frame rate.
///
/// One running clock accumulates every event's delta, whether or not the
/// event is otherwise used. The last SMPTE offset event wins.
pub fn markers_from_playback(playback: &Playback) -> MidiMarkers {
    let mut markers = MidiMarkers {
        total_length: playback.length,
        ..MidiMarkers::default()
    };
    let mut clock = 0.0f64;

    for event in &playback.events {
        clock += event.delta;

        match &event.kind {
            EventKind::Tempo(us_per_beat) => {
                let tempo = bpm_of(*us_per_beat);
                log::debug!("Tempo {} BPM at {:.3}s", tempo, clock);
                markers.tempos.push(TempoMarker { time: clock, tempo });
            }
            EventKind::Marker(text) => {
                log::debug!("Marker {:?} at {:.3}s", text, clock);
                markers.cues.push(CueMarker {
                    time: clock,
                    label: text.clone(),
                });
            }
            EventKind::SmpteOffset(fps) => {
                markers.frame_rate_hint = Some(u16::from(*fps));
            }
            EventKind::EndOfTrack | EventKind::Other => {}
        }
    }

    markers
}

/// Decode a MIDI file and extract its markers
pub fn extract_markers(bytes: &[u8]) -> Result<MidiMarkers> {
    let playback = decode_playback(bytes)?;
    let markers = markers_from_playback(&playback);

    log::info!(
        "Found {} cues and {} tempo changes in {:.3}s of MIDI",
        markers.cues.len(),
        markers.tempos.len(),
        markers.total_length
    );

    Ok(markers)
}

fn classify(kind: TrackEventKind<'_>) -> EventKind {
    match kind {
        TrackEventKind::Meta(MetaMessage::Tempo(tempo)) => EventKind::Tempo(tempo.as_int()),
        TrackEventKind::Meta(MetaMessage::Marker(text)) => EventKind::Marker(decode_text(text)),
        TrackEventKind::Meta(MetaMessage::SmpteOffset(smpte)) => {
            EventKind::SmpteOffset(smpte.fps().as_int())
        }
        TrackEventKind::Meta(MetaMessage::EndOfTrack) => EventKind::EndOfTrack,
        _ => EventKind::Other,
    }
}

/// Meta text is UTF-8 in practice; anything else is read as Latin-1
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

fn ticks_to_seconds(ticks: u64, timing: Timing, us_per_beat: u32) -> Result<f64> {
    match timing {
        Timing::Metrical(ticks_per_beat) => {
            let ticks_per_beat = ticks_per_beat.as_int();
            if ticks_per_beat == 0 {
                return Err(MaError::Decode("header declares 0 ticks per beat".to_string()));
            }
            // Single division keeps exact results exact (960 ticks at 480 tpb is 1.0s)
            Ok(ticks as f64 * f64::from(us_per_beat) / (f64::from(ticks_per_beat) * 1e6))
        }
        Timing::Timecode(fps, subframes) => {
            if subframes == 0 {
                return Err(MaError::Decode("header declares 0 subframes per frame".to_string()));
            }
            let ticks_per_second = f64::from(fps.as_f32()) * f64::from(subframes);
            Ok(ticks as f64 / ticks_per_second)
        }
    }
}

/// Microseconds per beat to whole beats per minute, ties to even
fn bpm_of(us_per_beat: u32) -> u32 {
    (60_000_000.0 / f64::from(us_per_beat.max(1))).round_ties_even() as u32
}
