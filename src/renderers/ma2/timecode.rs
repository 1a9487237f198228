//! Timecode show model (one track, one subtrack, one Go event per cue)

use super::defaults::{self, element};
use super::xml::{ma_root, no, write_document, XmlElement};
use crate::converters::midi_to_ma2::{
    frames_of, sanitize_label, ExportSettings, FrameRate, MidiMarkers, Result,
};

/// A cue trigger on the subtrack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimecodeEvent {
    /// 0-based position on the subtrack
    pub index: usize,
    /// 1-based sequence step; also the cue number it fires
    pub step: usize,
    /// Offset from the start of the show in frames
    pub time: u64,
    /// Sanitized cue label
    pub cue_name: String,
}

/// grandMA2 timecode show with a single executor track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimecodeTrack {
    pub label: String,
    pub sequence_number: u32,
    pub exec_page: u32,
    pub exec_number: u32,
    /// Show length in frames
    pub length: u64,
    pub frame_rate: FrameRate,
    pub events: Vec<TimecodeEvent>,
}

impl TimecodeTrack {
    /// Build the show from the extracted markers.
    ///
    /// The Nth cue becomes step N and references cue N of the sequence.
    /// Length comes from the MIDI playback length, never from the last cue.
    pub fn build(settings: &ExportSettings, frame_rate: FrameRate, markers: &MidiMarkers) -> Self {
        let events = markers
            .cues
            .iter()
            .enumerate()
            .map(|(index, cue)| TimecodeEvent {
                index,
                step: index + 1,
                time: frames_of(cue.time, frame_rate),
                cue_name: sanitize_label(&cue.label),
            })
            .collect();

        Self {
            label: sanitize_label(&settings.label),
            sequence_number: settings.sequence_number,
            exec_page: settings.exec_page,
            exec_number: settings.exec_number,
            length: frames_of(markers.total_length, frame_rate),
            frame_rate,
            events,
        }
    }

    pub fn to_element(&self) -> XmlElement {
        let object = XmlElement::new(element::OBJECT)
            .attr(
                "name",
                format!("{} {}.{}", self.label, self.exec_page, self.exec_number),
            )
            .child(no(defaults::EXECUTOR_OBJECT_TYPE))
            .child(no(defaults::EXECUTOR_POOL))
            .child(no(self.exec_page))
            .child(no(self.exec_number));

        let mut sub_track = XmlElement::new(element::SUB_TRACK).attr("index", 0);
        for event in &self.events {
            sub_track.push(self.event_element(event));
        }

        let track = XmlElement::new(element::TRACK)
            .attr("index", 0)
            .attr("active", true)
            .child(object)
            .child(sub_track);

        let timecode = XmlElement::new(element::TIMECODE)
            .attr("index", defaults::FILE_POOL_INDEX)
            .attr("lenght", self.length)
            .attr("slot", defaults::TIMECODE_SLOT)
            .attr("frame_format", format!("{} FPS", self.frame_rate))
            .attr("m_autostart", true)
            .child(track);

        ma_root(timecode)
    }

    fn event_element(&self, event: &TimecodeEvent) -> XmlElement {
        let cue = XmlElement::new(element::CUE)
            .attr("name", &event.cue_name)
            .child(no(defaults::SEQUENCE_OBJECT_TYPE))
            .child(no(self.sequence_number))
            .child(no(event.step));

        XmlElement::new(element::EVENT)
            .attr("index", event.index)
            .attr("command", defaults::EVENT_COMMAND)
            .attr("pressed", true)
            .attr("step", event.step)
            .attr("time", event.time)
            .child(cue)
    }

    pub fn to_xml(&self) -> Result<String> {
        write_document(&self.to_element())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::midi_to_ma2::CueMarker;

    fn markers(total_length: f64, cues: &[(f64, &str)]) -> MidiMarkers {
        MidiMarkers {
            total_length,
            cues: cues
                .iter()
                .map(|(time, label)| CueMarker {
                    time: *time,
                    label: label.to_string(),
                })
                .collect(),
            ..MidiMarkers::default()
        }
    }

    #[test]
    fn test_build_assigns_steps_in_order() {
        let settings = ExportSettings::default();
        let track = TimecodeTrack::build(
            &settings,
            FrameRate::Fps25,
            &markers(10.0, &[(2.0, "Intro"), (6.5, r#"Verse "1""#)]),
        );

        assert_eq!(track.length, 250);
        assert_eq!(track.events.len(), 2);
        assert_eq!(track.events[0].index, 0);
        assert_eq!(track.events[0].step, 1);
        assert_eq!(track.events[0].time, 50);
        assert_eq!(track.events[1].step, 2);
        assert_eq!(track.events[1].time, 162);
        assert_eq!(track.events[1].cue_name, "Verse 1");
    }

    #[test]
    fn test_empty_cue_list() {
        let track = TimecodeTrack::build(&ExportSettings::default(), FrameRate::Fps30, &markers(4.0, &[]));
        assert!(track.events.is_empty());
        assert_eq!(track.length, 120);

        let xml = track.to_xml().unwrap();
        assert!(xml.contains(r#"lenght="120""#));
        assert!(xml.contains(r#"<SubTrack index="0"/>"#));
        assert!(!xml.contains("<Event"));
    }

    #[test]
    fn test_element_shape() {
        let settings = ExportSettings {
            label: r#"Big "Show""#.to_string(),
            sequence_number: 7,
            exec_page: 2,
            exec_number: 15,
            ..ExportSettings::default()
        };
        let track = TimecodeTrack::build(&settings, FrameRate::Fps24, &markers(1.0, &[(0.5, "A")]));
        let root = track.to_element();

        assert_eq!(root.name(), "MA");
        let timecode = &root.children()[0];
        assert_eq!(timecode.attribute("frame_format"), Some("24 FPS"));
        assert_eq!(timecode.attribute("lenght"), Some("24"));
        assert_eq!(timecode.attribute("slot"), Some("Link Selected"));

        let track_el = &timecode.children()[0];
        let object = &track_el.children()[0];
        assert_eq!(object.attribute("name"), Some("Big Show 2.15"));
        let numbers: Vec<_> = object.children().iter().filter_map(|n| n.text_content()).collect();
        assert_eq!(numbers, vec!["30", "1", "2", "15"]);

        let event = &track_el.children()[1].children()[0];
        assert_eq!(event.attribute("time"), Some("12"));
        assert_eq!(event.attribute("pressed"), Some("true"));
        let cue = &event.children()[0];
        let numbers: Vec<_> = cue.children().iter().filter_map(|n| n.text_content()).collect();
        assert_eq!(numbers, vec!["1", "7", "1"]);
    }
}
