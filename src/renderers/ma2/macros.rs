//! Setup macro: stores the cues, wires the executor and imports the timecode show

use super::defaults::{self, element};
use super::xml::{ma_root, write_document, XmlElement};
use crate::converters::midi_to_ma2::{sanitize_label, ExportSettings, MidiMarkers, Result};

/// grandMA2 macro; lines run top to bottom on the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroScript {
    pub label: String,
    pub lines: Vec<String>,
}

impl MacroScript {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            lines: Vec::new(),
        }
    }

    pub fn add_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// One `store` line per cue (cue N for the Nth marker), then the five
    /// setup lines. Numbers are written exactly as given.
    pub fn build(settings: &ExportSettings, timecode_file_name: &str, markers: &MidiMarkers) -> Self {
        let label = sanitize_label(&settings.label);
        let seq = settings.sequence_number;
        let tc = settings.timecode_number;

        let mut script = MacroScript::new(format!("{} {}", defaults::MACRO_NAME_PREFIX, label));

        for (index, cue) in markers.cues.iter().enumerate() {
            script.add_line(format!(
                r#"store seq {} cue {} "{}" /o /nc"#,
                seq,
                index + 1,
                sanitize_label(&cue.label)
            ));
        }

        script.add_line(format!(r#"label seq {} "{}""#, seq, label));
        script.add_line(format!(
            "assign seq {} at exec {}.{}",
            seq, settings.exec_page, settings.exec_number
        ));
        script.add_line(defaults::SELECT_DESTINATION);
        script.add_line(format!(
            r#"import "{}" at timecode {} /o /nc"#,
            sanitize_label(timecode_file_name),
            tc
        ));
        script.add_line(format!(r#"label timecode {} "TC {}""#, tc, label));

        script
    }

    pub fn to_element(&self) -> XmlElement {
        let mut macro_el = XmlElement::new(element::MACRO)
            .attr("index", defaults::FILE_POOL_INDEX)
            .attr("name", &self.label);

        for (index, line) in self.lines.iter().enumerate() {
            macro_el.push(
                XmlElement::new(element::MACROLINE)
                    .attr("index", index)
                    .child(XmlElement::new(element::TEXT).text(line.as_str())),
            );
        }

        ma_root(macro_el)
    }

    pub fn to_xml(&self) -> Result<String> {
        write_document(&self.to_element())
    }
}
