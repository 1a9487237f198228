use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use ma2_timecode::{export, ExportSettings, FrameRate};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    execute(cli)
}

#[derive(Parser)]
#[command(
    name = "midi2gma2tc",
    author,
    version,
    about = "Convert MIDI markers into a grandMA2 timecode show and setup macro"
)]
struct Cli {
    /// MIDI file to read markers from.
    midifile: PathBuf,
    /// Output path for the timecode XML (`-` for stdout).
    timecode_out: PathBuf,
    /// Output path for the macro XML (`-` for stdout).
    macro_out: PathBuf,
    /// Label for sequence/executor/timecode in MA2.
    #[arg(short, long, default_value = "My Song")]
    label: String,
    /// MA2 sequence pool number to overwrite.
    #[arg(short, long, default_value_t = 101)]
    sequence_number: u32,
    /// MA2 timecode pool number to overwrite.
    #[arg(short, long, default_value_t = 1)]
    timecode_number: u32,
    /// MA2 executor page to store executor.
    #[arg(short = 'p', long, default_value_t = 1)]
    exec_page: u32,
    /// MA2 executor number to overwrite.
    #[arg(short = 'e', long, default_value_t = 101)]
    exec_number: u32,
    /// Timecode frame rate (24, 25 or 30); overrides the MIDI file.
    #[arg(short, long, value_parser = parse_frame_rate)]
    frame_rate: Option<FrameRate>,
    /// Print the extracted markers as JSON.
    #[arg(long)]
    report: bool,
    /// Log per-marker detail.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn settings(&self) -> ExportSettings {
        ExportSettings {
            label: self.label.clone(),
            sequence_number: self.sequence_number,
            timecode_number: self.timecode_number,
            exec_page: self.exec_page,
            exec_number: self.exec_number,
            frame_rate: self.frame_rate,
        }
    }
}

fn parse_frame_rate(value: &str) -> std::result::Result<FrameRate, String> {
    let fps: u16 = value
        .parse()
        .map_err(|_| format!("{value} is not a number"))?;
    FrameRate::try_from(fps).map_err(|e| e.to_string())
}

fn execute(cli: Cli) -> Result<()> {
    if !cli.midifile.is_file() {
        bail!("MIDI file {} does not exist", cli.midifile.display());
    }

    let midi = fs::read(&cli.midifile)
        .with_context(|| format!("failed to read MIDI file {}", cli.midifile.display()))?;

    let settings = cli.settings();
    let summary = export(&settings, &midi, &cli.timecode_out, &cli.macro_out)
        .with_context(|| format!("failed to convert {}", cli.midifile.display()))?;

    if cli.report {
        let report = serde_json::to_string_pretty(&summary).context("failed to encode report")?;
        println!("{report}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_rate() {
        assert_eq!(parse_frame_rate("25").unwrap(), FrameRate::Fps25);
        assert!(parse_frame_rate("29").is_err());
        assert!(parse_frame_rate("fast").is_err());
    }

    #[test]
    fn test_cli_defaults_match_settings_defaults() {
        let cli = Cli::parse_from(["midi2gma2tc", "song.mid", "tc.xml", "macro.xml"]);
        assert_eq!(cli.settings(), ExportSettings::default());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "midi2gma2tc", "song.mid", "tc.xml", "macro.xml",
            "-l", "Encore", "-s", "200", "-t", "3", "-p", "2", "-e", "7", "-f", "24",
        ]);
        let settings = cli.settings();
        assert_eq!(settings.label, "Encore");
        assert_eq!(settings.sequence_number, 200);
        assert_eq!(settings.timecode_number, 3);
        assert_eq!(settings.exec_page, 2);
        assert_eq!(settings.exec_number, 7);
        assert_eq!(settings.frame_rate, Some(FrameRate::Fps24));
    }

    #[test]
    fn test_cli_rejects_invalid_frame_rate() {
        let result = Cli::try_parse_from([
            "midi2gma2tc", "song.mid", "tc.xml", "macro.xml", "--frame-rate", "60",
        ]);
        assert!(result.is_err());
    }
}
