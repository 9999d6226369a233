//! MidiRemap - command line driver
//!
//! Remaps a MIDI file (or a random file from a sample directory) onto the
//! instruments of a description document.
//!
//! # Usage
//!
//! ```bash
//! midiremap --input song.mid
//! midiremap --sample-dir ./midi-sample --description b0rkestra_description.json
//! midiremap --input song.mid --output out.mid --report report.json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::seq::SliceRandom;
use walkdir::WalkDir;

use midiremap_lib::{Description, MidiReadOptions, remap_midi_file};

#[derive(Parser)]
#[command(name = "midiremap")]
#[command(author, version, about = "Remap MIDI channels and pitches onto a described instrument set")]
struct Args {
    /// Instrument description document (JSON)
    #[arg(long, short = 'd', default_value = "b0rkestra_description.json")]
    description: PathBuf,

    /// MIDI file to remap
    #[arg(long, short = 'i', conflicts_with = "sample_dir", required_unless_present = "sample_dir")]
    input: Option<PathBuf>,

    /// Pick a random MIDI file from this directory instead of --input
    #[arg(long)]
    sample_dir: Option<PathBuf>,

    /// Output file (default: <input>.remapped.mid next to the input)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Write the assignment report as JSON
    #[arg(long)]
    report: Option<PathBuf>,

    /// Treat note-on events with velocity 0 as note-off
    #[arg(long)]
    zero_velocity_note_off: bool,
}

/// All .mid/.midi files under a directory
fn midi_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        match entry {
            Ok(entry) => {
                let is_midi = entry
                    .path()
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.eq_ignore_ascii_case("mid") || e.eq_ignore_ascii_case("midi"))
                    .unwrap_or(false);
                if entry.file_type().is_file() && is_midi {
                    files.push(entry.path().to_path_buf());
                }
            }
            Err(e) => tracing::warn!("Error accessing entry: {}", e),
        }
    }
    files
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}.remapped.mid", stem))
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let input = match (&args.input, &args.sample_dir) {
        (Some(input), _) => input.clone(),
        (None, Some(dir)) => {
            let files = midi_files(dir);
            let Some(choice) = files.choose(&mut rand::thread_rng()) else {
                bail!("No MIDI files found in {}", dir.display());
            };
            tracing::info!("Picked {} of {} sample files", choice.display(), files.len());
            choice.clone()
        }
        (None, None) => bail!("Either --input or --sample-dir is required"),
    };

    let description = Description::load(&args.description)
        .with_context(|| format!("Failed to load description {}", args.description.display()))?;

    let options = MidiReadOptions {
        zero_velocity_note_off: args.zero_velocity_note_off,
    };
    let output = args.output.clone().unwrap_or_else(|| default_output(&input));

    let report = remap_midi_file(&input, &output, &description, &options)
        .with_context(|| format!("Failed to remap {}", input.display()))?;

    for line in report.summary() {
        tracing::info!("{}", line);
    }

    if let Some(path) = &args.report {
        let json = report.to_json().context("Failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
    }

    Ok(())
}
