use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::kinetics::KineticCodec;
use crate::parsing::sam::{kinetic_tracks, read_name, visit_records, KineticTrack};

#[derive(Args)]
pub struct KineticsArgs {
    /// Input file (BAM or SAM). Use '-' for SAM on stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// Print every decoded value, not just the summary
    #[arg(long)]
    pub full: bool,
}

/// Execute kinetics subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be read or JSON serialization fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: KineticsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let codec = KineticCodec::shared();
    let mut json_reads = Vec::new();
    let mut reads_with_kinetics = 0usize;

    if matches!(format, OutputFormat::Tsv) {
        if args.full {
            println!("read\ttag\tcount\tmean_frames\tframes");
        } else {
            println!("read\ttag\tcount\tmean_frames");
        }
    }

    let records = visit_records(&args.input, |_, record| {
        let tracks = kinetic_tracks(record, codec);
        if tracks.is_empty() {
            return Ok(());
        }
        reads_with_kinetics += 1;

        let read = read_name(record);
        match format {
            OutputFormat::Text => print_text_tracks(&read, &tracks, args.full),
            OutputFormat::Tsv => print_tsv_tracks(&read, &tracks, args.full),
            OutputFormat::Json => {
                let tracks: Vec<_> = tracks
                    .iter()
                    .map(|track| {
                        let mut value = serde_json::json!({
                            "tag": track.tag,
                            "count": track.frames.len(),
                            "mean_frames": track.mean(),
                        });
                        if args.full {
                            value["frames"] = serde_json::json!(track.frames);
                        }
                        value
                    })
                    .collect();
                json_reads.push(serde_json::json!({ "read": read, "tracks": tracks }));
            }
        }
        Ok(())
    })?;

    if verbose {
        eprintln!("Read {records} records, {reads_with_kinetics} with kinetic tags");
    }

    if matches!(format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&json_reads)?);
    }

    Ok(())
}

fn format_mean(track: &KineticTrack) -> String {
    track
        .mean()
        .map_or_else(|| "NA".to_string(), |mean| format!("{mean:.2}"))
}

fn join_frames(frames: &[u16]) -> String {
    frames
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn print_text_tracks(read: &str, tracks: &[KineticTrack], full: bool) {
    println!("{read}");
    for track in tracks {
        println!(
            "  {}: {} values, mean {} frames",
            track.tag,
            track.frames.len(),
            format_mean(track)
        );
        if full {
            println!("    {}", join_frames(&track.frames));
        }
    }
}

fn print_tsv_tracks(read: &str, tracks: &[KineticTrack], full: bool) {
    for track in tracks {
        if full {
            println!(
                "{read}\t{}\t{}\t{}\t{}",
                track.tag,
                track.frames.len(),
                format_mean(track),
                join_frames(&track.frames)
            );
        } else {
            println!(
                "{read}\t{}\t{}\t{}",
                track.tag,
                track.frames.len(),
                format_mean(track)
            );
        }
    }
}
