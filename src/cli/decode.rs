use clap::Args;

use crate::cli::OutputFormat;
use crate::kinetics::KineticCodec;

#[derive(Args)]
pub struct DecodeArgs {
    /// Compressed kinetic bytes (0-255)
    #[arg(required_unless_present = "all")]
    pub bytes: Vec<u8>,

    /// Print the whole 256-entry table
    #[arg(long)]
    pub all: bool,
}

/// Execute decode subcommand
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: DecodeArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let codec = KineticCodec::shared();

    let bytes: Vec<u8> = if args.all {
        (0..=u8::MAX).collect()
    } else {
        args.bytes.clone()
    };

    if verbose {
        eprintln!("Decoding {} bytes", bytes.len());
    }

    let decoded: Vec<(u8, u16)> = bytes.iter().map(|&b| (b, codec.decode(b))).collect();

    match format {
        OutputFormat::Text => {
            for (byte, frames) in &decoded {
                println!("{byte:>3} (0b{byte:08b}) -> {frames} frames");
            }
        }
        OutputFormat::Json => {
            let output: Vec<_> = decoded
                .iter()
                .map(|(byte, frames)| serde_json::json!({ "byte": byte, "frames": frames }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("byte\tframes");
            for (byte, frames) in &decoded {
                println!("{byte}\t{frames}");
            }
        }
    }

    Ok(())
}
