//! Command-line interface for basemod.
//!
//! - **decode**: Decode compressed kinetic bytes to frame counts
//! - **resolve**: Classify every aligned base of every read by its modification calls
//! - **kinetics**: Decode the `fi`/`ri`/`fp`/`rp` tags of every read
//!
//! ## Usage
//!
//! ```text
//! # Highest-likelihood modification per base
//! basemod resolve sample.bam
//!
//! # 5mC against unmodified cytosine, as TSV
//! basemod resolve sample.bam --color-option basemod-5mc --format tsv
//!
//! # Pipe from samtools
//! samtools view -h sample.bam chr1:1000-2000 | basemod resolve -
//!
//! # Inspect the kinetics codec
//! basemod decode 0 63 64 255
//! ```

use clap::{Parser, Subcommand};

pub mod decode;
pub mod kinetics;
pub mod resolve;

#[derive(Parser)]
#[command(name = "basemod")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Resolve base modification calls and decode kinetics from BAM/SAM reads")]
#[command(
    long_about = "basemod reads MM/ML base-modification tags and PacBio kinetic tags from BAM/SAM files.\n\nFor every aligned base it picks the single dominant modification call (or, in cytosine mode, 'unmodified') and reports it with its confidence."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode compressed kinetic bytes to approximate frame counts
    Decode(decode::DecodeArgs),

    /// Classify aligned bases by their modification calls
    Resolve(resolve::ResolveArgs),

    /// Decode the kinetic tags of each read
    Kinetics(kinetics::KineticsArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
