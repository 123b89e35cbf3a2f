use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::warn;

use crate::cli::OutputFormat;
use crate::core::types::Classification;
use crate::parsing::sam::{alignment_view, reference_name, visit_records};
use crate::resolve::{resolve_alignment, ColorOption, Policy};

#[derive(Args)]
pub struct ResolveArgs {
    /// Input file (BAM or SAM). Use '-' for SAM on stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// Which modifications compete for each base
    #[arg(long, value_enum, default_value = "basemod")]
    pub color_option: ColorOption,

    /// Fail on the first read with invalid MM/ML tags instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

/// One classified base of one read
#[derive(Debug, Serialize)]
struct BaseRow<'a> {
    read: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    contig: Option<&'a str>,

    /// One-based reference position
    position: u64,

    read_offset: usize,

    #[serde(flatten)]
    classification: Classification<'a>,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    reads_with_calls: usize,
    reads_skipped: usize,
    bases_modified: usize,
    bases_unmodified: usize,
}

/// Execute resolve subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be read, or if `--strict` is set and a
/// read carries invalid modification tags.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ResolveArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let policy = Policy::from(args.color_option);
    let mut summary = Summary::default();
    let mut json_reads = Vec::new();

    if matches!(format, OutputFormat::Tsv) {
        println!("read\tcontig\tposition\tread_offset\tcategory\tconfidence");
    }

    let records = visit_records(&args.input, |header, record| {
        let view = match alignment_view(record) {
            Ok(Some(view)) => view,
            Ok(None) => return Ok(()),
            Err(e) if !args.strict => {
                warn!(error = %e, "Skipping read");
                summary.reads_skipped += 1;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        if !view.has_modifications() {
            return Ok(());
        }
        summary.reads_with_calls += 1;

        let contig = reference_name(header, record);
        let read = view.name.as_deref().unwrap_or("*");

        let rows: Vec<BaseRow<'_>> = resolve_alignment(&view, policy)
            .map(|base| BaseRow {
                read,
                contig: contig.as_deref(),
                position: base.reference_position + 1,
                read_offset: base.read_offset,
                classification: base.classification,
            })
            .collect();

        for row in &rows {
            if row.classification.is_unmodified() {
                summary.bases_unmodified += 1;
            } else {
                summary.bases_modified += 1;
            }
        }

        match format {
            OutputFormat::Text => print_text_rows(&rows),
            OutputFormat::Tsv => print_tsv_rows(&rows),
            OutputFormat::Json => json_reads.push(serde_json::json!({
                "read": read,
                "contig": contig.as_deref(),
                "bases": rows,
            })),
        }

        Ok(())
    })?;

    if verbose {
        eprintln!(
            "Read {records} records: {} with modification calls, {} skipped",
            summary.reads_with_calls, summary.reads_skipped
        );
        eprintln!(
            "Classified {} bases as modified, {} as unmodified",
            summary.bases_modified, summary.bases_unmodified
        );
    }

    if matches!(format, OutputFormat::Json) {
        let output = serde_json::json!({
            "policy": policy,
            "summary": summary,
            "reads": json_reads,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}

fn print_text_rows(rows: &[BaseRow<'_>]) {
    for row in rows {
        println!(
            "{} {}:{} (read offset {}): {} [{}]",
            row.read,
            row.contig.unwrap_or("*"),
            row.position,
            row.read_offset,
            row.classification.category,
            row.classification.confidence,
        );
    }
}

fn print_tsv_rows(rows: &[BaseRow<'_>]) {
    for row in rows {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            row.read,
            row.contig.unwrap_or("*"),
            row.position,
            row.read_offset,
            row.classification.category,
            row.classification.confidence,
        );
    }
}
