use std::io::{self, BufReader};
use std::path::Path;

use noodles::sam::alignment::record::cigar::op::Kind;
use noodles::sam::alignment::record::data::field::Tag;
use noodles::sam::alignment::record_buf::data::field::value::Array;
use noodles::sam::alignment::record_buf::data::field::Value;
use noodles::sam::alignment::RecordBuf;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::alignment::{AlignmentBlock, AlignmentView};
use crate::core::call::ModificationCallSet;
use crate::kinetics::KineticCodec;
use crate::parsing::mod_tags::{call_sets_from_tags, ModTagError};

const LEGACY_BASE_MODIFICATIONS: Tag = Tag::new(b'M', b'm');
const LEGACY_BASE_MODIFICATION_PROBABILITIES: Tag = Tag::new(b'M', b'l');

/// Kinetic tags written by PacBio `ccs --hifi-kinetics`
pub const KINETIC_TAGS: [[u8; 2]; 4] = [*b"fi", *b"ri", *b"fp", *b"rp"];

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid base modification tags on read {read}: {source}")]
    ModTags {
        read: String,
        #[source]
        source: ModTagError,
    },
}

/// Visit every record of a SAM or BAM file in order.
///
/// `-` reads SAM from stdin. Returns the number of records visited.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or a record is malformed,
/// `ParseError::UnsupportedFormat` for unknown extensions, or any error `visit`
/// returns.
pub fn visit_records<F>(path: &Path, mut visit: F) -> Result<usize, ParseError>
where
    F: FnMut(&noodles::sam::Header, &RecordBuf) -> Result<(), ParseError>,
{
    use noodles::{bam, sam};

    if path.as_os_str() == "-" {
        let mut reader = sam::io::Reader::new(io::stdin().lock());
        let header = reader.read_header()?;
        return visit_all(&header, reader.record_bufs(&header), visit);
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    let count = match extension.as_deref() {
        Some("bam") => {
            let mut reader = std::fs::File::open(path).map(bam::io::Reader::new)?;
            let header = reader.read_header()?;
            visit_all(&header, reader.record_bufs(&header), &mut visit)?
        }
        Some("sam") | None => {
            let mut reader = std::fs::File::open(path)
                .map(BufReader::new)
                .map(sam::io::Reader::new)?;
            let header = reader.read_header()?;
            visit_all(&header, reader.record_bufs(&header), &mut visit)?
        }
        Some(ext) => return Err(ParseError::UnsupportedFormat(ext.to_string())),
    };

    debug!(path = %path.display(), records = count, "Finished reading records");
    Ok(count)
}

fn visit_all<I, F>(
    header: &noodles::sam::Header,
    records: I,
    mut visit: F,
) -> Result<usize, ParseError>
where
    I: Iterator<Item = io::Result<RecordBuf>>,
    F: FnMut(&noodles::sam::Header, &RecordBuf) -> Result<(), ParseError>,
{
    let mut count = 0;
    for result in records {
        let record = result?;
        visit(header, &record)?;
        count += 1;
    }
    Ok(count)
}

/// Read name, or `*` when absent
#[must_use]
pub fn read_name(record: &RecordBuf) -> String {
    record
        .name()
        .map_or_else(|| "*".to_string(), |name| name.to_string())
}

/// Name of the reference sequence a record is aligned to
#[must_use]
pub fn reference_name(header: &noodles::sam::Header, record: &RecordBuf) -> Option<String> {
    record
        .reference_sequence_id()
        .and_then(|id| header.reference_sequences().get_index(id))
        .map(|(name, _)| name.to_string())
}

/// Convert a mapped record into an [`AlignmentView`].
///
/// Returns `Ok(None)` for unmapped records.
///
/// # Errors
///
/// Returns `ParseError::ModTags` if the MM/ML tags are present but invalid.
pub fn alignment_view(record: &RecordBuf) -> Result<Option<AlignmentView>, ParseError> {
    if record.flags().is_unmapped() {
        return Ok(None);
    }
    let Some(start) = record.alignment_start() else {
        return Ok(None);
    };

    let reference_start = (usize::from(start) - 1) as u64;
    let blocks = alignment_blocks(
        reference_start,
        record.cigar().as_ref().iter().map(|op| (op.kind(), op.len())),
    );

    let call_sets = modification_call_sets(record).map_err(|source| ParseError::ModTags {
        read: read_name(record),
        source,
    })?;

    Ok(Some(
        AlignmentView::new(blocks, call_sets).with_name(read_name(record)),
    ))
}

/// Split a CIGAR into gapless aligned blocks.
///
/// Soft clips and insertions consume read bases only, deletions and skips consume
/// reference bases only.
pub fn alignment_blocks<I>(reference_start: u64, ops: I) -> Vec<AlignmentBlock>
where
    I: IntoIterator<Item = (Kind, usize)>,
{
    let mut blocks = Vec::new();
    let mut reference_position = reference_start;
    let mut read_offset = 0;

    for (kind, len) in ops {
        match kind {
            Kind::Match | Kind::SequenceMatch | Kind::SequenceMismatch => {
                blocks.push(AlignmentBlock::new(reference_position, read_offset, len));
                reference_position += len as u64;
                read_offset += len;
            }
            Kind::Insertion | Kind::SoftClip => read_offset += len,
            Kind::Deletion | Kind::Skip => reference_position += len as u64,
            Kind::HardClip | Kind::Pad => {}
        }
    }

    blocks
}

/// Call sets from the MM/ML tags of a record, empty when MM is absent
///
/// # Errors
///
/// Returns a `ModTagError` if the tags do not describe valid calls on the
/// record's sequence.
pub fn modification_call_sets(
    record: &RecordBuf,
) -> Result<Vec<ModificationCallSet>, ModTagError> {
    let data = record.data();

    let mm = data
        .get(&Tag::BASE_MODIFICATIONS)
        .or_else(|| data.get(&LEGACY_BASE_MODIFICATIONS));
    let Some(Value::String(mm)) = mm else {
        return Ok(Vec::new());
    };

    let ml = data
        .get(&Tag::BASE_MODIFICATION_PROBABILITIES)
        .or_else(|| data.get(&LEGACY_BASE_MODIFICATION_PROBABILITIES))
        .and_then(byte_array);

    let mm = String::from_utf8_lossy(mm.as_ref());
    call_sets_from_tags(
        &mm,
        ml,
        record.sequence().as_ref(),
        record.flags().is_reverse_complemented(),
    )
}

/// Decoded kinetic values of one tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KineticTrack {
    /// Two-letter tag, e.g. `fi`
    pub tag: String,

    /// Approximate frame counts, one per base
    pub frames: Vec<u16>,
}

impl KineticTrack {
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        if self.frames.is_empty() {
            return None;
        }
        let total: u64 = self.frames.iter().map(|&f| u64::from(f)).sum();
        #[allow(clippy::cast_precision_loss)]
        let mean = total as f64 / self.frames.len() as f64;
        Some(mean)
    }
}

/// Decode every kinetic tag present on a record with `codec`
#[must_use]
pub fn kinetic_tracks(record: &RecordBuf, codec: &KineticCodec) -> Vec<KineticTrack> {
    let data = record.data();

    KINETIC_TAGS
        .iter()
        .filter_map(|&[a, b]| {
            let tag = Tag::new(a, b);
            match data.get(&tag) {
                Some(value) => {
                    let Some(bytes) = byte_array(value) else {
                        warn!(
                            read = %read_name(record),
                            tag = %String::from_utf8_lossy(&[a, b]),
                            "Kinetic tag is not a uint8 array, ignoring"
                        );
                        return None;
                    };
                    Some(KineticTrack {
                        tag: String::from_utf8_lossy(&[a, b]).into_owned(),
                        frames: codec.decode_all(bytes),
                    })
                }
                None => None,
            }
        })
        .collect()
}

fn byte_array(value: &Value) -> Option<&[u8]> {
    match value {
        Value::Array(Array::UInt8(values)) => Some(values.as_slice()),
        _ => None,
    }
}
