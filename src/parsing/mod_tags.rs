use thiserror::Error;

use crate::core::call::{CallSetError, ModificationCallSet};
use crate::core::types::{complement, Strand, MAX_LIKELIHOOD};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModTagError {
    #[error("Invalid MM entry: {0}")]
    InvalidEntry(String),

    #[error("Invalid skip count '{skip}' in MM entry {entry}")]
    InvalidSkip { entry: String, skip: String },

    #[error("ML has {actual} likelihoods but MM describes {expected} calls")]
    LikelihoodCountMismatch { expected: usize, actual: usize },

    #[error("MM entry {0} skips past the end of the read sequence")]
    SkipBeyondSequence(String),

    #[error(transparent)]
    CallSet(#[from] CallSetError),
}

/// One `;`-terminated entry of an MM tag, e.g. `C+mh?,3,0,7`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MmEntry {
    /// Canonical base, uppercase; `N` matches any base
    pub canonical_base: u8,

    pub strand: Strand,

    /// One or more modification codes sharing the skip list
    pub codes: Vec<String>,

    /// `false` for `?` (unlisted bases unknown), `true` for `.` or no flag
    pub implicit: bool,

    /// Number of canonical bases to skip before each call
    pub skips: Vec<usize>,
}

impl MmEntry {
    /// Number of ML values this entry consumes
    #[must_use]
    pub fn likelihood_count(&self) -> usize {
        self.skips.len() * self.codes.len()
    }
}

/// Parse an MM tag value into its entries.
///
/// # Errors
///
/// Returns `ModTagError::InvalidEntry` for a malformed entry header or
/// `ModTagError::InvalidSkip` for a non-numeric skip count.
pub fn parse_mm(mm: &str) -> Result<Vec<MmEntry>, ModTagError> {
    mm.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_entry)
        .collect()
}

fn parse_entry(entry: &str) -> Result<MmEntry, ModTagError> {
    let invalid = || ModTagError::InvalidEntry(entry.to_string());

    let mut fields = entry.split(',');
    let head = fields.next().ok_or_else(invalid)?.as_bytes();

    let (&base, rest) = head.split_first().ok_or_else(invalid)?;
    let canonical_base = base.to_ascii_uppercase();
    if !matches!(canonical_base, b'A' | b'C' | b'G' | b'T' | b'U' | b'N') {
        return Err(invalid());
    }

    let (&strand, rest) = rest.split_first().ok_or_else(invalid)?;
    let strand = Strand::from_symbol(strand).ok_or_else(invalid)?;

    let (codes, implicit) = match rest.split_last() {
        Some((b'?', codes)) => (codes, false),
        Some((b'.', codes)) => (codes, true),
        _ => (rest, true),
    };
    let codes = parse_codes(codes).ok_or_else(invalid)?;

    let skips = fields
        .map(|skip| {
            skip.trim()
                .parse::<usize>()
                .map_err(|_| ModTagError::InvalidSkip {
                    entry: entry.to_string(),
                    skip: skip.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MmEntry {
        canonical_base,
        strand,
        codes,
        implicit,
        skips,
    })
}

/// Single-letter codes may be stacked (`mh`); a ChEBI number stands alone.
fn parse_codes(codes: &[u8]) -> Option<Vec<String>> {
    if codes.is_empty() {
        return None;
    }
    if codes.iter().all(u8::is_ascii_digit) {
        return Some(vec![String::from_utf8_lossy(codes).into_owned()]);
    }
    if codes.iter().all(u8::is_ascii_alphabetic) {
        return Some(codes.iter().map(|&c| char::from(c).to_string()).collect());
    }
    None
}

/// Read positions (in stored SEQ coordinates) of every call in `entry`.
///
/// Skip counts refer to the read as sequenced. For reverse-complemented records the
/// stored sequence is walked from its end, matching the complement of the base.
fn call_positions(
    entry: &MmEntry,
    sequence: &[u8],
    reverse: bool,
) -> Result<Vec<usize>, ModTagError> {
    let target = if entry.canonical_base == b'U' {
        b'T'
    } else {
        entry.canonical_base
    };
    let target = if reverse { complement(target) } else { target };
    let is_target = |base: u8| target == b'N' || base.to_ascii_uppercase() == target;

    let mut candidates: Box<dyn Iterator<Item = usize> + '_> = if reverse {
        Box::new((0..sequence.len()).rev().filter(|&i| is_target(sequence[i])))
    } else {
        Box::new((0..sequence.len()).filter(|&i| is_target(sequence[i])))
    };

    entry
        .skips
        .iter()
        .map(|&skip| {
            candidates
                .nth(skip)
                .ok_or_else(|| ModTagError::SkipBeyondSequence(format_head(entry)))
        })
        .collect()
}

fn format_head(entry: &MmEntry) -> String {
    format!(
        "{}{}{}",
        char::from(entry.canonical_base),
        entry.strand,
        entry.codes.join("")
    )
}

/// Build one call set per modification code from MM/ML tag values.
///
/// Sets are returned in tag order. A missing ML tag gives every call likelihood 255.
///
/// # Errors
///
/// Returns a `ModTagError` if the MM tag is malformed, the ML length does not
/// match the number of calls, or a skip count runs past the end of `sequence`.
pub fn call_sets_from_tags(
    mm: &str,
    ml: Option<&[u8]>,
    sequence: &[u8],
    reverse: bool,
) -> Result<Vec<ModificationCallSet>, ModTagError> {
    let entries = parse_mm(mm)?;

    let expected: usize = entries.iter().map(MmEntry::likelihood_count).sum();
    if let Some(ml) = ml {
        if ml.len() != expected {
            return Err(ModTagError::LikelihoodCountMismatch {
                expected,
                actual: ml.len(),
            });
        }
    }

    let mut sets = Vec::new();
    let mut offset = 0;

    for entry in &entries {
        let positions = call_positions(entry, sequence, reverse)?;
        let stride = entry.codes.len();

        for (code_index, code) in entry.codes.iter().enumerate() {
            let calls = positions.iter().enumerate().map(|(call_index, &position)| {
                let likelihood = ml.map_or(MAX_LIKELIHOOD, |ml| {
                    ml[offset + call_index * stride + code_index]
                });
                (position, likelihood)
            });
            sets.push(ModificationCallSet::new(
                entry.canonical_base,
                entry.strand,
                code.as_str(),
                calls,
            )?);
        }

        offset += entry.likelihood_count();
    }

    Ok(sets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mm_entries() {
        let entries = parse_mm("C+mh?,5,12,0;A-a.,1;G+76792,0;").unwrap();
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].canonical_base, b'C');
        assert_eq!(entries[0].strand, Strand::Forward);
        assert_eq!(entries[0].codes, vec!["m", "h"]);
        assert!(!entries[0].implicit);
        assert_eq!(entries[0].skips, vec![5, 12, 0]);
        assert_eq!(entries[0].likelihood_count(), 6);

        assert_eq!(entries[1].strand, Strand::Reverse);
        assert!(entries[1].implicit);
        assert_eq!(entries[2].codes, vec!["76792"]);
    }

    #[test]
    fn test_parse_mm_without_skips_or_trailing_semicolon() {
        let entries = parse_mm("C+m;T+a,2").unwrap();
        assert!(entries[0].skips.is_empty());
        assert_eq!(entries[1].skips, vec![2]);
        assert!(parse_mm("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_mm_rejects_malformed() {
        assert!(matches!(parse_mm("C,1;"), Err(ModTagError::InvalidEntry(_))));
        assert!(matches!(parse_mm("C*m,1;"), Err(ModTagError::InvalidEntry(_))));
        assert!(matches!(parse_mm("X+m,1;"), Err(ModTagError::InvalidEntry(_))));
        assert!(matches!(parse_mm("C+m1,1;"), Err(ModTagError::InvalidEntry(_))));
        assert!(matches!(
            parse_mm("C+m,one;"),
            Err(ModTagError::InvalidSkip { .. })
        ));
    }

    #[test]
    fn test_forward_positions() {
        // C at 1, 3, 4, 7
        let seq = b"ACGCCAAC";
        let sets = call_sets_from_tags("C+m,0,1,0;", Some(&[10, 20, 30]), seq, false).unwrap();
        assert_eq!(sets.len(), 1);

        let calls: Vec<_> = sets[0].calls().map(|c| (c.position, c.likelihood)).collect();
        assert_eq!(calls, vec![(1, 10), (4, 20), (7, 30)]);
    }

    #[test]
    fn test_reverse_positions() {
        // revcomp of ACGCCAAC is GTTGGCGT; C in the original read are G in SEQ,
        // walked from the end: G at 6, 4, 3, 0
        let seq = b"GTTGGCGT";
        let sets = call_sets_from_tags("C+m,0,1;", Some(&[5, 6]), seq, true).unwrap();

        let calls: Vec<_> = sets[0].calls().map(|c| (c.position, c.likelihood)).collect();
        assert_eq!(calls, vec![(3, 6), (6, 5)]);
    }

    #[test]
    fn test_multi_code_entry_interleaves_likelihoods() {
        let seq = b"CACAC";
        let sets =
            call_sets_from_tags("C+mh,0,1;", Some(&[200, 10, 30, 40]), seq, false).unwrap();
        assert_eq!(sets.len(), 2);

        assert_eq!(sets[0].modification(), "m");
        assert_eq!(sets[0].likelihood(0), Some(200));
        assert_eq!(sets[0].likelihood(4), Some(30));

        assert_eq!(sets[1].modification(), "h");
        assert_eq!(sets[1].likelihood(0), Some(10));
        assert_eq!(sets[1].likelihood(4), Some(40));
    }

    #[test]
    fn test_ml_offset_across_entries() {
        let seq = b"CAT";
        let sets = call_sets_from_tags("C+m,0;A+a,0;", Some(&[1, 2]), seq, false).unwrap();
        assert_eq!(sets[0].likelihood(0), Some(1));
        assert_eq!(sets[1].canonical_base(), b'A');
        assert_eq!(sets[1].likelihood(1), Some(2));
    }

    #[test]
    fn test_missing_ml_means_certain() {
        let sets = call_sets_from_tags("A+a,1;", None, b"AAT", false).unwrap();
        assert_eq!(sets[0].likelihood(1), Some(255));
    }

    #[test]
    fn test_n_matches_any_base() {
        let sets = call_sets_from_tags("N+n,2;", Some(&[7]), b"ACGT", false).unwrap();
        assert_eq!(sets[0].likelihood(2), Some(7));
    }

    #[test]
    fn test_ml_length_mismatch() {
        let result = call_sets_from_tags("C+m,0,0;", Some(&[1]), b"CC", false);
        assert_eq!(
            result.unwrap_err(),
            ModTagError::LikelihoodCountMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_skip_beyond_sequence() {
        let result = call_sets_from_tags("C+m,3;", Some(&[1]), b"CCA", false);
        assert!(matches!(result, Err(ModTagError::SkipBeyondSequence(_))));
    }
}
