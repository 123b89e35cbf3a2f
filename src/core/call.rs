use thiserror::Error;

use crate::core::types::Strand;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallSetError {
    #[error("Duplicate modification call at read position {0}")]
    DuplicatePosition(usize),
}

/// A single modification call at one read position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModificationCall<'a> {
    /// Zero-based position in the read sequence as stored
    pub position: usize,

    /// Unmodified base the call pertains to (A, C, G, T or N)
    pub canonical_base: u8,

    /// Modification code, e.g. `m` or `a`
    pub modification: &'a str,

    /// Scaled probability, 255 = certain
    pub likelihood: u8,
}

/// All calls for one (canonical base, strand, modification code) on a read.
///
/// Likelihoods are stored densely by read position so that both
/// [`contains_position`](Self::contains_position) and
/// [`likelihood`](Self::likelihood) are constant time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModificationCallSet {
    canonical_base: u8,
    strand: Strand,
    modification: String,
    likelihoods: Vec<Option<u8>>,
    count: usize,
}

impl ModificationCallSet {
    /// Build a call set from `(position, likelihood)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `CallSetError::DuplicatePosition` if two calls share a position.
    pub fn new(
        canonical_base: u8,
        strand: Strand,
        modification: impl Into<String>,
        calls: impl IntoIterator<Item = (usize, u8)>,
    ) -> Result<Self, CallSetError> {
        let mut likelihoods: Vec<Option<u8>> = Vec::new();
        let mut count = 0;

        for (position, likelihood) in calls {
            if position >= likelihoods.len() {
                likelihoods.resize(position + 1, None);
            }
            if likelihoods[position].replace(likelihood).is_some() {
                return Err(CallSetError::DuplicatePosition(position));
            }
            count += 1;
        }

        Ok(Self {
            canonical_base: canonical_base.to_ascii_uppercase(),
            strand,
            modification: modification.into(),
            likelihoods,
            count,
        })
    }

    #[must_use]
    pub fn canonical_base(&self) -> u8 {
        self.canonical_base
    }

    #[must_use]
    pub fn strand(&self) -> Strand {
        self.strand
    }

    #[must_use]
    pub fn modification(&self) -> &str {
        &self.modification
    }

    #[must_use]
    pub fn contains_position(&self, position: usize) -> bool {
        self.likelihood(position).is_some()
    }

    #[must_use]
    pub fn likelihood(&self, position: usize) -> Option<u8> {
        self.likelihoods.get(position).copied().flatten()
    }

    /// Number of calls in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Calls in ascending position order
    pub fn calls(&self) -> impl Iterator<Item = ModificationCall<'_>> {
        self.likelihoods
            .iter()
            .enumerate()
            .filter_map(move |(position, likelihood)| {
                likelihood.map(|likelihood| ModificationCall {
                    position,
                    canonical_base: self.canonical_base,
                    modification: &self.modification,
                    likelihood,
                })
            })
    }
}
