use crate::core::call::ModificationCallSet;

/// A gapless run of read bases aligned to the reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentBlock {
    /// Zero-based reference coordinate of the first base
    pub reference_start: u64,

    /// Zero-based offset of the first base in the read sequence
    pub read_start: usize,

    /// Number of bases in the block
    pub length: usize,
}

impl AlignmentBlock {
    #[must_use]
    pub fn new(reference_start: u64, read_start: usize, length: usize) -> Self {
        Self {
            reference_start,
            read_start,
            length,
        }
    }

    /// `(reference_position, read_offset)` for every base in the block
    pub fn positions(&self) -> impl Iterator<Item = (u64, usize)> + '_ {
        (0..self.length).map(move |i| (self.reference_start + i as u64, self.read_start + i))
    }

    /// Zero-based exclusive reference end
    #[must_use]
    pub fn reference_end(&self) -> u64 {
        self.reference_start + self.length as u64
    }
}

/// Read-only view of one aligned read: its blocks and modification call sets
#[derive(Debug, Clone, Default)]
pub struct AlignmentView {
    /// Read name (QNAME), if known
    pub name: Option<String>,

    /// Aligned blocks in reference order
    pub blocks: Vec<AlignmentBlock>,

    /// Call sets in tag order; the order decides likelihood ties
    pub call_sets: Vec<ModificationCallSet>,
}

impl AlignmentView {
    #[must_use]
    pub fn new(blocks: Vec<AlignmentBlock>, call_sets: Vec<ModificationCallSet>) -> Self {
        Self {
            name: None,
            blocks,
            call_sets,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn has_modifications(&self) -> bool {
        self.call_sets.iter().any(|set| !set.is_empty())
    }

    /// Number of aligned bases across all blocks
    #[must_use]
    pub fn aligned_length(&self) -> usize {
        self.blocks.iter().map(|b| b.length).sum()
    }
}
