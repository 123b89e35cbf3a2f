use serde::Serialize;

/// Modification code for 5-methylcytosine
pub const FIVE_METHYL_CYTOSINE: &str = "m";

/// Modification code for 6-methyladenine
pub const SIX_METHYL_ADENINE: &str = "a";

/// Likelihood byte meaning certainty
pub const MAX_LIKELIHOOD: u8 = u8::MAX;

/// Strand a modification call was made on, relative to the original read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    /// `+` in the MM tag: same strand as the read
    Forward,
    /// `-` in the MM tag: the complementary strand
    Reverse,
}

impl Strand {
    #[must_use]
    pub fn from_symbol(symbol: u8) -> Option<Self> {
        match symbol {
            b'+' => Some(Self::Forward),
            b'-' => Some(Self::Reverse),
            _ => None,
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "+"),
            Self::Reverse => write!(f, "-"),
        }
    }
}

/// What a base was classified as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category<'a> {
    /// A specific modification, identified by its code
    Modification(&'a str),
    /// No modification; only produced in cytosine mode
    Unmodified,
}

impl std::fmt::Display for Category<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Modification(code) => write!(f, "{code}"),
            Self::Unmodified => write!(f, "unmodified"),
        }
    }
}

impl Serialize for Category<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Resolved classification of a single base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification<'a> {
    pub category: Category<'a>,

    /// Confidence as a scaled probability (255 = certain)
    pub confidence: u8,
}

impl<'a> Classification<'a> {
    #[must_use]
    pub fn modified(code: &'a str, confidence: u8) -> Self {
        Self {
            category: Category::Modification(code),
            confidence,
        }
    }

    #[must_use]
    pub fn unmodified(confidence: u8) -> Self {
        Self {
            category: Category::Unmodified,
            confidence,
        }
    }

    #[must_use]
    pub fn is_unmodified(&self) -> bool {
        matches!(self.category, Category::Unmodified)
    }
}

/// Complement of a nucleotide letter, preserving case. Unknown letters map to themselves.
#[must_use]
pub const fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'a' => b't',
        b't' => b'a',
        b'c' => b'g',
        b'g' => b'c',
        _ => base,
    }
}
