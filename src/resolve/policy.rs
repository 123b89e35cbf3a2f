use serde::Serialize;

use crate::core::call::ModificationCallSet;
use crate::core::types::{FIVE_METHYL_CYTOSINE, SIX_METHYL_ADENINE};

/// Which call sets compete for a position, and whether "unmodified" competes too
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Every modification on every base
    Any,
    /// Cytosine modifications; 5mC only unless `all_modifications` is set
    Cytosine { all_modifications: bool },
    /// 6mA on either strand
    Adenine,
}

impl Policy {
    /// Whether `set` takes part in resolution under this policy
    #[must_use]
    pub fn accepts(&self, set: &ModificationCallSet) -> bool {
        match self {
            Self::Any => true,
            Self::Cytosine { all_modifications } => {
                set.canonical_base() == b'C'
                    && (*all_modifications || set.modification() == FIVE_METHYL_CYTOSINE)
            }
            Self::Adenine => {
                matches!(set.canonical_base(), b'A' | b'T')
                    && set.modification() == SIX_METHYL_ADENINE
            }
        }
    }

    /// Whether the unmodified likelihood competes with the best modification
    #[must_use]
    pub fn tracks_unmodified(&self) -> bool {
        matches!(self, Self::Cytosine { .. })
    }
}

/// Base-modification coloring modes, as offered on the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorOption {
    /// Highest-likelihood modification of any kind
    #[default]
    #[value(name = "basemod")]
    BaseModification,
    /// 5mC against unmodified cytosine
    #[value(name = "basemod-5mc")]
    BaseModification5mc,
    /// All cytosine modifications against unmodified cytosine
    #[value(name = "basemod-c")]
    BaseModificationC,
    /// 6mA only
    #[value(name = "basemod-6ma")]
    BaseModification6ma,
}

impl From<ColorOption> for Policy {
    fn from(option: ColorOption) -> Self {
        match option {
            ColorOption::BaseModification => Self::Any,
            ColorOption::BaseModification5mc => Self::Cytosine {
                all_modifications: false,
            },
            ColorOption::BaseModificationC => Self::Cytosine {
                all_modifications: true,
            },
            ColorOption::BaseModification6ma => Self::Adenine,
        }
    }
}
