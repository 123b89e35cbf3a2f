//! Builders that turn SAM/BAM records into the core data model.
//!
//! - **MM/ML tags**: base-modification calls per read, see [`mod_tags`]
//! - **CIGAR**: gapless alignment blocks, see [`sam::alignment_blocks`]
//! - **Kinetic tags**: `fi`/`ri` inter-pulse durations and `fp`/`rp` pulse widths
//!
//! ## Example
//!
//! ```rust
//! use basemod::parsing::mod_tags::call_sets_from_tags;
//!
//! let sets = call_sets_from_tags("C+m,0,1;", Some(&[200, 10]), b"ACGCCA", false).unwrap();
//! assert_eq!(sets[0].likelihood(1), Some(200));
//! assert_eq!(sets[0].likelihood(4), Some(10));
//! ```
//!
//! ## Supported Tags
//!
//! | Tag | Type | Description |
//! |-----|------|-------------|
//! | MM  | Z    | Base modification positions (also read from legacy `Mm`) |
//! | ML  | B:C  | Base modification likelihoods (also read from legacy `Ml`) |
//! | fi  | B:C  | Forward inter-pulse duration, V1 codec |
//! | ri  | B:C  | Reverse inter-pulse duration, V1 codec |
//! | fp  | B:C  | Forward pulse width, V1 codec |
//! | rp  | B:C  | Reverse pulse width, V1 codec |

pub mod mod_tags;
pub mod sam;
