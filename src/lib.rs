//! # basemod
//!
//! Per-base modification calls and CCS kinetics for aligned long reads.
//!
//! Reads from PacBio and Oxford Nanopore instruments carry modification calls in
//! the `MM`/`ML` tags, often several overlapping ones per base (5mC and 5hmC on the
//! same cytosine, say). A genome browser can only color a base one way, so
//! `basemod` reduces every base to a single classification: the strongest call,
//! or "unmodified" when the leftover probability beats it.
//!
//! ## Features
//!
//! - **Kinetics codec**: Decodes the 8-bit V1 codec of `fi`/`ri`/`fp`/`rp` tags via a
//!   256-entry lookup table
//! - **Modification resolver**: Picks one winner per base under four coloring modes
//! - **Tag parsing**: Builds call sets from MM/ML tags on forward and reverse reads
//!
//! ## Example
//!
//! ```rust
//! use basemod::{resolve, Category, KineticCodec, ModificationCallSet, Policy, Strand};
//!
//! let codec = KineticCodec::new();
//! assert_eq!(codec.decode(255), 952);
//!
//! let sets = vec![
//!     ModificationCallSet::new(b'C', Strand::Forward, "m", [(4, 100)]).unwrap(),
//! ];
//! let result = resolve(4, &sets, Policy::Cytosine { all_modifications: false }).unwrap();
//! assert_eq!(result.category, Category::Unmodified);
//! assert_eq!(result.confidence, 155);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Modification calls, call sets and alignment geometry
//! - [`kinetics`]: The kinetic byte codec
//! - [`resolve`]: Selection policies and the resolver
//! - [`parsing`]: MM/ML, CIGAR and kinetic tag readers built on noodles
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod kinetics;
pub mod parsing;
pub mod resolve;

// Re-export commonly used types for convenience
pub use crate::core::alignment::{AlignmentBlock, AlignmentView};
pub use crate::core::call::{ModificationCall, ModificationCallSet};
pub use crate::core::types::*;
pub use kinetics::KineticCodec;
pub use resolve::{resolve, resolve_alignment, ColorOption, Policy, ResolvedBase};
