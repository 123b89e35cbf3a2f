//! Core data types for modification calls and alignment geometry.
//!
//! - [`ModificationCallSet`]: all calls of one modification code on one read
//! - [`AlignmentView`]: the aligned blocks of a read together with its call sets
//! - [`Classification`], [`Category`]: the per-base result handed to a renderer
//!
//! ## Modification codes
//!
//! | Code | Canonical base | Modification |
//! |------|----------------|--------------|
//! | m    | C              | 5-methylcytosine |
//! | h    | C              | 5-hydroxymethylcytosine |
//! | f    | C              | 5-formylcytosine |
//! | c    | C              | 5-carboxylcytosine |
//! | a    | A              | 6-methyladenine |
//! | o    | G              | 8-oxoguanine |
//!
//! Codes not in the table (including ChEBI numbers such as `76792`) are carried
//! through verbatim.

pub mod alignment;
pub mod call;
pub mod types;
