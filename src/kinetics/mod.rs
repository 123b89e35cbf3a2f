//! Decoding of PacBio CCS kinetic tags.
//!
//! HiFi reads carry per-base inter-pulse durations (`fi`/`ri`) and pulse widths
//! (`fp`/`rp`) compressed to one byte each with the V1 codec:
//!
//! ```text
//! xxmm'mmmm
//! ```
//!
//! where the two high bits are an exponent and the six low bits a mantissa. See
//! [`codec::KineticCodec`] for the decode formula.

pub mod codec;

pub use codec::KineticCodec;
