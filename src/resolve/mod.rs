//! Selection of one dominant modification per base.
//!
//! A read may carry several call sets that overlap at the same position (5mC and
//! 5hmC on the same cytosine, for example). The resolver scans every call set in
//! tag order and keeps the call with the greatest likelihood; the first set wins
//! ties. Three [`Policy`] variants decide which sets take part:
//!
//! | Policy | Sets considered | Unmodified complement |
//! |--------|-----------------|------------------------|
//! | [`Policy::Any`] | all | no |
//! | [`Policy::Cytosine`] | canonical `C`, code `m` (or any code with `all_modifications`) | yes |
//! | [`Policy::Adenine`] | canonical `A` or `T`, code `a` | no |
//!
//! In cytosine mode the likelihood of "no modification" is
//! `255 - sum(likelihoods at the position)`. It is compared as a signed value and
//! can be negative when callers report overlapping likelihoods that sum past 255.

pub mod policy;
pub mod resolver;

pub use policy::{ColorOption, Policy};
pub use resolver::{resolve, resolve_alignment, ResolvedBase};
