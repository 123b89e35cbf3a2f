use crate::core::alignment::AlignmentView;
use crate::core::call::ModificationCallSet;
use crate::core::types::{Classification, MAX_LIKELIHOOD};
use crate::resolve::policy::Policy;

/// Running state of a resolution fold over call sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Accumulator<'a> {
    /// Code and likelihood of the strongest call seen so far
    best: Option<(&'a str, u8)>,

    /// `255 - sum` of every observed likelihood; may go negative
    unmodified: i32,
}

impl<'a> Accumulator<'a> {
    fn new() -> Self {
        Self {
            best: None,
            unmodified: i32::from(MAX_LIKELIHOOD),
        }
    }

    /// Fold in one call. Only a strictly greater likelihood replaces the current best.
    fn observe(self, modification: &'a str, likelihood: u8) -> Self {
        let best = match self.best {
            Some((_, current)) if likelihood <= current => self.best,
            _ => Some((modification, likelihood)),
        };
        Self {
            best,
            unmodified: self.unmodified - i32::from(likelihood),
        }
    }

    fn finish(self, compare_unmodified: bool) -> Option<Classification<'a>> {
        let (modification, likelihood) = self.best?;

        if compare_unmodified && self.unmodified > i32::from(likelihood) {
            // unmodified <= 255 - likelihood here, so it always fits a byte
            let confidence = u8::try_from(self.unmodified).unwrap_or(MAX_LIKELIHOOD);
            Some(Classification::unmodified(confidence))
        } else {
            Some(Classification::modified(modification, likelihood))
        }
    }
}

/// Classify one read position from the call sets of its alignment.
///
/// Returns `None` when no set accepted by `policy` has a call at `position`.
#[must_use]
pub fn resolve(
    position: usize,
    call_sets: &[ModificationCallSet],
    policy: Policy,
) -> Option<Classification<'_>> {
    call_sets
        .iter()
        .filter(|set| policy.accepts(set))
        .filter_map(|set| {
            set.likelihood(position)
                .map(|likelihood| (set.modification(), likelihood))
        })
        .fold(Accumulator::new(), |acc, (modification, likelihood)| {
            acc.observe(modification, likelihood)
        })
        .finish(policy.tracks_unmodified())
}

/// A classified base together with its coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedBase<'a> {
    /// Zero-based reference coordinate
    pub reference_position: u64,

    /// Zero-based offset in the read sequence
    pub read_offset: usize,

    pub classification: Classification<'a>,
}

/// Classify every aligned base of `view`, skipping bases with no result
pub fn resolve_alignment(
    view: &AlignmentView,
    policy: Policy,
) -> impl Iterator<Item = ResolvedBase<'_>> {
    view.blocks.iter().flat_map(move |block| {
        block
            .positions()
            .filter_map(move |(reference_position, read_offset)| {
                resolve(read_offset, &view.call_sets, policy).map(|classification| {
                    ResolvedBase {
                        reference_position,
                        read_offset,
                        classification,
                    }
                })
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alignment::AlignmentBlock;
    use crate::core::types::{Category, Strand};

    const FIVE_MC_ONLY: Policy = Policy::Cytosine {
        all_modifications: false,
    };
    const ALL_C: Policy = Policy::Cytosine {
        all_modifications: true,
    };

    fn set(base: u8, code: &str, calls: &[(usize, u8)]) -> ModificationCallSet {
        ModificationCallSet::new(base, Strand::Forward, code, calls.iter().copied()).unwrap()
    }

    #[test]
    fn test_accumulator_first_wins_ties() {
        let acc = Accumulator::new().observe("m", 200).observe("h", 200);
        assert_eq!(acc.best, Some(("m", 200)));
        assert_eq!(acc.unmodified, 255 - 400);
    }

    #[test]
    fn test_accumulator_strictly_greater_replaces() {
        let acc = Accumulator::new().observe("m", 10).observe("h", 11);
        assert_eq!(acc.best, Some(("h", 11)));
        assert_eq!(acc.unmodified, 234);
    }

    #[test]
    fn test_accumulator_empty_finishes_to_none() {
        assert_eq!(Accumulator::new().finish(true), None);
        assert_eq!(Accumulator::new().finish(false), None);
    }

    #[test]
    fn test_any_tie_keeps_first_set() {
        let sets = vec![set(b'C', "m", &[(4, 200)]), set(b'C', "h", &[(4, 200)])];
        let result = resolve(4, &sets, Policy::Any).unwrap();
        assert_eq!(result.category, Category::Modification("m"));
        assert_eq!(result.confidence, 200);

        let reversed = vec![set(b'C', "h", &[(4, 200)]), set(b'C', "m", &[(4, 200)])];
        let result = resolve(4, &reversed, Policy::Any).unwrap();
        assert_eq!(result.category, Category::Modification("h"));
    }

    #[test]
    fn test_any_picks_max_across_bases() {
        let sets = vec![
            set(b'C', "m", &[(1, 20)]),
            set(b'A', "a", &[(1, 90)]),
            set(b'G', "o", &[(1, 40)]),
        ];
        let result = resolve(1, &sets, Policy::Any).unwrap();
        assert_eq!(result, Classification::modified("a", 90));
    }

    #[test]
    fn test_any_zero_likelihood_still_classifies() {
        let sets = vec![set(b'C', "m", &[(0, 0)])];
        assert_eq!(
            resolve(0, &sets, Policy::Any),
            Some(Classification::modified("m", 0))
        );
    }

    #[test]
    fn test_cytosine_single_low_call_is_unmodified() {
        let sets = vec![set(b'C', "m", &[(7, 100)])];
        let result = resolve(7, &sets, FIVE_MC_ONLY).unwrap();
        assert_eq!(result, Classification::unmodified(155));
        assert!(result.is_unmodified());
    }

    #[test]
    fn test_cytosine_high_call_is_modified() {
        let sets = vec![set(b'C', "m", &[(7, 200)])];
        assert_eq!(
            resolve(7, &sets, FIVE_MC_ONLY),
            Some(Classification::modified("m", 200))
        );
    }

    #[test]
    fn test_cytosine_negative_unmodified_is_not_clamped() {
        let sets = vec![set(b'C', "m", &[(2, 150)]), set(b'C', "h", &[(2, 150)])];
        let result = resolve(2, &sets, ALL_C).unwrap();
        assert_eq!(result, Classification::modified("m", 150));
    }

    #[test]
    fn test_cytosine_equal_unmodified_goes_to_modification() {
        // 255 - 127 = 128 > 127, 255 - 128 = 127 < 128
        let low = vec![set(b'C', "m", &[(0, 127)])];
        assert_eq!(
            resolve(0, &low, FIVE_MC_ONLY),
            Some(Classification::unmodified(128))
        );
        let high = vec![set(b'C', "m", &[(0, 128)])];
        assert_eq!(
            resolve(0, &high, FIVE_MC_ONLY),
            Some(Classification::modified("m", 128))
        );
    }

    #[test]
    fn test_cytosine_5mc_only_ignores_other_codes() {
        let sets = vec![set(b'C', "h", &[(3, 250)]), set(b'C', "m", &[(3, 100)])];

        // 5hmC is not counted toward the sum in 5mC-only mode
        assert_eq!(
            resolve(3, &sets, FIVE_MC_ONLY),
            Some(Classification::unmodified(155))
        );
        assert_eq!(
            resolve(3, &sets, ALL_C),
            Some(Classification::modified("h", 250))
        );
    }

    #[test]
    fn test_cytosine_ignores_non_cytosine_sets() {
        let sets = vec![set(b'A', "a", &[(3, 250)]), set(b'G', "m", &[(3, 250)])];
        assert_eq!(resolve(3, &sets, ALL_C), None);
    }

    #[test]
    fn test_adenine_mode() {
        let sets = vec![set(b'C', "m", &[(5, 255)]), set(b'A', "a", &[(5, 90)])];
        assert_eq!(
            resolve(5, &sets, Policy::Adenine),
            Some(Classification::modified("a", 90))
        );

        let only_c = vec![set(b'C', "a", &[(5, 255)])];
        assert_eq!(resolve(5, &only_c, Policy::Adenine), None);
    }

    #[test]
    fn test_adenine_reverse_strand_base() {
        let sets = vec![set(b'A', "a", &[(5, 30)]), set(b'T', "a", &[(5, 60)])];
        assert_eq!(
            resolve(5, &sets, Policy::Adenine),
            Some(Classification::modified("a", 60))
        );
    }

    #[test]
    fn test_adenine_has_no_unmodified_category() {
        let sets = vec![set(b'A', "a", &[(0, 1)])];
        assert_eq!(
            resolve(0, &sets, Policy::Adenine),
            Some(Classification::modified("a", 1))
        );
    }

    #[test]
    fn test_empty_when_no_call_at_position() {
        let sets = vec![set(b'C', "m", &[(1, 200)]), set(b'A', "a", &[(2, 200)])];
        for policy in [Policy::Any, FIVE_MC_ONLY, ALL_C, Policy::Adenine] {
            assert_eq!(resolve(0, &sets, policy), None, "{policy:?}");
            assert_eq!(resolve(99, &sets, policy), None, "{policy:?}");
        }
        assert_eq!(resolve(0, &[], Policy::Any), None);
    }

    #[test]
    fn test_resolve_alignment_walks_blocks() {
        let view = AlignmentView::new(
            vec![AlignmentBlock::new(100, 0, 3), AlignmentBlock::new(200, 5, 2)],
            vec![set(b'C', "m", &[(1, 230), (3, 230), (6, 10)])],
        );

        let resolved: Vec<_> = resolve_alignment(&view, FIVE_MC_ONLY).collect();

        // offset 3 falls in an insertion and is not aligned
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].reference_position, 101);
        assert_eq!(resolved[0].read_offset, 1);
        assert_eq!(resolved[0].classification, Classification::modified("m", 230));
        assert_eq!(resolved[1].reference_position, 201);
        assert_eq!(resolved[1].read_offset, 6);
        assert_eq!(resolved[1].classification, Classification::unmodified(245));
    }
}
