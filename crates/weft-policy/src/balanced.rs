//! The balanced strategy: equalize fire counts.

use weft_core::TransitionSet;

use crate::FiringPolicy;

/// Pick the candidate with the fewest firings so far; lowest index wins
/// ties. Over a full run this approximately equalizes branch selection.
#[derive(Clone, Copy, Debug, Default)]
pub struct Balanced;

impl FiringPolicy for Balanced {
    fn name(&self) -> &str {
        "balanced"
    }

    fn select(&self, candidates: TransitionSet, fires: &[u64]) -> usize {
        // Keyed on (count, index) so equal counts resolve to the lowest
        // index regardless of which element `min_by_key` keeps on ties.
        candidates
            .iter()
            .min_by_key(|&t| (fires[t], t))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_least_fired_candidate() {
        let fires = [9, 3, 7, 1, 4, 0, 0, 0, 0, 0, 0, 0];
        let candidates: TransitionSet = [0, 2, 3].into_iter().collect();
        assert_eq!(Balanced.select(candidates, &fires), 3);
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        let fires = [5, 2, 2, 2, 5, 0, 0, 0, 0, 0, 0, 0];
        let candidates: TransitionSet = [1, 2, 3].into_iter().collect();
        assert_eq!(Balanced.select(candidates, &fires), 1);
    }

    #[test]
    fn empty_candidates_default_to_zero() {
        let fires = [0; 12];
        assert_eq!(Balanced.select(TransitionSet::empty(), &fires), 0);
    }
}
