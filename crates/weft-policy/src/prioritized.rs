//! The prioritized strategy: ratio-steered branch selection.

use weft_core::TransitionSet;

use crate::FiringPolicy;

/// The senior booking desk (T2).
const SENIOR_DESK: usize = 2;
/// The regular booking desk (T3).
const REGULAR_DESK: usize = 3;
/// Payment confirmation (T6).
const CONFIRM: usize = 6;
/// Payment cancellation (T7).
const CANCEL: usize = 7;

/// Target share of desk work handled by the senior desk.
const SENIOR_SHARE: f64 = 0.75;
/// Target share of payments that confirm.
const CONFIRM_SHARE: f64 = 0.80;

/// Transitions with no priority rule, scanned in this order when
/// neither ratio tier applies.
const NON_PRIORITY: [usize; 8] = [0, 1, 4, 5, 8, 9, 10, 11];

/// Steer the two branch pairs of the modeled workflow toward fixed
/// shares: 75% of customers to the senior desk, 80% of payments to
/// confirmation. Anything else is served in a fixed scan order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Prioritized;

impl FiringPolicy for Prioritized {
    fn name(&self) -> &str {
        "prioritized"
    }

    fn select(&self, candidates: TransitionSet, fires: &[u64]) -> usize {
        // Zero totals count as one attended customer / one payment so
        // the ratios are defined from the first pick.
        let desk_total = (fires[SENIOR_DESK] + fires[REGULAR_DESK]).max(1);
        let payment_total = (fires[CONFIRM] + fires[CANCEL]).max(1);
        let senior_ratio = fires[SENIOR_DESK] as f64 / desk_total as f64;
        let confirm_ratio = fires[CONFIRM] as f64 / payment_total as f64;

        if candidates.contains(SENIOR_DESK) || candidates.contains(REGULAR_DESK) {
            if senior_ratio <= SENIOR_SHARE && candidates.contains(SENIOR_DESK) {
                return SENIOR_DESK;
            }
            if senior_ratio > SENIOR_SHARE && candidates.contains(REGULAR_DESK) {
                return REGULAR_DESK;
            }
        }

        if candidates.contains(CONFIRM) || candidates.contains(CANCEL) {
            if confirm_ratio <= CONFIRM_SHARE && candidates.contains(CONFIRM) {
                return CONFIRM;
            }
            if confirm_ratio > CONFIRM_SHARE && candidates.contains(CANCEL) {
                return CANCEL;
            }
        }

        NON_PRIORITY
            .into_iter()
            .find(|&t| candidates.contains(t))
            .unwrap_or(0)
    }
}
