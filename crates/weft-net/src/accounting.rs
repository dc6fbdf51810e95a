//! Offline transition-invariant cycle accounting.
//!
//! Answers "how many complete behavioral cycles does this vector of
//! fire counts contain?" by greedy subtraction: while some family has
//! every member count positive, charge one cycle to the first such
//! family in lexical order and decrement its members. The input is
//! copied; engine state is never touched.

use crate::topology::TRANSITION_INVARIANTS;

/// Completed cycles per transition-invariant family for the given fire
/// counts.
///
/// Terminates because every productive sweep strictly reduces the total
/// of the working copy. Ties between simultaneously satisfiable
/// families resolve in lexical family order.
pub fn completed_cycles(fires: &[u64]) -> [u64; TRANSITION_INVARIANTS.len()] {
    let mut remaining = fires.to_vec();
    let mut cycles = [0u64; TRANSITION_INVARIANTS.len()];

    loop {
        let mut progressed = false;
        for (j, family) in TRANSITION_INVARIANTS.iter().enumerate() {
            if family.iter().all(|&t| remaining[t] > 0) {
                for &t in family.iter() {
                    remaining[t] -= 1;
                }
                cycles[j] += 1;
                progressed = true;
            }
        }
        if !progressed {
            return cycles;
        }
    }
}
