//! The [`PetriNet`] engine: marking, enabledness, and the firing path.

use std::error::Error;
use std::fmt;
use std::fmt::Write as _;
use std::time::Instant;

use weft_core::matrix;
use weft_core::{MatrixError, TransitionSet};

use crate::accounting;
use crate::topology::{
    self, AlphaProfile, INCIDENCE, INITIAL_MARKING, PLACE_COUNT, PLACE_INVARIANTS,
    TIMED_TRANSITIONS, TRANSITION_COUNT, TRANSITION_INVARIANTS,
};

/// Fatal errors from the firing path.
///
/// Both variants signal a structural fault — an index outside the net or
/// an incidence matrix inconsistent with the declared invariants — never
/// an expected runtime condition. The non-fatal "not enabled" outcome is
/// `Ok(false)` from [`PetriNet::try_fire`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NetError {
    /// A vector/matrix operation failed (bad index or dimensions).
    Matrix(MatrixError),
    /// A firing would have broken a place-invariant family. The engine
    /// refuses the mutation and reports the offending marking.
    InvariantViolation {
        /// Index of the first violated family.
        family: usize,
        /// The required token sum for that family.
        expected: i64,
        /// The sum the post-firing marking would have had.
        actual: i64,
        /// The rejected post-firing marking, for the diagnostic dump.
        marking: Vec<i64>,
    },
}

impl fmt::Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Matrix(e) => write!(f, "matrix operation failed: {e}"),
            Self::InvariantViolation {
                family,
                expected,
                actual,
                marking,
            } => write!(
                f,
                "place invariant {family} violated: expected sum {expected}, got {actual} \
                 (post-firing marking {marking:?})"
            ),
        }
    }
}

impl Error for NetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Matrix(e) => Some(e),
            Self::InvariantViolation { .. } => None,
        }
    }
}

impl From<MatrixError> for NetError {
    fn from(e: MatrixError) -> Self {
        Self::Matrix(e)
    }
}

/// The timed Place/Transition net engine.
///
/// Owns all mutable simulation state. Not internally synchronized: the
/// monitor wraps one instance in its mutex and is the only writer.
///
/// All times are milliseconds on a monotonic clock anchored at
/// construction, so the initial sensitization timestamps are zero and
/// [`now_ms`](Self::now_ms) is directly comparable to them.
pub struct PetriNet {
    marking: Vec<i64>,
    fires: Vec<u64>,
    /// Moment each transition last changed marking-enabledness.
    timestamps: Vec<u64>,
    /// Sleeper-in-flight guards for the monitor's timed-wait protocol.
    waiting: Vec<bool>,
    alpha: [u64; TRANSITION_COUNT],
    /// Space-separated `T{idx}` tokens, in firing order.
    sequence: String,
    epoch: Instant,
}

impl PetriNet {
    /// Create the modeled net at its initial marking with the given
    /// α-profile.
    pub fn new(profile: AlphaProfile) -> Self {
        Self {
            marking: INITIAL_MARKING.to_vec(),
            fires: vec![0; TRANSITION_COUNT],
            timestamps: vec![0; TRANSITION_COUNT],
            waiting: vec![false; TRANSITION_COUNT],
            alpha: profile.alphas(),
            sequence: String::new(),
            epoch: Instant::now(),
        }
    }

    /// Milliseconds elapsed since construction.
    pub fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// The set of transitions enabled by the current marking: those
    /// whose firing leaves every place non-negative.
    pub fn enabled_by_marking(&self) -> TransitionSet {
        let mut enabled = TransitionSet::empty();
        for t in 0..TRANSITION_COUNT {
            if (0..PLACE_COUNT).all(|p| self.marking[p] + INCIDENCE[p][t] >= 0) {
                enabled.insert(t);
            }
        }
        enabled
    }

    /// The set of transitions enabled by marking *and* past their α
    /// window at `now_ms`.
    pub fn enabled_now(&self, now_ms: u64) -> TransitionSet {
        self.enabled_by_marking()
            .iter()
            .filter(|&t| self.is_temporally_ready(t, now_ms))
            .collect()
    }

    /// Whether `t` is enabled by the current marking.
    pub fn is_enabled(&self, t: usize) -> bool {
        self.enabled_by_marking().contains(t)
    }

    /// Whether `t` has been continuously enabled for at least α[t]
    /// milliseconds as of `now_ms`.
    pub fn is_temporally_ready(&self, t: usize, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.timestamps[t]) >= self.alpha[t]
    }

    /// Whether `t` carries a temporal lower bound.
    pub fn is_timed(&self, t: usize) -> bool {
        TIMED_TRANSITIONS.contains(&t)
    }

    /// α[t] in milliseconds.
    pub fn min_delay(&self, t: usize) -> u64 {
        self.alpha[t]
    }

    /// Moment `t` last changed marking-enabledness, in ms.
    pub fn timestamp(&self, t: usize) -> u64 {
        self.timestamps[t]
    }

    /// Whether a worker is currently sleeping out its α window for `t`.
    pub fn waiting(&self, t: usize) -> bool {
        self.waiting[t]
    }

    /// Set or clear the sleeper-in-flight guard for `t`.
    pub fn set_waiting(&mut self, t: usize, waiting: bool) {
        self.waiting[t] = waiting;
    }

    /// Attempt to fire `t` at `now_ms`.
    ///
    /// `permit` is the monitor's pre-computed eligibility verdict ("`t`
    /// is marking-enabled, temporally ready, and not reserved by a
    /// sleeper"). With `permit == false` nothing is mutated and the
    /// result is `Ok(false)`.
    ///
    /// On a permitted firing the engine validates the place invariants
    /// against the new marking, then commits: marking, fire counter,
    /// sequence log, and the sensitization timestamps of every
    /// transition whose enabledness changed. An invariant failure means
    /// the topology constants disagree with each other; nothing is
    /// mutated and the error carries the rejected marking.
    pub fn try_fire(&mut self, t: usize, permit: bool, now_ms: u64) -> Result<bool, NetError> {
        let firing = matrix::unit(t, TRANSITION_COUNT)?;
        let delta = matrix::multiply(&INCIDENCE, &firing)?;
        let next = matrix::add(&self.marking, &delta)?;

        if !permit {
            return Ok(false);
        }

        if let Some(family) = topology::place_invariant_violation(&next) {
            let inv = PLACE_INVARIANTS[family];
            return Err(NetError::InvariantViolation {
                family,
                expected: inv.sum,
                actual: inv.places.iter().map(|&p| next[p]).sum(),
                marking: next,
            });
        }

        let before = self.enabled_by_marking();
        self.marking = next;
        self.fires[t] += 1;
        let _ = write!(self.sequence, "T{t} ");
        let after = self.enabled_by_marking();

        // α measures continuous enablement, so timestamps move only on
        // a rising or falling edge, never on a firing that leaves a
        // transition's enabledness unchanged.
        for i in 0..TRANSITION_COUNT {
            if before.contains(i) != after.contains(i) {
                self.timestamps[i] = now_ms;
            }
        }

        Ok(true)
    }

    /// Current marking.
    pub fn marking(&self) -> &[i64] {
        &self.marking
    }

    /// Per-transition cumulative successful firings.
    pub fn fires(&self) -> &[u64] {
        &self.fires
    }

    /// The largest per-transition fire count.
    pub fn max_fires(&self) -> u64 {
        self.fires.iter().copied().max().unwrap_or(0)
    }

    /// The fired sequence as space-separated `T{idx}` tokens.
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Completed cycles per transition-invariant family, computed from a
    /// copy of the fire counters.
    pub fn transition_invariant_counts(&self) -> [u64; TRANSITION_INVARIANTS.len()] {
        accounting::completed_cycles(&self.fires)
    }
}
