//! The timed Place/Transition net engine.
//!
//! [`topology`] holds the modeled workflow as compile-time constants:
//! the incidence matrix, initial marking, place- and transition-invariant
//! families, the timed-transition set, and the three α-profiles.
//! [`PetriNet`] owns all mutable run state — marking, fire counters,
//! sensitization timestamps, waiting flags, and the fired sequence — and
//! implements enabledness, the firing equation, and the place-invariant
//! safety net. [`accounting`] counts completed behavioral cycles offline.
//!
//! The engine is single-threaded by design; the monitor crate provides
//! the mutual exclusion that makes it safe to share.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod accounting;
pub mod net;
pub mod topology;

pub use net::{NetError, PetriNet};
pub use topology::{AlphaProfile, PlaceInvariant};
