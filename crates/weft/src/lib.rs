//! Weft: a concurrent simulator for one timed Place/Transition Petri net.
//!
//! Worker threads compete to fire transitions of a fixed booking-agency
//! workflow under a central monitor. The monitor serializes all engine
//! access, parks workers whose transition is not fireable, wakes one
//! policy-chosen worker per state change, and drains everyone once the
//! exit transition reaches its firing target.
//!
//! This is the top-level facade crate re-exporting the public API of
//! the weft sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use weft::prelude::*;
//!
//! let monitor = Monitor::new(
//!     PetriNet::new(AlphaProfile::Fast),
//!     Box::new(Balanced),
//!     MonitorConfig { exit_transition: 11, required_exit_fires: 2 },
//! );
//! // At the initial marking only the entry transition is fireable.
//! assert!(monitor.fire_transition(0).unwrap());
//! assert_eq!(monitor.report().sequence, "T0 ");
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `weft-core` | Matrix ops, `TransitionSet`, `MatrixError` |
//! | [`net`] | `weft-net` | Topology constants, α-profiles, the `PetriNet` engine |
//! | [`policy`] | `weft-policy` | The `FiringPolicy` trait and both strategies |
//! | [`monitor`] | `weft-monitor` | The `Monitor`, worker spawning, report writer |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Matrix ops, the transition bitset, and their error type (`weft-core`).
pub use weft_core as types;

/// Topology constants and the net engine (`weft-net`).
pub use weft_net as net;

/// Wake-up selection strategies (`weft-policy`).
pub use weft_policy as policy;

/// The monitor, worker protocol, and report writer (`weft-monitor`).
pub use weft_monitor as monitor;

/// Common imports for typical usage.
pub mod prelude {
    pub use weft_core::TransitionSet;
    pub use weft_monitor::{
        spawn_workers, write_report, Monitor, MonitorConfig, SimReport, WorkerSpec,
    };
    pub use weft_net::{AlphaProfile, NetError, PetriNet};
    pub use weft_policy::{Balanced, FiringPolicy, Prioritized};
}
