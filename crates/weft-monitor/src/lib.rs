//! The monitor: serialized access to the net engine.
//!
//! [`Monitor`] is the single synchronization point of the simulator.
//! Workers call [`Monitor::fire_transition`]; the monitor serializes
//! engine access behind one mutex, parks workers whose transition is
//! not fireable on per-transition condition queues, wakes exactly one
//! policy-chosen worker on every state change, runs the timed-wait
//! protocol for α-gated transitions, and drains every queue once the
//! exit transition reaches its firing target.
//!
//! [`worker`] provides the segment-cycling worker loop and named-thread
//! spawning; [`report`] snapshots final statistics and writes the log
//! file.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod monitor;
pub mod report;
pub mod worker;

pub use monitor::{Monitor, MonitorConfig};
pub use report::{write_report, SimReport};
pub use worker::{spawn_workers, WorkerSpec};
