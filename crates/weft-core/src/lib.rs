//! Core types for the weft Petri net simulator.
//!
//! This is the leaf crate with no internal weft dependencies. It defines
//! the integer vector/matrix operations used by the firing equation, the
//! [`TransitionSet`] bitset used for enabledness and candidate masks, and
//! the [`MatrixError`] type shared by both.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod matrix;
pub mod set;

pub use error::MatrixError;
pub use set::{TransitionSet, TransitionSetIter};
