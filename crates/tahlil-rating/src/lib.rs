//! # Tahlil Rating
//!
//! The Rating & Benchmark Classifier and the Narrative Generator of the
//! Tahlil engine.
//!
//! Every computed value is classified into a [`RatingBand`] purely from the
//! triple `(value, direction, benchmark)`; no hidden state. Peer percentile
//! placement, benchmark deltas and deterministic bilingual narrative text are
//! produced alongside.
//!
//! `NotComputable` outcomes never reach this crate; the orchestrator routes
//! them straight to `unavailable` results.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod benchmark;
pub mod classify;
pub mod narrative;
pub mod percentile;

pub use benchmark::{compare, resolve_benchmark};
pub use classify::classify;
pub use narrative::{narrate, Narrative};
pub use percentile::peer_percentile;
