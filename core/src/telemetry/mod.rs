//! telemetry/mod.rs
//! Per-call counters, stage timers, and immutable snapshots.
//!
//! Notes:
//! - Counters are plain fields updated by the single thread running a call.
//! - A snapshot is taken once at the end of a successful encode or decode.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
