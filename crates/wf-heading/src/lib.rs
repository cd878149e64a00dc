//! `wf-heading` — turns `(heading, bearing to target)` samples into a
//! debounced "pointing at the target" signal.
//!
//! The tracker is a pure function of its sample history.  It holds one
//! integer of memory ([`HeadingAlignmentState`]) and never touches a clock.

pub mod error;
pub mod tracker;

#[cfg(test)]
mod tests;

pub use error::{HeadingError, HeadingResult};
pub use tracker::{AlignmentConfig, AlignmentEvent, HeadingAlignmentState, HeadingTracker, is_aligned};
