//! `wf-options` — expand base routes into the full menu of travel options.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                         |
//! |------------|------------------------------------------------------------------|
//! | [`table`]  | `MODE_TABLE`: `mode → (source class, time multiplier, fare)`     |
//! | [`option`] | `RouteOption`                                                    |
//! | [`set`]    | `RouteOptionSet`: the option list and its selection invariant    |
//! | [`synth`]  | `RouteOptionSynthesizer`                                         |
//! | [`error`]  | `OptionsError`, `OptionsResult<T>`                               |
//!
//! # Derivation model
//!
//! Only three routes are ever measured (drive, walk, transit).  Every other
//! mode is the measured route of its source class with the travel time
//! scaled by a fixed multiplier.  Distance, polyline, and steps are
//! inherited unchanged, except that ride-share options drop the steps (the
//! ride-share app navigates) and gain a fare estimate.  Adding a mode is a
//! new table row, not new control flow.

pub mod error;
pub mod option;
pub mod set;
pub mod synth;
pub mod table;

#[cfg(test)]
mod tests;

pub use error::{OptionsError, OptionsResult};
pub use option::RouteOption;
pub use set::RouteOptionSet;
pub use synth::RouteOptionSynthesizer;
pub use table::{MODE_TABLE, ModeRule, rule_for, time_multiplier};
