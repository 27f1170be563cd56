//! Cycle prediction for the cycle-tracking view of a health tracker.
//!
//! [`prediction`] holds the pure date arithmetic. The other modules feed it
//! from fetched records or the entry form and shape its output for display.

pub mod calendar;
pub mod form;
pub mod history;
pub mod logging;
pub mod models;
pub mod prediction;
pub mod settings;
pub mod view;

pub use models::{CycleInput, CyclePrediction, Phase};
pub use prediction::{days_until_next, predict, predict_today};
pub use view::CycleView;
