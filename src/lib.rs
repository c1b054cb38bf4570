//! Frequency bubbles laid out along a time axis.
//!
//! [`chart`] owns the force layout and never draws. [`data`] reads the input
//! records. The `bubble-timeline` binary renders both with egui.

pub mod chart;
pub mod data;
pub mod util;
