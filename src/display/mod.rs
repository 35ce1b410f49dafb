//! Terminal output
//!
//! Report rendering, number formatting and the calculation spinner.

pub mod format;
pub mod progress;
pub mod report;

pub use report::{JsonReport, ReportRenderer};
