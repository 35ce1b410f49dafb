//! BudgetBuddy - Marketing Budget Allocation Client
//!
//! Sends campaign parameters to a remote allocation service and turns its
//! answer into a display-ready report.
//!
//! # Architecture
//!
//! - **request**: campaign input -> `POST /allocate` payload
//! - **response**: raw JSON -> normalized [`types::AllocationResult`]
//! - **citations**: `[n]` markers in the explanation -> resolved references
//! - **session**: one calculation at a time, failures keep the last result

pub mod errors;
pub mod types;
pub mod request;
pub mod response;
pub mod citations;
pub mod client;
pub mod session;

// Re-export commonly used types
pub use errors::{AllocatorError, Result};

// Interface layer
pub mod cli;
pub mod display;
pub mod doctor;
