//! Type definitions module
//!
//! Campaign input, platforms and the normalized allocation result.

pub mod platform;
pub mod campaign;
pub mod allocation;

// Re-export commonly used types
pub use platform::{PerPlatform, Platform};
pub use campaign::{CampaignInput, PlatformConstraints, PrimaryGoal};
pub use allocation::{AllocationResult, ConfidenceInterval, ConfidenceRow, PlatformPerformance};
