//! Request payload construction
//!
//! Shapes campaign input into the body of `POST /allocate`. Values are
//! passed through untouched; the allocation service decides what is valid.

use serde::{Deserialize, Serialize};

use crate::types::CampaignInput;

/// Body of an allocation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub company_name: String,
    pub monthly_budget: f64,
    pub primary_goal: String,
    pub constraints: ConstraintPayload,
}

/// Minimum allocations keyed the way the service expects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstraintPayload {
    pub google_min: f64,
    pub meta_min: f64,
    pub tiktok_min: f64,
    pub linkedin_min: f64,
}

impl AllocationRequest {
    /// Build the payload for `input`
    pub fn from_input(input: &CampaignInput) -> Self {
        Self {
            company_name: input.company_name.clone(),
            monthly_budget: input.monthly_budget,
            primary_goal: goal_token(input.primary_goal.label()),
            constraints: ConstraintPayload {
                google_min: input.constraints.google,
                meta_min: input.constraints.meta,
                tiktok_min: input.constraints.tiktok,
                linkedin_min: input.constraints.linkedin,
            },
        }
    }
}

impl From<&CampaignInput> for AllocationRequest {
    fn from(input: &CampaignInput) -> Self {
        Self::from_input(input)
    }
}

/// Turn a goal label into the service's token
///
/// The whole label is lowercased, then only the first space becomes `_`.
pub fn goal_token(label: &str) -> String {
    label.to_lowercase().replacen(' ', "_", 1)
}
