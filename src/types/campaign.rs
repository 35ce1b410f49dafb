//! Campaign parameters collected from the user

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::platform::PerPlatform;

/// Lowest accepted minimum-allocation percentage
pub const MIN_CONSTRAINT_PERCENT: f64 = 5.0;

/// Highest accepted minimum-allocation percentage
pub const MAX_CONSTRAINT_PERCENT: f64 = 50.0;

/// Marketing objective the allocation is optimized for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PrimaryGoal {
    GenerateLeads,
    IncreaseSales,
    BrandAwareness,
    WebsiteTraffic,
    /// Any label outside the fixed set, sent as-is
    Other(String),
}

impl PrimaryGoal {
    /// The fixed goals offered to the user
    pub const CHOICES: [PrimaryGoal; 4] = [
        PrimaryGoal::GenerateLeads,
        PrimaryGoal::IncreaseSales,
        PrimaryGoal::BrandAwareness,
        PrimaryGoal::WebsiteTraffic,
    ];

    /// Label as presented to the user
    pub fn label(&self) -> &str {
        match self {
            PrimaryGoal::GenerateLeads => "Generate Leads",
            PrimaryGoal::IncreaseSales => "Increase Sales",
            PrimaryGoal::BrandAwareness => "Brand Awareness",
            PrimaryGoal::WebsiteTraffic => "Website Traffic",
            PrimaryGoal::Other(label) => label,
        }
    }
}

impl Default for PrimaryGoal {
    fn default() -> Self {
        PrimaryGoal::GenerateLeads
    }
}

impl fmt::Display for PrimaryGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Matches a fixed goal ignoring ASCII case only. Any other difference,
/// surrounding whitespace included, keeps the label verbatim in `Other`.
impl From<String> for PrimaryGoal {
    fn from(label: String) -> Self {
        Self::CHOICES
            .into_iter()
            .find(|goal| goal.label().eq_ignore_ascii_case(&label))
            .unwrap_or(PrimaryGoal::Other(label))
    }
}

impl From<PrimaryGoal> for String {
    fn from(goal: PrimaryGoal) -> Self {
        goal.label().to_string()
    }
}

impl FromStr for PrimaryGoal {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PrimaryGoal::from(s.to_string()))
    }
}

/// Minimum share of the monthly budget, in percent, per platform
pub type PlatformConstraints = PerPlatform<f64>;

/// Default minimums presented before the user adjusts them
pub fn default_constraints() -> PlatformConstraints {
    PlatformConstraints {
        google: 25.0,
        meta: 20.0,
        tiktok: 10.0,
        linkedin: 20.0,
    }
}

/// Whether a minimum-allocation percentage lies in the accepted range
pub fn constraint_in_range(percent: f64) -> bool {
    (MIN_CONSTRAINT_PERCENT..=MAX_CONSTRAINT_PERCENT).contains(&percent)
}

/// Everything the user fills in before requesting an allocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignInput {
    pub company_name: String,
    pub monthly_budget: f64,
    pub primary_goal: PrimaryGoal,
    pub constraints: PlatformConstraints,
}

impl Default for CampaignInput {
    fn default() -> Self {
        Self {
            company_name: "Company".to_string(),
            monthly_budget: 5000.0,
            primary_goal: PrimaryGoal::default(),
            constraints: default_constraints(),
        }
    }
}
