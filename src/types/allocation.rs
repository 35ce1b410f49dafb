//! Normalized allocation result, ready for display

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::platform::{PerPlatform, Platform};

/// Label attached to every confidence row
pub const CONFIDENCE_LABEL: &str = "90% confidence";

/// Projected performance of one platform's allocation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformPerformance {
    pub budget: f64,
    pub conversions: u64,
    pub cpa: f64,
}

/// Lower/upper bound around a recommended allocation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    /// True when the bound was derived from the recommendation rather than reported
    pub synthesized: bool,
}

/// Rounded confidence figures for one platform
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceRow {
    pub platform: Platform,
    pub lower: i64,
    pub recommended: i64,
    pub upper: i64,
    pub confidence: &'static str,
}

/// Output of response normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub allocation: PerPlatform<f64>,
    pub performance: PerPlatform<PlatformPerformance>,
    pub explanation: String,
    pub confidence_intervals: PerPlatform<ConfidenceInterval>,
    pub citations: Vec<String>,
    pub additional_info: Vec<String>,
    pub calculated_at: DateTime<Utc>,
}

impl AllocationResult {
    /// Sum of every platform's allocation
    pub fn total_allocated(&self) -> f64 {
        self.allocation.iter().map(|(_, budget)| *budget).sum()
    }

    /// Sum of projected conversions, saturating at `u64::MAX`
    pub fn total_conversions(&self) -> u64 {
        self.performance
            .iter()
            .fold(0u64, |total, (_, perf)| total.saturating_add(perf.conversions))
    }

    /// Whole-percent share of the monthly budget allocated to `platform`
    ///
    /// Zero when the monthly budget is not positive.
    pub fn share_percent(&self, platform: Platform, monthly_budget: f64) -> i64 {
        if monthly_budget <= 0.0 || !monthly_budget.is_finite() {
            return 0;
        }
        round_half_up(self.allocation.get(platform) / monthly_budget * 100.0)
    }

    /// Confidence figures rounded for display, one row per platform
    pub fn confidence_rows(&self) -> Vec<ConfidenceRow> {
        Platform::ALL
            .into_iter()
            .map(|platform| {
                let interval = self.confidence_intervals.get(platform);
                ConfidenceRow {
                    platform,
                    lower: round_half_up(interval.lower),
                    recommended: round_half_up(*self.allocation.get(platform)),
                    upper: round_half_up(interval.upper),
                    confidence: CONFIDENCE_LABEL,
                }
            })
            .collect()
    }
}

/// Round to the nearest integer, ties toward positive infinity
pub fn round_half_up(value: f64) -> i64 {
    if value.is_finite() {
        (value + 0.5).floor() as i64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> AllocationResult {
        let allocation = PerPlatform {
            google: 2000.0,
            meta: 1500.4,
            tiktok: 500.0,
            linkedin: 1000.0,
        };
        AllocationResult {
            allocation,
            performance: allocation.map(|p, budget| PlatformPerformance {
                budget: *budget,
                conversions: (budget / p.default_cpa()).round() as u64,
                cpa: p.default_cpa(),
            }),
            explanation: String::new(),
            confidence_intervals: allocation.map(|_, budget| ConfidenceInterval {
                lower: budget * 0.85,
                upper: budget * 1.15,
                synthesized: true,
            }),
            citations: vec![],
            additional_info: vec![],
            calculated_at: Utc::now(),
        }
    }

    #[test]
    fn test_share_percent() {
        let result = sample_result();
        assert_eq!(result.share_percent(Platform::Google, 5000.0), 40);
        assert_eq!(result.share_percent(Platform::Meta, 5000.0), 30);
        assert_eq!(result.share_percent(Platform::Google, 0.0), 0);
    }

    #[test]
    fn test_totals() {
        let result = sample_result();
        assert!((result.total_allocated() - 5000.4).abs() < 1e-9);
        // 8 + 8 + 6 + 5
        assert_eq!(result.total_conversions(), 27);
    }

    #[test]
    fn test_huge_allocations_saturate_total_conversions() {
        let raw = serde_json::json!({"allocation": {"google": 3e21, "meta": 3e21}});
        let result = crate::response::normalize(&raw);
        assert_eq!(result.performance.google.conversions, 12_000_000_000_000_000_000);
        assert_eq!(result.performance.meta.conversions, 15_000_000_000_000_000_000);
        assert_eq!(result.total_conversions(), u64::MAX);

        let input = crate::types::CampaignInput::default();
        let report = crate::display::ReportRenderer::plain().render(&input, &result);
        assert!(report.contains(&format!("Conversions: {}", u64::MAX)));
    }

    #[test]
    fn test_confidence_rows_are_rounded() {
        let rows = sample_result().confidence_rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].platform, Platform::Google);
        assert_eq!(rows[0].lower, 1700);
        assert_eq!(rows[0].recommended, 2000);
        assert_eq!(rows[0].upper, 2300);
        assert_eq!(rows[1].recommended, 1500);
        assert_eq!(rows[3].confidence, CONFIDENCE_LABEL);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(f64::NAN), 0);
    }
}
