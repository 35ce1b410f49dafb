//! Response normalization
//!
//! Turns the allocation service's JSON, of uncertain completeness, into an
//! [`AllocationResult`]. Every field is checked explicitly and replaced from
//! a fixed default when missing or unusable:
//!
//! | field                              | default                              |
//! |------------------------------------|--------------------------------------|
//! | `allocation.<platform>`            | `0`                                  |
//! | `performance_metrics.<p>.cpa`      | [`Platform::default_cpa`]            |
//! | `explanation`                      | [`DEFAULT_EXPLANATION`]              |
//! | `citations`                        | empty                                |
//! | `confidence_intervals.P10.<p>`     | recommended × 0.85                   |
//! | `confidence_intervals.P90.<p>`     | recommended × 1.15                   |
//! | `additional_info`                  | empty                                |

use chrono::Utc;
use log::{debug, warn};
use serde_json::{Map, Value};

use crate::types::{
    AllocationResult, ConfidenceInterval, PerPlatform, Platform, PlatformPerformance,
};

/// Explanation used when the service sends none
pub const DEFAULT_EXPLANATION: &str =
    "Budget allocation optimized based on your goals and constraints.";

/// Lower bound factor when P10 is not reported
pub const LOWER_BOUND_FACTOR: f64 = 0.85;

/// Upper bound factor when P90 is not reported
pub const UPPER_BOUND_FACTOR: f64 = 1.15;

/// Normalize a raw service response
pub fn normalize(raw: &Value) -> AllocationResult {
    let allocation = PerPlatform::from_fn(|platform| allocation_for(raw, platform));

    let performance = allocation.map(|platform, budget| {
        let cpa = cpa_for(raw, platform);
        PlatformPerformance {
            budget: *budget,
            conversions: conversions(*budget, cpa),
            cpa,
        }
    });

    let explanation = match raw.get("explanation").and_then(Value::as_str) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => {
            debug!("Response has no explanation, using default");
            DEFAULT_EXPLANATION.to_string()
        }
    };

    let intervals = interval_maps(raw.get("confidence_intervals"));
    let confidence_intervals = allocation.map(|platform, recommended| {
        confidence_for(intervals.as_ref(), platform, *recommended)
    });

    AllocationResult {
        allocation,
        performance,
        explanation,
        confidence_intervals,
        citations: string_list(raw.get("citations")),
        additional_info: string_list(raw.get("additional_info")),
        calculated_at: Utc::now(),
    }
}

/// Projected conversions for `budget` at `cpa`
///
/// `cpa` is always positive here; see [`cpa_for`].
pub fn conversions(budget: f64, cpa: f64) -> u64 {
    if budget > 0.0 {
        (budget / cpa).round() as u64
    } else {
        0
    }
}

fn allocation_for(raw: &Value, platform: Platform) -> f64 {
    let value = raw
        .get("allocation")
        .and_then(|map| map.get(platform.key()))
        .and_then(Value::as_f64);

    match value {
        Some(budget) if budget.is_finite() && budget >= 0.0 => budget,
        Some(budget) => {
            warn!("Ignoring invalid allocation {} for {}", budget, platform);
            0.0
        }
        None => 0.0,
    }
}

/// Reported CPA, or the platform default when missing, zero or negative
fn cpa_for(raw: &Value, platform: Platform) -> f64 {
    let reported = raw
        .get("performance_metrics")
        .and_then(|metrics| metrics.get(platform.key()))
        .and_then(|metrics| metrics.get("cpa"))
        .and_then(Value::as_f64);

    match reported {
        Some(cpa) if cpa.is_finite() && cpa > 0.0 => cpa,
        Some(cpa) => {
            warn!(
                "Non-positive CPA {} reported for {}, using default {}",
                cpa,
                platform,
                platform.default_cpa()
            );
            platform.default_cpa()
        }
        None => platform.default_cpa(),
    }
}

/// The P10/P90 maps, accepting either an object or a JSON string holding one
fn interval_maps(raw: Option<&Value>) -> Option<Map<String, Value>> {
    match raw? {
        Value::Object(map) => Some(map.clone()),
        Value::String(encoded) => match serde_json::from_str::<Value>(encoded) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) | Err(_) => {
                warn!("Could not decode string-encoded confidence intervals");
                None
            }
        },
        _ => None,
    }
}

fn confidence_for(
    intervals: Option<&Map<String, Value>>,
    platform: Platform,
    recommended: f64,
) -> ConfidenceInterval {
    let bound = |key: &str| {
        intervals
            .and_then(|maps| maps.get(key))
            .and_then(|map| map.get(platform.key()))
            .and_then(Value::as_f64)
            .filter(|value| value.is_finite() && *value != 0.0)
    };

    match (bound("P10"), bound("P90")) {
        (Some(lower), Some(upper)) => ConfidenceInterval {
            lower,
            upper,
            synthesized: false,
        },
        (lower, upper) => ConfidenceInterval {
            lower: lower.unwrap_or(recommended * LOWER_BOUND_FACTOR),
            upper: upper.unwrap_or(recommended * UPPER_BOUND_FACTOR),
            synthesized: true,
        },
    }
}

fn string_list(raw: Option<&Value>) -> Vec<String> {
    raw.and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
