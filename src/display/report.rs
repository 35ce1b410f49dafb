//! Allocation report rendering
//!
//! Produces the full terminal report (allocation, projected performance,
//! confidence rows, explanation with citations, references) or a JSON
//! document carrying the same data.

use colored::{ColoredString, Colorize};
use serde::Serialize;
use std::fmt::Write;

use super::format::{bar, format_budget, format_money};
use crate::citations::{split_citations, to_plain_text, Segment};
use crate::errors::Result;
use crate::types::{AllocationResult, CampaignInput, ConfidenceRow, PerPlatform, Platform};

const BAR_WIDTH: usize = 24;
const NAME_WIDTH: usize = 14;

/// Renders an [`AllocationResult`] for the terminal
#[derive(Debug, Clone, Copy)]
pub struct ReportRenderer {
    color: bool,
    show_benchmarks: bool,
}

impl ReportRenderer {
    pub fn new(color: bool, show_benchmarks: bool) -> Self {
        Self {
            color,
            show_benchmarks,
        }
    }

    /// Renderer without ANSI styling
    pub fn plain() -> Self {
        Self::new(false, true)
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn heading(&self, out: &mut String, title: &str) {
        let _ = writeln!(out, "\n{}", self.paint(title, |t| t.bold().cyan()));
    }

    /// Full text report
    pub fn render(&self, input: &CampaignInput, result: &AllocationResult) -> String {
        let mut out = String::new();

        let title = format!("Budget Allocation for {}", input.company_name);
        let _ = writeln!(out, "{}", self.paint(&title, |t| t.bold()));
        let _ = writeln!(
            out,
            "{}",
            self.paint(
                &format!(
                    "Monthly budget: {} | Goal: {}",
                    format_budget(input.monthly_budget),
                    input.primary_goal.label().to_lowercase()
                ),
                |t| t.dimmed()
            )
        );

        self.render_allocation(&mut out, input, result);
        self.render_performance(&mut out, result);
        self.render_confidence(&mut out, &result.confidence_rows());
        self.render_explanation(&mut out, result);

        out
    }

    fn render_allocation(&self, out: &mut String, input: &CampaignInput, result: &AllocationResult) {
        self.heading(out, "Allocation");
        for (platform, budget) in result.allocation.iter() {
            let share = result.share_percent(platform, input.monthly_budget);
            let _ = writeln!(
                out,
                "  {:<width$} {:>10} {:>5} {}",
                platform.display_name(),
                format_money(*budget),
                format!("{}%", share),
                self.paint(&bar(share, BAR_WIDTH), |t| t.blue()),
                width = NAME_WIDTH
            );
        }
    }

    fn render_performance(&self, out: &mut String, result: &AllocationResult) {
        self.heading(out, "Projected Performance");
        for (platform, perf) in result.performance.iter() {
            let _ = writeln!(
                out,
                "  {:<width$} Budget: {:>10}  Conversions: {:>6}  CPA: {}",
                platform.display_name(),
                format_money(perf.budget),
                perf.conversions,
                format_cpa(perf.cpa),
                width = NAME_WIDTH
            );
        }
        let _ = writeln!(
            out,
            "  {:<width$} Conversions: {}",
            "Total",
            result.total_conversions(),
            width = NAME_WIDTH
        );
    }

    fn render_confidence(&self, out: &mut String, rows: &[ConfidenceRow]) {
        self.heading(out, "Confidence Intervals");
        for row in rows {
            let _ = writeln!(
                out,
                "  {:<width$} Lower: {:>10}  Recommended: {:>10}  Upper: {:>10}  {}",
                row.platform.display_name(),
                format_money(row.lower as f64),
                format_money(row.recommended as f64),
                format_money(row.upper as f64),
                self.paint(row.confidence, |t| t.dimmed()),
                width = NAME_WIDTH
            );
        }
    }

    fn render_explanation(&self, out: &mut String, result: &AllocationResult) {
        self.heading(out, "Recommendation Explanation");
        let segments = split_citations(&result.explanation, &result.citations);
        let _ = writeln!(out, "{}", self.render_segments(&segments));

        if !result.citations.is_empty() {
            self.heading(out, "References:");
            for (index, url) in result.citations.iter().enumerate() {
                let number = format!("[{}]", index + 1);
                let _ = writeln!(
                    out,
                    "  {} {}",
                    self.paint(&number, |t| t.blue()),
                    self.paint(url, |t| t.underline())
                );
            }
        }

        if !result.additional_info.is_empty() {
            self.heading(out, "Additional sources:");
            for url in &result.additional_info {
                let _ = writeln!(out, "  - {}", url);
            }
        }

        if self.show_benchmarks {
            self.heading(out, "Default Benchmarks:");
            for platform in Platform::ALL {
                let _ = writeln!(
                    out,
                    "  {}: {} (CPA {})",
                    platform.short_name(),
                    platform.benchmark_source(),
                    format_cpa(platform.default_cpa())
                );
            }
        }
    }

    /// Explanation text with citation groups as `[1,2]`, numbers highlighted
    pub fn render_segments(&self, segments: &[Segment]) -> String {
        if !self.color {
            return to_plain_text(segments);
        }
        let mut out = String::new();
        for segment in segments {
            match segment {
                Segment::Text { text } => out.push_str(text),
                Segment::Citations { refs } => {
                    let numbers: Vec<String> = refs
                        .iter()
                        .map(|r| self.paint(&r.number.to_string(), |t| t.blue().underline()))
                        .collect();
                    out.push_str(&self.paint("[", |t| t.blue()));
                    out.push_str(&numbers.join(&self.paint(",", |t| t.blue())));
                    out.push_str(&self.paint("]", |t| t.blue()));
                }
            }
        }
        out
    }
}

/// JSON document for `--format json`
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub company_name: &'a str,
    pub monthly_budget: f64,
    pub primary_goal: &'a str,
    pub shares: PerPlatform<i64>,
    pub result: &'a AllocationResult,
    pub confidence: Vec<ConfidenceRow>,
    pub explanation_segments: Vec<Segment>,
}

impl<'a> JsonReport<'a> {
    pub fn new(input: &'a CampaignInput, result: &'a AllocationResult) -> Self {
        Self {
            company_name: &input.company_name,
            monthly_budget: input.monthly_budget,
            primary_goal: input.primary_goal.label(),
            shares: PerPlatform::from_fn(|p| result.share_percent(p, input.monthly_budget)),
            result,
            confidence: result.confidence_rows(),
            explanation_segments: split_citations(&result.explanation, &result.citations),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn format_cpa(cpa: f64) -> String {
    if cpa.fract() == 0.0 {
        format!("${}", cpa)
    } else {
        format!("${:.2}", cpa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::normalize;
    use serde_json::json;

    fn sample() -> (CampaignInput, AllocationResult) {
        let raw = json!({
            "allocation": {"google": 2000, "meta": 1500, "tiktok": 500, "linkedin": 1000},
            "explanation": "Google captures intent [1]; TikTok builds reach [2, 9].",
            "citations": ["https://a.com/google", "https://b.com/tiktok"],
            "additional_info": ["https://c.com/extra"]
        });
        (CampaignInput::default(), normalize(&raw))
    }

    #[test]
    fn test_text_report_sections() {
        let (input, result) = sample();
        let report = ReportRenderer::plain().render(&input, &result);

        assert!(report.starts_with("Budget Allocation for Company\n"));
        assert!(report.contains("Monthly budget: $5,000 | Goal: generate leads"));
        assert!(report.contains("Google Ads"));
        assert!(report.contains("40%"));
        assert!(report.contains("Projected Performance"));
        assert!(report.contains("Conversions:      8"));
        assert!(report.contains("Recommended:     $2,000"));
        assert!(report.contains("90% confidence"));
        assert!(report.contains("Google captures intent [1]; TikTok builds reach [2]."));
        assert!(report.contains("[1] https://a.com/google"));
        assert!(report.contains("[2] https://b.com/tiktok"));
        assert!(report.contains("  - https://c.com/extra"));
        assert!(report.contains("TikTok: Lebesgue TikTok Ads Benchmarks (CPA $83)"));
    }

    #[test]
    fn test_benchmarks_can_be_hidden() {
        let (input, result) = sample();
        let report = ReportRenderer::new(false, false).render(&input, &result);
        assert!(!report.contains("Default Benchmarks"));
    }

    #[test]
    fn test_no_references_section_without_citations() {
        let input = CampaignInput::default();
        let result = normalize(&json!({"explanation": "Spread evenly [1]."}));
        let report = ReportRenderer::plain().render(&input, &result);

        assert!(report.contains("Spread evenly [1]."));
        assert!(!report.contains("References:"));
    }

    #[test]
    fn test_render_segments_plain() {
        let citations = vec!["https://a.com".to_string(), "https://b.com".to_string()];
        let segments = split_citations("x [2,1,1] y", &citations);
        assert_eq!(ReportRenderer::plain().render_segments(&segments), "x [2,1,1] y");
    }

    #[test]
    fn test_json_report() {
        let (input, result) = sample();
        let json = JsonReport::new(&input, &result).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["company_name"], "Company");
        assert_eq!(value["shares"]["google"], 40);
        assert_eq!(value["result"]["performance"]["google"]["conversions"], 8);
        assert_eq!(value["confidence"][0]["platform"], "google");
        assert_eq!(value["explanation_segments"][1]["kind"], "citations");
        assert_eq!(value["explanation_segments"][1]["refs"][0]["number"], 1);
    }

    #[test]
    fn test_format_cpa() {
        assert_eq!(format_cpa(250.0), "$250");
        assert_eq!(format_cpa(82.5), "$82.50");
    }
}
