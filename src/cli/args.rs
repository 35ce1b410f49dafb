//! Command-line argument parsing for BudgetBuddy
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::config::Config;
use crate::types::campaign::{constraint_in_range, MAX_CONSTRAINT_PERCENT, MIN_CONSTRAINT_PERCENT};
use crate::types::{CampaignInput, PrimaryGoal};

/// BudgetBuddy - Ask the allocation service how to split a marketing budget
#[derive(Parser, Debug)]
#[command(name = "budgetbuddy")]
#[command(author = "Jerome (Kubashen) Naidoo")]
#[command(version)]
#[command(about = "Split a monthly ad budget across Google, Meta, TikTok and LinkedIn", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Allocation service base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Request an allocation and display it
    Calculate {
        #[command(flatten)]
        campaign: CampaignArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Normalize and display a saved service response
    Render {
        /// JSON file holding a raw allocation response
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Monthly budget used for percentage shares
        #[arg(long)]
        budget: Option<f64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the request payload without sending it
    Payload {
        #[command(flatten)]
        campaign: CampaignArgs,
    },

    /// Check configuration and service reachability
    Doctor,

    /// Display current configuration
    Config {
        /// Write the default configuration file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Campaign fields; anything omitted comes from config
#[derive(ClapArgs, Debug, Clone, Default, PartialEq)]
pub struct CampaignArgs {
    /// Company name
    #[arg(long)]
    pub company: Option<String>,

    /// Monthly budget
    #[arg(long)]
    pub budget: Option<f64>,

    /// Primary goal, e.g. "Generate Leads", "Increase Sales", "Brand Awareness", "Website Traffic"
    #[arg(long)]
    pub goal: Option<String>,

    /// Minimum Google Ads share in percent (5-50)
    #[arg(long, value_parser = parse_constraint)]
    pub google_min: Option<f64>,

    /// Minimum Meta Ads share in percent (5-50)
    #[arg(long, value_parser = parse_constraint)]
    pub meta_min: Option<f64>,

    /// Minimum TikTok Ads share in percent (5-50)
    #[arg(long, value_parser = parse_constraint)]
    pub tiktok_min: Option<f64>,

    /// Minimum LinkedIn Ads share in percent (5-50)
    #[arg(long, value_parser = parse_constraint)]
    pub linkedin_min: Option<f64>,
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }
}

impl CampaignArgs {
    /// Overlay the given flags on the configured campaign defaults
    pub fn merge(&self, config: &Config) -> CampaignInput {
        let mut input = config.campaign_input();

        if let Some(company) = &self.company {
            input.company_name = company.clone();
        }
        if let Some(budget) = self.budget {
            input.monthly_budget = budget;
        }
        if let Some(goal) = &self.goal {
            input.primary_goal = PrimaryGoal::from(goal.clone());
        }
        if let Some(percent) = self.google_min {
            input.constraints.google = percent;
        }
        if let Some(percent) = self.meta_min {
            input.constraints.meta = percent;
        }
        if let Some(percent) = self.tiktok_min {
            input.constraints.tiktok = percent;
        }
        if let Some(percent) = self.linkedin_min {
            input.constraints.linkedin = percent;
        }

        input
    }
}

/// Parse a minimum-allocation percentage, accepting only 5 through 50
pub fn parse_constraint(value: &str) -> Result<f64, String> {
    let percent: f64 = value
        .trim()
        .trim_end_matches('%')
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;

    if constraint_in_range(percent) {
        Ok(percent)
    } else {
        Err(format!(
            "{} is outside {}-{}",
            percent, MIN_CONSTRAINT_PERCENT, MAX_CONSTRAINT_PERCENT
        ))
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Log level for this verbosity
    pub fn log_level(&self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Error,
            Verbosity::Normal => log::LevelFilter::Warn,
            Verbosity::Verbose => log::LevelFilter::Info,
            Verbosity::VeryVerbose => log::LevelFilter::Debug,
        }
    }

    /// Check if should show progress spinner
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }
}
