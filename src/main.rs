//! BudgetBuddy - Main CLI Entry Point

use anyhow::{Context, Result};
use budgetbuddy::{
    cli::{Args, CampaignArgs, Commands, Config, OutputFormat},
    client::AllocationClient,
    display::{progress, JsonReport, ReportRenderer},
    doctor::{self, Doctor},
    request::AllocationRequest,
    response::normalize,
    session::CalculationSession,
    types::{AllocationResult, CampaignInput},
};
use clap::Parser;
use simple_logger::SimpleLogger;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.command {
        Commands::Config { init: true } => Config::default(),
        _ => Config::load(args.config.as_deref()).context("Failed to load configuration")?,
    };
    if let Some(url) = &args.api_url {
        config.api.base_url = url.clone();
        config.validate().context("Invalid --api-url")?;
    }

    let level = config
        .logging
        .level
        .unwrap_or_else(|| args.verbosity().log_level());
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("Failed to initialize logger")?;

    if !config.display.color_output {
        colored::control::set_override(false);
    }

    match &args.command {
        Commands::Calculate { campaign, format } => {
            run_calculate(&args, &config, campaign, *format).await?;
        }
        Commands::Render {
            file,
            budget,
            format,
        } => {
            render_saved(&config, file, *budget, *format)?;
        }
        Commands::Payload { campaign } => {
            show_payload(&config, campaign)?;
        }
        Commands::Doctor => {
            run_doctor(&args, &config).await?;
        }
        Commands::Config { init } => {
            show_config(&args, &config, *init)?;
        }
    }

    Ok(())
}

async fn run_calculate(
    args: &Args,
    config: &Config,
    campaign: &CampaignArgs,
    format: OutputFormat,
) -> Result<()> {
    let input = campaign.merge(config);
    let client = AllocationClient::with_config(&config.api.base_url, config.timeout())?;
    let session = CalculationSession::new(client);

    let show_progress = args.verbosity().show_progress() && format == OutputFormat::Text;
    let pb = progress::start_calculating(show_progress, &input.company_name);
    let start = Instant::now();

    match session.calculate(&input).await {
        Ok(result) => {
            if show_progress {
                progress::finish_with_success(
                    &pb,
                    "Allocation received",
                    start.elapsed().as_millis(),
                );
            } else {
                pb.finish_and_clear();
            }
            print_result(config, &input, &result, format)?;
            Ok(())
        }
        Err(e) => {
            let message = session
                .snapshot()
                .await
                .error
                .unwrap_or_else(|| e.user_message());
            progress::finish_with_error(&pb, &message);
            std::process::exit(1);
        }
    }
}

fn render_saved(
    config: &Config,
    file: &Path,
    budget: Option<f64>,
    format: OutputFormat,
) -> Result<()> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;

    let mut input = config.campaign_input();
    if let Some(budget) = budget {
        input.monthly_budget = budget;
    }

    let result = normalize(&raw);
    print_result(config, &input, &result, format)
}

fn print_result(
    config: &Config,
    input: &CampaignInput,
    result: &AllocationResult,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            let renderer =
                ReportRenderer::new(config.display.color_output, config.display.show_benchmarks);
            print!("{}", renderer.render(input, result));
        }
        OutputFormat::Json => {
            println!("{}", JsonReport::new(input, result).to_json()?);
        }
    }
    Ok(())
}

fn show_payload(config: &Config, campaign: &CampaignArgs) -> Result<()> {
    let input = campaign.merge(config);
    let request = AllocationRequest::from_input(&input);
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}

async fn run_doctor(args: &Args, config: &Config) -> Result<()> {
    let client = AllocationClient::with_config(&config.api.base_url, config.timeout())?;
    let config_path = config_path(args);
    let doctor = Doctor::new(config, config_path, &client);

    let checks = doctor.run_diagnostics().await;
    let healthy = doctor::print_report(&checks);

    std::process::exit(if healthy { 0 } else { 1 });
}

fn config_path(args: &Args) -> Option<PathBuf> {
    args.config.clone().or_else(Config::default_path)
}

fn show_config(args: &Args, config: &Config, init: bool) -> Result<()> {
    if init {
        let path = config_path(args).context("Could not determine config file location")?;
        if path.exists() {
            println!("Config already exists at {}", path.display());
        } else {
            Config::default().save(&path)?;
            println!("✓ Wrote default config to {}", path.display());
        }
        return Ok(());
    }

    println!("\nBudgetBuddy Configuration");
    println!("─────────────────────────────────────");
    if let Some(path) = config_path(args) {
        println!("File:      {}", path.display());
    }
    println!("Verbosity: {}", args.verbosity().as_str());
    println!();
    print!("{}", toml::to_string_pretty(config)?);
    println!();

    Ok(())
}
