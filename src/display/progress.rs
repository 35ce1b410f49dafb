//! Spinner and status lines around a calculation

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while the service works
///
/// Hidden when `enabled` is false so quiet runs stay silent.
pub fn start_calculating(enabled: bool, company: &str) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(format!("Calculating budget allocation for {}...", company));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Clear the spinner and print a success line
pub fn finish_with_success(pb: &ProgressBar, message: &str, duration_ms: u128) {
    pb.finish_and_clear();
    eprintln!(
        "{} {} {}",
        "✓".green(),
        message,
        format!("({}ms)", duration_ms).dimmed()
    );
}

/// Clear the spinner and print the user-facing error
pub fn finish_with_error(pb: &ProgressBar, message: &str) {
    pb.finish_and_clear();
    eprintln!("{} {}", "Error:".red().bold(), message.red());
}
