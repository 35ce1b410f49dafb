//! Doctor command for system diagnostics
//!
//! Checks the configuration and whether the allocation service answers.

use crate::cli::Config;
use crate::client::AllocationService;
use crate::types::PlatformConstraints;
use colored::Colorize;
use std::path::PathBuf;

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

/// Doctor diagnostics system
pub struct Doctor<'a, S: AllocationService> {
    config: &'a Config,
    config_path: Option<PathBuf>,
    service: &'a S,
}

impl<'a, S: AllocationService> Doctor<'a, S> {
    /// Create a new doctor instance
    pub fn new(config: &'a Config, config_path: Option<PathBuf>, service: &'a S) -> Self {
        Self {
            config,
            config_path,
            service,
        }
    }

    /// Run all health checks
    pub async fn run_diagnostics(&self) -> Vec<HealthCheck> {
        vec![
            self.check_config_file(),
            self.check_config_values(),
            self.check_constraint_total(),
            self.check_service().await,
        ]
    }

    /// Check 1: Config file present
    fn check_config_file(&self) -> HealthCheck {
        let status = match &self.config_path {
            Some(path) if path.exists() => HealthStatus::Pass,
            Some(path) => HealthStatus::Warn(format!(
                "{} not found, using built-in defaults",
                path.display()
            )),
            None => HealthStatus::Warn("No home directory, using built-in defaults".to_string()),
        };

        HealthCheck {
            name: "Config File".to_string(),
            status,
        }
    }

    /// Check 2: Config values valid
    fn check_config_values(&self) -> HealthCheck {
        let status = match self.config.validate() {
            Ok(()) => HealthStatus::Pass,
            Err(e) => HealthStatus::Fail(e.to_string()),
        };

        HealthCheck {
            name: "Config Values".to_string(),
            status,
        }
    }

    /// Check 3: Default minimums leave room for the optimizer
    fn check_constraint_total(&self) -> HealthCheck {
        let constraints = PlatformConstraints::from(self.config.campaign.constraints);
        let total: f64 = constraints.iter().map(|(_, p)| *p).sum();

        let status = if total > 100.0 {
            HealthStatus::Warn(format!(
                "Default minimums add up to {}%; the service will have to scale them down",
                total
            ))
        } else {
            HealthStatus::Pass
        };

        HealthCheck {
            name: "Default Minimums".to_string(),
            status,
        }
    }

    /// Check 4: Allocation service reachable
    async fn check_service(&self) -> HealthCheck {
        let status = match self.service.health_check().await {
            Ok(true) => HealthStatus::Pass,
            Ok(false) => HealthStatus::Fail(format!(
                "Allocation service not reachable at {}",
                self.config.api.base_url
            )),
            Err(e) => HealthStatus::Fail(format!("Error checking service: {}", e)),
        };

        HealthCheck {
            name: "Allocation Service".to_string(),
            status,
        }
    }
}

/// Print check results; returns true when nothing failed
pub fn print_report(checks: &[HealthCheck]) -> bool {
    println!("\n{}", "BudgetBuddy Doctor".bold().cyan());
    println!("─────────────────────────────────────");

    let mut healthy = true;
    for check in checks {
        match &check.status {
            HealthStatus::Pass => println!("{} {}", "✓".green(), check.name),
            HealthStatus::Warn(msg) => {
                println!("{} {}: {}", "!".yellow(), check.name, msg.yellow())
            }
            HealthStatus::Fail(msg) => {
                healthy = false;
                println!("{} {}: {}", "✗".red(), check.name, msg.red());
            }
        }
    }
    println!();

    healthy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Result;
    use crate::request::AllocationRequest;
    use async_trait::async_trait;
    use serde_json::Value;

    struct FixedHealth(bool);

    #[async_trait]
    impl AllocationService for FixedHealth {
        async fn allocate(&self, _request: &AllocationRequest) -> Result<Value> {
            Ok(Value::Null)
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(self.0)
        }
    }

    #[tokio::test]
    async fn test_healthy_setup() {
        let config = Config::default();
        let service = FixedHealth(true);
        let checks = Doctor::new(&config, None, &service).run_diagnostics().await;

        assert_eq!(checks.len(), 4);
        assert!(matches!(checks[0].status, HealthStatus::Warn(_)));
        assert_eq!(checks[1].status, HealthStatus::Pass);
        assert_eq!(checks[2].status, HealthStatus::Pass);
        assert_eq!(checks[3].status, HealthStatus::Pass);
    }

    #[tokio::test]
    async fn test_unreachable_service_fails() {
        let config = Config::default();
        let service = FixedHealth(false);
        let checks = Doctor::new(&config, None, &service).run_diagnostics().await;

        assert!(matches!(checks[3].status, HealthStatus::Fail(_)));
    }

    #[tokio::test]
    async fn test_infeasible_minimums_warn() {
        let mut config = Config::default();
        config.campaign.constraints.google = 50.0;
        config.campaign.constraints.meta = 50.0;
        let service = FixedHealth(true);
        let checks = Doctor::new(&config, None, &service).run_diagnostics().await;

        assert!(matches!(checks[2].status, HealthStatus::Warn(_)));
    }

    #[test]
    fn test_invalid_config_fails() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        let service = FixedHealth(true);
        let check = Doctor::new(&config, None, &service).check_config_values();

        assert!(matches!(check.status, HealthStatus::Fail(_)));
    }
}
