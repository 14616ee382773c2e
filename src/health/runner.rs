//! Test runner for orchestrating health checks

use std::time::Instant;

use tracing::{info, warn};

use super::check::{CheckResult, CheckStatus, SystemCheck};

/// Results from running a health check suite
#[derive(Debug, Default)]
pub struct HealthCheckReport {
    /// Individual check results with their system names
    pub results: Vec<(String, CheckResult)>,
    /// What each check validates, in the same order as `results`
    pub descriptions: Vec<Option<&'static str>>,
    pub total: usize,
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
}

impl HealthCheckReport {
    fn record(&mut self, name: &str, description: Option<&'static str>, result: CheckResult) {
        match result.status {
            CheckStatus::Pass => self.passed += 1,
            CheckStatus::Warn => self.warned += 1,
            CheckStatus::Fail => self.failed += 1,
        }
        self.total += 1;
        self.descriptions.push(description);
        self.results.push((name.to_string(), result));
    }

    /// Worst status over every check; an empty report passes
    pub fn status(&self) -> CheckStatus {
        self.results
            .iter()
            .map(|(_, result)| result.status)
            .max()
            .unwrap_or_default()
    }

    /// Returns true if no check failed
    pub fn is_healthy(&self) -> bool {
        !self.status().is_fail()
    }

    pub fn has_warnings(&self) -> bool {
        self.warned > 0
    }

    /// Looks up the result of the check called `name`
    pub fn result(&self, name: &str) -> Option<&CheckResult> {
        self.results
            .iter()
            .find(|(check, _)| check == name)
            .map(|(_, result)| result)
    }

    /// Process exit code: 0 = all pass, 1 = any fail, 2 = any warn (but no fail)
    pub fn exit_code(&self) -> i32 {
        match self.status() {
            CheckStatus::Pass => 0,
            CheckStatus::Fail => 1,
            CheckStatus::Warn => 2,
        }
    }
}

fn log_result(name: &str, result: &CheckResult) {
    let duration = result.duration;
    let summary = result.message.as_str();
    match result.status {
        CheckStatus::Pass => info!(check = name, ?duration, summary, "Health check passed"),
        CheckStatus::Warn => warn!(check = name, ?duration, summary, "Health check warned"),
        CheckStatus::Fail => warn!(check = name, ?duration, summary, "Health check failed"),
    }
}

/// Orchestrates running health checks and collecting results
#[derive(Default)]
pub struct HealthCheckRunner {
    checks: Vec<Box<dyn SystemCheck>>,
}

impl HealthCheckRunner {
    /// Creates a new runner with no checks
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a check to the runner
    pub fn add_check<C: SystemCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Runs all registered checks in order and returns a report
    pub fn run(self) -> HealthCheckReport {
        let mut report = HealthCheckReport::default();

        for check in &self.checks {
            let start = Instant::now();
            let result = check.check().with_duration(start.elapsed());
            log_result(check.name(), &result);
            report.record(check.name(), check.description(), result);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, CheckStatus);

    impl SystemCheck for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn check(&self) -> CheckResult {
            match self.1 {
                CheckStatus::Pass => CheckResult::pass("ok"),
                CheckStatus::Warn => CheckResult::warn("hmm"),
                CheckStatus::Fail => CheckResult::fail("broken"),
            }
        }
    }

    #[test]
    fn test_counts_and_exit_codes() {
        let report = HealthCheckRunner::new()
            .add_check(Fixed("a", CheckStatus::Pass))
            .add_check(Fixed("b", CheckStatus::Warn))
            .run();
        assert_eq!((report.total, report.passed, report.warned), (2, 1, 1));
        assert!(report.is_healthy());
        assert_eq!(report.exit_code(), 2);

        let report = HealthCheckRunner::new()
            .add_check(Fixed("a", CheckStatus::Warn))
            .add_check(Fixed("c", CheckStatus::Fail))
            .run();
        assert!(!report.is_healthy());
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.result("c").map(|r| r.status), Some(CheckStatus::Fail));
        assert!(report.result("missing").is_none());
    }

    #[test]
    fn test_empty_runner_is_healthy() {
        let report = HealthCheckRunner::default().run();
        assert_eq!(report.total, 0);
        assert_eq!(report.exit_code(), 0);
        assert!(report.descriptions.is_empty());
        assert_eq!(report.status(), CheckStatus::Pass);
    }
}
