//! Core health check trait and types

use std::fmt::Display;
use std::time::Duration;

use colored::{ColoredString, Colorize};

/// Status of a system check, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum CheckStatus {
    #[default]
    Pass,
    /// Usable, but something looks off
    Warn,
    Fail,
}

impl CheckStatus {
    /// Returns true if the check passed (Pass or Warn)
    pub fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Pass | CheckStatus::Warn)
    }

    /// Returns true if the check failed
    pub fn is_fail(&self) -> bool {
        matches!(self, CheckStatus::Fail)
    }

    /// Marker used in front of detail lines
    pub fn symbol(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "✓",
            CheckStatus::Warn => "⚠",
            CheckStatus::Fail => "✗",
        }
    }

    pub fn label(&self) -> ColoredString {
        match self {
            CheckStatus::Pass => "PASS".green(),
            CheckStatus::Warn => "WARN".yellow(),
            CheckStatus::Fail => "FAIL".red(),
        }
    }
}

/// Result of a system check
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub status: CheckStatus,
    /// One-line summary shown in the report table
    pub message: String,
    pub details: Option<String>,
    pub duration: Duration,
}

impl CheckResult {
    pub fn new(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
            duration: Duration::ZERO,
        }
    }

    pub fn pass(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Pass, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Warn, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Fail, message)
    }

    /// Adds optional details to the result
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Sets the duration for this check
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Findings collected while a check runs, one line each
///
/// The overall status is the worst status of any line.
#[derive(Debug, Clone, Default)]
pub struct Details {
    lines: Vec<String>,
    status: CheckStatus,
}

impl Details {
    pub fn new() -> Self {
        Self::default()
    }

    /// A neutral line without a marker
    pub fn note(&mut self, line: impl Display) {
        self.lines.push(format!("  {line}"));
    }

    pub fn pass(&mut self, line: impl Display) {
        self.push(CheckStatus::Pass, line);
    }

    pub fn warn(&mut self, line: impl Display) {
        self.push(CheckStatus::Warn, line);
    }

    pub fn fail(&mut self, line: impl Display) {
        self.push(CheckStatus::Fail, line);
    }

    fn push(&mut self, status: CheckStatus, line: impl Display) {
        self.lines.push(format!("  {} {line}", status.symbol()));
        self.status = self.status.max(status);
    }

    pub fn status(&self) -> CheckStatus {
        self.status
    }

    /// Builds the result, picking the message that matches the worst status
    pub fn finish(
        self,
        pass: impl Into<String>,
        warn: impl Into<String>,
        fail: impl Into<String>,
    ) -> CheckResult {
        let message = match self.status {
            CheckStatus::Pass => pass.into(),
            CheckStatus::Warn => warn.into(),
            CheckStatus::Fail => fail.into(),
        };
        self.conclude(message)
    }

    /// Builds the result with the worst status and `message`
    pub fn conclude(self, message: impl Into<String>) -> CheckResult {
        CheckResult::new(self.status, message).with_details(self.lines.join("\n"))
    }
}

/// Trait for system health checks
pub trait SystemCheck {
    /// Name of the system being checked
    fn name(&self) -> &'static str;

    /// Perform the health check
    fn check(&self) -> CheckResult;

    /// Optional description of what this check validates
    fn description(&self) -> Option<&'static str> {
        None
    }
}
