//! Formatting and reporting for health check results

use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::check::CheckStatus;
use super::runner::HealthCheckReport;

/// Formats a health check report as a pretty table
pub fn format_report(report: &HealthCheckReport) -> String {
    let mut builder = Builder::default();

    // Add header
    builder.push_record(["System", "Status", "Duration", "Message"]);

    // Add rows for each check
    for (name, result) in &report.results {
        let duration_str = format!("{:.2?}", result.duration);
        builder.push_record([
            name.as_str(),
            &result.status.label().to_string(),
            &duration_str,
            &result.message,
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    let mut output = String::new();
    output.push_str(&table.to_string());
    output.push('\n');

    // Add summary
    output.push_str(&format_summary(report));

    output
}

/// Formats the summary section of the report
fn format_summary(report: &HealthCheckReport) -> String {
    let mut summary = String::new();

    summary.push_str(&format!("\n{}\n", "Summary".bold().underline()));
    summary.push_str(&format!("  Total checks: {}\n", report.total));
    summary.push_str(&format!(
        "  {} Passed: {}\n",
        CheckStatus::Pass.symbol().green(),
        report.passed
    ));

    if report.warned > 0 {
        summary.push_str(&format!(
            "  {} Warned: {}\n",
            CheckStatus::Warn.symbol().yellow(),
            report.warned
        ));
    }

    if report.failed > 0 {
        summary.push_str(&format!(
            "  {} Failed: {}\n",
            CheckStatus::Fail.symbol().red(),
            report.failed
        ));
    }

    // Overall status
    summary.push('\n');
    if report.is_healthy() {
        if report.has_warnings() {
            summary.push_str(&format!(
                "  {}\n",
                "Overall: HEALTHY (with warnings)".yellow().bold()
            ));
        } else {
            summary.push_str(&format!("  {}\n", "Overall: HEALTHY".green().bold()));
        }
    } else {
        summary.push_str(&format!("  {}\n", "Overall: UNHEALTHY".red().bold()));
    }

    summary
}

/// Prints a health check report to stdout
pub fn print_report(report: &HealthCheckReport) {
    println!("{}", format_report(report));

    // Print details for any checks that have them
    for (index, (name, result)) in report.results.iter().enumerate() {
        if let Some(details) = &result.details {
            match report.descriptions.get(index).copied().flatten() {
                Some(description) => println!("\n{} Details ({}):", name.bold(), description.dimmed()),
                None => println!("\n{} Details:", name.bold()),
            }
            println!("{}", details);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::check::{CheckResult, SystemCheck};
    use crate::health::runner::HealthCheckRunner;

    struct Broken;

    impl SystemCheck for Broken {
        fn name(&self) -> &'static str {
            "Broken"
        }

        fn check(&self) -> CheckResult {
            CheckResult::fail("it broke").with_details("  ✗ details")
        }
    }

    #[test]
    fn test_report_lists_checks_and_verdict() {
        colored::control::set_override(false);
        let report = HealthCheckRunner::new().add_check(Broken).run();
        let text = format_report(&report);

        assert!(text.contains("Broken"));
        assert!(text.contains("it broke"));
        assert!(text.contains("Failed: 1"));
        assert!(text.contains("Overall: UNHEALTHY"));
    }
}
