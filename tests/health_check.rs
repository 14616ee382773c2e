//! Integration tests for the health check system

use fish::app::AssetConfig;
use fish::health::{self, CheckStatus, HealthCheckRunner, SystemCheck, checks::*};
use fish::sim::LevelConfig;

#[test]
fn test_all_health_checks() {
    let report = health::run_all_checks();

    // Print report for debugging if tests fail
    if !report.is_healthy() {
        eprintln!("\n{}", health::format_report(&report));
    }

    assert!(
        report.is_healthy(),
        "Health checks failed: {} failures, {} warnings",
        report.failed,
        report.warned
    );
    assert_eq!(report.total, 5);
}

#[test]
fn test_config_check() {
    let result = ConfigCheck::new().check();

    assert!(
        result.status.is_ok(),
        "Config check failed: {}",
        result.message
    );
}

#[test]
fn test_level_check() {
    let result = LevelCheck::new().check();

    assert_eq!(
        result.status,
        CheckStatus::Pass,
        "Level check failed: {} {:?}",
        result.message,
        result.details
    );
}

#[test]
fn test_level_check_with_combined_movement() {
    let config = LevelConfig {
        movement: fish::sim::MovementMode::Combined,
        player_speed: 450.0,
        ..Default::default()
    };
    let result = LevelCheck::with_config(config).check();

    assert_eq!(result.status, CheckStatus::Pass, "{}", result.message);
}

#[test]
fn test_level_check_rejects_invalid_config() {
    let config = LevelConfig {
        frame_duration: 0.0,
        ..Default::default()
    };
    let result = LevelCheck::with_config(config).check();

    assert_eq!(result.status, CheckStatus::Fail);
}

#[test]
fn test_assets_check() {
    let result = AssetsCheck::new().check();

    assert!(
        result.status.is_ok(),
        "Assets check failed: {} {:?}",
        result.message,
        result.details
    );
}

#[test]
fn test_assets_check_missing_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = AssetConfig {
        dir: dir.path().join("nowhere"),
        ..Default::default()
    };
    let result = AssetsCheck::with_config(config).check();

    assert_eq!(result.status, CheckStatus::Fail);
    assert!(result.details.is_some());
}

#[test]
fn test_build_info_check() {
    let result = BuildInfoCheck::new().check();

    assert!(
        result.status.is_ok(),
        "Build info check failed: {}",
        result.message
    );
}

#[test]
fn test_system_info_check() {
    let result = SystemInfoCheck::new().check();

    assert!(
        result.status.is_ok(),
        "System info check failed: {}",
        result.message
    );
}

#[test]
fn test_runner_collects_all_checks() {
    let report = HealthCheckRunner::new()
        .add_check(ConfigCheck::new())
        .add_check(LevelCheck::new())
        .run();

    assert_eq!(report.total, 2, "Expected 2 checks in report");
    assert_eq!(report.passed + report.warned + report.failed, report.total);
    assert!(report.result("Level Simulation").is_some());
}

#[test]
fn test_report_exit_codes() {
    let report = HealthCheckRunner::new().add_check(ConfigCheck::new()).run();

    if report.failed > 0 {
        assert_eq!(report.exit_code(), 1);
    } else if report.warned > 0 {
        assert_eq!(report.exit_code(), 2);
    } else {
        assert_eq!(report.exit_code(), 0);
    }
}
