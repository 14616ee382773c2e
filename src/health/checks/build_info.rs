//! Build information health check

use crate::build_info;
use crate::health::check::{CheckResult, Details, SystemCheck};

/// Checks that build information is accessible and valid
pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuildInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates build metadata (git, rustc, timestamps)")
    }

    fn check(&self) -> CheckResult {
        let mut details = Details::new();
        details.note(format!("Version: {}", build_info::version_string()));

        match build_info::GIT_SHA {
            Some(_) => details.pass(format!(
                "Git: {}@{} (dirty: {})",
                build_info::GIT_BRANCH.unwrap_or("unknown"),
                build_info::git_sha_short(),
                build_info::is_git_dirty()
            )),
            None => details.note("Git: not built from a checkout"),
        }
        if let Some(committed) = build_info::GIT_COMMIT_TIMESTAMP {
            details.note(format!("Commit time: {}", committed));
        }

        for (field, value) in [
            ("Build time", build_info::BUILD_TIMESTAMP),
            ("Rustc", build_info::RUSTC_SEMVER),
            ("Channel", build_info::RUSTC_CHANNEL),
            ("Target", build_info::CARGO_TARGET_TRIPLE),
            ("Opt level", build_info::CARGO_OPT_LEVEL),
        ] {
            if value.is_empty() {
                details.fail(format!("{field}: missing"));
            } else {
                details.pass(format!("{field}: {value}"));
            }
        }

        details.finish(
            "Build metadata accessible",
            "Build metadata incomplete",
            "Build metadata missing",
        )
    }
}
