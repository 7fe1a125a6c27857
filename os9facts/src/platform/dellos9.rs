//! Dell Networking OS9 (FTOS) platform definition.
//!
//! Supports Dell OS9 switches (S-, Z- and MXL-series) with the following
//! privilege levels:
//! - `exec` - User EXEC mode with `>` prompt
//! - `privilege_exec` - Privileged EXEC mode with `#` prompt
//! - `configuration` - Configuration mode with `(conf*)#` prompt
//!
//! # Prompt Examples
//!
//! ```text
//! Dell>                              # exec mode
//! Dell#                              # privilege_exec mode
//! Dell(conf)#                        # configuration mode
//! Dell(conf-if-te-1/33)#             # config sub-mode (interface)
//! ```

use std::sync::Arc;

use super::{
    DefaultBehavior, PlatformDefinition, PrivilegeLevel, VendorBehavior, contains_failure, leading_line,
};

/// `% Error` lines containing one of these are informational, not failures.
const BENIGN_ERRORS: &[&str] = &[
    "does not exist",
    "already exists",
    "Host not found",
    "not active",
];

/// Create the Dell OS9 platform definition.
pub fn platform() -> PlatformDefinition {
    let exec = PrivilegeLevel::new("exec", r"^[\w+\-.:/\[\]]+>\s?$").unwrap();

    let privilege_exec = PrivilegeLevel::new("privilege_exec", r"^[\w+\-.:/\[\]]+#\s?$")
        .unwrap()
        .with_not_contains("(conf");

    let configuration = PrivilegeLevel::new(
        "configuration",
        r"^[\w+\-.:/\[\]]+(?:\([^)]+\)){1,3}#\s?$",
    )
    .unwrap();

    PlatformDefinition::new("dell_os9")
        .with_privilege(exec)
        .with_privilege(privilege_exec)
        .with_privilege(configuration)
        .with_failure_pattern("% Error")
        .with_failure_pattern("%Error")
        .with_failure_pattern("% Bad secret")
        .with_failure_pattern("%Bad secret")
        .with_failure_pattern("invalid input")
        .with_failure_pattern("incomplete command")
        .with_failure_pattern("ambiguous command")
        .with_failure_pattern("connection timed out")
        .with_behavior(Arc::new(Os9Behavior))
}

/// Dell OS9-specific behavior.
pub struct Os9Behavior;

impl VendorBehavior for Os9Behavior {
    fn normalize_output(&self, platform: &PlatformDefinition, raw: &str, command: &str) -> String {
        DefaultBehavior.normalize_output(platform, raw, command)
    }

    /// Only a `%` banner leading the output counts; the same words inside
    /// command output (descriptions, banners) are data.
    fn detect_failure(&self, platform: &PlatformDefinition, output: &str) -> Option<String> {
        leading_line(output)
            .filter(|line| line.starts_with('%') && !is_benign_error(line))
            .filter(|line| contains_failure(platform, line))
            .map(str::to_string)
    }
}

fn is_benign_error(line: &str) -> bool {
    let lowered = line.to_lowercase();
    let is_error = lowered.contains("% error") || lowered.contains("%error");
    is_error && BENIGN_ERRORS.iter().any(|benign| line.contains(benign))
}
