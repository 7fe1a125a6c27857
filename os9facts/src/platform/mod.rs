//! Platform definitions for vendor-specific output handling.
//!
//! A platform knows what the device prompt looks like and how the CLI
//! reports a rejected command, so raw executor output can be cleaned up
//! before parsing and device-side errors can be surfaced as transport
//! failures.

mod definition;
pub mod dellos9;
mod privilege_level;

pub use definition::PlatformDefinition;
pub use privilege_level::PrivilegeLevel;

/// Trait for vendor-specific behavior.
pub trait VendorBehavior: Send + Sync {
    /// Normalize command output (line endings, command echo, trailing prompt).
    fn normalize_output(&self, platform: &PlatformDefinition, raw: &str, command: &str) -> String;

    /// Detect command failure from output.
    fn detect_failure(&self, platform: &PlatformDefinition, output: &str) -> Option<String>;
}

/// Default vendor behavior implementation.
pub struct DefaultBehavior;

impl VendorBehavior for DefaultBehavior {
    fn normalize_output(&self, platform: &PlatformDefinition, raw: &str, command: &str) -> String {
        let mut lines: Vec<&str> = raw
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();

        // Strip command echo, optionally preceded by the prompt it was typed at
        if let Some(first) = lines.first() {
            let first = first.trim_end();
            let is_echo = match first.strip_suffix(command) {
                Some("") => true,
                Some(prefix) => platform.is_prompt(prefix.trim_end()),
                None => false,
            };
            if is_echo && !command.is_empty() {
                lines.remove(0);
            }
        }

        // Strip trailing prompt and the blank lines around it
        trim_trailing_blank(&mut lines);
        if lines.last().is_some_and(|line| platform.is_prompt(line.trim())) {
            lines.pop();
            trim_trailing_blank(&mut lines);
        }

        lines.join("\n")
    }

    fn detect_failure(&self, platform: &PlatformDefinition, output: &str) -> Option<String> {
        leading_line(output)
            .filter(|line| contains_failure(platform, line))
            .map(str::to_string)
    }
}

fn trim_trailing_blank(lines: &mut Vec<&str>) {
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
}

/// First meaningful line of command output, where a rejected command
/// reports its error. Blank lines and `^` position markers are skipped.
pub(crate) fn leading_line(output: &str) -> Option<&str> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.chars().all(|c| c == '^'))
}

/// Case-insensitive check of one line against the platform failure patterns.
pub(crate) fn contains_failure(platform: &PlatformDefinition, line: &str) -> bool {
    let lowered = line.to_lowercase();
    platform
        .failed_when_contains
        .iter()
        .any(|pattern| lowered.contains(&pattern.to_lowercase()))
}
