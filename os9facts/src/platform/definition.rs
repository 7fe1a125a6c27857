//! Platform definition for vendor-specific output handling.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::privilege_level::PrivilegeLevel;
use super::{DefaultBehavior, VendorBehavior};

/// Platform definition: how a vendor's prompts look and how its CLI reports
/// command errors.
#[derive(Clone)]
pub struct PlatformDefinition {
    /// Platform name (e.g., "dell_os9").
    pub name: String,

    /// Privilege levels for this platform, keyed by name.
    pub privilege_levels: IndexMap<String, PrivilegeLevel>,

    /// Substrings that indicate command failure.
    pub failed_when_contains: Vec<String>,

    /// Optional vendor-specific behavior.
    pub behavior: Option<Arc<dyn VendorBehavior>>,
}

impl PlatformDefinition {
    /// Create a new platform definition with minimal required fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            privilege_levels: IndexMap::new(),
            failed_when_contains: vec![],
            behavior: None,
        }
    }

    /// Add a privilege level.
    pub fn with_privilege(mut self, level: PrivilegeLevel) -> Self {
        self.privilege_levels.insert(level.name.clone(), level);
        self
    }

    /// Add a failure pattern.
    pub fn with_failure_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.failed_when_contains.push(pattern.into());
        self
    }

    /// Set vendor behavior.
    pub fn with_behavior(mut self, behavior: Arc<dyn VendorBehavior>) -> Self {
        self.behavior = Some(behavior);
        self
    }

    /// Returns true if `line` looks like a prompt of any privilege level.
    pub fn is_prompt(&self, line: &str) -> bool {
        self.privilege_levels.values().any(|level| level.matches(line))
    }

    /// Strip command echo and trailing prompt from raw command output.
    pub fn normalize_output(&self, raw: &str, command: &str) -> String {
        match &self.behavior {
            Some(behavior) => behavior.normalize_output(self, raw, command),
            None => DefaultBehavior.normalize_output(self, raw, command),
        }
    }

    /// Detect a device-reported failure in command output.
    ///
    /// Vendor behavior takes precedence; without one, the first line holding
    /// a `failed_when_contains` entry is reported.
    pub fn detect_failure(&self, output: &str) -> Option<String> {
        match &self.behavior {
            Some(behavior) => behavior.detect_failure(self, output),
            None => DefaultBehavior.detect_failure(self, output),
        }
    }
}

impl fmt::Debug for PlatformDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformDefinition")
            .field("name", &self.name)
            .field("privilege_levels", &self.privilege_levels)
            .field("failed_when_contains", &self.failed_when_contains)
            .field(
                "behavior",
                &self.behavior.as_ref().map(|_| "<VendorBehavior>"),
            )
            .finish()
    }
}
