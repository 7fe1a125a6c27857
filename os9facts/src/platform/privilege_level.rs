//! Privilege level prompt definition.

use regex::Regex;

/// A privilege level of a network device, identified by its prompt.
///
/// Only prompt recognition lives here; moving between levels belongs to
/// whatever session layer implements [`CommandExecutor`](crate::driver::CommandExecutor).
#[derive(Debug, Clone)]
pub struct PrivilegeLevel {
    /// Name of this privilege level (e.g., "exec", "privilege_exec", "configuration").
    pub name: String,

    /// Regex pattern to match the prompt for this privilege level.
    pub pattern: Regex,

    /// Strings that must NOT be in the prompt for this level to match.
    /// Used for disambiguation (e.g., "#" matches both privileged and config modes).
    pub not_contains: Vec<String>,
}

impl PrivilegeLevel {
    /// Create a new privilege level from a prompt pattern.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
            not_contains: vec![],
        })
    }

    /// Add a not_contains pattern.
    pub fn with_not_contains(mut self, pattern: impl Into<String>) -> Self {
        self.not_contains.push(pattern.into());
        self
    }

    /// Check if this privilege level matches a prompt.
    pub fn matches(&self, prompt: &str) -> bool {
        if self.not_contains.iter().any(|nc| prompt.contains(nc.as_str())) {
            return false;
        }

        self.pattern.is_match(prompt)
    }
}
