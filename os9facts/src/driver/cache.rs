//! Per-run memoization of command output.

use std::collections::HashMap;

use log::debug;

use super::CommandExecutor;
use crate::error::Result;

/// Cache of raw command output, keyed by command string.
///
/// Owned by a single gathering pass: the first request for a command goes to
/// the executor, later requests for the same command string are served from
/// the cache. Create a fresh cache for every run.
#[derive(Debug, Default)]
pub struct ResponseCache {
    responses: HashMap<String, String>,
}

impl ResponseCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the output of `command`, running it only on a cache miss.
    ///
    /// Executor errors are propagated and nothing is cached for the command.
    pub async fn fetch<E: CommandExecutor>(&mut self, executor: &mut E, command: &str) -> Result<String> {
        if let Some(output) = self.responses.get(command) {
            debug!("Response cache hit: {}", command);
            return Ok(output.clone());
        }

        debug!("Executing command: {}", command);
        let output = executor.execute(command).await?;
        self.responses.insert(command.to_string(), output.clone());
        Ok(output)
    }

    /// Number of distinct commands cached.
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// Check if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}
