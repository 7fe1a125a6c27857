//! Command execution seam.
//!
//! os9facts never opens a session itself. A session layer (an SSH driver,
//! a console server, recorded fixtures) implements [`CommandExecutor`] and
//! the gathering pass pulls raw command output through it.

mod cache;

pub use cache::ResponseCache;

use std::future::Future;

use crate::error::Result;

/// Trait for anything that can run a CLI command on the device.
pub trait CommandExecutor: Send {
    /// Run a command and return its raw output text.
    ///
    /// Failures must be reported as [`TransportError`](crate::error::TransportError)s;
    /// the gathering pass propagates them unchanged.
    fn execute(&mut self, command: &str) -> impl Future<Output = Result<String>> + Send;
}
