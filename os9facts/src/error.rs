//! Error types for os9facts.
//!
//! Only transport problems and bad subset selections are errors. Output that
//! matches no known grammar is skipped by the parsers and never surfaces here.

use std::io;
use thiserror::Error;

/// Main error type for os9facts operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Command execution errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Fact subset selection errors
    #[error("Subset error: {0}")]
    Subset(#[from] SubsetError),
}

/// Errors raised while retrieving command output from the device.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The command could not be run, or the device rejected it
    #[error("Command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    /// Connection was closed unexpectedly
    #[error("Connection disconnected")]
    Disconnected,

    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while resolving the requested fact subsets.
#[derive(Error, Debug)]
pub enum SubsetError {
    /// Requested subset is not in the registry
    #[error("Bad subset '{name}', valid subsets are: {valid}")]
    Unknown { name: String, valid: String },
}

/// Result type alias using os9facts' Error.
pub type Result<T> = std::result::Result<T, Error>;
