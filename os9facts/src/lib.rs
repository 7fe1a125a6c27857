//! # os9facts
//!
//! Structured fact extraction from Dell Networking OS9 switch CLI output.
//!
//! os9facts turns the text of a handful of `show` commands into a typed,
//! JSON-serializable fact tree: interfaces with their VLAN membership and
//! addresses, static routes, LLDP neighbors and device MAC addresses.
//!
//! ## Features
//!
//! - Interface extraction from `show interfaces`, annotated with the running config
//! - OS9 compact port range expansion (`1/10-1/12,1/23`, `1/1/1-1/1/4`, ...)
//! - Static IPv4/IPv6 route extraction, with canonical IPv6 text
//! - LLDP neighbor extraction from `show lldp neighbors detail`
//! - Subset selection (`default`, `routing`, `lldp`) with per-run command caching
//! - Pluggable command execution through [`CommandExecutor`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use os9facts::{CommandExecutor, GatherOptions, gather};
//!
//! struct Session;
//!
//! impl CommandExecutor for Session {
//!     async fn execute(&mut self, command: &str) -> os9facts::Result<String> {
//!         // Send `command` to the switch and return what it printed
//!         Ok(String::new())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = Session;
//!     let options = GatherOptions::new().gather_subset(["default", "lldp"]);
//!
//!     let facts = gather(&mut session, &options).await?;
//!     let json = facts.namespaced(os9facts::facts::DEFAULT_NAMESPACE)?;
//!     println!("{}", serde_json::to_string_pretty(&json)?);
//!     Ok(())
//! }
//! ```

pub mod driver;
pub mod error;
pub mod facts;
pub mod parse;
pub mod platform;

// Re-export main types for convenience
pub use driver::{CommandExecutor, ResponseCache};
pub use error::{Error, Result};
pub use facts::{FactTree, GatherOptions, Subset, gather};
pub use platform::{PlatformDefinition, PrivilegeLevel};
