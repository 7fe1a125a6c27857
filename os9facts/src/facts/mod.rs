//! Fact gathering.
//!
//! A gathering pass resolves the requested subsets, pulls the output of each
//! subset's commands through a [`CommandExecutor`], and runs the parsers over
//! it. Each subset fills its own part of the [`FactTree`]; the commands they
//! share are only run once per pass.
//!
//! ```rust,no_run
//! use os9facts::driver::CommandExecutor;
//! use os9facts::facts::{GatherOptions, gather};
//!
//! # async fn example(executor: &mut impl CommandExecutor) -> Result<(), os9facts::Error> {
//! let options = GatherOptions::new().gather_subset(["routing"]);
//! let facts = gather(executor, &options).await?;
//! for route in facts.ipv4.unwrap_or_default() {
//!     println!("{} via {:?}", route.to, route.from);
//! }
//! # Ok(())
//! # }
//! ```

pub mod model;
mod subset;

pub use model::{
    DeviceInfo, InterfaceMap, InterfaceRecord, IpAddress, LldpMap, LldpNeighbor, RouteRecord,
};
pub use subset::{Subset, resolve_subsets};

use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::driver::{CommandExecutor, ResponseCache};
use crate::error::{Result, TransportError};
use crate::parse::{fields, lldp, routes, running_config, segment, system};
use crate::platform::{PlatformDefinition, dellos9};

/// Prefix the automation layer puts in front of every top-level fact key.
pub const DEFAULT_NAMESPACE: &str = "ansible_net_";

/// Options for a gathering pass.
#[derive(Debug, Clone)]
pub struct GatherOptions {
    gather_subset: Vec<String>,
    include_config: bool,
    platform: PlatformDefinition,
}

impl GatherOptions {
    /// All subsets, raw config included, Dell OS9 platform.
    pub fn new() -> Self {
        Self {
            gather_subset: vec!["all".to_string()],
            include_config: true,
            platform: dellos9::platform(),
        }
    }

    /// Set the subset selection (`default`, `routing`, `lldp`, `all`, `!name`).
    pub fn gather_subset<I, S>(mut self, subsets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gather_subset = subsets.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the raw running config is returned under `config`.
    pub fn include_config(mut self, include: bool) -> Self {
        self.include_config = include;
        self
    }

    /// Use a different platform definition for output cleanup and error detection.
    pub fn platform(mut self, platform: PlatformDefinition) -> Self {
        self.platform = platform;
        self
    }
}

impl Default for GatherOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything gathered in one pass, keyed the way the automation layer expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FactTree {
    /// Names of the subsets that were gathered.
    pub gather_subset: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<DeviceInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interfaces: Option<InterfaceMap>,

    /// Raw running config.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<Vec<RouteRecord>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<Vec<RouteRecord>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lldp: Option<LldpMap>,
}

impl FactTree {
    /// JSON object with every top-level key prefixed by `namespace`.
    pub fn namespaced(&self, namespace: &str) -> serde_json::Result<Map<String, Value>> {
        let Value::Object(facts) = serde_json::to_value(self)? else {
            return Ok(Map::new());
        };
        Ok(facts
            .into_iter()
            .map(|(key, value)| (format!("{}{}", namespace, key), value))
            .collect())
    }
}

/// Run a gathering pass.
///
/// Subset selection is validated before any command is sent. A failing
/// command aborts the whole pass with its transport error.
pub async fn gather<E: CommandExecutor>(executor: &mut E, options: &GatherOptions) -> Result<FactTree> {
    let subsets = resolve_subsets(&options.gather_subset)?;
    let mut cache = ResponseCache::new();
    let mut tree = FactTree {
        gather_subset: subsets.iter().map(|s| s.name().to_string()).collect(),
        ..Default::default()
    };
    tree.gather_subset.sort_unstable();

    for subset in subsets {
        debug!("Gathering {} facts", subset);
        let mut outputs = Vec::with_capacity(subset.commands().len());
        for command in subset.commands() {
            outputs.push(fetch(executor, &mut cache, &options.platform, command).await?);
        }

        match subset {
            Subset::Default => populate_default(&mut tree, &outputs, options.include_config),
            Subset::Routing => populate_routing(&mut tree, &outputs),
            Subset::Lldp => populate_lldp(&mut tree, &outputs),
        }
    }

    debug!("Gathered {} subsets, {} distinct commands", tree.gather_subset.len(), cache.len());
    Ok(tree)
}

/// Fetch one command's output, cleaned up and checked for device errors.
async fn fetch<E: CommandExecutor>(
    executor: &mut E,
    cache: &mut ResponseCache,
    platform: &PlatformDefinition,
    command: &str,
) -> Result<String> {
    let raw = cache.fetch(executor, command).await?;
    let output = platform.normalize_output(&raw, command);
    if let Some(message) = platform.detect_failure(&output) {
        return Err(TransportError::CommandFailed {
            command: command.to_string(),
            message,
        }
        .into());
    }
    Ok(output)
}

/// Interfaces from `show interfaces` and the running config, device info
/// from `show system`.
fn populate_default(tree: &mut FactTree, outputs: &[String], include_config: bool) {
    let [interfaces_out, config_out, system_out] = outputs else {
        return;
    };

    let mut interfaces: InterfaceMap = segment::segment_interfaces(interfaces_out)
        .into_iter()
        .map(|(name, block)| {
            let record = fields::extract_interface(&block);
            (name, record)
        })
        .collect();
    running_config::annotate(config_out, &mut interfaces);
    debug!("Parsed {} interfaces", interfaces.len());

    tree.info = Some(system::parse_device_info(system_out, &interfaces));
    tree.interfaces = Some(interfaces);
    if include_config {
        tree.config = Some(config_out.clone());
    }
}

fn populate_routing(tree: &mut FactTree, outputs: &[String]) {
    let [config_out] = outputs else {
        return;
    };
    let table = routes::parse_routes(config_out);
    debug!("Parsed {} IPv4 and {} IPv6 routes", table.ipv4.len(), table.ipv6.len());
    tree.ipv4 = Some(table.ipv4);
    tree.ipv6 = Some(table.ipv6);
}

fn populate_lldp(tree: &mut FactTree, outputs: &[String]) {
    let [lldp_out] = outputs else {
        return;
    };
    let neighbors = lldp::parse_neighbors(lldp_out);
    debug!("Parsed {} LLDP neighbors", neighbors.len());
    tree.lldp = Some(neighbors);
}
