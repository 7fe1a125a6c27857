//! LLDP neighbor extraction from `show lldp neighbors detail`.

use std::sync::LazyLock;

use log::trace;
use regex::Regex;

use crate::facts::model::{LldpMap, LldpNeighbor};

/// Line separating neighbor entries.
pub const ENTRY_SEPARATOR: &str =
    "========================================================================";

static LOCAL_PORT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)Local Port ID:[ \t]*(.+)$").expect("static regex must compile"));
static REMOTE_SYSTEM_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)Remote System Name:[ \t]*(.+)$").expect("static regex must compile")
});
static REMOTE_PORT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)Remote Port ID:[ \t]*(.+)$").expect("static regex must compile"));
static REMOTE_CHASSIS_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)Remote Chassis ID:[ \t]*(.+)$").expect("static regex must compile")
});

fn field(re: &Regex, entry: &str) -> Option<String> {
    re.captures(entry)
        .map(|caps| caps[1].trim_end().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse one neighbor entry. Entries without a local port id are dropped.
pub fn parse_entry(entry: &str) -> Option<LldpNeighbor> {
    let Some(local_port_id) = field(&LOCAL_PORT_ID, entry) else {
        if !entry.trim().is_empty() {
            trace!("Dropping LLDP entry without local port id");
        }
        return None;
    };

    Some(LldpNeighbor {
        local_port_id,
        remote_system_name: field(&REMOTE_SYSTEM_NAME, entry),
        remote_port_id: field(&REMOTE_PORT_ID, entry),
        remote_chassis_id: field(&REMOTE_CHASSIS_ID, entry),
    })
}

/// Parse all neighbors, keyed by local port id. A later entry for the same
/// port replaces the earlier one.
pub fn parse_neighbors(output: &str) -> LldpMap {
    let mut neighbors = LldpMap::new();
    for neighbor in output.split(ENTRY_SEPARATOR).filter_map(parse_entry) {
        neighbors.insert(neighbor.local_port_id.clone(), neighbor);
    }
    neighbors
}
