//! Device-wide facts from `show system`.

use std::sync::LazyLock;

use regex::Regex;

use crate::facts::model::{DeviceInfo, InterfaceMap, push_unique};

static STACK_MAC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Stack MAC\s*:\s*(\S+)").expect("static regex must compile"));

static BURNED_IN_MAC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Burned In MAC\s*:\s*(\S+)").expect("static regex must compile")
});

/// Stack MAC from `show system` output.
pub fn parse_stack_mac(output: &str) -> Option<String> {
    STACK_MAC.captures(output).map(|caps| caps[1].to_string())
}

/// Collect the device MAC addresses.
///
/// The stack MAC comes first, then per-unit burned-in MACs, then interface
/// MACs in interface order. Each address appears once.
pub fn parse_device_info(output: &str, interfaces: &InterfaceMap) -> DeviceInfo {
    let mut macs = Vec::new();
    push_unique(&mut macs, parse_stack_mac(output));
    push_unique(
        &mut macs,
        BURNED_IN_MAC.captures_iter(output).map(|caps| caps[1].to_string()),
    );
    push_unique(
        &mut macs,
        interfaces.values().filter_map(|record| record.macaddress.clone()),
    );
    DeviceInfo { macs }
}
