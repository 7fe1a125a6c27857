//! Fact record types.
//!
//! Records serialize to plain JSON-compatible structures (strings, integers,
//! lists and maps) with the key names the automation layer expects. Absent
//! fields and empty lists are left out.

use indexmap::IndexMap;
use serde::Serialize;

/// An address with its prefix length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpAddress {
    pub address: String,
    pub masklen: u8,
}

impl IpAddress {
    pub fn new(address: impl Into<String>, masklen: u8) -> Self {
        Self {
            address: address.into(),
            masklen,
        }
    }
}

/// Facts about one interface, built from `show interfaces` and the running config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterfaceRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub macaddress: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtu: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mediatype: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplex: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lineprotocol: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operstatus: Option<String>,

    /// Hardware type, e.g. `DellEMCEth`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub hardware_type: Option<String>,

    /// Port-channel members as `"<media> <port>"`.
    #[serde(rename = "channel-member", skip_serializing_if = "Vec::is_empty")]
    pub channel_members: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tagged: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub untagged: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub portmode: Option<String>,

    /// `"yes"` when the interface is configured as a layer 2 switchport.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switchport: Option<String>,

    #[serde(rename = "spanning-tree", skip_serializing_if = "Option::is_none")]
    pub spanning_tree: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_vrf: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ipv4: Vec<IpAddress>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ipv6: Vec<IpAddress>,
}

/// A statically configured route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteRecord {
    /// Destination prefix in CIDR notation.
    pub to: String,

    /// Next-hop address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// Outgoing interface, e.g. `NULL 0` for null routes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intf: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vrf: Option<String>,
}

/// One LLDP neighbor, keyed by the local port it was seen on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LldpNeighbor {
    pub local_port_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_system_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_port_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_chassis_id: Option<String>,
}

/// Device-wide facts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// MAC addresses owned by the device, stack MAC first.
    pub macs: Vec<String>,
}

/// Interface records keyed by interface name, in device output order.
pub type InterfaceMap = IndexMap<String, InterfaceRecord>;

/// LLDP neighbors keyed by local port id.
pub type LldpMap = IndexMap<String, LldpNeighbor>;

/// Append `items` to `list`, skipping entries already present.
pub(crate) fn push_unique<T: PartialEq>(list: &mut Vec<T>, items: impl IntoIterator<Item = T>) {
    for item in items {
        if !list.contains(&item) {
            list.push(item);
        }
    }
}
