//! Per-interface field extractors.
//!
//! Each extractor scans one interface block from `show interfaces` and
//! returns the field value if the block carries it. Extractors are
//! independent of each other; [`FieldKind::ALL`] is the registry the
//! gathering pass walks for every block.

use std::sync::LazyLock;

use regex::Regex;

use super::segment::HEADER;
use super::{normalize_ipv6, parse_prefix};
use crate::facts::model::{IpAddress, InterfaceRecord};

macro_rules! static_regex {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($re).expect("static regex must compile"));
    };
}

static_regex!(DESCRIPTION, r"(?m)Description: (.+)$");
static_regex!(MAC_ADDRESS, r"address is ([^\s,]+)");
static_regex!(MTU, r"MTU (\d+)");
static_regex!(LINE_SPEED, r"LineSpeed (\d+)");
static_regex!(DUPLEX, r"(\w+) duplex");
static_regex!(MEDIA_PRESENT, r"(?m)^.+ media present, .+$");
static_regex!(MEDIA_TYPE, r"type is (.+)$");
static_regex!(HARDWARE, r"Hardware is ([^,\n]+),");
static_regex!(LINE_PROTOCOL, r"line protocol is (\w+(?: \w+)?)");
static_regex!(OPER_STATUS, r"(?m)^.+? is ([^,\n]+),");
static_regex!(MEMBERS, r"(?m)^Members in this channel: +([a-zA-Z0-9 /()]+)$");
static_regex!(IPV4_STATUS, r"Internet address is (\S+)");
static_regex!(IPV4_CONFIG, r"(?m)^\s*ip address (\S+)");
static_regex!(IPV6_STATUS, r"Global IPv6 address: (\S+)");
static_regex!(IPV6_CONFIG, r"(?m)^\s*ipv6 address (\S+)");

/// Short media prefixes used in `Members in this channel:` lines.
const MEMBER_MEDIA: &[(&str, &str)] = &[
    ("Hu", "hundredGigE"),
    ("Fo", "fortyGigE"),
    ("Te", "TenGigabitEthernet"),
];

/// Interface fields extracted from `show interfaces` blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Description,
    MacAddress,
    Ipv4,
    Ipv6,
    Mtu,
    Bandwidth,
    MediaType,
    Duplex,
    LineProtocol,
    OperStatus,
    HardwareType,
    ChannelMembers,
}

impl FieldKind {
    /// Every extractor, in the order they are applied.
    pub const ALL: [FieldKind; 12] = [
        FieldKind::Description,
        FieldKind::MacAddress,
        FieldKind::Ipv4,
        FieldKind::Ipv6,
        FieldKind::Mtu,
        FieldKind::Bandwidth,
        FieldKind::MediaType,
        FieldKind::Duplex,
        FieldKind::LineProtocol,
        FieldKind::OperStatus,
        FieldKind::HardwareType,
        FieldKind::ChannelMembers,
    ];

    /// Output key of this field.
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Description => "description",
            FieldKind::MacAddress => "macaddress",
            FieldKind::Ipv4 => "ipv4",
            FieldKind::Ipv6 => "ipv6",
            FieldKind::Mtu => "mtu",
            FieldKind::Bandwidth => "bandwidth",
            FieldKind::MediaType => "mediatype",
            FieldKind::Duplex => "duplex",
            FieldKind::LineProtocol => "lineprotocol",
            FieldKind::OperStatus => "operstatus",
            FieldKind::HardwareType => "type",
            FieldKind::ChannelMembers => "channel-member",
        }
    }

    /// Run this extractor over `block`, storing a found value in `record`.
    ///
    /// Fields the block does not carry leave `record` untouched.
    pub fn apply(self, block: &str, record: &mut InterfaceRecord) {
        match self {
            FieldKind::Description => set(&mut record.description, parse_description(block)),
            FieldKind::MacAddress => set(&mut record.macaddress, parse_macaddress(block)),
            FieldKind::Ipv4 => set_list(&mut record.ipv4, parse_ipv4(block)),
            FieldKind::Ipv6 => set_list(&mut record.ipv6, parse_ipv6(block)),
            FieldKind::Mtu => set(&mut record.mtu, parse_mtu(block)),
            FieldKind::Bandwidth => set(&mut record.bandwidth, parse_bandwidth(block)),
            FieldKind::MediaType => set(&mut record.mediatype, parse_mediatype(block)),
            FieldKind::Duplex => set(&mut record.duplex, parse_duplex(block)),
            FieldKind::LineProtocol => set(&mut record.lineprotocol, parse_lineprotocol(block)),
            FieldKind::OperStatus => set(&mut record.operstatus, parse_operstatus(block)),
            FieldKind::HardwareType => set(&mut record.hardware_type, parse_type(block)),
            FieldKind::ChannelMembers => {
                set_list(&mut record.channel_members, Some(parse_members(block)))
            }
        }
    }
}

/// Build an interface record by running every extractor over `block`.
pub fn extract_interface(block: &str) -> InterfaceRecord {
    let mut record = InterfaceRecord::default();
    for kind in FieldKind::ALL {
        kind.apply(block, &mut record);
    }
    record
}

fn set<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

fn set_list<T>(slot: &mut Vec<T>, value: Option<Vec<T>>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        *slot = value;
    }
}

fn first_capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end())
}

pub fn parse_description(block: &str) -> Option<String> {
    first_capture(&DESCRIPTION, block)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// `"not"` (as in `address is not set`) means no address.
pub fn parse_macaddress(block: &str) -> Option<String> {
    first_capture(&MAC_ADDRESS, block)
        .filter(|mac| *mac != "not")
        .map(str::to_string)
}

pub fn parse_mtu(block: &str) -> Option<u32> {
    first_capture(&MTU, block).and_then(|v| v.parse().ok())
}

pub fn parse_bandwidth(block: &str) -> Option<u64> {
    first_capture(&LINE_SPEED, block).and_then(|v| v.parse().ok())
}

pub fn parse_duplex(block: &str) -> Option<String> {
    first_capture(&DUPLEX, block).map(str::to_string)
}

/// Only lines announcing `media present` carry a media type.
pub fn parse_mediatype(block: &str) -> Option<String> {
    let media = MEDIA_PRESENT.find(block)?;
    first_capture(&MEDIA_TYPE, media.as_str()).map(str::to_string)
}

pub fn parse_type(block: &str) -> Option<String> {
    first_capture(&HARDWARE, block).map(str::to_string)
}

/// Status word plus an optional second word, stopping at any parenthesis.
pub fn parse_lineprotocol(block: &str) -> Option<String> {
    first_capture(&LINE_PROTOCOL, block).map(str::to_string)
}

/// Operational status from the interface header line.
pub fn parse_operstatus(block: &str) -> Option<String> {
    block
        .lines()
        .find_map(|line| HEADER.captures(line))
        .map(|caps| caps[2].to_string())
        .or_else(|| first_capture(&OPER_STATUS, block).map(str::to_string))
}

/// Port-channel members, e.g. `Members in this channel:  Hu 1/17(U) Hu 1/19(U)`.
///
/// Annotations in parentheses are stripped; members with an unknown media
/// prefix are dropped.
pub fn parse_members(block: &str) -> Vec<String> {
    if !block.starts_with("Port-channel") {
        return Vec::new();
    }
    let Some(members) = first_capture(&MEMBERS, block) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut tokens = members.split_whitespace();
    while let Some(token) = tokens.next() {
        let Some(&(_, media)) = MEMBER_MEDIA.iter().find(|(short, _)| *short == token) else {
            continue;
        };
        if let Some(port) = tokens.next() {
            let port = port.split('(').next().unwrap_or(port);
            out.push(format!("{} {}", media, port));
        }
    }
    out
}

/// IPv4 address from interface status (`Internet address is A/B`) or
/// configuration (`ip address A/B`) text.
pub fn parse_ipv4(block: &str) -> Option<Vec<IpAddress>> {
    let value = first_capture(&IPV4_STATUS, block).or_else(|| first_capture(&IPV4_CONFIG, block))?;
    address_list(value, false)
}

/// IPv6 address from interface status (`Global IPv6 address: A/B`) or
/// configuration (`ipv6 address A/B`) text.
pub fn parse_ipv6(block: &str) -> Option<Vec<IpAddress>> {
    let value = first_capture(&IPV6_STATUS, block).or_else(|| first_capture(&IPV6_CONFIG, block))?;
    address_list(value, true)
}

fn address_list(value: &str, ipv6: bool) -> Option<Vec<IpAddress>> {
    if value == "not" {
        return None;
    }
    let (address, masklen) = parse_prefix(value)?;
    let address = if ipv6 { normalize_ipv6(address) } else { address.to_string() };
    Some(vec![IpAddress::new(address, masklen)])
}
