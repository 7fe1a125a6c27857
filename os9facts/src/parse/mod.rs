//! Text-to-fact extraction for Dell OS9 command output.
//!
//! Every parser here is best-effort: lines, blocks and range expressions
//! that match no known grammar are skipped, never reported as errors.

pub mod fields;
pub mod lldp;
pub mod ports;
pub mod routes;
pub mod running_config;
pub mod segment;
pub mod system;

use std::net::Ipv6Addr;

/// Canonical (RFC 5952) text form of an IPv6 address.
///
/// Input that does not parse as an IPv6 address is returned unchanged.
pub fn normalize_ipv6(address: &str) -> String {
    address
        .parse::<Ipv6Addr>()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| address.to_string())
}

/// Canonical form of an IPv6 prefix in `address/len` notation.
pub fn normalize_ipv6_prefix(prefix: &str) -> String {
    match prefix.split_once('/') {
        Some((address, len)) => format!("{}/{}", normalize_ipv6(address), len),
        None => normalize_ipv6(prefix),
    }
}

/// Split `address/len` into its parts. The length must be 0..=128.
pub(crate) fn parse_prefix(value: &str) -> Option<(&str, u8)> {
    let (address, len) = value.split_once('/')?;
    let len: u8 = len.parse().ok()?;
    (len <= 128 && !address.is_empty()).then_some((address, len))
}
