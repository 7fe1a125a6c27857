//! Static route extraction from the running config.
//!
//! Recognized shapes, tried in this order for each address family:
//!
//! ```text
//! ip route 10.0.0.0/8 192.168.1.1
//! ip route vrf lhcone 0.0.0.0/0 192.84.86.238
//! ip route vrf lhcone 10.0.0.0/8 NULL 0
//! ip route vrf lhcone 10.0.0.0/8 Vlan 101 10.1.1.1
//! ```
//!
//! and the same four with `ipv6 route`. The first matching shape wins.
//! A trailing distance, `permanent` or `tag <n>` is accepted and dropped.

use std::sync::LazyLock;

use log::trace;
use regex::Regex;
use serde::Serialize;

use super::normalize_ipv6;
use super::normalize_ipv6_prefix;
use crate::facts::model::RouteRecord;

const V4_ADDR: &str = r"\d{1,3}(?:\.\d{1,3}){3}";
const V4_CIDR: &str = r"\d{1,3}(?:\.\d{1,3}){3}/\d{1,2}";
const V6_ADDR: &str = r"[0-9A-Fa-f]*:[0-9A-Fa-f:]*";
const V6_CIDR: &str = r"[0-9A-Fa-f]*:[0-9A-Fa-f:]*/\d{1,3}";
/// Interface name plus number (`NULL 0`, `Vlan 101`). The name has no digits,
/// so a next hop followed by a distance is never taken for an interface.
const INTERFACE: &str = r"[A-Za-z][A-Za-z\-]* \S+";
/// Trailing distance, `permanent` and `tag <n>` attributes.
const ATTRIBUTES: &str = r"(?: (?:\d+|permanent|tag \d+))*";

/// Which captures a route pattern carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// `<to> <from>`
    NextHop,
    /// `vrf <vrf> <to> <from>`
    VrfNextHop,
    /// `vrf <vrf> <to> <intf>`
    VrfInterface,
    /// `vrf <vrf> <to> <intf> <from>`
    VrfInterfaceNextHop,
}

struct RouteRule {
    pattern: Regex,
    shape: Shape,
}

impl RouteRule {
    fn new(keyword: &str, cidr: &str, addr: &str, shape: Shape) -> Self {
        let body = match shape {
            Shape::NextHop => format!(r"({cidr}) ({addr})"),
            Shape::VrfNextHop => format!(r"vrf (\S+) ({cidr}) ({addr})"),
            Shape::VrfInterface => format!(r"vrf (\S+) ({cidr}) ({INTERFACE})"),
            Shape::VrfInterfaceNextHop => format!(r"vrf (\S+) ({cidr}) ({INTERFACE}) ({addr})"),
        };
        let pattern = Regex::new(&format!(r"^{keyword} {body}{ATTRIBUTES}\s*$"))
            .expect("static regex must compile");
        Self { pattern, shape }
    }

    fn rules(keyword: &str, cidr: &str, addr: &str) -> Vec<Self> {
        [
            Shape::NextHop,
            Shape::VrfNextHop,
            Shape::VrfInterface,
            Shape::VrfInterfaceNextHop,
        ]
        .into_iter()
        .map(|shape| Self::new(keyword, cidr, addr, shape))
        .collect()
    }

    fn parse(&self, line: &str) -> Option<RouteRecord> {
        let caps = self.pattern.captures(line)?;
        let get = |i: usize| caps.get(i).map(|m| m.as_str().to_string());
        let route = match self.shape {
            Shape::NextHop => RouteRecord {
                to: get(1)?,
                from: get(2),
                ..Default::default()
            },
            Shape::VrfNextHop => RouteRecord {
                vrf: get(1),
                to: get(2)?,
                from: get(3),
                ..Default::default()
            },
            Shape::VrfInterface => RouteRecord {
                vrf: get(1),
                to: get(2)?,
                intf: get(3),
                ..Default::default()
            },
            Shape::VrfInterfaceNextHop => RouteRecord {
                vrf: get(1),
                to: get(2)?,
                intf: get(3),
                from: get(4),
            },
        };
        Some(route)
    }
}

static IPV4_RULES: LazyLock<Vec<RouteRule>> =
    LazyLock::new(|| RouteRule::rules("ip route", V4_CIDR, V4_ADDR));

static IPV6_RULES: LazyLock<Vec<RouteRule>> =
    LazyLock::new(|| RouteRule::rules("ipv6 route", V6_CIDR, V6_ADDR));

/// Static routes of both address families, in config order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoutingTable {
    pub ipv4: Vec<RouteRecord>,
    pub ipv6: Vec<RouteRecord>,
}

/// Extract every static route from running-config text.
pub fn parse_routes(config: &str) -> RoutingTable {
    let mut table = RoutingTable::default();

    for line in config.lines().map(str::trim) {
        if line.starts_with("ip route ") {
            match parse_line(&IPV4_RULES, line) {
                Some(route) => table.ipv4.push(route),
                None => trace!("Skipping unrecognized route '{}'", line),
            }
        } else if line.starts_with("ipv6 route ") {
            match parse_line(&IPV6_RULES, line) {
                Some(route) => table.ipv6.push(normalize_v6_route(route)),
                None => trace!("Skipping unrecognized route '{}'", line),
            }
        }
    }
    table
}

fn parse_line(rules: &[RouteRule], line: &str) -> Option<RouteRecord> {
    rules.iter().find_map(|rule| rule.parse(line))
}

fn normalize_v6_route(mut route: RouteRecord) -> RouteRecord {
    route.to = normalize_ipv6_prefix(&route.to);
    route.from = route.from.as_deref().map(normalize_ipv6);
    route
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(vrf: Option<&str>, to: &str, from: Option<&str>, intf: Option<&str>) -> RouteRecord {
        RouteRecord {
            to: to.to_string(),
            from: from.map(str::to_string),
            intf: intf.map(str::to_string),
            vrf: vrf.map(str::to_string),
        }
    }

    #[test]
    fn test_ipv4_shapes() {
        let config = "\
ip route 10.0.0.0/8 192.168.1.1
ip route vrf lhcone 0.0.0.0/0 192.84.86.238
ip route vrf lhcone 10.20.0.0/16 NULL 0
ip route vrf lhcone 10.30.0.0/16 Vlan 101 10.1.1.1
";
        let table = parse_routes(config);
        assert_eq!(
            table.ipv4,
            vec![
                route(None, "10.0.0.0/8", Some("192.168.1.1"), None),
                route(Some("lhcone"), "0.0.0.0/0", Some("192.84.86.238"), None),
                route(Some("lhcone"), "10.20.0.0/16", None, Some("NULL 0")),
                route(Some("lhcone"), "10.30.0.0/16", Some("10.1.1.1"), Some("Vlan 101")),
            ]
        );
        assert!(table.ipv6.is_empty());
    }

    #[test]
    fn test_ipv6_shapes_are_normalized() {
        let config = "\
ipv6 route vrf lhcone ::/0 2605:d9c0:0000:ff02::
ipv6 route vrf lhcone 2605:d9c0:2::/48 NULL 0
ipv6 route 2001:0db8:0000::/48 2001:db8::1
";
        let table = parse_routes(config);
        assert_eq!(
            table.ipv6,
            vec![
                route(Some("lhcone"), "::/0", Some("2605:d9c0:0:ff02::"), None),
                route(Some("lhcone"), "2605:d9c0:2::/48", None, Some("NULL 0")),
                route(None, "2001:db8::/48", Some("2001:db8::1"), None),
            ]
        );
    }

    #[test]
    fn test_leading_zeros_normalize_identically() {
        let short = parse_routes("ipv6 route vrf x 2605:d9c0:2::/48 2605:d9c0:0:ff02::1");
        let long = parse_routes("ipv6 route vrf x 2605:d9c0:0002:0000::/48 2605:d9c0:0000:ff02:0:0:0:1");
        assert_eq!(short, long);
    }

    #[test]
    fn test_trailing_route_attributes() {
        let config = "\
ip route vrf x 10.0.0.0/8 192.168.1.1 254
ip route 10.1.0.0/16 192.168.1.1 permanent
ip route vrf x 10.2.0.0/16 NULL 0 tag 100
ip route vrf x 10.3.0.0/16 Vlan 101 10.1.1.1 5 permanent
ipv6 route vrf x 2001:db8::/32 2001:db8::1 200
";
        let table = parse_routes(config);
        assert_eq!(
            table.ipv4,
            vec![
                route(Some("x"), "10.0.0.0/8", Some("192.168.1.1"), None),
                route(None, "10.1.0.0/16", Some("192.168.1.1"), None),
                route(Some("x"), "10.2.0.0/16", None, Some("NULL 0")),
                route(Some("x"), "10.3.0.0/16", Some("10.1.1.1"), Some("Vlan 101")),
            ]
        );
        assert_eq!(
            table.ipv6,
            vec![route(Some("x"), "2001:db8::/32", Some("2001:db8::1"), None)]
        );
    }

    #[test]
    fn test_unrecognized_lines_are_ignored() {
        let config = "\
ip route vrf lhcone
ip route 10.0.0.0 255.0.0.0 192.168.1.1
ip routing
ipv6 route bogus
interface Vlan 1
";
        assert_eq!(parse_routes(config), RoutingTable::default());
    }
}
