//! Running-config annotation of interface records.
//!
//! `show running-config` lists each interface as a block:
//!
//! ```text
//! interface Vlan 101
//!  description Kubernetes Multus
//!  ipv6 address 2605:d9c0:2:fff1::1/64
//!  tagged hundredGigE 1/10-1/12,1/23
//!  tagged Port-channel 102
//!  no shutdown
//! !
//! ```
//!
//! [`annotate`] walks those blocks and adds VLAN membership, port mode,
//! spanning-tree, VRF and configured addresses to interfaces already known
//! from `show interfaces`.

use log::trace;

use super::fields::{parse_ipv4, parse_ipv6};
use super::ports;
use crate::facts::model::{InterfaceMap, InterfaceRecord, push_unique};

/// Where the scanner currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Outside,
    Inside(String),
}

/// Membership kind of a port list line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Tagged,
    Untagged,
    ChannelMember,
}

impl MemberKind {
    fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "tagged" => Some(MemberKind::Tagged),
            "untagged" => Some(MemberKind::Untagged),
            "channel-member" => Some(MemberKind::ChannelMember),
            _ => None,
        }
    }
}

/// Parse a `tagged <media> <ranges>` style line into expanded members.
///
/// Returns `None` if the line is not a membership line or its port list
/// expands to nothing.
pub fn parse_member_line(line: &str) -> Option<(MemberKind, Vec<String>)> {
    let mut words = line.split_whitespace();
    let kind = MemberKind::from_keyword(words.next()?)?;
    let (Some(media), Some(ranges)) = (words.next(), words.next()) else {
        trace!("Skipping incomplete member line '{}'", line);
        return None;
    };

    let members = ports::expand(media, ranges);
    (!members.is_empty()).then_some((kind, members))
}

/// Merge running-config interface settings into `interfaces`.
///
/// Blocks for interfaces missing from `interfaces` are skipped. List fields
/// never receive the same entry twice; scalar fields keep the last value seen.
pub fn annotate(config: &str, interfaces: &mut InterfaceMap) {
    let mut state = State::Outside;

    for line in config.lines() {
        let line = line.trim();
        if line == "!" {
            state = State::Outside;
        } else if let Some(name) = line.strip_prefix("interface ") {
            state = State::Inside(name.trim().to_string());
        } else if let State::Inside(key) = &state {
            if let Some(record) = interfaces.get_mut(key) {
                apply_line(line, record);
            }
        }
    }
}

fn apply_line(line: &str, record: &mut InterfaceRecord) {
    if let Some((kind, members)) = parse_member_line(line) {
        let list = match kind {
            MemberKind::Tagged => &mut record.tagged,
            MemberKind::Untagged => &mut record.untagged,
            MemberKind::ChannelMember => &mut record.channel_members,
        };
        push_unique(list, members);
    } else if let Some(mode) = line.strip_prefix("portmode ") {
        record.portmode = Some(mode.trim().to_string());
    } else if line == "switchport" {
        record.switchport = Some("yes".to_string());
    } else if line.starts_with("no spanning-tree") {
        record.spanning_tree = Some("no".to_string());
    } else if let Some(setting) = line.strip_prefix("spanning-tree ") {
        record.spanning_tree = Some(setting.trim().to_string());
    } else if let Some(vrf) = line.strip_prefix("ip vrf ") {
        record.ip_vrf = Some(vrf.trim().to_string());
    } else if line.starts_with("ip address ") {
        push_unique(&mut record.ipv4, parse_ipv4(line).unwrap_or_default());
    } else if line.starts_with("ipv6 address ") {
        push_unique(&mut record.ipv6, parse_ipv6(line).unwrap_or_default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::model::IpAddress;

    const CONFIG: &str = "\
!
interface hundredGigE 1/10
 no ip address
 mtu 9416
 portmode hybrid
 switchport
 spanning-tree rstp edge-port
 no shutdown
!
interface Port-channel 104
 description PortChannel to Arista-R02
 no ip address
 mtu 9416
 channel-member hundredGigE 1/17,1/19
 portmode hybrid
 switchport
 no spanning-tree
 no shutdown
!
interface Vlan 101
 description Kubernetes Multus
 ip vrf forwarding lhcone
 ip address 10.10.0.1/24
 ipv6 address 2605:d9c0:2:fff1::1/64
 tagged fortyGigE 1/29
 tagged hundredGigE 1/10-1/12,1/23,1/25,1/27
 tagged Port-channel 102
 untagged hundredGigE 1/5
 no shutdown
!
interface Vlan 999
 tagged hundredGigE 1/1
!
tagged hundredGigE 1/2
end
";

    fn known(names: &[&str]) -> InterfaceMap {
        names
            .iter()
            .map(|name| (name.to_string(), InterfaceRecord::default()))
            .collect()
    }

    #[test]
    fn test_parse_member_line() {
        let (kind, members) = parse_member_line("tagged TenGigabitEthernet 1/10-1/12").unwrap();
        assert_eq!(kind, MemberKind::Tagged);
        assert_eq!(
            members,
            vec![
                "TenGigabitEthernet 1/10",
                "TenGigabitEthernet 1/11",
                "TenGigabitEthernet 1/12",
            ]
        );
        assert!(parse_member_line("tagged hundredGigE").is_none());
        assert!(parse_member_line("tagged hundredGigE bogus").is_none());
        assert!(parse_member_line("description tagged ports").is_none());
    }

    #[test]
    fn test_vlan_membership() {
        let mut interfaces = known(&["Vlan 101", "hundredGigE 1/10", "Port-channel 104"]);
        annotate(CONFIG, &mut interfaces);

        let vlan = &interfaces["Vlan 101"];
        assert_eq!(
            vlan.tagged,
            vec![
                "fortyGigE 1/29",
                "hundredGigE 1/10",
                "hundredGigE 1/11",
                "hundredGigE 1/12",
                "hundredGigE 1/23",
                "hundredGigE 1/25",
                "hundredGigE 1/27",
                "Port-channel 102",
            ]
        );
        assert_eq!(vlan.untagged, vec!["hundredGigE 1/5"]);
        assert_eq!(vlan.ip_vrf.as_deref(), Some("forwarding lhcone"));
        assert_eq!(vlan.ipv4, vec![IpAddress::new("10.10.0.1", 24)]);
        assert_eq!(vlan.ipv6, vec![IpAddress::new("2605:d9c0:2:fff1::1", 64)]);
    }

    #[test]
    fn test_port_settings() {
        let mut interfaces = known(&["hundredGigE 1/10", "Port-channel 104"]);
        annotate(CONFIG, &mut interfaces);

        let port = &interfaces["hundredGigE 1/10"];
        assert_eq!(port.portmode.as_deref(), Some("hybrid"));
        assert_eq!(port.switchport.as_deref(), Some("yes"));
        assert_eq!(port.spanning_tree.as_deref(), Some("rstp edge-port"));
        assert!(port.ipv4.is_empty());

        let lag = &interfaces["Port-channel 104"];
        assert_eq!(lag.spanning_tree.as_deref(), Some("no"));
        assert_eq!(lag.channel_members, vec!["hundredGigE 1/17", "hundredGigE 1/19"]);
    }

    #[test]
    fn test_unknown_interfaces_and_stray_lines_are_ignored() {
        let mut interfaces = known(&["hundredGigE 1/1", "hundredGigE 1/2"]);
        annotate(CONFIG, &mut interfaces);

        assert!(!interfaces.contains_key("Vlan 999"));
        assert_eq!(interfaces["hundredGigE 1/1"], InterfaceRecord::default());
        assert_eq!(interfaces["hundredGigE 1/2"], InterfaceRecord::default());
    }

    #[test]
    fn test_annotate_twice_does_not_duplicate() {
        let mut interfaces = known(&["Vlan 101"]);
        annotate(CONFIG, &mut interfaces);
        let once = interfaces.clone();
        annotate(CONFIG, &mut interfaces);
        assert_eq!(interfaces, once);
    }
}
