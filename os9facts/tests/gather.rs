//! End-to-end gathering against saved Dell OS9 command output.

use std::path::PathBuf;

use os9facts::error::{Error, SubsetError, TransportError};
use os9facts::facts::{DEFAULT_NAMESPACE, IpAddress, RouteRecord};
use os9facts::{CommandExecutor, FactTree, GatherOptions, gather};
use pretty_assertions::assert_eq;
use serde_json::json;

/// Answers commands from `tests/fixtures`, recording every call.
struct FixtureExecutor {
    dir: PathBuf,
    calls: Vec<String>,
    fail_on: Option<&'static str>,
}

impl FixtureExecutor {
    fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"),
            calls: Vec::new(),
            fail_on: None,
        }
    }

    fn failing_on(command: &'static str) -> Self {
        Self {
            fail_on: Some(command),
            ..Self::new()
        }
    }
}

impl CommandExecutor for FixtureExecutor {
    async fn execute(&mut self, command: &str) -> os9facts::Result<String> {
        self.calls.push(command.to_string());
        if self.fail_on == Some(command) {
            return Err(TransportError::Disconnected.into());
        }
        let name = command.replace(' ', "_").replace('/', "7");
        let output = tokio::fs::read_to_string(self.dir.join(name))
            .await
            .map_err(TransportError::from)?;
        Ok(output)
    }
}

async fn gather_subset(subsets: &[&str]) -> FactTree {
    let mut executor = FixtureExecutor::new();
    let options = GatherOptions::new().gather_subset(subsets.iter().copied());
    gather(&mut executor, &options).await.unwrap()
}

#[tokio::test]
async fn test_default_subset_interfaces() {
    let facts = gather_subset(&["default"]).await;
    let json = facts.namespaced(DEFAULT_NAMESPACE).unwrap();
    let interfaces = &json["ansible_net_interfaces"];

    assert_eq!(
        interfaces["Port-channel 104"],
        json!({
            "description": "PortChannel to Arista-R02",
            "macaddress": "4c:76:25:e8:44:c2",
            "mtu": 9416,
            "bandwidth": 200000,
            "lineprotocol": "up",
            "operstatus": "up",
            "channel-member": ["hundredGigE 1/17", "hundredGigE 1/19"],
            "portmode": "hybrid",
            "switchport": "yes",
            "spanning-tree": "no",
        })
    );

    let te = &interfaces["TenGigabitEthernet 1/33"];
    assert_eq!(te["bandwidth"], 10000);
    assert_eq!(te["mediatype"], "10GBASE-SR");
    assert_eq!(te["type"], "DellEMCEth");
    assert_eq!(te["mtu"], 9416);
    assert_eq!(te["duplex"], "full");
    assert_eq!(te["spanning-tree"], "rstp edge-port");

    let vlan = &interfaces["Vlan 101"];
    assert_eq!(vlan["bandwidth"], 40000);
    assert_eq!(
        vlan["description"],
        "Kubernetes Multus for SENSE-Rucio XRootD fff1 IPv6 Range"
    );
    assert_eq!(vlan["ipv6"], json!([{"address": "2605:d9c0:2:fff1::1", "masklen": 64}]));
    assert_eq!(vlan["ip_vrf"], "forwarding lhcone");
    assert_eq!(
        vlan["tagged"],
        json!([
            "fortyGigE 1/29",
            "hundredGigE 1/10",
            "hundredGigE 1/11",
            "hundredGigE 1/12",
            "hundredGigE 1/23",
            "hundredGigE 1/25",
            "hundredGigE 1/27",
            "Port-channel 102",
        ])
    );

    // Configured only, never seen in show interfaces
    assert!(interfaces.get("Vlan 3611").is_none());

    assert_eq!(
        interfaces.as_object().unwrap().keys().collect::<Vec<_>>(),
        vec![
            "TenGigabitEthernet 1/33",
            "TenGigabitEthernet 1/34",
            "fortyGigE 1/29",
            "hundredGigE 1/10",
            "hundredGigE 1/11",
            "hundredGigE 1/17",
            "hundredGigE 1/19",
            "ManagementEthernet 1/1",
            "Port-channel 102",
            "Port-channel 104",
            "Vlan 1",
            "Vlan 101",
        ]
    );
}

#[tokio::test]
async fn test_default_subset_device_info_and_config() {
    let facts = gather_subset(&["default"]).await;

    assert_eq!(facts.gather_subset, vec!["default"]);
    assert_eq!(
        facts.info.unwrap().macs,
        vec!["4c:76:25:e8:44:c0", "4c:76:25:e8:44:c2"]
    );

    let management = &facts.interfaces.as_ref().unwrap()["ManagementEthernet 1/1"];
    assert_eq!(management.ipv4, vec![IpAddress::new("198.32.43.15", 24)]);

    let config = facts.config.unwrap();
    assert!(config.starts_with("Current Configuration ..."));
    assert!(config.ends_with("end"));
    assert!(facts.ipv4.is_none());
    assert!(facts.lldp.is_none());
}

#[tokio::test]
async fn test_routing_subset() {
    let facts = gather_subset(&["routing"]).await;
    let json = facts.namespaced(DEFAULT_NAMESPACE).unwrap();

    assert_eq!(
        json["ansible_net_ipv4"],
        json!([{"to": "0.0.0.0/0", "from": "192.84.86.238", "vrf": "lhcone"}])
    );
    assert_eq!(
        json["ansible_net_ipv6"],
        json!([
            {"to": "::/0", "from": "2605:d9c0:0:ff02::", "vrf": "lhcone"},
            {"to": "2605:d9c0:2::/48", "intf": "NULL 0", "vrf": "lhcone"},
        ])
    );
    assert_eq!(
        json["ansible_net_gather_subset"],
        json!(["default", "routing"])
    );
}

#[tokio::test]
async fn test_routing_without_from_has_no_from_key() {
    let facts = gather_subset(&["routing"]).await;
    let ipv6 = facts.ipv6.unwrap();
    let null_route = &ipv6[1];

    assert_eq!(
        *null_route,
        RouteRecord {
            to: "2605:d9c0:2::/48".to_string(),
            from: None,
            intf: Some("NULL 0".to_string()),
            vrf: Some("lhcone".to_string()),
        }
    );
    let json = serde_json::to_value(null_route).unwrap();
    assert!(json.get("from").is_none());
}

#[tokio::test]
async fn test_lldp_subset() {
    let facts = gather_subset(&["lldp"]).await;
    let json = facts.namespaced(DEFAULT_NAMESPACE).unwrap();
    let lldp = &json["ansible_net_lldp"];

    assert_eq!(
        lldp.as_object().unwrap().keys().collect::<Vec<_>>(),
        vec![
            "ManagementEthernet 1/1",
            "TenGigabitEthernet 1/33",
            "TenGigabitEthernet 1/34",
            "fortyGigE 1/26/1",
        ]
    );
    assert_eq!(
        lldp["ManagementEthernet 1/1"],
        json!({
            "local_port_id": "ManagementEthernet 1/1",
            "remote_system_name": "LRT-R02-DELL-S60",
            "remote_port_id": "GigabitEthernet 0/33",
            "remote_chassis_id": "00:01:e8:96:1c:19",
        })
    );
    assert_eq!(lldp["TenGigabitEthernet 1/34"]["remote_chassis_id"], "00:01:e8:96:13:4f");
    assert_eq!(lldp["TenGigabitEthernet 1/34"]["remote_system_name"], "LRT-R01-DELL-S60");
    assert_eq!(lldp["fortyGigE 1/26/1"]["remote_port_id"], "fortyGigE 0/48");
    assert_eq!(
        lldp["fortyGigE 1/26/1"]["remote_system_name"],
        "lrt-sdn-r02-dell-s4810"
    );
}

#[tokio::test]
async fn test_all_subsets_fetch_running_config_once() {
    let mut executor = FixtureExecutor::new();
    let facts = gather(&mut executor, &GatherOptions::new()).await.unwrap();

    assert_eq!(
        executor.calls,
        vec![
            "show interfaces",
            "show running-config",
            "show system",
            "show lldp neighbors detail",
        ]
    );
    assert_eq!(facts.gather_subset, vec!["default", "lldp", "routing"]);
    assert!(facts.interfaces.is_some());
    assert!(facts.ipv4.is_some());
    assert!(facts.lldp.is_some());
}

#[tokio::test]
async fn test_gather_is_idempotent() {
    let first = gather_subset(&["all"]).await;
    let second = gather_subset(&["all"]).await;

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn test_unknown_subset_is_rejected_before_any_command() {
    let mut executor = FixtureExecutor::new();
    let options = GatherOptions::new().gather_subset(["default", "interfaces"]);
    let err = gather(&mut executor, &options).await.unwrap_err();

    assert!(matches!(err, Error::Subset(SubsetError::Unknown { .. })));
    assert_eq!(
        err.to_string(),
        "Subset error: Bad subset 'interfaces', valid subsets are: default, routing, lldp"
    );
    assert!(executor.calls.is_empty());
}

#[tokio::test]
async fn test_transport_failure_fails_gather() {
    let mut executor = FixtureExecutor::failing_on("show system");
    let err = gather(&mut executor, &GatherOptions::new()).await.unwrap_err();

    assert!(matches!(err, Error::Transport(TransportError::Disconnected)));
    assert_eq!(executor.calls.last().map(String::as_str), Some("show system"));
}

#[tokio::test]
async fn test_missing_fixture_is_io_failure() {
    let mut executor = FixtureExecutor::new();
    executor.dir = executor.dir.join("missing");
    let err = gather(&mut executor, &GatherOptions::new()).await.unwrap_err();

    assert!(matches!(err, Error::Transport(TransportError::Io(_))));
}
