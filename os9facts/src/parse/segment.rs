//! Splitting `show interfaces` output into per-interface blocks.

use std::sync::LazyLock;

use indexmap::IndexMap;
use log::{debug, warn};
use regex::Regex;

/// `<name> <port> is <state>, line protocol is <state>`
pub(crate) static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+ \S+) is (.+?), line protocol is (.+)$").expect("static regex must compile")
});

static NAME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+) (\S+)").expect("static regex must compile"));

/// How many leading lines are searched for a header line.
const HEADER_SEARCH_LINES: usize = 10;

/// Segmentation strategy for a `show interfaces` dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Every interface starts with a `... is up, line protocol is up` line.
    Header,
    /// Interfaces are separated by two consecutive blank lines.
    BlankLines,
}

impl Strategy {
    /// Pick the strategy by probing the first lines of output.
    pub fn detect(output: &str) -> Self {
        let has_header = output
            .lines()
            .filter(|line| !line.trim().is_empty())
            .take(HEADER_SEARCH_LINES)
            .any(|line| HEADER.is_match(line));
        if has_header {
            Strategy::Header
        } else {
            Strategy::BlankLines
        }
    }
}

/// Split `show interfaces` output into raw blocks keyed by interface name.
///
/// Keys are the first two tokens of the interface's first line, e.g.
/// `"TenGigabitEthernet 1/33"`. Lines before the first interface are dropped.
pub fn segment_interfaces(output: &str) -> IndexMap<String, String> {
    let strategy = Strategy::detect(output);
    debug!("Segmenting show interfaces output with {:?} strategy", strategy);

    let blocks = match strategy {
        Strategy::Header => segment_by_header(output),
        Strategy::BlankLines => segment_by_blank_lines(output),
    };
    if blocks.is_empty() && !output.trim().is_empty() {
        warn!("No interface found in {} bytes of show interfaces output", output.len());
    }
    blocks
}

fn segment_by_header(output: &str) -> IndexMap<String, String> {
    let mut blocks: IndexMap<String, String> = IndexMap::new();
    let mut current: Option<String> = None;

    for line in output.lines() {
        if let Some(caps) = HEADER.captures(line) {
            let key = caps[1].to_string();
            blocks.insert(key.clone(), line.to_string());
            current = Some(key);
        } else if let Some(block) = current.as_ref().and_then(|key| blocks.get_mut(key)) {
            block.push('\n');
            block.push_str(line);
        }
    }
    blocks
}

fn segment_by_blank_lines(output: &str) -> IndexMap<String, String> {
    let mut blocks: IndexMap<String, String> = IndexMap::new();
    let mut current: Option<String> = None;
    let mut interface_start = true;
    let mut blank_run = 0;

    for line in output.lines() {
        if line.is_empty() {
            if !interface_start {
                blank_run += 1;
                if blank_run == 2 {
                    interface_start = true;
                }
            }
            continue;
        }
        blank_run = 0;

        if interface_start {
            if let Some(m) = NAME_PREFIX.find(line) {
                let key = m.as_str().to_string();
                blocks.insert(key.clone(), line.to_string());
                current = Some(key);
                interface_start = false;
                continue;
            }
        }
        if let Some(block) = current.as_ref().and_then(|key| blocks.get_mut(key)) {
            block.push('\n');
            block.push_str(line);
        }
    }
    blocks
}
