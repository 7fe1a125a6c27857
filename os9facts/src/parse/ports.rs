//! Port range expansion.
//!
//! VLAN membership and port-channel lines in the running config list their
//! ports in a compact notation:
//!
//! ```text
//! tagged Port-channel 2,18-21,100
//! tagged hundredGigE 1/1-1/2,1/3,1/10-1/20
//! untagged TenGigabitEthernet 0/1,3,5-7
//! tagged fortyGigE 1/6/1-1/8/1,1/9/1
//! ```
//!
//! [`expand`] turns the port part into one `"<media> <port>"` string per
//! port. The grammars are tried in a fixed order, first match wins: the
//! slot-prefixed list is a textual superset of some slash pairs, so it must
//! come after them.

use std::sync::LazyLock;

use log::trace;
use regex::Regex;

/// Media name whose ports are numbered in steps of four.
pub const FORTY_GIG_MEDIA: &str = "fortyGigE";

/// Widest range expanded. Larger spans are treated as unparsable.
pub const MAX_RANGE_SPAN: u32 = 65535;

static FLAT_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+(?:-\d+)?(?:,\d+(?:-\d+)?)*$").expect("static regex must compile")
});

static SLASH_PAIR_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+/\d+(?:-\d+/\d+)?(?:,\d+/\d+(?:-\d+/\d+)?)*$")
        .expect("static regex must compile")
});

static SLOT_PREFIXED_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)/(\d+(?:-\d+)?(?:,\d+(?:-\d+)?)*)$").expect("static regex must compile")
});

static TRIPLE_SLASH_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+/\d+/\d+(?:-\d+/\d+/\d+)?(?:,\d+/\d+/\d+(?:-\d+/\d+/\d+)?)*$")
        .expect("static regex must compile")
});

/// Port numbering step for a media type.
pub fn step_for(media: &str) -> u32 {
    if media == FORTY_GIG_MEDIA { 4 } else { 1 }
}

/// Expand a compact port range expression into `"<media> <port>"` strings.
///
/// Returns an empty list when `ranges` matches none of the known grammars.
///
/// ```
/// use os9facts::parse::ports::expand;
///
/// assert_eq!(
///     expand("TenGigabitEthernet", "1/10-1/12"),
///     vec![
///         "TenGigabitEthernet 1/10",
///         "TenGigabitEthernet 1/11",
///         "TenGigabitEthernet 1/12",
///     ]
/// );
/// ```
pub fn expand(media: &str, ranges: &str) -> Vec<String> {
    expand_ports(media, ranges)
        .into_iter()
        .map(|port| format!("{} {}", media, port))
        .collect()
}

/// Expand a compact port range expression into bare port identifiers.
pub fn expand_ports(media: &str, ranges: &str) -> Vec<String> {
    let ranges = ranges.trim();
    let step = step_for(media);

    if FLAT_LIST.is_match(ranges) {
        expand_flat(ranges, step)
    } else if SLASH_PAIR_LIST.is_match(ranges) {
        expand_positional(ranges, step)
    } else if let Some(caps) = SLOT_PREFIXED_LIST.captures(ranges) {
        let slot = &caps[1];
        expand_flat(&caps[2], step)
            .into_iter()
            .map(|port| format!("{}/{}", slot, port))
            .collect()
    } else if TRIPLE_SLASH_LIST.is_match(ranges) {
        // Sub-ports of a broken-out port are always numbered one by one
        expand_positional(ranges, 1)
    } else {
        trace!("Skipping unparsable port range '{}' for {}", ranges, media);
        Vec::new()
    }
}

/// Expand `2,18-21,100` style lists. Reversed and oversized ranges are dropped.
fn expand_flat(ranges: &str, step: u32) -> Vec<String> {
    let mut out = Vec::new();
    for token in ranges.split(',') {
        match token.split_once('-') {
            Some((start, end)) => {
                let (Ok(start), Ok(end)) = (start.parse::<u32>(), end.parse::<u32>()) else {
                    continue;
                };
                if start > end {
                    trace!("Dropping reversed range {}", token);
                    continue;
                }
                if end - start > MAX_RANGE_SPAN {
                    trace!("Dropping oversized range {}", token);
                    continue;
                }
                out.extend(stepped(start, end, step).map(|n| n.to_string()));
            }
            None => {
                if let Ok(n) = token.parse::<u32>() {
                    out.push(n.to_string());
                }
            }
        }
    }
    out
}

/// Expand lists of slash-separated port ids (`1/1-1/4`, `1/6/1-1/8/1`).
///
/// A range must vary in exactly one position and increase from start to end;
/// anything else is skipped.
fn expand_positional(ranges: &str, step: u32) -> Vec<String> {
    let mut out = Vec::new();
    for token in ranges.split(',') {
        match token.split_once('-') {
            Some((start, end)) => out.extend(expand_positional_range(start, end, step)),
            None => out.push(token.to_string()),
        }
    }
    out
}

fn expand_positional_range(start: &str, end: &str, step: u32) -> Vec<String> {
    let (Some(start), Some(end)) = (parse_position(start), parse_position(end)) else {
        return Vec::new();
    };
    if start.len() != end.len() {
        return Vec::new();
    }

    let differing: Vec<usize> = (0..start.len()).filter(|&i| start[i] != end[i]).collect();
    let &[index] = differing.as_slice() else {
        trace!("Skipping range {:?}-{:?}: must vary in exactly one position", start, end);
        return Vec::new();
    };
    if start[index] >= end[index] {
        trace!("Skipping non-increasing range {:?}-{:?}", start, end);
        return Vec::new();
    }
    if end[index] - start[index] > MAX_RANGE_SPAN {
        trace!("Skipping oversized range {:?}-{:?}", start, end);
        return Vec::new();
    }

    stepped(start[index], end[index], step)
        .map(|value| {
            let mut port = start.clone();
            port[index] = value;
            port.iter().map(u32::to_string).collect::<Vec<_>>().join("/")
        })
        .collect()
}

fn parse_position(token: &str) -> Option<Vec<u32>> {
    token.split('/').map(|part| part.parse().ok()).collect()
}

fn stepped(start: u32, end: u32, step: u32) -> impl Iterator<Item = u32> {
    (start..=end).step_by(step.max(1) as usize)
}
