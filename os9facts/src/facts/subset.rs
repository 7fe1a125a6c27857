//! Fact subsets and `gather_subset` resolution.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SubsetError};

/// A group of facts gathered together from a fixed list of commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Subset {
    /// Interfaces, device info and raw running config.
    Default,
    /// Static IPv4/IPv6 routes.
    Routing,
    /// LLDP neighbors.
    Lldp,
}

impl Subset {
    /// Every known subset.
    pub const ALL: [Subset; 3] = [Subset::Default, Subset::Routing, Subset::Lldp];

    pub fn name(self) -> &'static str {
        match self {
            Subset::Default => "default",
            Subset::Routing => "routing",
            Subset::Lldp => "lldp",
        }
    }

    /// Commands whose output this subset parses, in the order it expects them.
    pub fn commands(self) -> &'static [&'static str] {
        match self {
            Subset::Default => &["show interfaces", "show running-config", "show system"],
            Subset::Routing => &["show running-config"],
            Subset::Lldp => &["show lldp neighbors detail"],
        }
    }

    /// Comma separated list of valid subset names.
    pub fn valid_names() -> String {
        Self::ALL.map(Subset::name).join(", ")
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Subset {
    type Err = SubsetError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|subset| subset.name() == s)
            .ok_or_else(|| SubsetError::Unknown {
                name: s.to_string(),
                valid: Self::valid_names(),
            })
    }
}

/// Resolve a `gather_subset` selection into the subsets to run.
///
/// Entries are subset names, `all`, or `!name` / `!all` exclusions. With no
/// inclusions every subset is selected; exclusions are applied afterwards and
/// `default` is always part of the result. Unknown names are rejected.
///
/// ```
/// use os9facts::facts::{Subset, resolve_subsets};
///
/// let subsets = resolve_subsets(&["!lldp"]).unwrap();
/// assert_eq!(subsets.into_iter().collect::<Vec<_>>(), vec![Subset::Default, Subset::Routing]);
/// ```
pub fn resolve_subsets<S: AsRef<str>>(selection: &[S]) -> Result<BTreeSet<Subset>> {
    let mut runnable = BTreeSet::new();
    let mut excluded = BTreeSet::new();

    for entry in selection {
        let entry = entry.as_ref().trim();
        let (name, exclude) = match entry.strip_prefix('!') {
            Some(name) => (name, true),
            None => (entry, false),
        };
        let target = if exclude { &mut excluded } else { &mut runnable };
        if name == "all" {
            target.extend(Subset::ALL);
        } else {
            target.insert(name.parse::<Subset>()?);
        }
    }

    if runnable.is_empty() {
        runnable.extend(Subset::ALL);
    }
    runnable.retain(|subset| !excluded.contains(subset));
    runnable.insert(Subset::Default);
    Ok(runnable)
}
