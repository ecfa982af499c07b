//! Core types for neighbour deletion

use neigh_types::{AddressFamily, LinkLayerAddress, NeighbourAddress, NeighbourState};
use std::fmt;

/// Neighbour table entry as dumped from the kernel
///
/// Entries are read-only snapshots. The kernel record is only changed through
/// a delete request on the netlink collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighbourEntry {
    /// Interface index
    pub ifindex: u32,
    /// Interface name (resolved from ifindex via the link cache)
    pub interface: String,
    /// Address family from the neighbour header
    pub family: AddressFamily,
    /// Neighbour network-layer address
    pub destination: NeighbourAddress,
    /// Neighbour hardware address, empty if the kernel reported none
    pub lladdr: LinkLayerAddress,
    /// Kernel neighbour state
    pub state: NeighbourState,
}

/// One-line description, e.g. `10.0.0.1 dev eth0 lladdr 00:11:22:33:44:55 <reachable>`
impl fmt::Display for NeighbourEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} dev {}", self.destination, self.interface)?;
        if !self.lladdr.is_empty() {
            write!(f, " lladdr {}", self.lladdr)?;
        }
        write!(f, " <{}>", self.state)
    }
}

/// Partial description of a neighbour entry
///
/// `None` is a wildcard. A set field must compare equal for an entry to match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub destination: Option<NeighbourAddress>,
    pub lladdr: Option<LinkLayerAddress>,
    pub ifindex: Option<u32>,
    pub family: Option<AddressFamily>,
    pub state: Option<NeighbourState>,
}

impl Filter {
    /// True when no field is set, i.e. the filter selects the whole table
    pub fn is_wildcard(&self) -> bool {
        self.destination.is_none()
            && self.lladdr.is_none()
            && self.ifindex.is_none()
            && self.family.is_none()
            && self.state.is_none()
    }

    /// Family hint for parsing a destination address
    pub fn family_hint(&self) -> AddressFamily {
        self.family.unwrap_or(AddressFamily::UNSPEC)
    }
}

/// Process-wide options, fixed once argument parsing is done
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Suppress per-entry and summary output
    pub quiet: bool,
    /// Ask before every deletion
    pub interactive: bool,
    /// Answer used for a bare newline at the prompt
    pub default_yes: bool,
}
