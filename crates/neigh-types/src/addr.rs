//! Family-aware neighbour destination addresses.

use crate::{AddressFamily, ParseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// The network-layer address a neighbour entry resolves.
///
/// Equality is family-aware: an IPv4 address never equals an IPv6 address,
/// including IPv4-mapped IPv6 forms.
///
/// # Examples
///
/// ```
/// use neigh_types::{AddressFamily, NeighbourAddress};
///
/// let dst = NeighbourAddress::parse_with_family("10.0.0.1", AddressFamily::UNSPEC).unwrap();
/// assert_eq!(dst.family(), AddressFamily::INET);
///
/// // An explicit family restricts what is accepted
/// assert!(NeighbourAddress::parse_with_family("10.0.0.1", AddressFamily::INET6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NeighbourAddress(IpAddr);

impl NeighbourAddress {
    pub const fn new(addr: IpAddr) -> Self {
        NeighbourAddress(addr)
    }

    pub const fn ip(&self) -> IpAddr {
        self.0
    }

    /// Returns the address family implied by the address.
    pub const fn family(&self) -> AddressFamily {
        match self.0 {
            IpAddr::V4(_) => AddressFamily::INET,
            IpAddr::V6(_) => AddressFamily::INET6,
        }
    }

    /// Parses `s` using `family` as a hint.
    ///
    /// `AF_UNSPEC` accepts either IPv4 or IPv6. `AF_INET`/`AF_INET6` accept
    /// only their own family. Any other family cannot carry a neighbour
    /// destination.
    pub fn parse_with_family(s: &str, family: AddressFamily) -> Result<Self, ParseError> {
        let addr = s
            .parse::<IpAddr>()
            .map_err(|_| ParseError::InvalidAddress(s.to_string()))?;

        let parsed = NeighbourAddress(addr);
        if family.is_unspec() || parsed.family() == family {
            Ok(parsed)
        } else {
            Err(ParseError::FamilyMismatch {
                input: s.to_string(),
                family,
            })
        }
    }
}

impl fmt::Display for NeighbourAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for NeighbourAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_family(s, AddressFamily::UNSPEC)
    }
}

impl From<IpAddr> for NeighbourAddress {
    fn from(addr: IpAddr) -> Self {
        NeighbourAddress(addr)
    }
}

impl From<Ipv4Addr> for NeighbourAddress {
    fn from(addr: Ipv4Addr) -> Self {
        NeighbourAddress(IpAddr::V4(addr))
    }
}

impl From<Ipv6Addr> for NeighbourAddress {
    fn from(addr: Ipv6Addr) -> Self {
        NeighbourAddress(IpAddr::V6(addr))
    }
}

impl From<NeighbourAddress> for IpAddr {
    fn from(addr: NeighbourAddress) -> Self {
        addr.0
    }
}
