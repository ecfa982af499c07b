//! Address family identifiers.

use crate::{ParseError, parse_u32};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An `AF_*` address family identifier as used in netlink headers.
///
/// Known families have symbolic names; any other value in `0..=255` is still
/// representable and displays as its number.
///
/// # Examples
///
/// ```
/// use neigh_types::AddressFamily;
///
/// let family: AddressFamily = "inet6".parse().unwrap();
/// assert_eq!(family, AddressFamily::INET6);
/// assert_eq!(family.to_string(), "inet6");
///
/// // Numeric tokens are accepted as well
/// let family: AddressFamily = "2".parse().unwrap();
/// assert_eq!(family, AddressFamily::INET);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressFamily(u8);

/// Symbolic names, first match wins when formatting.
const FAMILY_NAMES: &[(&str, u8)] = &[
    ("unspec", 0),
    ("unix", 1),
    ("local", 1),
    ("inet", 2),
    ("bridge", 7),
    ("inet6", 10),
    ("decnet", 12),
    ("netlink", 16),
    ("route", 16),
    ("packet", 17),
    ("llc", 26),
    ("mpls", 28),
    ("can", 29),
];

impl AddressFamily {
    pub const UNSPEC: AddressFamily = AddressFamily(0);
    pub const INET: AddressFamily = AddressFamily(2);
    pub const BRIDGE: AddressFamily = AddressFamily(7);
    pub const INET6: AddressFamily = AddressFamily(10);

    /// Creates a family from its raw kernel value.
    pub const fn new(raw: u8) -> Self {
        AddressFamily(raw)
    }

    /// Returns the raw kernel value.
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// Returns true for `AF_UNSPEC`.
    pub const fn is_unspec(&self) -> bool {
        self.0 == 0
    }

    /// Returns the symbolic name, if the family has one.
    pub fn name(&self) -> Option<&'static str> {
        FAMILY_NAMES
            .iter()
            .find(|(_, raw)| *raw == self.0)
            .map(|(name, _)| *name)
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

impl FromStr for AddressFamily {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        if let Some((_, raw)) = FAMILY_NAMES.iter().find(|(name, _)| *name == lower) {
            return Ok(AddressFamily(*raw));
        }

        parse_u32(s)
            .ok()
            .and_then(|raw| u8::try_from(raw).ok())
            .map(AddressFamily)
            .ok_or_else(|| ParseError::InvalidFamily(s.to_string()))
    }
}

impl From<u8> for AddressFamily {
    fn from(raw: u8) -> Self {
        AddressFamily(raw)
    }
}

impl From<AddressFamily> for u8 {
    fn from(family: AddressFamily) -> u8 {
        family.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_symbolic() {
        assert_eq!("inet".parse::<AddressFamily>().unwrap(), AddressFamily::INET);
        assert_eq!("INET6".parse::<AddressFamily>().unwrap(), AddressFamily::INET6);
        assert_eq!("bridge".parse::<AddressFamily>().unwrap(), AddressFamily::BRIDGE);
        assert_eq!("local".parse::<AddressFamily>().unwrap().as_u8(), 1);
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!("10".parse::<AddressFamily>().unwrap(), AddressFamily::INET6);
        assert_eq!("0x11".parse::<AddressFamily>().unwrap().as_u8(), 17);
        assert_eq!("44".parse::<AddressFamily>().unwrap().as_u8(), 44);
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(
            "ipx25".parse::<AddressFamily>(),
            Err(ParseError::InvalidFamily("ipx25".to_string()))
        );
        assert!("256".parse::<AddressFamily>().is_err());
        assert!("".parse::<AddressFamily>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(AddressFamily::INET.to_string(), "inet");
        assert_eq!(AddressFamily::new(1).to_string(), "unix");
        assert_eq!(AddressFamily::new(99).to_string(), "99");
    }
}
