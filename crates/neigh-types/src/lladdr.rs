//! Link-layer (hardware) address type with safe parsing and formatting.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum hardware address length accepted (`MAX_ADDR_LEN` in the kernel).
pub const MAX_LLADDR_LEN: usize = 32;

/// A link-layer address of the length reported by the device.
///
/// Ethernet neighbours carry 6 bytes, but InfiniBand and tunnel devices use
/// other lengths, so no fixed size is assumed. An empty address means the
/// kernel reported none (e.g. an `INCOMPLETE` entry).
///
/// # Examples
///
/// ```
/// use neigh_types::LinkLayerAddress;
///
/// let ll: LinkLayerAddress = "00:11:22:33:44:55".parse().unwrap();
/// assert_eq!(ll.to_string(), "00:11:22:33:44:55");
///
/// // Also supports hyphen-separated format
/// let ll2: LinkLayerAddress = "00-11-22-33-44-55".parse().unwrap();
/// assert_eq!(ll, ll2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LinkLayerAddress(Vec<u8>);

impl LinkLayerAddress {
    /// Creates an address from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        LinkLayerAddress(bytes.into())
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the address length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no address is present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LinkLayerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("none");
        }
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for LinkLayerAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidLinkLayerAddress(s.to_string());

        // Support both colon and hyphen separators
        let separator = if s.contains(':') { ':' } else { '-' };

        let bytes = s
            .split(separator)
            .map(|part| {
                if part.is_empty()
                    || part.len() > 2
                    || !part.chars().all(|c| c.is_ascii_hexdigit())
                {
                    return Err(invalid());
                }
                u8::from_str_radix(part, 16).map_err(|_| invalid())
            })
            .collect::<Result<Vec<u8>, _>>()?;

        // A single group is a plain number, not a hardware address
        if bytes.len() < 2 || bytes.len() > MAX_LLADDR_LEN {
            return Err(invalid());
        }

        Ok(LinkLayerAddress(bytes))
    }
}

impl TryFrom<String> for LinkLayerAddress {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<LinkLayerAddress> for String {
    fn from(ll: LinkLayerAddress) -> String {
        ll.to_string()
    }
}

impl From<[u8; 6]> for LinkLayerAddress {
    fn from(bytes: [u8; 6]) -> Self {
        LinkLayerAddress(bytes.to_vec())
    }
}

impl From<Vec<u8>> for LinkLayerAddress {
    fn from(bytes: Vec<u8>) -> Self {
        LinkLayerAddress(bytes)
    }
}
