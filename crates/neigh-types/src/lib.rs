//! Typed primitives for kernel neighbour-table entries.
//!
//! This crate provides safe parsing and formatting of the values that make up
//! an ARP/NDP neighbour record:
//!
//! - [`LinkLayerAddress`]: hardware address of arbitrary length
//! - [`NeighbourAddress`]: family-aware destination address
//! - [`AddressFamily`]: `AF_*` identifiers with symbolic names
//! - [`NeighbourState`]: `NUD_*` reachability bitmask
//!
//! Numeric tokens accepted by the family and state parsers follow the C
//! `strtoul(.., 0)` conventions, see [`parse_u32`].

mod addr;
mod family;
mod lladdr;
mod state;

pub use addr::NeighbourAddress;
pub use family::AddressFamily;
pub use lladdr::LinkLayerAddress;
pub use state::NeighbourState;

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unable to parse address \"{0}\"")]
    InvalidAddress(String),

    #[error("Unable to parse link layer address \"{0}\"")]
    InvalidLinkLayerAddress(String),

    #[error("Address \"{input}\" does not belong to address family {family}")]
    FamilyMismatch {
        input: String,
        family: AddressFamily,
    },

    #[error("Invalid address family \"{0}\"")]
    InvalidFamily(String),

    #[error("Unable to translate state \"{0}\"")]
    InvalidState(String),

    #[error("Link \"{0}\" does not exist")]
    UnknownDevice(String),

    #[error("Unable to parse \"{0}\", not a number")]
    InvalidNumber(String),
}

/// Parses an unsigned 32-bit number the way `strtoul(arg, .., 0)` does.
///
/// Accepts decimal, `0x`/`0X` hexadecimal and leading-zero octal. Surrounding
/// whitespace and trailing garbage are rejected.
///
/// # Examples
///
/// ```
/// use neigh_types::parse_u32;
///
/// assert_eq!(parse_u32("128").unwrap(), 128);
/// assert_eq!(parse_u32("0x80").unwrap(), 128);
/// assert_eq!(parse_u32("0200").unwrap(), 128);
/// assert!(parse_u32("permanent").is_err());
/// ```
pub fn parse_u32(arg: &str) -> Result<u32, ParseError> {
    let invalid = || ParseError::InvalidNumber(arg.to_string());

    let (digits, radix) = if let Some(hex) = arg
        .strip_prefix("0x")
        .or_else(|| arg.strip_prefix("0X"))
    {
        (hex, 16)
    } else if arg.len() > 1 && arg.starts_with('0') {
        (&arg[1..], 8)
    } else {
        (arg, 10)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }

    u32::from_str_radix(digits, radix).map_err(|_| invalid())
}
