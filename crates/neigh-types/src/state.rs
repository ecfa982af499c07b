//! Neighbour reachability state (`NUD_*` values from linux/neighbour.h).

use crate::{ParseError, parse_u32};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kernel neighbour state bitmask.
///
/// The kernel reports a single bit per entry, but the type is a mask so any
/// raw value (including combinations) round-trips unchanged.
///
/// # Examples
///
/// ```
/// use neigh_types::NeighbourState;
///
/// let state: NeighbourState = "permanent".parse().unwrap();
/// assert_eq!(state, NeighbourState::PERMANENT);
/// assert_eq!(state.bits(), 0x80);
/// assert_eq!(state.to_string(), "permanent");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NeighbourState(u16);

const STATE_NAMES: &[(&str, u16)] = &[
    ("incomplete", 0x01),
    ("reachable", 0x02),
    ("stale", 0x04),
    ("delay", 0x08),
    ("probe", 0x10),
    ("failed", 0x20),
    ("noarp", 0x40),
    ("permanent", 0x80),
];

impl NeighbourState {
    /// `NUD_NONE`
    pub const NONE: NeighbourState = NeighbourState(0x00);
    pub const INCOMPLETE: NeighbourState = NeighbourState(0x01);
    pub const REACHABLE: NeighbourState = NeighbourState(0x02);
    pub const STALE: NeighbourState = NeighbourState(0x04);
    pub const DELAY: NeighbourState = NeighbourState(0x08);
    pub const PROBE: NeighbourState = NeighbourState(0x10);
    pub const FAILED: NeighbourState = NeighbourState(0x20);
    pub const NOARP: NeighbourState = NeighbourState(0x40);
    pub const PERMANENT: NeighbourState = NeighbourState(0x80);

    /// Creates a state from the raw kernel bitmask.
    pub const fn from_bits(bits: u16) -> Self {
        NeighbourState(bits)
    }

    pub const fn bits(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for NeighbourState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("none");
        }

        let mut rest = self.0;
        let mut first = true;
        for (name, bit) in STATE_NAMES {
            if rest & bit != 0 {
                if !first {
                    f.write_str(",")?;
                }
                f.write_str(name)?;
                rest &= !bit;
                first = false;
            }
        }
        if rest != 0 {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "0x{:x}", rest)?;
        }
        Ok(())
    }
}

impl FromStr for NeighbourState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        if lower == "none" {
            return Ok(NeighbourState::NONE);
        }
        if let Some((_, bits)) = STATE_NAMES.iter().find(|(name, _)| *name == lower) {
            return Ok(NeighbourState(*bits));
        }

        parse_u32(s)
            .ok()
            .and_then(|raw| u16::try_from(raw).ok())
            .map(NeighbourState)
            .ok_or_else(|| ParseError::InvalidState(s.to_string()))
    }
}

impl From<u16> for NeighbourState {
    fn from(bits: u16) -> Self {
        NeighbourState(bits)
    }
}

impl From<NeighbourState> for u16 {
    fn from(state: NeighbourState) -> u16 {
        state.0
    }
}
