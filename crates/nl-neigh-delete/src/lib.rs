//! Delete kernel neighbour-table entries matching a filter
//!
//! This crate implements `nl-neigh-delete`, which removes ARP (IPv4) and NDP
//! (IPv6) entries from the kernel neighbour table over netlink.
//!
//! # Flow
//!
//! ```text
//!  argv ──▶ config::parse ──▶ FilterBuilder ──▶ Filter
//!                                   ▲               │
//!  NetlinkSocket ──▶ LinkCache ─────┘               ▼
//!        │                                 DeletionExecutor
//!        └──────▶ NeighbourCache ────────▶  match ─▶ confirm ─▶ delete
//!                                                               │
//!        NetlinkSocket ◀──── RTM_DELNEIGH ◀─────────────────────┘
//! ```
//!
//! A filter with no field set matches every entry, so running without any
//! neighbour option clears the whole table.

pub mod config;
pub mod error;
pub mod executor;
pub mod filter;
pub mod link_cache;
pub mod matcher;
pub mod netlink;
pub mod prompt;
pub mod types;

pub use config::{Args, Invocation};
pub use error::{KernelError, NeighDeleteError, Result};
pub use executor::{DeletionExecutor, NeighbourBackend, NeighbourCache};
pub use filter::{FilterBuilder, FilterField};
pub use link_cache::LinkCache;
pub use matcher::matches;
pub use netlink::NetlinkSocket;
pub use prompt::{ConfirmationPrompt, PromptState};
pub use types::{Filter, NeighbourEntry, RunConfig};
