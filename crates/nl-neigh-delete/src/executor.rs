//! Deletion pass over a neighbour cache snapshot
//!
//! Entries are visited once, in cache order. Each entry that matches the
//! filter (and, in interactive mode, is confirmed) is deleted through the
//! backend. The first failed delete aborts the pass; entries removed before
//! it stay removed.

use crate::error::{KernelError, NeighDeleteError, Result};
use crate::matcher::matches;
use crate::prompt::ConfirmationPrompt;
use crate::types::{Filter, NeighbourEntry, RunConfig};
use std::io::{Read, Write};
use tracing::{debug, info, instrument, trace};

/// The kernel-facing side of a deletion
#[cfg_attr(test, mockall::automock)]
pub trait NeighbourBackend {
    /// Requests removal of `entry` from the kernel neighbour table
    fn delete_neighbour(&mut self, entry: &NeighbourEntry) -> std::result::Result<(), KernelError>;
}

impl<T: NeighbourBackend + ?Sized> NeighbourBackend for &mut T {
    fn delete_neighbour(&mut self, entry: &NeighbourEntry) -> std::result::Result<(), KernelError> {
        (**self).delete_neighbour(entry)
    }
}

/// Snapshot of the kernel neighbour table, in dump order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighbourCache {
    entries: Vec<NeighbourEntry>,
}

impl NeighbourCache {
    pub fn new(entries: Vec<NeighbourEntry>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NeighbourEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a NeighbourCache {
    type Item = &'a NeighbourEntry;
    type IntoIter = std::slice::Iter<'a, NeighbourEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<NeighbourEntry> for NeighbourCache {
    fn from_iter<I: IntoIterator<Item = NeighbourEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Drives one match/confirm/delete pass
///
/// `input` is only read in interactive mode. Prompts, per-entry records and
/// the summary all go to `output`.
pub struct DeletionExecutor<B, R, W> {
    backend: B,
    config: RunConfig,
    input: R,
    output: W,
    deleted: usize,
}

impl<B, R, W> DeletionExecutor<B, R, W>
where
    B: NeighbourBackend,
    R: Read,
    W: Write,
{
    pub fn new(backend: B, config: RunConfig, input: R, output: W) -> Self {
        Self {
            backend,
            config,
            input,
            output,
            deleted: 0,
        }
    }

    /// Deletes every matching entry and returns how many were removed
    #[instrument(skip_all)]
    pub fn run<'e, I>(mut self, cache: I, filter: &Filter) -> Result<usize>
    where
        I: IntoIterator<Item = &'e NeighbourEntry>,
    {
        if filter.is_wildcard() {
            info!("No filter criteria given, every neighbour entry is a candidate");
        }

        for entry in cache {
            if !matches(entry, filter) {
                trace!(%entry, "Entry does not match filter");
                continue;
            }

            if self.config.interactive && !self.confirm(entry)? {
                debug!(%entry, "Deletion declined");
                continue;
            }

            self.delete(entry)?;
        }

        if !self.config.quiet {
            writeln!(self.output, "Deleted {} neighbours", self.deleted)?;
        }

        info!(deleted = self.deleted, "Deletion pass complete");
        Ok(self.deleted)
    }

    fn confirm(&mut self, entry: &NeighbourEntry) -> Result<bool> {
        let mut prompt = ConfirmationPrompt::new(&mut self.input, &mut self.output);
        Ok(prompt.confirm(entry, self.config.default_yes)?)
    }

    fn delete(&mut self, entry: &NeighbourEntry) -> Result<()> {
        self.backend
            .delete_neighbour(entry)
            .map_err(|source| NeighDeleteError::Deletion {
                entry: entry.to_string(),
                source,
                deleted: self.deleted,
            })?;

        self.deleted += 1;
        debug!(%entry, deleted = self.deleted, "Deleted neighbour");

        if !self.config.quiet {
            writeln!(self.output, "Deleted {}", entry)?;
        }
        Ok(())
    }
}
