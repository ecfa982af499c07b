//! Filter construction from command line tokens
//!
//! Each setter converts one raw token and overwrites the matching field of the
//! filter being built. Setters are applied in command-line order, so a later
//! flag replaces an earlier one and `--addr` sees the family chosen by any
//! earlier `--family` or `--addr`.

use crate::error::Result;
use crate::link_cache::LinkCache;
use crate::types::Filter;
use neigh_types::{AddressFamily, LinkLayerAddress, NeighbourAddress, NeighbourState};
use tracing::debug;

/// Filter field targeted by a command line option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Destination,
    LinkLayerAddress,
    Device,
    Family,
    State,
}

/// Converts tokens into filter fields, resolving devices through the link cache
#[derive(Debug, Clone, Copy)]
pub struct FilterBuilder<'a> {
    links: &'a LinkCache,
}

impl<'a> FilterBuilder<'a> {
    pub fn new(links: &'a LinkCache) -> Self {
        Self { links }
    }

    /// Builds a filter from `(field, token)` pairs in command-line order
    pub fn build<'t, I>(&self, ops: I) -> Result<Filter>
    where
        I: IntoIterator<Item = (FilterField, &'t str)>,
    {
        let mut filter = Filter::default();
        for (field, token) in ops {
            self.apply(&mut filter, field, token)?;
        }
        debug!(?filter, "Built neighbour filter");
        Ok(filter)
    }

    pub fn apply(&self, filter: &mut Filter, field: FilterField, token: &str) -> Result<()> {
        match field {
            FilterField::Destination => self.set_destination(filter, token),
            FilterField::LinkLayerAddress => self.set_lladdr(filter, token),
            FilterField::Device => self.set_device(filter, token),
            FilterField::Family => self.set_family(filter, token),
            FilterField::State => self.set_state(filter, token),
        }
    }

    /// Sets the destination; its family becomes the filter family
    pub fn set_destination(&self, filter: &mut Filter, token: &str) -> Result<()> {
        let addr = NeighbourAddress::parse_with_family(token, filter.family_hint())?;
        filter.destination = Some(addr);
        filter.family = Some(addr.family());
        Ok(())
    }

    pub fn set_lladdr(&self, filter: &mut Filter, token: &str) -> Result<()> {
        filter.lladdr = Some(token.parse::<LinkLayerAddress>()?);
        Ok(())
    }

    pub fn set_device(&self, filter: &mut Filter, token: &str) -> Result<()> {
        filter.ifindex = Some(self.links.resolve(token)?);
        Ok(())
    }

    /// Sets the family; `unspec` leaves the current family untouched
    pub fn set_family(&self, filter: &mut Filter, token: &str) -> Result<()> {
        let family = token.parse::<AddressFamily>()?;
        if family.is_unspec() {
            debug!(token, "Unspecified family does not restrict the filter");
            return Ok(());
        }
        filter.family = Some(family);
        Ok(())
    }

    pub fn set_state(&self, filter: &mut Filter, token: &str) -> Result<()> {
        filter.state = Some(token.parse::<NeighbourState>()?);
        Ok(())
    }
}
