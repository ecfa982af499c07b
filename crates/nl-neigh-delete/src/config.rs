//! Command line configuration
//!
//! Flags map onto [`RunConfig`]; filter options are returned as an ordered
//! list so they can be applied in the order they were given.

use crate::filter::FilterField;
use crate::types::RunConfig;
use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;

/// Delete neighbour (ARP/NDP) entries matching the given criteria
///
/// Without any neighbour option every entry in the table is deleted.
#[derive(Parser, Debug)]
#[command(name = "nl-neigh-delete", version, about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Args {
    /// Run interactively
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Set default answer to yes
    #[arg(long)]
    pub yes: bool,

    /// Do not print informal notifications
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Show versioning information
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Destination address of neighbour
    #[arg(
        short = 'a',
        long,
        value_name = "ADDR",
        action = ArgAction::Append,
        help_heading = "Neighbour Options",
    )]
    pub addr: Vec<String>,

    /// Link layer address of neighbour
    #[arg(
        short = 'l',
        long,
        value_name = "ADDR",
        action = ArgAction::Append,
        help_heading = "Neighbour Options",
    )]
    pub lladdr: Vec<String>,

    /// Device the neighbour is connected to
    #[arg(
        short = 'd',
        long,
        value_name = "DEV",
        action = ArgAction::Append,
        help_heading = "Neighbour Options",
    )]
    pub dev: Vec<String>,

    /// Destination address family
    #[arg(
        long,
        value_name = "FAMILY",
        action = ArgAction::Append,
        help_heading = "Neighbour Options",
    )]
    pub family: Vec<String>,

    /// Neighbour state, e.g. permanent, reachable, stale
    #[arg(
        long,
        value_name = "STATE",
        action = ArgAction::Append,
        help_heading = "Neighbour Options",
    )]
    pub state: Vec<String>,
}

/// Parsed invocation: run options plus filter tokens in command-line order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub config: RunConfig,
    pub filter_ops: Vec<(FilterField, String)>,
}

impl Invocation {
    /// Filter tokens in the shape [`crate::FilterBuilder::build`] consumes
    pub fn filter_tokens(&self) -> impl Iterator<Item = (FilterField, &str)> {
        self.filter_ops
            .iter()
            .map(|(field, token)| (*field, token.as_str()))
    }
}

/// Parse the process arguments
pub fn parse() -> Result<Invocation, clap::Error> {
    parse_from(std::env::args_os())
}

/// Parse an explicit argument list (first item is the program name)
pub fn parse_from<I, T>(args: I) -> Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = Args::command().try_get_matches_from(args)?;
    let args = Args::from_arg_matches(&matches)?;

    let config = RunConfig {
        quiet: args.quiet,
        interactive: args.interactive,
        default_yes: args.yes,
    };

    let mut ordered = Vec::new();
    collect_ordered(&matches, "addr", FilterField::Destination, &args.addr, &mut ordered);
    collect_ordered(&matches, "lladdr", FilterField::LinkLayerAddress, &args.lladdr, &mut ordered);
    collect_ordered(&matches, "dev", FilterField::Device, &args.dev, &mut ordered);
    collect_ordered(&matches, "family", FilterField::Family, &args.family, &mut ordered);
    collect_ordered(&matches, "state", FilterField::State, &args.state, &mut ordered);
    ordered.sort_by_key(|(index, _, _)| *index);

    Ok(Invocation {
        config,
        filter_ops: ordered
            .into_iter()
            .map(|(_, field, token)| (field, token))
            .collect(),
    })
}

fn collect_ordered(
    matches: &ArgMatches,
    id: &str,
    field: FilterField,
    values: &[String],
    out: &mut Vec<(usize, FilterField, String)>,
) {
    if let Some(indices) = matches.indices_of(id) {
        out.extend(
            indices
                .zip(values)
                .map(|(index, value)| (index, field, value.clone())),
        );
    }
}
