//! `tyredex search` command - Search vehicles by tyre size
//!
//! Three query shapes, each mapping onto one size-matcher form. The
//! commands only parse arguments and render results; matching itself
//! is `calc::filter` over a catalog snapshot.

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::calc::{filter, SizeQuery};
use crate::cli::commands::veh::print_vehicle_list;
use crate::cli::helpers::open_project;
use crate::cli::GlobalOpts;
use crate::core::{CatalogSnapshot, ShortIdIndex};
use crate::entities::Vehicle;

#[derive(Subcommand, Debug)]
pub enum SearchCommands {
    /// Match sidewall text, e.g. "90/90" (case-insensitive substring)
    Text(TextArgs),

    /// Match an exact width and/or rim
    Exact(ExactArgs),

    /// Match width/rim ranges (inclusive bounds)
    Range(RangeArgs),
}

#[derive(clap::Args, Debug)]
pub struct TextArgs {
    /// Substring to match against the front (or combined) size
    #[arg(long)]
    pub front: Option<String>,

    /// Substring to match against the rear (or combined) size
    #[arg(long)]
    pub rear: Option<String>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ExactArgs {
    /// Tyre width in millimetres
    #[arg(long, short = 'w')]
    pub width: Option<u32>,

    /// Rim diameter in inches
    #[arg(long, short = 'r')]
    pub rim: Option<u32>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct RangeArgs {
    /// Minimum tyre width in millimetres
    #[arg(long)]
    pub min_width: Option<u32>,

    /// Maximum tyre width in millimetres
    #[arg(long)]
    pub max_width: Option<u32>,

    /// Minimum rim diameter in inches
    #[arg(long)]
    pub min_rim: Option<u32>,

    /// Maximum rim diameter in inches
    #[arg(long)]
    pub max_rim: Option<u32>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

/// Run a search subcommand
pub fn run(cmd: SearchCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        SearchCommands::Text(args) => {
            if args.front.is_none() && args.rear.is_none() {
                return Err(miette::miette!(
                    "Nothing to search for. Provide --front and/or --rear."
                ));
            }
            let query = SizeQuery::Text {
                front: args.front,
                rear: args.rear,
            };
            run_query(&query, args.count, global)
        }
        SearchCommands::Exact(args) => {
            let query = SizeQuery::Exact {
                width: args.width,
                rim: args.rim,
            };
            run_query(&query, args.count, global)
        }
        SearchCommands::Range(args) => {
            let query = SizeQuery::Range {
                min_width: args.min_width,
                max_width: args.max_width,
                min_rim: args.min_rim,
                max_rim: args.max_rim,
            };
            run_query(&query, args.count, global)
        }
    }
}

fn run_query(query: &SizeQuery, count_only: bool, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let snapshot = CatalogSnapshot::load(&project)?;

    let records = snapshot.records();
    let matched_ids = filter(&records, query);

    if count_only {
        println!("{}", matched_ids.len());
        return Ok(());
    }

    if matched_ids.is_empty() {
        println!("No vehicles match.");
        return Ok(());
    }

    // Map matched records back to vehicles, preserving match order
    let vehicles: Vec<&Vehicle> = matched_ids
        .iter()
        .filter_map(|id| snapshot.vehicle_by_id(id))
        .collect();

    let mut short_ids = ShortIdIndex::load(&project);
    short_ids.ensure_all(vehicles.iter().map(|v| v.id.to_string()));
    let _ = short_ids.save(&project);

    if !global.quiet {
        println!("{} matching vehicle(s):", style(vehicles.len()).cyan());
        println!();
    }
    print_vehicle_list(&vehicles, &snapshot, &short_ids, global.format);

    Ok(())
}
