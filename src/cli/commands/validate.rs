//! `tyredex validate` command - Validate catalog files
//!
//! Two passes: every entity file must parse into its record type
//! (syntax errors are rendered with source spans), then the parsed
//! catalog is checked for semantic problems a YAML parser cannot see.

use console::style;
use miette::Result;
use std::collections::HashSet;

use crate::cli::helpers::open_project;
use crate::cli::GlobalOpts;
use crate::core::identity::EntityPrefix;
use crate::entities::{Fitment, Submission, Vehicle};
use crate::yaml::parse_yaml_file;

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Show every file checked, not just failures
    #[arg(long)]
    pub list: bool,
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;

    let mut checked = 0usize;
    let mut errors = 0usize;
    let mut vehicles: Vec<Vehicle> = Vec::new();
    let mut fitments: Vec<Fitment> = Vec::new();

    // Pass 1: every file parses into its record type
    for prefix in EntityPrefix::all() {
        for path in project.iter_entity_files(*prefix) {
            checked += 1;
            let display = path
                .strip_prefix(project.root())
                .unwrap_or(&path)
                .display()
                .to_string();

            let parse_result: std::result::Result<(), crate::yaml::YamlError> = match prefix {
                EntityPrefix::Veh => parse_yaml_file::<Vehicle>(&path).map(|v| {
                    vehicles.push(v);
                }),
                EntityPrefix::Fit => parse_yaml_file::<Fitment>(&path).map(|f| {
                    fitments.push(f);
                }),
                EntityPrefix::Sub => parse_yaml_file::<Submission>(&path).map(|_| ()),
            };

            match parse_result {
                Ok(()) => {
                    if args.list {
                        println!("{} {}", style("✓").green(), style(&display).dim());
                    }
                }
                Err(err) => {
                    errors += 1;
                    println!("{} {}", style("✗").red(), display);
                    println!("{:?}", miette::Report::new(err));
                }
            }
        }
    }

    // Pass 2: semantic checks over the parsed catalog
    errors += check_semantics(&vehicles, &fitments);

    println!();
    if errors == 0 {
        println!(
            "{} {} file(s) checked, all passed.",
            style("✓").green(),
            checked
        );
        Ok(())
    } else {
        println!(
            "{} {} file(s) checked, {} error(s).",
            style("✗").red(),
            checked,
            errors
        );
        Err(miette::miette!("validation failed with {} error(s)", errors))
    }
}

fn check_semantics(vehicles: &[Vehicle], fitments: &[Fitment]) -> usize {
    let mut errors = 0usize;

    // Duplicate slugs break lookup-by-slug
    let mut seen: HashSet<&str> = HashSet::new();
    for vehicle in vehicles {
        if !seen.insert(vehicle.slug.as_str()) {
            errors += 1;
            println!(
                "{} duplicate slug '{}' ({})",
                style("✗").red(),
                vehicle.slug,
                vehicle.id
            );
        }
    }

    let vehicle_ids: HashSet<String> = vehicles.iter().map(|v| v.id.to_string()).collect();
    let mut fitted: HashSet<String> = HashSet::new();

    for fit in fitments {
        let vehicle_id = fit.vehicle.to_string();

        if !vehicle_ids.contains(&vehicle_id) {
            errors += 1;
            println!(
                "{} fitment {} references missing vehicle {}",
                style("✗").red(),
                fit.id,
                vehicle_id
            );
        }

        if !fitted.insert(vehicle_id.clone()) {
            errors += 1;
            println!(
                "{} vehicle {} has more than one fitment",
                style("✗").red(),
                vehicle_id
            );
        }

        // Zero dimensions would poison the size matcher
        for (label, axle) in [("front", &fit.front), ("rear", &fit.rear)] {
            if let Some(axle) = axle {
                let has_zero = axle.width == Some(0)
                    || axle.aspect_ratio == Some(0)
                    || axle.rim == Some(0);
                if has_zero {
                    errors += 1;
                    println!(
                        "{} fitment {} has a zero {} tyre dimension",
                        style("✗").red(),
                        fit.id,
                        label
                    );
                }
            }
        }
    }

    errors
}
