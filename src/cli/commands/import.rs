//! `tyredex import` command - Import vehicles from CSV files

use console::style;
use csv::ReaderBuilder;
use miette::{IntoDiagnostic, Result};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;

use crate::cli::helpers::{open_project, truncate_str};
use crate::cli::GlobalOpts;
use crate::core::{CatalogSnapshot, Config, ShortIdIndex};
use crate::entities::fitment::AxleTyre;
use crate::entities::{slugify, Fitment, Vehicle, VehicleCategory};

const CSV_HEADERS: [&str; 9] = [
    "brand",
    "model",
    "year",
    "category",
    "front_size",
    "rear_size",
    "tyre_size",
    "front_pressure",
    "rear_pressure",
];

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// CSV file to import
    pub file: Option<PathBuf>,

    /// Print a CSV template instead of importing
    #[arg(long)]
    pub template: bool,

    /// Validate the CSV without creating files
    #[arg(long)]
    pub dry_run: bool,

    /// Continue importing after errors (default: stop on first error)
    #[arg(long)]
    pub skip_errors: bool,
}

/// Import statistics
#[derive(Default)]
struct ImportStats {
    rows_processed: usize,
    vehicles_created: usize,
    errors: usize,
    skipped: usize,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    if args.template {
        return print_template();
    }

    let file_path = args
        .file
        .clone()
        .ok_or_else(|| miette::miette!("CSV file required. Usage: tyredex import vehicles.csv"))?;

    if !file_path.exists() {
        return Err(miette::miette!("File not found: {}", file_path.display()));
    }

    let project = open_project(global)?;

    println!(
        "{} Importing vehicles from {}{}",
        style("→").blue(),
        style(file_path.display()).yellow(),
        if args.dry_run {
            style(" (dry run)").dim().to_string()
        } else {
            String::new()
        }
    );
    println!();

    let stats = import_vehicles(&project, &file_path, &args)?;

    println!();
    println!("{}", style("─".repeat(50)).dim());
    println!("{}", style("Import Summary").bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  Rows processed:   {}", style(stats.rows_processed).cyan());
    println!(
        "  Vehicles created: {}",
        style(stats.vehicles_created).green()
    );
    if stats.skipped > 0 {
        println!("  Skipped:          {}", style(stats.skipped).dim());
    }
    if stats.errors > 0 {
        println!("  Errors:           {}", style(stats.errors).red());
    }

    if args.dry_run {
        println!();
        println!("{}", style("Dry run complete. No files were created.").yellow());
    }

    if stats.errors > 0 && !args.skip_errors {
        return Err(miette::miette!(
            "Import completed with {} error(s)",
            stats.errors
        ));
    }

    Ok(())
}

/// Print the expected CSV headers plus an example row
fn print_template() -> Result<()> {
    println!("{}", CSV_HEADERS.join(","));
    println!("Honda,Activa 6G,2020,scooter,90/90-12,90/100-10,,29 PSI,33 PSI");

    eprintln!();
    eprintln!(
        "{} Template generated. Redirect to a file: tyredex import --template > vehicles.csv",
        style("→").blue()
    );

    Ok(())
}

fn import_vehicles(
    project: &crate::core::Project,
    file_path: &PathBuf,
    args: &ImportArgs,
) -> Result<ImportStats> {
    let mut stats = ImportStats::default();
    let config = Config::load();
    let snapshot = CatalogSnapshot::load(project)?;

    let file = File::open(file_path).into_diagnostic()?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers = rdr.headers().into_diagnostic()?.clone();
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim().to_lowercase(), idx))
        .collect();

    let get_field = |record: &csv::StringRecord, name: &str| -> Option<String> {
        header_map
            .get(name)
            .and_then(|&idx| record.get(idx))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    let mut short_ids = ShortIdIndex::load(project);
    // Slugs seen this run, so duplicate rows in one file are caught too
    let mut seen_slugs: std::collections::HashSet<String> =
        snapshot.vehicles.iter().map(|v| v.slug.clone()).collect();

    for (row_idx, result) in rdr.records().enumerate() {
        let row_num = row_idx + 2; // 1-indexed plus the header row
        stats.rows_processed += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                eprintln!(
                    "{} Row {}: CSV parse error: {}",
                    style("✗").red(),
                    row_num,
                    e
                );
                stats.errors += 1;
                if !args.skip_errors {
                    return Ok(stats);
                }
                continue;
            }
        };

        let brand = get_field(&record, "brand").unwrap_or_default();
        let model = get_field(&record, "model").unwrap_or_default();
        if brand.is_empty() || model.is_empty() {
            eprintln!(
                "{} Row {}: Missing required field 'brand' or 'model'",
                style("✗").red(),
                row_num
            );
            stats.errors += 1;
            if !args.skip_errors {
                return Ok(stats);
            }
            continue;
        }

        let year: u16 = match get_field(&record, "year").and_then(|y| y.parse().ok()) {
            Some(y) => y,
            None => {
                eprintln!(
                    "{} Row {}: Missing or invalid 'year'",
                    style("✗").red(),
                    row_num
                );
                stats.errors += 1;
                if !args.skip_errors {
                    return Ok(stats);
                }
                continue;
            }
        };

        // An unknown category is a dropped constraint, not an error
        let category: VehicleCategory = get_field(&record, "category")
            .and_then(|c| c.parse().ok())
            .unwrap_or_default();

        let slug = slugify(&brand, &model, year);
        if seen_slugs.contains(&slug) {
            println!(
                "{} Row {}: {} {} ({}) already in catalog, skipped",
                style("○").dim(),
                row_num,
                brand,
                model,
                year
            );
            stats.skipped += 1;
            continue;
        }
        seen_slugs.insert(slug);

        let vehicle = Vehicle::new(brand.as_str(), model.as_str(), year, category, config.author());

        let front_size = get_field(&record, "front_size");
        let rear_size = get_field(&record, "rear_size");
        let combined_size = get_field(&record, "tyre_size");
        let front_pressure = get_field(&record, "front_pressure");
        let rear_pressure = get_field(&record, "rear_pressure");
        let has_tyre_data = front_size.is_some()
            || rear_size.is_some()
            || combined_size.is_some()
            || front_pressure.is_some()
            || rear_pressure.is_some();

        if args.dry_run {
            println!(
                "{} Row {}: Would create {} - {}",
                style("○").dim(),
                row_num,
                style(&vehicle.slug).cyan(),
                truncate_str(&vehicle.display_name(), 40)
            );
            continue;
        }

        let veh_path = project.entity_path(&vehicle.id);
        fs::write(&veh_path, serde_yml::to_string(&vehicle).into_diagnostic()?)
            .into_diagnostic()?;

        if has_tyre_data {
            let mut fit = Fitment::new(vehicle.id.clone(), config.author());
            fit.front = front_size.as_deref().map(AxleTyre::from_size_text);
            fit.rear = rear_size.as_deref().map(AxleTyre::from_size_text);
            fit.combined_size = combined_size;
            fit.pressures.standard_front = front_pressure;
            fit.pressures.standard_rear = rear_pressure;

            let fit_path = project.entity_path(&fit.id);
            fs::write(&fit_path, serde_yml::to_string(&fit).into_diagnostic()?)
                .into_diagnostic()?;
        }

        let short = short_ids.add(vehicle.id.to_string());
        println!(
            "{} Row {}: Created {} - {}",
            style("✓").green(),
            row_num,
            style(format!("@{}", short)).cyan(),
            truncate_str(&vehicle.display_name(), 40)
        );
        stats.vehicles_created += 1;
    }

    if !args.dry_run {
        let _ = short_ids.save(project);
    }

    Ok(stats)
}
