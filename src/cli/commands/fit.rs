//! `tyredex fit` command - Tyre fitment management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;

use crate::cli::helpers::{open_project, or_dash};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::identity::EntityPrefix;
use crate::core::{loader, CatalogSnapshot, Config, ShortIdIndex};
use crate::entities::fitment::{parse_size, AxleTyre, TubeType};
use crate::entities::Fitment;

#[derive(Subcommand, Debug)]
pub enum FitCommands {
    /// Create or update a vehicle's fitment
    Set(SetArgs),

    /// Show the fitment recorded for a vehicle
    Show(ShowArgs),

    /// List fitments, or vehicles missing one
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Vehicle ID, short ID (VEH@N), or slug
    #[arg(long)]
    pub vehicle: String,

    /// Front tyre size, e.g. "90/90-12"
    #[arg(long)]
    pub front_size: Option<String>,

    /// Rear tyre size, e.g. "100/80-12"
    #[arg(long)]
    pub rear_size: Option<String>,

    /// Tyre size shared by both axles
    #[arg(long)]
    pub size: Option<String>,

    /// Standard front pressure, e.g. "29 PSI"
    #[arg(long)]
    pub front_pressure: Option<String>,

    /// Standard rear pressure, e.g. "33 PSI"
    #[arg(long)]
    pub rear_pressure: Option<String>,

    /// Maximum safe front pressure
    #[arg(long)]
    pub max_front: Option<String>,

    /// Maximum safe rear pressure
    #[arg(long)]
    pub max_rear: Option<String>,

    /// Alternative size verified to fit (repeatable)
    #[arg(long = "alternate")]
    pub alternates: Vec<String>,

    /// Load index, e.g. "82"
    #[arg(long)]
    pub load_index: Option<String>,

    /// Speed rating, e.g. "H"
    #[arg(long)]
    pub speed_rating: Option<String>,

    /// Tube type (tube, tubeless, both)
    #[arg(long)]
    pub tube_type: Option<TubeType>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Vehicle ID, short ID (VEH@N), or slug
    pub vehicle: String,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show vehicles without any fitment instead
    #[arg(long)]
    pub missing: bool,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

/// Run a fitment subcommand
pub fn run(cmd: FitCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        FitCommands::Set(args) => run_set(args, global),
        FitCommands::Show(args) => run_show(args, global),
        FitCommands::List(args) => run_list(args, global),
    }
}

fn run_set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let config = Config::load();
    let snapshot = CatalogSnapshot::load(&project)?;
    let short_ids = ShortIdIndex::load(&project);

    let reference = short_ids
        .resolve(&args.vehicle)
        .unwrap_or_else(|| args.vehicle.clone());
    let vehicle = snapshot
        .vehicle_by_ref(&reference)
        .ok_or_else(|| miette::miette!("No vehicle found matching '{}'", args.vehicle))?;

    // Update the existing fitment or start a fresh one
    let (mut fitment, existing_path) = match snapshot.fitment_for(&vehicle.id) {
        Some(fit) => {
            let path = loader::find_entity_file(
                &project.entity_dir(EntityPrefix::Fit),
                &fit.id.to_string(),
            );
            (fit.clone(), path)
        }
        None => (Fitment::new(vehicle.id.clone(), config.author()), None),
    };

    if let Some(ref text) = args.front_size {
        fitment.front = Some(AxleTyre::from_size_text(text.as_str()));
    }
    if let Some(ref text) = args.rear_size {
        fitment.rear = Some(AxleTyre::from_size_text(text.as_str()));
    }
    if let Some(ref text) = args.size {
        fitment.combined_size = Some(text.clone());
    }
    if args.front_pressure.is_some() {
        fitment.pressures.standard_front = args.front_pressure.clone();
    }
    if args.rear_pressure.is_some() {
        fitment.pressures.standard_rear = args.rear_pressure.clone();
    }
    if args.max_front.is_some() {
        fitment.pressures.max_front = args.max_front.clone();
    }
    if args.max_rear.is_some() {
        fitment.pressures.max_rear = args.max_rear.clone();
    }
    for alt in &args.alternates {
        if !fitment.alternates.contains(alt) {
            fitment.alternates.push(alt.clone());
        }
    }
    if args.load_index.is_some() {
        fitment.load_index = args.load_index.clone();
    }
    if args.speed_rating.is_some() {
        fitment.speed_rating = args.speed_rating.clone();
    }
    if args.tube_type.is_some() {
        fitment.tube_type = args.tube_type;
    }
    if args.notes.is_some() {
        fitment.notes = args.notes.clone();
    }

    let updated = existing_path.is_some();
    if updated {
        fitment.entity_revision += 1;
    }

    let path = existing_path.unwrap_or_else(|| project.entity_path(&fitment.id));
    fs::write(&path, serde_yml::to_string(&fitment).into_diagnostic()?).into_diagnostic()?;

    println!(
        "{} {} fitment for {}",
        style("✓").green(),
        if updated { "Updated" } else { "Recorded" },
        style(vehicle.display_name()).yellow()
    );
    println!(
        "   Tyres: {} / {}",
        style(fitment.front_display()).cyan(),
        style(fitment.rear_display()).cyan()
    );
    println!("   {}", style(path.display()).dim());

    // Warn when size text carries no usable numbers for size search
    for (label, axle) in [("front", &fitment.front), ("rear", &fitment.rear)] {
        if let Some(axle) = axle {
            if let Some(ref text) = axle.size {
                if axle.width.is_none() && parse_size(text).is_none() {
                    println!(
                        "   {} {} size '{}' has no parseable width/rim; numeric size search will skip it",
                        style("!").yellow(),
                        label,
                        text
                    );
                }
            }
        }
    }

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let snapshot = CatalogSnapshot::load(&project)?;
    let short_ids = ShortIdIndex::load(&project);

    let reference = short_ids
        .resolve(&args.vehicle)
        .unwrap_or_else(|| args.vehicle.clone());
    let vehicle = snapshot
        .vehicle_by_ref(&reference)
        .ok_or_else(|| miette::miette!("No vehicle found matching '{}'", args.vehicle))?;

    let fitment = snapshot
        .fitment_for(&vehicle.id)
        .ok_or_else(|| miette::miette!("No fitment recorded for {}", vehicle.display_name()))?;

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(fitment).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(fitment).into_diagnostic()?);
        }
        OutputFormat::Id => {
            println!("{}", fitment.id);
        }
        _ => {
            println!("{}", style("─".repeat(60)).dim());
            println!(
                "{}: {}",
                style("Fitment").bold(),
                style(fitment.id.to_string()).cyan()
            );
            println!(
                "{}: {}",
                style("Vehicle").bold(),
                style(vehicle.display_name()).yellow()
            );
            println!("{}", style("─".repeat(60)).dim());
            println!("  {}: {}", style("Front").dim(), fitment.front_display());
            println!("  {}: {}", style("Rear").dim(), fitment.rear_display());
            println!(
                "  {}: {} front / {} rear",
                style("Pressure").dim(),
                or_dash(fitment.pressures.standard_front.as_deref()),
                or_dash(fitment.pressures.standard_rear.as_deref())
            );
            if !fitment.alternates.is_empty() {
                println!(
                    "  {}: {}",
                    style("Alternatives").dim(),
                    fitment.alternates.join(", ")
                );
            }
            println!(
                "{}: {} | {}: {}",
                style("Author").dim(),
                fitment.author,
                style("Revision").dim(),
                fitment.entity_revision
            );
        }
    }

    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let snapshot = CatalogSnapshot::load(&project)?;

    if args.missing {
        let missing: Vec<_> = snapshot
            .vehicles
            .iter()
            .filter(|v| snapshot.fitment_for(&v.id).is_none())
            .collect();

        if args.count {
            println!("{}", missing.len());
            return Ok(());
        }

        if missing.is_empty() {
            println!("Every vehicle has a fitment recorded.");
            return Ok(());
        }

        println!("{}", style("Vehicles without tyre data:").bold());
        for v in &missing {
            println!("  • {} ({})", v.display_name(), style(&v.slug).dim());
        }
        println!();
        println!("{} vehicle(s) missing fitment data.", missing.len());
        return Ok(());
    }

    if args.count {
        println!("{}", snapshot.fitments.len());
        return Ok(());
    }

    if snapshot.fitments.is_empty() {
        println!("No fitments found.");
        return Ok(());
    }

    println!(
        "{:<17} {:<28} {}",
        style("ID").bold(),
        style("VEHICLE").bold(),
        style("TYRES (F / R)").bold()
    );
    println!("{}", "-".repeat(80));
    for fit in &snapshot.fitments {
        let vehicle_name = snapshot
            .vehicle_by_id(&fit.vehicle.to_string())
            .map(|v| v.display_name())
            .unwrap_or_else(|| fit.vehicle.to_string());
        println!(
            "{:<17} {:<28} {} / {}",
            crate::cli::helpers::format_short_id(&fit.id),
            crate::cli::helpers::truncate_str(&vehicle_name, 26),
            fit.front_display(),
            fit.rear_display()
        );
    }
    println!();
    println!("{} fitment(s) found.", snapshot.fitments.len());

    Ok(())
}
