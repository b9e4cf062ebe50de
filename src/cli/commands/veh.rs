//! `tyredex veh` command - Vehicle management

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};
use std::collections::HashSet;
use std::fs;
use tabled::{builder::Builder, settings::Style};

use crate::calc::{filter, SizeQuery};
use crate::cli::helpers::{escape_csv, format_short_id, open_project, or_dash, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::identity::EntityPrefix;
use crate::core::{loader, CatalogSnapshot, Config, ShortIdIndex};
use crate::entities::fitment::AxleTyre;
use crate::entities::{Fitment, Vehicle, VehicleCategory};

#[derive(Subcommand, Debug)]
pub enum VehCommands {
    /// List vehicles with filtering
    List(ListArgs),

    /// Add a new vehicle (optionally with its tyre sizes)
    New(NewArgs),

    /// Show a vehicle's details
    Show(ShowArgs),

    /// Edit a vehicle file in your editor
    Edit(EditArgs),

    /// Show the tyre pressure chart for a vehicle
    Pressure(PressureArgs),
}

/// Category filter for list command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryFilter {
    Car,
    Bike,
    Scooter,
    All,
}

/// Category choice for new command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliCategory {
    Car,
    Bike,
    Scooter,
}

impl From<CliCategory> for VehicleCategory {
    fn from(value: CliCategory) -> Self {
        match value {
            CliCategory::Car => VehicleCategory::Car,
            CliCategory::Bike => VehicleCategory::Bike,
            CliCategory::Scooter => VehicleCategory::Scooter,
        }
    }
}

/// Columns / sort fields for list output
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ListColumn {
    Id,
    Brand,
    Model,
    Year,
    Category,
    Created,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by category
    #[arg(long, short = 'c', default_value = "all")]
    pub category: CategoryFilter,

    /// Filter by brand (exact, case-insensitive)
    #[arg(long, short = 'b')]
    pub brand: Option<String>,

    /// Show only vehicles from this model year onwards
    #[arg(long)]
    pub year_from: Option<u16>,

    /// Show only vehicles up to this model year
    #[arg(long)]
    pub year_to: Option<u16>,

    /// Search in brand, model and year
    #[arg(long)]
    pub search: Option<String>,

    /// Only vehicles fitted with this exact tyre width (mm)
    #[arg(long, short = 'w')]
    pub width: Option<u32>,

    /// Only vehicles fitted with this exact rim diameter (inches)
    #[arg(long, short = 'r')]
    pub rim: Option<u32>,

    /// Sort by field
    #[arg(long, default_value = "brand")]
    pub sort: ListColumn,

    /// Reverse sort order
    #[arg(long)]
    pub reverse: bool,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Manufacturer, e.g. "Honda"
    #[arg(long, short = 'b')]
    pub brand: String,

    /// Model name, e.g. "Activa 6G"
    #[arg(long, short = 'm')]
    pub model: String,

    /// Model year
    #[arg(long, short = 'y')]
    pub year: u16,

    /// Vehicle category
    #[arg(long, short = 'c', default_value = "car")]
    pub category: CliCategory,

    /// Front tyre size, e.g. "90/90-12"
    #[arg(long)]
    pub front_size: Option<String>,

    /// Rear tyre size, e.g. "100/80-12"
    #[arg(long)]
    pub rear_size: Option<String>,

    /// Tyre size shared by both axles
    #[arg(long)]
    pub size: Option<String>,

    /// Front pressure, e.g. "29 PSI"
    #[arg(long)]
    pub front_pressure: Option<String>,

    /// Rear pressure, e.g. "33 PSI"
    #[arg(long)]
    pub rear_pressure: Option<String>,

    /// Open the vehicle file in your editor afterwards
    #[arg(long, short = 'e')]
    pub edit: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Vehicle ID, short ID (VEH@N), or slug
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Vehicle ID, short ID (VEH@N), or slug
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct PressureArgs {
    /// Vehicle ID, short ID (VEH@N), or slug
    pub id: String,
}

/// Run a vehicle subcommand
pub fn run(cmd: VehCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        VehCommands::List(args) => run_list(args, global),
        VehCommands::New(args) => run_new(args, global),
        VehCommands::Show(args) => run_show(args, global),
        VehCommands::Edit(args) => run_edit(args, global),
        VehCommands::Pressure(args) => run_pressure(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let snapshot = CatalogSnapshot::load(&project)?;

    // Tyre constraints go through the size matcher over the snapshot
    let size_matched: Option<HashSet<String>> = if args.width.is_some() || args.rim.is_some() {
        let records = snapshot.records();
        let ids = filter(
            &records,
            &SizeQuery::Exact {
                width: args.width,
                rim: args.rim,
            },
        );
        Some(ids.into_iter().collect())
    } else {
        None
    };

    let mut vehicles: Vec<&Vehicle> = snapshot
        .vehicles
        .iter()
        .filter(|v| match args.category {
            CategoryFilter::Car => v.category == VehicleCategory::Car,
            CategoryFilter::Bike => v.category == VehicleCategory::Bike,
            CategoryFilter::Scooter => v.category == VehicleCategory::Scooter,
            CategoryFilter::All => true,
        })
        .filter(|v| {
            args.brand
                .as_ref()
                .map_or(true, |b| v.brand.eq_ignore_ascii_case(b))
        })
        .filter(|v| args.year_from.map_or(true, |y| v.year >= y))
        .filter(|v| args.year_to.map_or(true, |y| v.year <= y))
        .filter(|v| {
            if let Some(ref search) = args.search {
                let needle = search.to_lowercase();
                v.brand.to_lowercase().contains(&needle)
                    || v.model.to_lowercase().contains(&needle)
                    || v.year.to_string().contains(&needle)
            } else {
                true
            }
        })
        .filter(|v| {
            size_matched
                .as_ref()
                .map_or(true, |ids| ids.contains(&v.id.to_string()))
        })
        .collect();

    match args.sort {
        ListColumn::Id => vehicles.sort_by_key(|v| v.id.to_string()),
        ListColumn::Brand => {
            vehicles.sort_by(|a, b| (&a.brand, &a.model, a.year).cmp(&(&b.brand, &b.model, b.year)))
        }
        ListColumn::Model => vehicles.sort_by(|a, b| a.model.cmp(&b.model)),
        ListColumn::Year => vehicles.sort_by_key(|v| v.year),
        ListColumn::Category => vehicles.sort_by_key(|v| v.category.to_string()),
        ListColumn::Created => vehicles.sort_by_key(|v| v.created),
    }

    if args.reverse {
        vehicles.reverse();
    }

    if let Some(limit) = args.limit {
        vehicles.truncate(limit);
    }

    if args.count {
        println!("{}", vehicles.len());
        return Ok(());
    }

    if vehicles.is_empty() {
        println!("No vehicles found.");
        return Ok(());
    }

    let mut short_ids = ShortIdIndex::load(&project);
    short_ids.ensure_all(vehicles.iter().map(|v| v.id.to_string()));
    let _ = short_ids.save(&project);

    print_vehicle_list(&vehicles, &snapshot, &short_ids, global.format);
    Ok(())
}

/// Shared vehicle-list rendering, also used by the search commands
pub fn print_vehicle_list(
    vehicles: &[&Vehicle],
    snapshot: &CatalogSnapshot,
    short_ids: &ShortIdIndex,
    format: OutputFormat,
) {
    let tyre_summary = |v: &Vehicle| -> String {
        match snapshot.fitment_for(&v.id) {
            Some(fit) => format!("{} / {}", fit.front_display(), fit.rear_display()),
            None => "-".to_string(),
        }
    };

    match format {
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = vehicles
                .iter()
                .map(|v| {
                    serde_json::json!({
                        "id": v.id.to_string(),
                        "brand": v.brand,
                        "model": v.model,
                        "year": v.year,
                        "category": v.category.to_string(),
                        "slug": v.slug,
                        "tyres": snapshot.fitment_for(&v.id).map(|f| f.to_record()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows).unwrap());
        }
        OutputFormat::Yaml => {
            let list: Vec<&Vehicle> = vehicles.to_vec();
            print!("{}", serde_yml::to_string(&list).unwrap());
        }
        OutputFormat::Csv => {
            println!("short_id,id,brand,model,year,category,slug,tyres");
            for v in vehicles {
                println!(
                    "{},{},{},{},{},{},{},{}",
                    short_ids.display(&v.id.to_string()),
                    v.id,
                    escape_csv(&v.brand),
                    escape_csv(&v.model),
                    v.year,
                    v.category,
                    v.slug,
                    escape_csv(&tyre_summary(v))
                );
            }
        }
        OutputFormat::Id => {
            for v in vehicles {
                println!("{}", v.id);
            }
        }
        OutputFormat::Md => {
            println!("| Short | ID | Brand | Model | Year | Category | Tyres |");
            println!("|---|---|---|---|---|---|---|");
            for v in vehicles {
                println!(
                    "| {} | {} | {} | {} | {} | {} | {} |",
                    short_ids.display(&v.id.to_string()),
                    format_short_id(&v.id),
                    v.brand,
                    v.model,
                    v.year,
                    v.category,
                    tyre_summary(v)
                );
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            println!(
                "{:<6} {:<17} {:<14} {:<20} {:<6} {:<8} {}",
                style("SHORT").bold().dim(),
                style("ID").bold(),
                style("BRAND").bold(),
                style("MODEL").bold(),
                style("YEAR").bold(),
                style("CAT").bold(),
                style("TYRES (F / R)").bold()
            );
            println!("{}", "-".repeat(100));

            for v in vehicles {
                println!(
                    "{:<6} {:<17} {:<14} {:<20} {:<6} {:<8} {}",
                    style(short_ids.display(&v.id.to_string())).cyan(),
                    format_short_id(&v.id),
                    truncate_str(&v.brand, 12),
                    truncate_str(&v.model, 18),
                    v.year,
                    v.category,
                    tyre_summary(v)
                );
            }

            println!();
            println!(
                "{} vehicle(s) found. Use {} to reference by short ID.",
                style(vehicles.len()).cyan(),
                style("VEH@N").cyan()
            );
        }
    }
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let config = Config::load();
    let snapshot = CatalogSnapshot::load(&project)?;

    let vehicle = Vehicle::new(
        args.brand.trim(),
        args.model.trim(),
        args.year,
        args.category.into(),
        config.author(),
    );

    if snapshot.has_slug(&vehicle.slug) {
        return Err(miette::miette!(
            "Vehicle '{}' is already in the catalog (slug {}). Use 'tyredex veh show {}' to inspect it.",
            vehicle.display_name(),
            vehicle.slug,
            vehicle.slug
        ));
    }

    let veh_path = project.entity_path(&vehicle.id);
    fs::write(&veh_path, serde_yml::to_string(&vehicle).into_diagnostic()?).into_diagnostic()?;

    let mut short_ids = ShortIdIndex::load(&project);
    let short = short_ids.add(vehicle.id.to_string());
    let _ = short_ids.save(&project);

    println!(
        "{} Created vehicle {} {}",
        style("✓").green(),
        style(format!("@{}", short)).cyan(),
        style(vehicle.display_name()).white()
    );
    println!("   {}", style(veh_path.display()).dim());

    // Any tyre flag creates the fitment in the same step
    let has_tyre_data = args.front_size.is_some()
        || args.rear_size.is_some()
        || args.size.is_some()
        || args.front_pressure.is_some()
        || args.rear_pressure.is_some();

    if has_tyre_data {
        let mut fit = Fitment::new(vehicle.id.clone(), config.author());
        fit.front = args.front_size.as_deref().map(AxleTyre::from_size_text);
        fit.rear = args.rear_size.as_deref().map(AxleTyre::from_size_text);
        fit.combined_size = args.size.clone();
        fit.pressures.standard_front = args.front_pressure.clone();
        fit.pressures.standard_rear = args.rear_pressure.clone();

        let fit_path = project.entity_path(&fit.id);
        fs::write(&fit_path, serde_yml::to_string(&fit).into_diagnostic()?).into_diagnostic()?;

        println!(
            "   Tyres: {} / {}",
            style(fit.front_display()).yellow(),
            style(fit.rear_display()).yellow()
        );
    }

    if args.edit {
        println!();
        println!("Opening in {}...", style(config.editor()).yellow());
        config.run_editor(&veh_path).into_diagnostic()?;
    }

    Ok(())
}

/// Resolve a vehicle reference (short ID, full/partial ID, or slug)
fn resolve_vehicle<'a>(
    snapshot: &'a CatalogSnapshot,
    short_ids: &ShortIdIndex,
    reference: &str,
) -> Result<&'a Vehicle> {
    let resolved = short_ids
        .resolve(reference)
        .unwrap_or_else(|| reference.to_string());
    snapshot
        .vehicle_by_ref(&resolved)
        .ok_or_else(|| miette::miette!("No vehicle found matching '{}'", reference))
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let snapshot = CatalogSnapshot::load(&project)?;
    let short_ids = ShortIdIndex::load(&project);

    let vehicle = resolve_vehicle(&snapshot, &short_ids, &args.id)?;
    let fitment = snapshot.fitment_for(&vehicle.id);

    match global.format {
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(vehicle).into_diagnostic()?);
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "vehicle": vehicle,
                "fitment": fitment,
            });
            println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
        }
        OutputFormat::Id => {
            println!("{}", vehicle.id);
        }
        _ => {
            println!("{}", style("─".repeat(60)).dim());
            println!(
                "{}: {}",
                style("ID").bold(),
                style(vehicle.id.to_string()).cyan()
            );
            println!(
                "{}: {}",
                style("Vehicle").bold(),
                style(vehicle.display_name()).yellow()
            );
            println!("{}: {}", style("Category").bold(), vehicle.category);
            println!("{}: {}", style("Slug").bold(), vehicle.slug);
            println!("{}", style("─".repeat(60)).dim());

            match fitment {
                Some(fit) => {
                    println!();
                    println!("{}", style("Tyres:").bold());
                    println!("  {}: {}", style("Front").dim(), fit.front_display());
                    println!("  {}: {}", style("Rear").dim(), fit.rear_display());
                    if fit.pressures.standard_front.is_some()
                        || fit.pressures.standard_rear.is_some()
                    {
                        println!(
                            "  {}: {} front / {} rear",
                            style("Pressure").dim(),
                            or_dash(fit.pressures.standard_front.as_deref()),
                            or_dash(fit.pressures.standard_rear.as_deref())
                        );
                    }
                    if !fit.alternates.is_empty() {
                        println!(
                            "  {}: {}",
                            style("Alternatives").dim(),
                            fit.alternates.join(", ")
                        );
                    }
                    if let Some(ref li) = fit.load_index {
                        println!("  {}: {}", style("Load index").dim(), li);
                    }
                    if let Some(ref sr) = fit.speed_rating {
                        println!("  {}: {}", style("Speed rating").dim(), sr);
                    }
                    if let Some(tt) = fit.tube_type {
                        println!("  {}: {}", style("Tube type").dim(), tt);
                    }
                    if let Some(ref notes) = fit.notes {
                        if !notes.is_empty() {
                            println!("  {}: {}", style("Notes").dim(), notes);
                        }
                    }
                }
                None => {
                    println!();
                    println!("No tyre data recorded for this vehicle yet.");
                    println!(
                        "Add it with {}.",
                        style(format!("tyredex fit set --vehicle {}", vehicle.slug)).yellow()
                    );
                }
            }

            let similar = snapshot.similar_vehicles(vehicle, 5);
            if !similar.is_empty() {
                println!();
                println!("{}", style("Similar vehicles:").bold());
                for v in similar {
                    println!(
                        "  • {} {}",
                        style(short_ids.display(&v.id.to_string())).cyan(),
                        v.display_name()
                    );
                }
            }

            println!("{}", style("─".repeat(60)).dim());
            println!(
                "{}: {} | {}: {} | {}: {}",
                style("Author").dim(),
                vehicle.author,
                style("Created").dim(),
                vehicle.created.format("%Y-%m-%d %H:%M"),
                style("Revision").dim(),
                vehicle.entity_revision
            );
        }
    }

    Ok(())
}

fn run_edit(args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let config = Config::load();
    let snapshot = CatalogSnapshot::load(&project)?;
    let short_ids = ShortIdIndex::load(&project);

    let vehicle = resolve_vehicle(&snapshot, &short_ids, &args.id)?;
    let path = loader::find_entity_file(
        &project.entity_dir(EntityPrefix::Veh),
        &vehicle.id.to_string(),
    )
    .ok_or_else(|| miette::miette!("Vehicle file missing for {}", vehicle.id))?;

    println!(
        "Opening {} in {}...",
        style(path.display()).cyan(),
        style(config.editor()).yellow()
    );
    config.run_editor(&path).into_diagnostic()?;

    Ok(())
}

fn run_pressure(args: PressureArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let snapshot = CatalogSnapshot::load(&project)?;
    let short_ids = ShortIdIndex::load(&project);

    let vehicle = resolve_vehicle(&snapshot, &short_ids, &args.id)?;

    let Some(fitment) = snapshot.fitment_for(&vehicle.id) else {
        println!(
            "No pressure data recorded for {}.",
            style(vehicle.display_name()).yellow()
        );
        return Ok(());
    };

    let p = &fitment.pressures;

    println!(
        "{} {}",
        style("Tyre pressures for").bold(),
        style(vehicle.display_name()).yellow()
    );
    println!();

    let mut builder = Builder::default();
    builder.push_record(["CONDITION", "FRONT", "REAR"]);
    builder.push_record([
        "Standard",
        or_dash(p.standard_front.as_deref()),
        or_dash(p.standard_rear.as_deref()),
    ]);
    builder.push_record([
        "Cold",
        or_dash(p.cold_front.as_deref()),
        or_dash(p.cold_rear.as_deref()),
    ]);
    builder.push_record([
        "Hot",
        or_dash(p.hot_front.as_deref()),
        or_dash(p.hot_rear.as_deref()),
    ]);
    builder.push_record([
        "Full load",
        or_dash(p.full_load_front.as_deref()),
        or_dash(p.full_load_rear.as_deref()),
    ]);
    builder.push_record([
        "Maximum",
        or_dash(p.max_front.as_deref()),
        or_dash(p.max_rear.as_deref()),
    ]);
    println!("{}", builder.build().with(Style::sharp()));

    println!();
    println!(
        "Seasonal: {} in summer, {} in winter.",
        style(&p.summer_adjustment).cyan(),
        style(&p.winter_adjustment).cyan()
    );

    Ok(())
}
