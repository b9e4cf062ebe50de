//! `tyredex review` command - Review user submissions
//!
//! Approval is the only path from a submission into the catalog: it
//! creates the vehicle and fitment records, then stamps the
//! submission. All catalog writes happen inside these commands, never
//! as a side effect of anything else.

use chrono::Utc;
use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::helpers::{open_project, or_dash, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::identity::EntityPrefix;
use crate::core::{loader, CatalogSnapshot, Config, Project, ShortIdIndex};
use crate::entities::fitment::AxleTyre;
use crate::entities::{Fitment, Submission, SubmissionStatus, Vehicle};

#[derive(Subcommand, Debug)]
pub enum ReviewCommands {
    /// List submissions
    List(ListArgs),

    /// Show a submission's details
    Show(ShowArgs),

    /// Approve a submission and add it to the catalog
    Approve(ApproveArgs),

    /// Reject a submission
    Reject(RejectArgs),
}

/// Status filter for list command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusFilter {
    Pending,
    Approved,
    Rejected,
    All,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status
    #[arg(long, short = 's', default_value = "pending")]
    pub status: StatusFilter,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Submission ID or short ID (SUB@N)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct ApproveArgs {
    /// Submission ID or short ID (SUB@N)
    pub id: String,

    /// Reviewer notes stored on the submission
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct RejectArgs {
    /// Submission ID or short ID (SUB@N)
    pub id: String,

    /// Reviewer notes stored on the submission
    #[arg(long)]
    pub notes: Option<String>,
}

/// Run a review subcommand
pub fn run(cmd: ReviewCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ReviewCommands::List(args) => run_list(args, global),
        ReviewCommands::Show(args) => run_show(args, global),
        ReviewCommands::Approve(args) => run_approve(args, global),
        ReviewCommands::Reject(args) => run_reject(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let submissions: Vec<Submission> = loader::load_entities(&project)?;

    let submissions: Vec<Submission> = submissions
        .into_iter()
        .filter(|s| match args.status {
            StatusFilter::Pending => s.status == SubmissionStatus::Pending,
            StatusFilter::Approved => s.status == SubmissionStatus::Approved,
            StatusFilter::Rejected => s.status == SubmissionStatus::Rejected,
            StatusFilter::All => true,
        })
        .collect();

    if args.count {
        println!("{}", submissions.len());
        return Ok(());
    }

    if submissions.is_empty() {
        println!("No submissions found.");
        return Ok(());
    }

    let mut short_ids = ShortIdIndex::load(&project);
    short_ids.ensure_all(submissions.iter().map(|s| s.id.to_string()));
    let _ = short_ids.save(&project);

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&submissions).into_diagnostic()?
            );
        }
        OutputFormat::Id => {
            for s in &submissions {
                println!("{}", s.id);
            }
        }
        _ => {
            println!(
                "{:<6} {:<17} {:<26} {:<10} {:<18} {}",
                style("SHORT").bold().dim(),
                style("ID").bold(),
                style("VEHICLE").bold(),
                style("STATUS").bold(),
                style("SUBMITTER").bold(),
                style("SUBMITTED").bold()
            );
            println!("{}", "-".repeat(95));

            for s in &submissions {
                let status_styled = match s.status {
                    SubmissionStatus::Pending => style(s.status.to_string()).yellow(),
                    SubmissionStatus::Approved => style(s.status.to_string()).green(),
                    SubmissionStatus::Rejected => style(s.status.to_string()).red(),
                };
                println!(
                    "{:<6} {:<17} {:<26} {:<10} {:<18} {}",
                    style(short_ids.display(&s.id.to_string())).cyan(),
                    crate::cli::helpers::format_short_id(&s.id),
                    truncate_str(&s.display_name(), 24),
                    status_styled,
                    truncate_str(&s.submitter.name, 16),
                    s.created.format("%Y-%m-%d")
                );
            }

            println!();
            println!("{} submission(s) found.", style(submissions.len()).cyan());
        }
    }

    Ok(())
}

/// Find a submission file by reference and load it
fn load_submission(project: &Project, reference: &str) -> Result<(PathBuf, Submission)> {
    let short_ids = ShortIdIndex::load(project);
    let resolved = short_ids
        .resolve(reference)
        .unwrap_or_else(|| reference.to_string());

    loader::load_entity(&project.entity_dir(EntityPrefix::Sub), &resolved)?
        .ok_or_else(|| miette::miette!("No submission found matching '{}'", reference))
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let (_, sub) = load_submission(&project, &args.id)?;

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&sub).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&sub).into_diagnostic()?);
        }
        _ => {
            println!("{}", style("─".repeat(60)).dim());
            println!("{}: {}", style("ID").bold(), style(sub.id.to_string()).cyan());
            println!(
                "{}: {}",
                style("Vehicle").bold(),
                style(sub.display_name()).yellow()
            );
            println!("{}: {}", style("Category").bold(), sub.category);
            println!("{}: {}", style("Status").bold(), sub.status);
            println!("{}", style("─".repeat(60)).dim());
            println!(
                "  {}: {} <{}>",
                style("Submitter").dim(),
                sub.submitter.name,
                sub.submitter.email
            );
            println!(
                "  {}: {} / {}",
                style("Sizes (F/R)").dim(),
                or_dash(sub.front_size.as_deref()),
                or_dash(sub.rear_size.as_deref())
            );
            if let Some(ref size) = sub.combined_size {
                println!("  {}: {}", style("Combined size").dim(), size);
            }
            println!(
                "  {}: {} / {}",
                style("Pressure (F/R)").dim(),
                or_dash(sub.front_pressure.as_deref()),
                or_dash(sub.rear_pressure.as_deref())
            );
            if let Some(ref source) = sub.source {
                println!("  {}: {}", style("Source").dim(), source);
            }
            if let Some(ref comments) = sub.comments {
                println!("  {}: {}", style("Comments").dim(), comments);
            }
            if let Some(ref notes) = sub.review_notes {
                println!("  {}: {}", style("Review notes").dim(), notes);
            }
            println!("{}", style("─".repeat(60)).dim());
            println!(
                "{}: {}",
                style("Submitted").dim(),
                sub.created.format("%Y-%m-%d %H:%M")
            );
        }
    }

    Ok(())
}

fn run_approve(args: ApproveArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let config = Config::load();
    let (sub_path, mut sub) = load_submission(&project, &args.id)?;

    if sub.status != SubmissionStatus::Pending {
        return Err(miette::miette!(
            "Submission {} is already {}",
            sub.id,
            sub.status
        ));
    }

    let snapshot = CatalogSnapshot::load(&project)?;
    let vehicle = Vehicle::new(
        sub.brand.clone(),
        sub.model.clone(),
        sub.year,
        sub.category,
        config.author(),
    );

    if snapshot.has_slug(&vehicle.slug) {
        return Err(miette::miette!(
            "'{}' is already in the catalog (slug {}). The submission stays pending; reconcile the existing record first.",
            vehicle.display_name(),
            vehicle.slug
        ));
    }

    // Catalog records first, then the submission stamp
    let veh_path = project.entity_path(&vehicle.id);
    fs::write(&veh_path, serde_yml::to_string(&vehicle).into_diagnostic()?).into_diagnostic()?;

    let mut fitment = Fitment::new(vehicle.id.clone(), config.author());
    fitment.front = sub.front_size.as_deref().map(AxleTyre::from_size_text);
    fitment.rear = sub.rear_size.as_deref().map(AxleTyre::from_size_text);
    fitment.combined_size = sub.combined_size.clone();
    fitment.pressures.standard_front = sub.front_pressure.clone();
    fitment.pressures.standard_rear = sub.rear_pressure.clone();
    if let Some(ref source) = sub.source {
        fitment.notes = Some(format!("Source: {}", source));
    }

    let fit_path = project.entity_path(&fitment.id);
    fs::write(&fit_path, serde_yml::to_string(&fitment).into_diagnostic()?).into_diagnostic()?;

    sub.status = SubmissionStatus::Approved;
    sub.review_notes = Some(args.notes.unwrap_or_else(|| {
        format!(
            "Approved and added to catalog on {}",
            Utc::now().format("%Y-%m-%d")
        )
    }));
    sub.updated = Some(Utc::now());
    sub.entity_revision += 1;
    fs::write(&sub_path, serde_yml::to_string(&sub).into_diagnostic()?).into_diagnostic()?;

    let mut short_ids = ShortIdIndex::load(&project);
    let veh_short = short_ids.add(vehicle.id.to_string());
    let _ = short_ids.save(&project);

    println!(
        "{} Approved submission {}",
        style("✓").green(),
        style(sub.id.to_string()).cyan()
    );
    println!(
        "   Created vehicle {} {}",
        style(format!("@{}", veh_short)).cyan(),
        style(vehicle.display_name()).yellow()
    );
    println!(
        "   Tyres: {} / {}",
        fitment.front_display(),
        fitment.rear_display()
    );

    Ok(())
}

fn run_reject(args: RejectArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let (sub_path, mut sub) = load_submission(&project, &args.id)?;

    if sub.status != SubmissionStatus::Pending {
        return Err(miette::miette!(
            "Submission {} is already {}",
            sub.id,
            sub.status
        ));
    }

    sub.status = SubmissionStatus::Rejected;
    sub.review_notes = args.notes.clone();
    sub.updated = Some(Utc::now());
    sub.entity_revision += 1;
    fs::write(&sub_path, serde_yml::to_string(&sub).into_diagnostic()?).into_diagnostic()?;

    println!(
        "{} Rejected submission {} ({})",
        style("✓").green(),
        style(sub.id.to_string()).cyan(),
        sub.display_name()
    );
    if let Some(ref notes) = sub.review_notes {
        println!("   Notes: {}", notes);
    }

    Ok(())
}
