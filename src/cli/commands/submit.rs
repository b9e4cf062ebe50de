//! `tyredex submit` command - Submit a vehicle for review
//!
//! Submissions land in `submissions/` with pending status and never
//! touch the catalog until an explicit `review approve`.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};
use std::fs;

use crate::cli::commands::veh::CliCategory;
use crate::cli::helpers::open_project;
use crate::cli::GlobalOpts;
use crate::core::ShortIdIndex;
use crate::entities::{Submission, Submitter, VehicleCategory};

#[derive(clap::Args, Debug)]
pub struct SubmitArgs {
    /// Your name
    #[arg(long)]
    pub name: Option<String>,

    /// Your email address
    #[arg(long)]
    pub email: Option<String>,

    /// Your phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Manufacturer, e.g. "Honda"
    #[arg(long, short = 'b')]
    pub brand: Option<String>,

    /// Model name
    #[arg(long, short = 'm')]
    pub model: Option<String>,

    /// Model year
    #[arg(long, short = 'y')]
    pub year: Option<u16>,

    /// Vehicle category
    #[arg(long, short = 'c', default_value = "car")]
    pub category: CliCategory,

    /// Front tyre size, e.g. "90/90-12"
    #[arg(long)]
    pub front_size: Option<String>,

    /// Rear tyre size
    #[arg(long)]
    pub rear_size: Option<String>,

    /// Tyre size shared by both axles
    #[arg(long)]
    pub size: Option<String>,

    /// Front pressure, e.g. "29 PSI"
    #[arg(long)]
    pub front_pressure: Option<String>,

    /// Rear pressure
    #[arg(long)]
    pub rear_pressure: Option<String>,

    /// Where the information comes from (manual, sticker, ...)
    #[arg(long)]
    pub source: Option<String>,

    /// Anything else the reviewer should know
    #[arg(long)]
    pub comments: Option<String>,

    /// Interactive mode (prompt for fields)
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

pub fn run(args: SubmitArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;

    let mut submission = if args.interactive {
        prompt_submission()?
    } else {
        let name = args
            .name
            .clone()
            .ok_or_else(|| miette::miette!("Your name is required (use --name, or -i)"))?;
        let email = args
            .email
            .clone()
            .ok_or_else(|| miette::miette!("Your email is required (use --email, or -i)"))?;
        let brand = args
            .brand
            .clone()
            .ok_or_else(|| miette::miette!("Brand is required (use --brand or -b)"))?;
        let model = args
            .model
            .clone()
            .ok_or_else(|| miette::miette!("Model is required (use --model or -m)"))?;
        let year = args
            .year
            .ok_or_else(|| miette::miette!("Year is required (use --year or -y)"))?;

        let mut sub = Submission::new(
            Submitter {
                name,
                email,
                phone: args.phone.clone(),
            },
            brand,
            model,
            year,
            args.category.into(),
        );
        sub.front_size = args.front_size.clone();
        sub.rear_size = args.rear_size.clone();
        sub.combined_size = args.size.clone();
        sub.front_pressure = args.front_pressure.clone();
        sub.rear_pressure = args.rear_pressure.clone();
        sub.source = args.source.clone();
        sub.comments = args.comments.clone();
        sub
    };

    // Normalize obvious whitespace slips before anything is written
    submission.brand = submission.brand.trim().to_string();
    submission.model = submission.model.trim().to_string();

    let path = project.entity_path(&submission.id);
    fs::write(&path, serde_yml::to_string(&submission).into_diagnostic()?).into_diagnostic()?;

    let mut short_ids = ShortIdIndex::load(&project);
    let short = short_ids.add(submission.id.to_string());
    let _ = short_ids.save(&project);

    println!(
        "{} Submission {} recorded for {}",
        style("✓").green(),
        style(format!("@{}", short)).cyan(),
        style(submission.display_name()).yellow()
    );
    println!("   {}", style(path.display()).dim());
    println!();
    println!("Thank you! The submission will be reviewed before it enters the catalog.");
    println!(
        "Reviewers: {} / {}",
        style(format!("tyredex review approve @{}", short)).yellow(),
        style(format!("tyredex review reject @{}", short)).yellow()
    );

    Ok(())
}

/// Interactive field-by-field prompt flow
fn prompt_submission() -> Result<Submission> {
    let theme = ColorfulTheme::default();

    let name: String = Input::with_theme(&theme)
        .with_prompt("Your name")
        .interact_text()
        .into_diagnostic()?;
    let email: String = Input::with_theme(&theme)
        .with_prompt("Your email")
        .interact_text()
        .into_diagnostic()?;
    let brand: String = Input::with_theme(&theme)
        .with_prompt("Brand")
        .interact_text()
        .into_diagnostic()?;
    let model: String = Input::with_theme(&theme)
        .with_prompt("Model")
        .interact_text()
        .into_diagnostic()?;
    let year: String = Input::with_theme(&theme)
        .with_prompt("Year")
        .interact_text()
        .into_diagnostic()?;
    let year: u16 = year
        .trim()
        .parse()
        .map_err(|_| miette::miette!("'{}' is not a valid year", year))?;

    let categories = ["car", "bike", "scooter"];
    let selection = Select::with_theme(&theme)
        .with_prompt("Category")
        .items(&categories)
        .default(0)
        .interact()
        .into_diagnostic()?;
    let category: VehicleCategory = categories[selection].parse().unwrap_or_default();

    let front_size: String = Input::with_theme(&theme)
        .with_prompt("Front tyre size (empty to skip)")
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;
    let rear_size: String = Input::with_theme(&theme)
        .with_prompt("Rear tyre size (empty to skip)")
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;
    let source: String = Input::with_theme(&theme)
        .with_prompt("Source of the information (empty to skip)")
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;

    let mut sub = Submission::new(
        Submitter {
            name,
            email,
            phone: None,
        },
        brand,
        model,
        year,
        category,
    );
    sub.front_size = (!front_size.is_empty()).then_some(front_size);
    sub.rear_size = (!rear_size.is_empty()).then_some(rear_size);
    sub.source = (!source.is_empty()).then_some(source);

    Ok(sub)
}
