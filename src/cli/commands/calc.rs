//! `tyredex calc` command - Tyre geometry calculator
//!
//! Pure computation; works with or without a catalog.

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::calc::{compute, CalculationResult, TyreDimension};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct CalcArgs {
    /// Section width in millimetres (e.g. 185)
    pub width: u32,

    /// Aspect ratio percent (e.g. 65)
    pub aspect_ratio: u32,

    /// Rim diameter in inches (e.g. 15)
    pub rim: u32,
}

pub fn run(args: CalcArgs, global: &GlobalOpts) -> Result<()> {
    let dim = TyreDimension::new(args.width, args.aspect_ratio, args.rim);
    let result = compute(dim).map_err(|e| miette::miette!("{}", e))?;

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&result).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&result).into_diagnostic()?);
        }
        _ => print_pretty(&result),
    }

    Ok(())
}

fn print_pretty(result: &CalculationResult) {
    println!("{}", style("─".repeat(60)).dim());
    println!(
        "{}: {}   {}: {}",
        style("Metric").bold(),
        style(&result.metric_size).cyan(),
        style("Imperial").bold(),
        style(&result.imperial_size).cyan()
    );
    println!("{}", style("─".repeat(60)).dim());

    println!(
        "  {}: {} mm ({} in)",
        style("Overall diameter").dim(),
        result.diameter_mm,
        result.diameter_inches
    );
    println!(
        "  {}: {} mm ({} in)",
        style("Circumference").dim(),
        result.circumference_mm,
        result.circumference_inches
    );
    println!(
        "  {}: {} mm",
        style("Sidewall height").dim(),
        result.sidewall_height_mm
    );
    println!(
        "  {}: {} per km, {} per mile",
        style("Revolutions").dim(),
        result.revolutions_per_km,
        result.revolutions_per_mile
    );

    println!();
    if result.alternative_sizes.is_empty() {
        println!("No alternative sizes within ±3% rolling diameter.");
        return;
    }

    println!(
        "{} (±3% rolling diameter):",
        style("Alternative sizes").bold()
    );

    let mut builder = Builder::default();
    builder.push_record(["SIZE", "DIAMETER DIFF", "SPEEDO ERROR"]);
    for alt in &result.alternative_sizes {
        builder.push_record([
            alt.size.clone(),
            format!("{:.1}%", alt.diameter_diff_percent),
            alt.speedo_error.clone(),
        ]);
    }
    println!("{}", builder.build().with(Style::sharp()));
}
