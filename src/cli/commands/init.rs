//! `tyredex init` command - Initialize a new catalog

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::Path;

use crate::core::project::{Project, ProjectError};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Force initialization even if .tyredex/ already exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let project = if args.force {
        Project::init_force(&path)
    } else {
        Project::init(&path)
    };

    match project {
        Ok(project) => {
            println!(
                "{} Initialized tyredex catalog at {}",
                style("✓").green(),
                style(project.root().display()).cyan()
            );
            println!();
            println!("Created catalog structure:");
            print_structure(project.root());
            println!();
            println!("Next steps:");
            println!(
                "  {} Add your first vehicle",
                style("tyredex veh new").yellow()
            );
            println!(
                "  {} Try the tyre calculator",
                style("tyredex calc 185 65 15").yellow()
            );
            println!(
                "  {} Validate catalog files",
                style("tyredex validate").yellow()
            );
            Ok(())
        }
        Err(ProjectError::AlreadyExists(path)) => {
            println!(
                "{} tyredex catalog already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            println!();
            println!(
                "Use {} to reinitialize",
                style("tyredex init --force").yellow()
            );
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}

fn print_structure(root: &Path) {
    let entries = [
        ".tyredex/",
        ".tyredex/config.yaml",
        "catalog/vehicles/",
        "catalog/fitments/",
        "submissions/",
    ];

    for entry in entries {
        if root.join(entry).exists() {
            println!("  {}", style(entry).dim());
        }
    }
}
