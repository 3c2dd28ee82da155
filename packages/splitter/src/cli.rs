//! Command-line interface for the splitter.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::load_plan;
use crate::error::Result;
use crate::output::{compose, write_partitions};
use crate::source::SourceDocument;
use crate::splitting::SplitEngine;

/// srcsplit - Partition a monolithic source file into cohesive output files.
#[derive(Parser)]
#[command(name = "srcsplit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a source file into partitions according to a plan.
    Split {
        /// Path to the monolithic source file
        #[arg(short, long)]
        input: PathBuf,

        /// Path to the YAML partition plan
        #[arg(short, long)]
        plan: PathBuf,

        /// Directory for the partition files (created if missing)
        #[arg(short, long)]
        outdir: PathBuf,
    },

    /// Validate a partition plan without reading any source.
    Check {
        /// Path to the YAML partition plan
        #[arg(short, long)]
        plan: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            input,
            plan,
            outdir,
        } => split_command(&input, &plan, &outdir),
        Commands::Check { plan } => check_command(&plan),
    }
}

/// Execute the split command.
fn split_command(input: &Path, plan_path: &Path, outdir: &Path) -> Result<()> {
    // Validate the plan before touching the source
    let plan = load_plan(plan_path)?;
    let doc = SourceDocument::load(input)?.substituted(&plan.replace);

    println!(
        "{} {} ({} lines) into {} partitions",
        style("Splitting").bold(),
        style(input.display()).cyan(),
        doc.len(),
        style(plan.partitions.len()).green()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Extracting declarations...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let engine = SplitEngine::new(&doc);
    let bodies = match engine.run(&plan) {
        Ok(bodies) => bodies,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Writing partitions...");

    let composed: Vec<_> = bodies.iter().map(compose).collect();
    let reports = match write_partitions(&composed, outdir) {
        Ok(reports) => reports,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    for report in &reports {
        println!(
            "{} {} ({} lines)",
            style("Created").green().bold(),
            report.path.display(),
            report.lines
        );
    }

    Ok(())
}

/// Execute the check command.
fn check_command(plan_path: &Path) -> Result<()> {
    let plan = load_plan(plan_path)?;

    let request_count: usize = plan.partitions.iter().map(|p| p.requests.len()).sum();
    println!(
        "{} {} partitions, {} extraction requests",
        style("Plan OK:").green().bold(),
        plan.partitions.len(),
        request_count
    );

    Ok(())
}
