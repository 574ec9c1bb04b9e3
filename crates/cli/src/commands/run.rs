//! `run` command implementation.

use anyhow::{Context, Result};
use contracts::{ExitPolicy, PipelineBlueprint, RunReport, RunResult};
use tool_runner::ProcessRunner;
use tracing::info;

use crate::cli::RunArgs;

/// Execute the `run` command
pub async fn run_pipeline(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    // Validate config path
    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    // Load and parse configuration
    let mut blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Apply CLI overrides, then re-run structural validation so overridden
    // dataset names obey the same rules as configured ones
    apply_overrides(&mut blueprint, args);
    config_loader::validate(&blueprint)
        .context("Configuration invalid after applying CLI overrides")?;

    info!(
        datasets = blueprint.datasets.len(),
        mode = %blueprint.mode,
        planned_runs = blueprint.planned_runs().len(),
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_run_plan(&blueprint);
        return Ok(());
    }

    // Configured paths must exist before anything is launched
    config_loader::validate_paths(&blueprint).context("Configured paths failed validation")?;

    // Drive the pipeline with the real process runner
    let runner = ProcessRunner::new();
    let driver = pipeline::RunDriver::new(&blueprint, &runner);

    info!("Starting pipeline...");
    let report = driver.run_all().await.context("Pipeline execution failed")?;

    print_report(&report);

    if report.all_failed() {
        anyhow::bail!("All {} pipeline runs failed", report.failed());
    }

    info!(
        completed = report.completed(),
        failed = report.failed(),
        "Photogrammetry pipeline finished"
    );
    Ok(())
}

/// Apply CLI overrides onto the loaded blueprint
fn apply_overrides(blueprint: &mut PipelineBlueprint, args: &RunArgs) {
    if let Some(mode) = args.mode {
        info!(mode = ?mode, "Overriding reconstruction mode from CLI");
        blueprint.mode = mode.into();
    }
    if !args.datasets.is_empty() {
        info!(datasets = ?args.datasets, "Overriding dataset list from CLI");
        blueprint.datasets = args.datasets.clone();
    }
    if let Some(max_threads) = args.max_threads {
        info!(max_threads, "Overriding thread cap from CLI");
        blueprint.tools.max_threads = max_threads;
    }
    if args.ignore_exit_codes {
        info!("Ignoring tool exit codes per CLI flag");
        blueprint.tools.on_nonzero_exit = ExitPolicy::Ignore;
    }
}

/// Print the run plan for dry-run mode
fn print_run_plan(blueprint: &PipelineBlueprint) {
    println!("\n=== Run Plan ===\n");
    println!("Input root:  {}", blueprint.paths.input_root.display());
    println!("Output root: {}", blueprint.paths.output_root.display());
    println!("Mode: {}", blueprint.mode);

    println!("\nPlanned runs ({}):", blueprint.planned_runs().len());
    for (mode, dataset) in blueprint.planned_runs() {
        println!("  - {dataset} ({mode})");
    }

    let extras = &blueprint.extras;
    if extras.robust_triangulation || extras.colorize {
        println!("\nExtra operations after reconstruction:");
        if extras.robust_triangulation {
            println!("  - robust triangulation");
        }
        if extras.colorize {
            println!("  - structure colorization");
        }
    }

    println!();
}

/// Print the final run report
fn print_report(report: &RunReport) {
    println!("\n=== Run Report ===\n");
    for outcome in &report.outcomes {
        match &outcome.result {
            RunResult::Completed {
                stages_run,
                artifacts,
            } => {
                println!(
                    "  ok   {} ({}) - {} stages, {} artifacts, {:.1}s",
                    outcome.dataset,
                    outcome.mode,
                    stages_run,
                    artifacts.len(),
                    outcome.duration.as_secs_f64()
                );
            }
            RunResult::Failed { stage, message } => {
                println!(
                    "  FAIL {} ({}) - at {}: {}",
                    outcome.dataset,
                    outcome.mode,
                    stage.map(|s| s.name()).unwrap_or("setup"),
                    message
                );
            }
        }
    }
    println!(
        "\n{} completed, {} failed, total {:.1}s\n",
        report.completed(),
        report.failed(),
        report.total_duration().as_secs_f64()
    );
}
