//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::PipelineBlueprint;
use tracing::info;

use crate::cli::InfoArgs;

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Reading configuration");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        let json = config_loader::ConfigLoader::to_json(&blueprint)
            .context("Failed to serialize configuration")?;
        println!("{}", json);
        return Ok(());
    }

    print_info(&blueprint);
    Ok(())
}

fn print_info(blueprint: &PipelineBlueprint) {
    println!("\n=== Configuration ===\n");
    println!("Mode: {}", blueprint.mode);

    println!("\nDatasets ({}):", blueprint.datasets.len());
    for dataset in &blueprint.datasets {
        println!("  - {dataset}");
    }

    println!("\nPaths:");
    println!("  Input root:   {}", blueprint.paths.input_root.display());
    println!("  Output root:  {}", blueprint.paths.output_root.display());
    println!(
        "  OpenMVG bin:  {}",
        blueprint.paths.openmvg_bin_dir.display()
    );
    println!(
        "  OpenMVS bin:  {}",
        blueprint.paths.openmvs_bin_dir.display()
    );
    println!(
        "  Sensor DB:    {}",
        blueprint.paths.sensor_database.display()
    );

    println!("\nTool settings:");
    println!("  Max threads: {}", blueprint.tools.max_threads);
    println!(
        "  Describer preset: {}",
        blueprint.tools.describer_preset.as_arg()
    );
    println!("  Min resolution: {}", blueprint.tools.min_resolution);
    println!("  CUDA: {}", blueprint.tools.use_cuda);
    println!("  On nonzero exit: {:?}", blueprint.tools.on_nonzero_exit);

    println!("\nPlanned runs ({}):", blueprint.planned_runs().len());
    for (mode, dataset) in blueprint.planned_runs() {
        println!("  - {dataset} ({mode})");
    }

    println!();
}
