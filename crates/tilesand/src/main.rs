//! tilesand - headless tile simulation runner

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tilesand::SimConfig;
use tilesand::scenario::{ScenarioDefinition, ScenarioExecutor, ScenarioExecutorConfig};
use tilesand::simulation::{MaterialCatalog, Materials};
use tilesand::tools::{Brush, PenTool, Tool};
use tilesand::world::World;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (default: tilesand.ron in the working directory, if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<i32>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<i32>,

    /// Seed for the shuffled random table
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(long)]
    ticks: Option<u64>,

    /// Log statistics every N ticks (0 disables)
    #[arg(long)]
    report_interval: Option<u64>,

    /// Material catalog in RON (default: built-in materials)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Run a RON scenario instead of the demo scene
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Write the scenario report to this RON file
    #[arg(long, requires = "scenario")]
    report: Option<PathBuf>,

    /// Log every scenario action
    #[arg(long)]
    verbose: bool,

    /// Reset and rerun the demo scene this many extra times
    #[arg(long, default_value = "0")]
    repeat: u32,

    /// List placeable materials and exit
    #[arg(long)]
    list_materials: bool,

    /// Print the built-in catalog as RON and exit
    #[arg(long)]
    dump_catalog: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.dump_catalog {
        println!("{}", MaterialCatalog::builtin().to_ron_string()?);
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => SimConfig::load_from(path)?,
        None => SimConfig::load()?,
    };
    apply_overrides(&mut config, &args);

    let materials = Arc::new(load_materials(&config)?);

    if args.list_materials {
        for material in materials.palette() {
            println!("{:>3}  {}", material.id.0, material.display_name());
        }
        return Ok(());
    }

    log::info!("Starting tilesand");

    match &args.scenario {
        Some(path) => run_scenario(path, &args, &config, materials),
        None => run_demo(&config, materials, args.repeat),
    }
}

fn apply_overrides(config: &mut SimConfig, args: &Args) {
    if let Some(width) = args.width {
        config.world.width = width;
    }
    if let Some(height) = args.height {
        config.world.height = height;
    }
    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }
    if let Some(ticks) = args.ticks {
        config.run.ticks = ticks;
    }
    if let Some(interval) = args.report_interval {
        config.run.report_interval = interval;
    }
    if let Some(catalog) = &args.catalog {
        config.catalog.path = Some(catalog.clone());
    }
}

fn load_materials(config: &SimConfig) -> Result<Materials> {
    let Some(path) = &config.catalog.path else {
        return Ok(Materials::builtin());
    };
    let materials = MaterialCatalog::from_file(path)
        .and_then(MaterialCatalog::resolve)
        .with_context(|| format!("Failed to load material catalog: {}", path.display()))?;
    log::info!("Loaded {} materials from {}", materials.len(), path.display());
    Ok(materials)
}

fn run_scenario(
    path: &Path,
    args: &Args,
    config: &SimConfig,
    materials: Arc<Materials>,
) -> Result<()> {
    let scenario = ScenarioDefinition::from_file(path)?;
    let mut world = scenario.build_world(materials, config.world.seed);

    let mut executor = ScenarioExecutor::with_config(ScenarioExecutorConfig {
        verbose: args.verbose,
    });
    let report = executor.execute_scenario(&scenario, &mut world)?;

    if let Some(report_path) = &args.report {
        report.save_ron(report_path)?;
        log::info!("Report written to {}", report_path.display());
    }

    if !report.passed {
        bail!(
            "Scenario '{}' failed {} of {} verifications",
            report.scenario_name,
            report.failures().count(),
            report.verifications.len()
        );
    }
    Ok(())
}

fn run_demo(config: &SimConfig, materials: Arc<Materials>, repeat: u32) -> Result<()> {
    let mut world = World::with_materials(
        config.world.width,
        config.world.height,
        materials,
        config.world.seed,
    );

    let mut previous = None;
    for run in 0..=repeat {
        if run > 0 {
            world.reset();
        }
        paint_demo_scene(&mut world);
        run_ticks(&mut world, config.run.ticks, config.run.report_interval);

        let summary = (world.tile_count(), *world.stats());
        if let Some(expected) = previous
            && expected != summary
        {
            bail!("Run {run} diverged from the previous run with the same seed");
        }
        previous = Some(summary);
    }

    log::info!(
        "Finished after {} ticks with {} tiles",
        world.tick_count(),
        world.tile_count()
    );
    Ok(())
}

/// Floor, sand pile, pool of water and a wood block being set alight
///
/// Materials are looked up by name, so a custom catalog without them just
/// gets a sparser scene.
fn paint_demo_scene(world: &mut World) {
    let (width, height) = (world.width(), world.height());
    if width < 8 || height < 8 {
        log::warn!("World too small for the demo scene ({width}x{height})");
        return;
    }

    if let Some(concrete) = pen(world, "concrete") {
        for x in 0..width {
            concrete.apply(world, x, height - 1, Brush::Single);
        }
    }

    for (name, x) in [("sand", width / 4), ("water", width / 2)] {
        if let Some(tool) = pen(world, name) {
            for y in (1..height / 3).step_by(3) {
                tool.apply(world, x, y, Brush::Stamp);
            }
        }
    }

    let (wood_x, wood_y) = (width * 3 / 4, height - 3);
    if let Some(wood) = pen(world, "wood") {
        wood.apply(world, wood_x, wood_y, Brush::Stamp);
    }
    if let Some(fire) = pen(world, "fire") {
        fire.apply(world, wood_x, wood_y - 2, Brush::Single);
    }
}

fn pen(world: &World, material: &str) -> Option<PenTool> {
    let id = world.materials().id(material);
    if id.is_none() {
        log::warn!("Demo scene skips {material:?}: not in the catalog");
    }
    id.map(PenTool::new)
}

fn run_ticks(world: &mut World, ticks: u64, report_interval: u64) {
    for _ in 0..ticks {
        world.tick();
        if report_interval > 0 && world.tick_count() % report_interval == 0 {
            let stats = world.stats();
            log::info!(
                "tick {}: {} tiles | moved {} | heat {} | transitions {} | reactions {}",
                world.tick_count(),
                world.tile_count(),
                stats.tiles_moved,
                stats.heat_exchanges,
                stats.state_changes,
                stats.reactions
            );
        }
    }
}
