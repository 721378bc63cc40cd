//! Scenario execution engine

use std::time::Instant;

use anyhow::{Result, anyhow};
use tilesand_core::simulation::MaterialId;
use tilesand_core::world::World;

use super::actions::ScenarioAction;
use super::definition::ScenarioDefinition;
use super::results::ScenarioReport;
use crate::tools::{Brush, EraseTool, PenTool, Tool};

/// Configuration for scenario executor
#[derive(Debug, Clone, Default)]
pub struct ScenarioExecutorConfig {
    /// Log every action before it runs
    pub verbose: bool,
}

/// Executes scenario actions against a world
pub struct ScenarioExecutor {
    config: ScenarioExecutorConfig,

    /// Ticks run by this executor
    tick_count: u64,

    /// Action execution log
    log: Vec<String>,

    /// Tick timings (milliseconds)
    tick_times: Vec<f64>,
}

impl ScenarioExecutor {
    /// Create new executor with default config
    pub fn new() -> Self {
        Self::with_config(ScenarioExecutorConfig::default())
    }

    pub fn with_config(config: ScenarioExecutorConfig) -> Self {
        Self {
            config,
            tick_count: 0,
            log: Vec::new(),
            tick_times: Vec::new(),
        }
    }

    /// Execute a complete scenario
    ///
    /// A failing action aborts the run with an error; failing verifications
    /// are reported, not raised.
    pub fn execute_scenario(
        &mut self,
        scenario: &ScenarioDefinition,
        world: &mut World,
    ) -> Result<ScenarioReport> {
        let start_time = Instant::now();
        let mut report = ScenarioReport::new(scenario.name.clone());

        self.log.clear();
        self.tick_count = 0;
        self.tick_times.clear();
        world.reset_stats();

        self.log(&format!("Starting scenario: {}", scenario.name));
        if !scenario.description.is_empty() {
            self.log(&format!("Description: {}", scenario.description));
        }

        if !scenario.setup.is_empty() {
            self.log(&format!("Running {} setup actions", scenario.setup.len()));
            for (idx, action) in scenario.setup.iter().enumerate() {
                if let Err(e) = self.execute_action(action, world) {
                    let msg = format!("Setup action {} failed: {}", idx, e);
                    self.log(&msg);
                    return Err(anyhow!(msg));
                }
            }
        }

        self.log(&format!("Running {} main actions", scenario.actions.len()));
        for (idx, action) in scenario.actions.iter().enumerate() {
            if let Err(e) = self.execute_action(action, world) {
                let msg = format!("Action {} failed: {}", idx, e);
                self.log(&msg);
                return Err(anyhow!(msg));
            }
        }
        report.actions_executed = scenario.setup.len() + scenario.actions.len();

        if !scenario.verify.is_empty() {
            self.log(&format!("Running {} verifications", scenario.verify.len()));
            for condition in &scenario.verify {
                let result = condition.evaluate(world);
                self.log(&format!(
                    "  {} {}",
                    if result.passed { "✓" } else { "✗" },
                    result.message
                ));
                report.verifications.push(result);
            }
        }

        report.ticks_executed = self.tick_count;
        report.final_tile_count = world.tile_count();
        report.stats = *world.stats();
        report.passed = report.success();

        report.performance.total_duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
        if !self.tick_times.is_empty() {
            let total: f64 = self.tick_times.iter().sum();
            report.performance.avg_tick_time_ms = total / self.tick_times.len() as f64;
            report.performance.peak_tick_time_ms =
                self.tick_times.iter().copied().fold(0.0, f64::max);
        }

        self.log(&format!(
            "Scenario complete: {} ({} ticks)",
            if report.passed { "PASSED" } else { "FAILED" },
            self.tick_count
        ));
        self.log(&format!("  Performance: {}", report.performance.summary()));
        report.log = self.log.clone();

        Ok(report)
    }

    /// Execute a single action
    fn execute_action(&mut self, action: &ScenarioAction, world: &mut World) -> Result<()> {
        if self.config.verbose {
            self.log(&format!("[Tick {}] {:?}", world.tick_count(), action));
        }

        match action {
            ScenarioAction::Place { material, x, y } => {
                let pen = PenTool::new(resolve(world, material)?);
                let placed = pen.apply(world, *x, *y, Brush::Single);
                self.log(&format!("  Placed {} at ({}, {}): {}", material, x, y, placed));
            }

            ScenarioAction::Stamp { material, x, y } => {
                let pen = PenTool::new(resolve(world, material)?);
                let placed = pen.apply(world, *x, *y, Brush::Stamp);
                self.log(&format!(
                    "  Stamped {} at ({}, {}): {} placed",
                    material, x, y, placed
                ));
            }

            ScenarioAction::FillRect {
                material,
                min_x,
                min_y,
                max_x,
                max_y,
            } => {
                let pen = PenTool::new(resolve(world, material)?);
                let mut placed = 0;
                for y in *min_y..=*max_y {
                    for x in *min_x..=*max_x {
                        placed += pen.apply(world, x, y, Brush::Single);
                    }
                }
                self.log(&format!(
                    "  Filled rect ({},{}) to ({},{}) with {}: {} placed",
                    min_x, min_y, max_x, max_y, material, placed
                ));
            }

            ScenarioAction::Remove { x, y } => {
                let removed = EraseTool.apply(world, *x, *y, Brush::Single);
                self.log(&format!("  Removed ({}, {}): {}", x, y, removed));
            }

            ScenarioAction::EraseStamp { x, y } => {
                let removed = EraseTool.apply(world, *x, *y, Brush::Stamp);
                self.log(&format!("  Erased around ({}, {}): {} removed", x, y, removed));
            }

            ScenarioAction::SetHeat { x, y, heat } => {
                if world.set_heat(*x, *y, *heat) {
                    self.log(&format!("  Set heat at ({}, {}) to {}", x, y, heat));
                } else {
                    self.log(&format!("  No thermal tile at ({}, {})", x, y));
                }
            }

            ScenarioAction::RunTicks { ticks } => {
                self.run_ticks(world, *ticks);
                self.log(&format!("  Ran {} ticks (now at {})", ticks, world.tick_count()));
            }

            ScenarioAction::Log { message } => {
                self.log(&format!("  [USER] {}", message));
            }
        }

        Ok(())
    }

    fn run_ticks(&mut self, world: &mut World, ticks: u64) {
        for _ in 0..ticks {
            let tick_start = Instant::now();
            world.tick();
            self.tick_times.push(tick_start.elapsed().as_secs_f64() * 1000.0);
            self.tick_count += 1;
        }
    }

    fn log(&mut self, message: &str) {
        log::info!("{}", message);
        self.log.push(message.to_string());
    }
}

impl Default for ScenarioExecutor {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve(world: &World, name: &str) -> Result<MaterialId> {
    world
        .materials()
        .id(name)
        .ok_or_else(|| anyhow!("Unknown material {name:?}"))
}
