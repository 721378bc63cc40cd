//! Execution results and reporting

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tilesand_core::world::WorldStats;

use super::verification::VerificationResult;

/// Timing for a scenario execution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Total wall-clock time (milliseconds)
    pub total_duration_ms: f64,

    /// Average time per tick (milliseconds)
    pub avg_tick_time_ms: f64,

    /// Peak tick time (milliseconds)
    pub peak_tick_time_ms: f64,
}

impl PerformanceMetrics {
    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "Total: {:.1}ms | Avg tick: {:.3}ms | Peak: {:.3}ms",
            self.total_duration_ms, self.avg_tick_time_ms, self.peak_tick_time_ms
        )
    }
}

/// Report from scenario execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario name
    pub scenario_name: String,

    /// Overall pass/fail status
    pub passed: bool,

    /// Simulation ticks executed
    pub ticks_executed: u64,

    /// Number of actions executed
    pub actions_executed: usize,

    /// Tiles on the grid after the last action
    pub final_tile_count: usize,

    /// World counters after the last action
    pub stats: WorldStats,

    /// Every verification outcome, in declaration order
    pub verifications: Vec<VerificationResult>,

    /// Execution log messages
    pub log: Vec<String>,

    pub performance: PerformanceMetrics,
}

impl ScenarioReport {
    pub fn new(scenario_name: String) -> Self {
        Self {
            scenario_name,
            passed: false,
            ticks_executed: 0,
            actions_executed: 0,
            final_tile_count: 0,
            stats: WorldStats::default(),
            verifications: Vec::new(),
            log: Vec::new(),
            performance: PerformanceMetrics::default(),
        }
    }

    /// Verifications that did not pass
    pub fn failures(&self) -> impl Iterator<Item = &VerificationResult> {
        self.verifications.iter().filter(|result| !result.passed)
    }

    /// Check if all verifications passed
    pub fn success(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize scenario report to RON")
    }

    /// Save report to RON file
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<()> {
        let ron = self.to_ron_string()?;

        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path.as_ref(), ron).with_context(|| {
            format!("Failed to write scenario report: {}", path.as_ref().display())
        })?;

        Ok(())
    }
}
