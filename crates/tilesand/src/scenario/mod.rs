//! RON scenarios: scripted edits, tick runs and verification of the result

mod actions;
mod definition;
mod executor;
mod results;
mod verification;

pub use actions::ScenarioAction;
pub use definition::ScenarioDefinition;
pub use executor::{ScenarioExecutor, ScenarioExecutorConfig};
pub use results::{PerformanceMetrics, ScenarioReport};
pub use verification::{Region, VerificationCondition, VerificationResult};
