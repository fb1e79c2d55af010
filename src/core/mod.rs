mod engine;
mod types;

pub use engine::{compare_scenarios, downsample, project, simulate, summarize};
pub use types::{
    DEFAULT_SCENARIO_RATES, MAX_PERIOD_MONTHS, MIN_PERIOD_MONTHS, MonthlySnapshot,
    ProjectionParameters, ProjectionResult, ProjectionSummary, ScenarioResult,
};
