use serde::Serialize;

pub const MIN_PERIOD_MONTHS: u32 = 1;
pub const MAX_PERIOD_MONTHS: u32 = 1200;

/// Annual rates (percent) every projection is compared against.
pub const DEFAULT_SCENARIO_RATES: [f64; 4] = [5.0, 10.0, 15.0, 20.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParameters {
    pub initial_value: f64,
    pub monthly_contribution: f64,
    /// Nominal annual rate in percent, e.g. `10.0` for 10%/year.
    pub annual_rate: f64,
    /// Requested length; anything outside `1..=1200` is clamped, not rejected.
    pub period_months: i64,
}

impl ProjectionParameters {
    pub fn safe_period(&self) -> u32 {
        self.period_months
            .clamp(i64::from(MIN_PERIOD_MONTHS), i64::from(MAX_PERIOD_MONTHS)) as u32
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / 12.0 / 100.0
    }

    pub fn with_annual_rate(self, annual_rate: f64) -> Self {
        Self {
            annual_rate,
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySnapshot {
    pub month: u32,
    pub label: String,
    pub balance: f64,
    pub invested: f64,
    /// Cumulative interest to date, always `balance - invested`.
    pub interest: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub rate: f64,
    pub balance: f64,
    pub interest: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub final_balance: f64,
    pub total_invested: f64,
    pub total_interest: f64,
    pub roi: f64,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub final_balance: f64,
    pub total_invested: f64,
    pub total_interest: f64,
    pub roi: f64,
    pub multiplier: f64,
    pub chart_data: Vec<MonthlySnapshot>,
    pub full_data: Vec<MonthlySnapshot>,
    pub scenarios: Vec<ScenarioResult>,
}

impl ProjectionResult {
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary {
            final_balance: self.final_balance,
            total_invested: self.total_invested,
            total_interest: self.total_interest,
            roi: self.roi,
            multiplier: self.multiplier,
        }
    }
}
