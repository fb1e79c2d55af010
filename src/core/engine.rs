use super::types::{
    DEFAULT_SCENARIO_RATES, MonthlySnapshot, ProjectionParameters, ProjectionResult,
    ProjectionSummary, ScenarioResult,
};

pub fn project(params: &ProjectionParameters) -> ProjectionResult {
    let full_data = simulate(params);
    let summary = summarize(&full_data, params.initial_value);
    let chart_data = downsample(&full_data);
    let scenarios = compare_scenarios(params, &DEFAULT_SCENARIO_RATES);

    ProjectionResult {
        final_balance: summary.final_balance,
        total_invested: summary.total_invested,
        total_interest: summary.total_interest,
        roi: summary.roi,
        multiplier: summary.multiplier,
        chart_data,
        full_data,
        scenarios,
    }
}

/// Month-by-month balances for the primary parameter set.
///
/// Each month earns interest on the balance carried in from the previous
/// month; that month's contribution is added afterwards and only starts
/// compounding the month after.
pub fn simulate(params: &ProjectionParameters) -> Vec<MonthlySnapshot> {
    let rate = params.monthly_rate();
    let contribution = params.monthly_contribution;
    let mut balance = params.initial_value;
    let mut invested = params.initial_value;

    (1..=params.safe_period())
        .map(|month| {
            balance = advance_month(balance, rate, contribution);
            invested += contribution;
            MonthlySnapshot {
                month,
                label: month_label(month),
                balance,
                invested,
                interest: balance - invested,
            }
        })
        .collect()
}

pub fn summarize(series: &[MonthlySnapshot], initial_value: f64) -> ProjectionSummary {
    let (final_balance, total_invested) = series
        .last()
        .map(|last| (last.balance, last.invested))
        .unwrap_or((initial_value, initial_value));
    let total_interest = final_balance - total_invested;

    let (roi, multiplier) = if total_invested > 0.0 {
        (
            total_interest / total_invested * 100.0,
            final_balance / total_invested,
        )
    } else {
        (0.0, 0.0)
    };

    ProjectionSummary {
        final_balance,
        total_invested,
        total_interest,
        roi,
        multiplier,
    }
}

/// Chart-sized subset of `series`. The last snapshot is kept in every tier,
/// not only above 120 months, so the plotted endpoint matches the reported
/// final balance.
pub fn downsample(series: &[MonthlySnapshot]) -> Vec<MonthlySnapshot> {
    let stride = sampling_stride(series.len());
    let mut chart = series.iter().step_by(stride).cloned().collect::<Vec<_>>();

    let last_index = series.len().saturating_sub(1);
    if last_index % stride != 0 {
        if let Some(last) = series.last() {
            chart.push(last.clone());
        }
    }
    chart
}

pub fn compare_scenarios(params: &ProjectionParameters, rates: &[f64]) -> Vec<ScenarioResult> {
    let months = params.safe_period();
    let principal = params.initial_value + params.monthly_contribution * f64::from(months);

    rates
        .iter()
        .map(|&rate| {
            let balance = final_balance(&params.with_annual_rate(rate), months);
            ScenarioResult {
                rate,
                balance,
                interest: balance - principal,
            }
        })
        .collect()
}

fn final_balance(params: &ProjectionParameters, months: u32) -> f64 {
    let rate = params.monthly_rate();
    (0..months).fold(params.initial_value, |balance, _| {
        advance_month(balance, rate, params.monthly_contribution)
    })
}

fn advance_month(balance: f64, monthly_rate: f64, contribution: f64) -> f64 {
    let interest = balance * monthly_rate;
    balance + interest + contribution
}

fn sampling_stride(len: usize) -> usize {
    match len {
        0..=24 => 1,
        25..=60 => 3,
        61..=120 => 6,
        _ => 12,
    }
}

fn month_label(month: u32) -> String {
    format!("Month {month}")
}
