use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::core::{
    DEFAULT_SCENARIO_RATES, ProjectionParameters, ProjectionResult, ScenarioResult,
    compare_scenarios, project,
};
use crate::error::{Error, Result};

const DEFAULT_INITIAL_VALUE: f64 = 1_000.0;
const DEFAULT_MONTHLY_CONTRIBUTION: f64 = 100.0;
const DEFAULT_ANNUAL_RATE: f64 = 10.0;
const DEFAULT_PERIOD_MONTHS: i64 = 120;
const MAX_SCENARIO_RATES: usize = 16;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    initial_value: Option<f64>,
    monthly_contribution: Option<f64>,
    annual_rate: Option<f64>,
    period_months: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ScenariosPayload {
    #[serde(flatten)]
    params: ProjectPayload,
    rates: Option<Vec<f64>>,
}

#[derive(Parser, Debug)]
#[command(
    name = "compound",
    about = "Compound growth projection with monthly contributions and rate scenarios"
)]
struct Cli {
    #[arg(
        long,
        default_value_t = DEFAULT_INITIAL_VALUE,
        allow_negative_numbers = true,
        help = "Starting balance"
    )]
    initial_value: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_MONTHLY_CONTRIBUTION,
        allow_negative_numbers = true,
        help = "Amount added at the end of every month"
    )]
    monthly_contribution: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_ANNUAL_RATE,
        allow_negative_numbers = true,
        help = "Nominal annual rate in percent, e.g. 10"
    )]
    annual_rate: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_PERIOD_MONTHS,
        allow_negative_numbers = true,
        help = "Projection length in months, clamped to 1..=1200"
    )]
    period_months: i64,
    #[arg(long, help = "Pretty-print the JSON result")]
    pretty: bool,
}

#[derive(Debug)]
struct ScenariosRequest {
    params: ProjectionParameters,
    rates: Vec<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScenariosResponse {
    period_months: u32,
    scenarios: Vec<ScenarioResult>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Parses `args` (program name first) and returns the projection as JSON.
pub fn run_cli<I, T>(args: I) -> Result<String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;
    let params = build_parameters(&cli)?;
    let result = run_projection(&params);

    let json = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    Ok(json)
}

fn build_parameters(cli: &Cli) -> Result<ProjectionParameters> {
    Ok(ProjectionParameters {
        initial_value: ensure_finite("initialValue", cli.initial_value)?,
        monthly_contribution: ensure_finite("monthlyContribution", cli.monthly_contribution)?,
        annual_rate: ensure_finite("annualRate", cli.annual_rate)?,
        period_months: cli.period_months,
    })
}

// Negative amounts and rates pass through; only NaN and infinities are refused.
fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFinite { field, value })
    }
}

fn default_cli_for_api() -> Cli {
    Cli {
        initial_value: DEFAULT_INITIAL_VALUE,
        monthly_contribution: DEFAULT_MONTHLY_CONTRIBUTION,
        annual_rate: DEFAULT_ANNUAL_RATE,
        period_months: DEFAULT_PERIOD_MONTHS,
        pretty: false,
    }
}

fn params_from_payload(payload: ProjectPayload) -> Result<ProjectionParameters> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.initial_value {
        cli.initial_value = v;
    }
    if let Some(v) = payload.monthly_contribution {
        cli.monthly_contribution = v;
    }
    if let Some(v) = payload.annual_rate {
        cli.annual_rate = v;
    }
    if let Some(v) = payload.period_months {
        cli.period_months = v;
    }

    build_parameters(&cli)
}

fn scenarios_request_from_payload(payload: ScenariosPayload) -> Result<ScenariosRequest> {
    let params = params_from_payload(payload.params)?;
    let rates = match payload.rates {
        None => DEFAULT_SCENARIO_RATES.to_vec(),
        Some(rates) if rates.is_empty() => return Err(Error::EmptyRates),
        Some(rates) if rates.len() > MAX_SCENARIO_RATES => {
            return Err(Error::TooManyRates {
                count: rates.len(),
                max: MAX_SCENARIO_RATES,
            });
        }
        Some(rates) => rates
            .into_iter()
            .map(|rate| ensure_finite("rates", rate))
            .collect::<Result<Vec<_>>>()?,
    };

    Ok(ScenariosRequest { params, rates })
}

fn run_projection(params: &ProjectionParameters) -> ProjectionResult {
    let result = project(params);
    let summary = result.summary();
    tracing::debug!(
        months = result.full_data.len(),
        chart_points = result.chart_data.len(),
        final_balance = summary.final_balance,
        roi = summary.roi,
        "projection computed"
    );
    result
}

fn router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route("/api/scenarios", post(scenarios_handler))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_http_server(port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("projection API listening on http://{addr}");
    tracing::info!("local access: http://127.0.0.1:{port}/api/project");

    axum::serve(listener, router()).await?;
    Ok(())
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    json_response(
        StatusCode::NOT_FOUND,
        ErrorResponse {
            error: "Not found".to_string(),
        },
    )
}

async fn project_get_handler(
    payload: std::result::Result<Query<ProjectPayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => project_handler_impl(payload),
        Err(rejection) => error_response(&Error::BadRequest(rejection.body_text())),
    }
}

async fn project_post_handler(
    payload: std::result::Result<Json<ProjectPayload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => project_handler_impl(payload),
        Err(rejection) => error_response(&Error::BadRequest(rejection.body_text())),
    }
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    match params_from_payload(payload) {
        Ok(params) => json_response(StatusCode::OK, run_projection(&params)),
        Err(err) => error_response(&err),
    }
}

async fn scenarios_handler(
    payload: std::result::Result<Json<ScenariosPayload>, JsonRejection>,
) -> Response {
    let request = match payload
        .map_err(|rejection| Error::BadRequest(rejection.body_text()))
        .and_then(|Json(payload)| scenarios_request_from_payload(payload))
    {
        Ok(request) => request,
        Err(err) => return error_response(&err),
    };

    let response = ScenariosResponse {
        period_months: request.params.safe_period(),
        scenarios: compare_scenarios(&request.params, &request.rates),
    };
    json_response(StatusCode::OK, response)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(err: &Error) -> Response {
    tracing::warn!(error = %err, "rejected projection request");
    json_response(
        err.status_code(),
        ErrorResponse {
            error: err.to_string(),
        },
    )
}
