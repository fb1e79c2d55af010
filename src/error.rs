use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error("rates must contain at least one entry")]
    EmptyRates,

    #[error("rates may contain at most {max} entries, got {count}")]
    TooManyRates { count: usize, max: usize },

    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NonFinite { .. }
            | Error::BadRequest(_)
            | Error::EmptyRates
            | Error::TooManyRates { .. } => StatusCode::BAD_REQUEST,
            Error::Cli(_) | Error::Json(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
