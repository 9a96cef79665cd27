use thiserror::Error;

use crate::models::ResultCode;

pub type Result<T> = std::result::Result<T, LoaderError>;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Missing or invalid parameters: {0}")]
    MissingParameters(String),

    #[error("SOS endpoint failure: {0}")]
    EndpointFailure(String),

    #[error("Result template failure: {0}")]
    TemplateFailure(String),

    #[error("Observation parse failure: {0}")]
    ParseFailure(String),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl LoaderError {
    /// Map an error to the exit status reported for the run.
    pub fn result_code(&self) -> ResultCode {
        match self {
            LoaderError::MissingParameters(_)
            | LoaderError::Config(_)
            | LoaderError::Validation(_) => ResultCode::MissingParameters,
            LoaderError::EndpointFailure(_) | LoaderError::HttpClient(_) => {
                ResultCode::EndpointFailure
            }
            LoaderError::TemplateFailure(_) => ResultCode::TemplateFailure,
            LoaderError::ParseFailure(_) | LoaderError::Io(_) | LoaderError::Csv(_) => {
                ResultCode::ParseFailure
            }
        }
    }
}
