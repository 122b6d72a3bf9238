use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Why a single lookup did not produce records.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("No API key configured, pass --token or set HIBP_API_KEY")]
    MissingApiKey,

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("Still rate limited after {attempts} attempt(s)")]
    RateLimited { attempts: u32 },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response body: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

/// Conditions that abort the whole run before any lookup happens.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unable to create {path}, please create it manually and rerun: {source}")]
    OutputFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to read user file {path}: {source}")]
    SubjectList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
