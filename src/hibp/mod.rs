pub mod backoff;
pub mod client;

use std::fmt;

use async_trait::async_trait;

use crate::error::QueryError;
use crate::subjects::Subject;

/// One JSON object as returned by the service. Field sets vary by resource.
pub type Record = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Breaches,
    Pastes,
}

impl Resource {
    /// Path segment under `/api/v3/`.
    pub fn path_segment(self) -> &'static str {
        match self {
            Resource::Breaches => "breachedaccount",
            Resource::Pastes => "pasteaccount",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Breaches => write!(f, "breaches"),
            Resource::Pastes => write!(f, "pastes"),
        }
    }
}

/// Successful lookup result.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The subject has no records of this type (404, empty body or `[]`).
    NoData,
    Records(Vec<Record>),
}

impl QueryOutcome {
    pub fn into_records(self) -> Vec<Record> {
        match self {
            QueryOutcome::NoData => Vec::new(),
            QueryOutcome::Records(records) => records,
        }
    }
}

/// Anything that can answer "which records exist for this subject".
#[async_trait]
pub trait AccountSource: Send + Sync {
    async fn query(
        &self,
        resource: Resource,
        subject: &Subject,
    ) -> Result<QueryOutcome, QueryError>;
}
