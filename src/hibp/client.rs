use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::backoff::RetryPolicy;
use super::{AccountSource, QueryOutcome, Record, Resource};
use crate::config::{API_KEY_HEADER, USER_AGENT};
use crate::error::QueryError;
use crate::subjects::Subject;

/// Credentials and knobs for [`HibpClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub retry: RetryPolicy,
}

/// Have I Been Pwned v3 client.
///
/// Rate-limited responses (429) are absorbed: the client sleeps for the
/// server's hint, or a capped linear fallback, and re-sends the same request.
pub struct HibpClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    retry: RetryPolicy,
}

impl HibpClient {
    pub fn new(settings: ClientSettings) -> anyhow::Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.filter(|k| !k.trim().is_empty()),
            retry: settings.retry,
        })
    }

    fn url_for(&self, resource: Resource, subject: &Subject) -> String {
        format!(
            "{}/api/v3/{}/{}",
            self.base_url,
            resource.path_segment(),
            subject.url_encoded()
        )
    }
}

/// Body of a non-200 response, or a note saying why it could not be read.
fn body_or_note(read: Result<String, reqwest::Error>) -> String {
    match read {
        Ok(body) => body,
        Err(e) => {
            warn!("Failed to read response body: {}", e);
            format!("<unreadable body: {e}>")
        }
    }
}

fn parse_records(body: &str) -> Result<QueryOutcome, QueryError> {
    if body.trim().is_empty() {
        return Ok(QueryOutcome::NoData);
    }
    let records: Vec<Record> = serde_json::from_str(body)?;
    if records.is_empty() {
        Ok(QueryOutcome::NoData)
    } else {
        Ok(QueryOutcome::Records(records))
    }
}

#[async_trait]
impl AccountSource for HibpClient {
    async fn query(
        &self,
        resource: Resource,
        subject: &Subject,
    ) -> Result<QueryOutcome, QueryError> {
        let api_key = self.api_key.as_deref().ok_or(QueryError::MissingApiKey)?;
        let url = self.url_for(resource, subject);
        let mut attempt: u32 = 1;

        loop {
            debug!("GET {} (attempt {})", url, attempt);
            let resp = self
                .client
                .get(url.as_str())
                .header(API_KEY_HEADER, api_key)
                .query(&[("truncateResponse", "false")])
                .send()
                .await?;

            let status = resp.status();
            match status {
                StatusCode::NOT_FOUND => {
                    debug!("No {} for {}", resource, subject);
                    return Ok(QueryOutcome::NoData);
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    let body = body_or_note(resp.text().await);
                    if !self.retry.allows_retry(attempt) {
                        return Err(QueryError::RateLimited { attempts: attempt });
                    }
                    let wait = self.retry.delay_for(&body, attempt);
                    warn!(
                        "Rate limited fetching {} for {} (attempt {}), retrying in {:?}",
                        resource, subject, attempt, wait
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                StatusCode::OK => {
                    let body = resp.text().await?;
                    return parse_records(&body);
                }
                _ => {
                    let body = body_or_note(resp.text().await);
                    return Err(QueryError::UnexpectedStatus { status, body });
                }
            }
        }
    }
}
