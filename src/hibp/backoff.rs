use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;

use crate::config::{FALLBACK_PLATEAU, FALLBACK_STEP};

static RETRY_HINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Rate limit is exceeded\. Try again in (.*?) seconds\.")
        .expect("retry hint pattern is valid")
});

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Extract the server-mandated wait from a 429 body.
///
/// The service answers `{"statusCode":429,"message":"Rate limit is exceeded.
/// Try again in 2 seconds."}`. Non-JSON bodies are searched as plain text.
pub fn parse_retry_hint(body: &str) -> Option<Duration> {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { message: Some(m) }) => m,
        Ok(_) => return None,
        Err(_) => body.to_string(),
    };
    let captured = RETRY_HINT.captures(&message)?.get(1)?.as_str();
    captured.trim().parse::<u64>().ok().map(Duration::from_secs)
}

/// How long to wait after a 429, and whether to give up.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Fallback wait is `step * min(attempt, plateau)`.
    pub fallback_step: Duration,
    pub plateau: u32,
    /// Ceiling on rate-limited retries. `None` retries until the limit lifts.
    pub max_retries: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            fallback_step: FALLBACK_STEP,
            plateau: FALLBACK_PLATEAU,
            max_retries: None,
        }
    }
}

impl RetryPolicy {
    /// Wait used when the 429 body carries no parseable hint. `attempt` is 1-based.
    pub fn fallback_delay(&self, attempt: u32) -> Duration {
        self.fallback_step * attempt.clamp(1, self.plateau.max(1))
    }

    /// Wait before re-issuing the request that just got a 429 on `attempt`.
    pub fn delay_for(&self, body: &str, attempt: u32) -> Duration {
        parse_retry_hint(body).unwrap_or_else(|| self.fallback_delay(attempt))
    }

    /// `attempt` requests have been rate limited; may another be sent?
    pub fn allows_retry(&self, attempt: u32) -> bool {
        self.max_retries.is_none_or(|max| attempt <= max)
    }
}
