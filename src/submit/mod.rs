use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, Retry};

use crate::config::WebhookConfig;
use crate::contact::ContactDetails;
use crate::scoring::ProfileResult;

const DEFAULT_SOURCE: &str = "palate quiz";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A validated delivery target, built from config at startup.
#[derive(Debug, Clone)]
pub struct WebhookTarget {
    pub url: String,
    pub source: String,
    pub timeout: Duration,
}

impl WebhookTarget {
    /// Resolve defaults and parse the timeout string. A bad timeout is a
    /// configuration error and must be caught before the quiz starts.
    pub fn from_config(config: &WebhookConfig) -> Result<Self> {
        let timeout = match &config.timeout {
            Some(raw) => humantime::parse_duration(raw)
                .map_err(|e| anyhow!("webhook.timeout: invalid duration '{}' - {}", raw, e))?,
            None => DEFAULT_TIMEOUT,
        };
        if config.url.trim().is_empty() {
            return Err(anyhow!("webhook.url: must not be empty"));
        }
        Ok(Self {
            url: config.url.clone(),
            source: config
                .source
                .clone()
                .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            timeout,
        })
    }
}

/// Build the lead payload handed to the webhook. The profile result is
/// computed before delivery starts and is included verbatim; delivery
/// failure never changes what the user was shown.
pub fn build_payload(
    contact: &ContactDetails,
    result: &ProfileResult,
    source: &str,
    submitted_at: DateTime<Utc>,
) -> serde_json::Value {
    serde_json::json!({
        "name": contact.name.trim(),
        "email": contact.email.trim(),
        "whatsapp": contact.whatsapp.trim(),
        "profile": result.name,
        "profile_description": result.description,
        "source": source,
        "submitted_at": submitted_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

/// POST the payload, retrying transient failures with exponential backoff
/// (3 attempts, 100ms base, 5s cap). A non-success status is an error.
pub async fn deliver(target: &WebhookTarget, payload: &serde_json::Value) -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(target.timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let retry_strategy = ExponentialBackoff::from_millis(100)
        .max_delay(Duration::from_secs(5))
        .take(3);

    Retry::spawn(retry_strategy, || async {
        let response = client
            .post(&target.url)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("Failed to reach webhook at {}", target.url))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(anyhow!("Webhook responded with status {}", status))
        }
    })
    .await
}
