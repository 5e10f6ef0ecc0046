// One-shot JSON GET shared by both repository adapters
use crate::domain::error::{GraphError, Result};
use reqwest::Url;
use std::time::Duration;

/// Upstream error pages can be arbitrarily large; keep only a prefix.
const MAX_ERROR_BODY_CHARS: usize = 256;

fn error_body_excerpt(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}... ({} bytes total)", &body[..cut], body.len()),
        None => body.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct JsonHttpClient {
    client: reqwest::Client,
}

impl JsonHttpClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GraphError::Fetch {
                url: String::new(),
                reason: format!("could not build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }

    /// Build `base` with `params` appended as a query string.
    pub fn url_with_params(base: &str, params: &[(&str, String)]) -> Result<Url> {
        Url::parse_with_params(base, params).map_err(|e| GraphError::Fetch {
            url: base.to_string(),
            reason: format!("invalid url: {}", e),
        })
    }

    /// Issue exactly one GET. Transport errors, non-2xx statuses and bodies that
    /// are not JSON all come back as [`GraphError::Fetch`].
    pub async fn get_json(&self, url: Url) -> Result<serde_json::Value> {
        let url_text = url.to_string();
        tracing::debug!("GET {}", url_text);

        let fetch_error = |reason: String| GraphError::Fetch {
            url: url_text.clone(),
            reason,
        };

        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| fetch_error(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(fetch_error(format!(
                "status {}: {}",
                status,
                error_body_excerpt(&body)
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| fetch_error(format!("failed to read body: {}", e)))?;

        serde_json::from_str(&body).map_err(|e| fetch_error(format!("malformed JSON: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_with_params_encodes_values() {
        let url = JsonHttpClient::url_with_params(
            "http://localhost:9001/",
            &[
                ("property_x", "Temperature".to_string()),
                ("property_y", "Seebeck coefficient".to_string()),
                ("date_from", "2024-01-01T00:00:00+09:00".to_string()),
            ],
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "http://localhost:9001/?property_x=Temperature&property_y=Seebeck+coefficient&date_from=2024-01-01T00%3A00%3A00%2B09%3A00"
        );
    }

    #[test]
    fn test_url_with_params_rejects_garbage() {
        let err = JsonHttpClient::url_with_params("not a url", &[]).unwrap_err();
        assert!(matches!(err, GraphError::Fetch { .. }));
    }

    #[test]
    fn test_error_body_excerpt_keeps_short_bodies() {
        assert_eq!(error_body_excerpt("  no such pair\n"), "no such pair");
    }

    #[test]
    fn test_error_body_excerpt_cuts_long_bodies() {
        let body = "é".repeat(10_000);
        let excerpt = error_body_excerpt(&body);

        assert!(excerpt.starts_with(&"é".repeat(MAX_ERROR_BODY_CHARS)));
        assert!(excerpt.ends_with("... (20000 bytes total)"));
        assert!(excerpt.chars().count() < MAX_ERROR_BODY_CHARS + 32);
    }
}
