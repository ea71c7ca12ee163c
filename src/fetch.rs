use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, warn};

use crate::calendar::article_title;
use crate::error::FetchError;
use crate::settings::Settings;

/// Something that can produce the raw extract for a calendar day.
///
/// Implementations swallow their own failures: an empty string means "nothing usable".
pub trait ExtractSource {
    fn fetch(&self, date: NaiveDate) -> impl Future<Output = String> + Send;
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    query: Query,
}

#[derive(Debug, Deserialize)]
struct Query {
    #[serde(default)]
    pages: HashMap<String, Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    extract: String,
}

/// MediaWiki `prop=extracts` client for the Russian day pages.
#[derive(Debug, Clone)]
pub struct WikiClient {
    http: reqwest::Client,
    api_url: String,
}

impl WikiClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(WikiClient {
            http,
            api_url: settings.api_url.clone(),
        })
    }

    async fn try_fetch(&self, title: &str) -> Result<String, FetchError> {
        info!("Fetching extract: {}", title);
        let response = self
            .http
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("prop", "extracts"),
                ("exlimit", "1"),
                ("explaintext", "1"),
                ("titles", title),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }
        let body = response.text().await?;
        extract_from_body(&body)
    }
}

/// Pull the single page's extract out of an API response body.
fn extract_from_body(body: &str) -> Result<String, FetchError> {
    let parsed: ApiResponse = serde_json::from_str(body)?;
    let count = parsed.query.pages.len();
    if count != 1 {
        return Err(FetchError::PageCount(count));
    }
    Ok(parsed
        .query
        .pages
        .into_values()
        .next()
        .map(|page| page.extract)
        .unwrap_or_default())
}

impl ExtractSource for WikiClient {
    async fn fetch(&self, date: NaiveDate) -> String {
        let title = article_title(date);
        match self.try_fetch(&title).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Fetch failed for {}: {}", title, e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_page_extract() {
        let body = r#"{"batchcomplete":"","query":{"pages":{"12345":{"pageid":12345,"ns":0,"title":"7 января","extract":"== Приметы ==\nСвятки"}}}}"#;
        assert_eq!(extract_from_body(body).unwrap(), "== Приметы ==\nСвятки");
    }

    #[test]
    fn missing_extract_is_empty() {
        let body = r#"{"query":{"pages":{"-1":{"ns":0,"title":"32 января","missing":""}}}}"#;
        assert_eq!(extract_from_body(body).unwrap(), "");
    }

    #[test]
    fn page_count_must_be_one() {
        let none = r#"{"query":{"pages":{}}}"#;
        assert!(matches!(extract_from_body(none), Err(FetchError::PageCount(0))));

        let two = r#"{"query":{"pages":{"1":{"extract":"a"},"2":{"extract":"b"}}}}"#;
        assert!(matches!(extract_from_body(two), Err(FetchError::PageCount(2))));
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(extract_from_body("<html>"), Err(FetchError::Json(_))));
    }

    #[tokio::test]
    async fn unreachable_host_collapses_to_empty() {
        let settings = Settings {
            api_url: "http://127.0.0.1:9/w/api.php".into(),
            timeout_secs: 2,
            ..Default::default()
        };
        let client = WikiClient::new(&settings).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap();
        assert_eq!(client.fetch(date).await, "");
    }
}
