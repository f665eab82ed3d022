use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{Value, json};

use crate::core::AppConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// The current endpoint serves everything except photo albums, which
/// are only available from the legacy endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Current,
    Legacy,
}

#[derive(Debug, Clone)]
pub struct MeetupClient {
    http: Client,
    api_url: String,
    legacy_api_url: String,
    verbose: bool,
}

impl MeetupClient {
    pub fn new(http: Client, api_url: &str, legacy_api_url: &str, verbose: bool) -> Self {
        Self {
            http,
            api_url: api_url.to_string(),
            legacy_api_url: legacy_api_url.to_string(),
            verbose,
        }
    }

    pub fn from_config(http: Client, config: &AppConfig) -> Self {
        Self::new(http, &config.api_url, &config.legacy_api_url, config.verbose)
    }

    fn url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Current => &self.api_url,
            Endpoint::Legacy => &self.legacy_api_url,
        }
    }

    /// POST `{query, variables}` and return the parsed JSON body
    /// unchanged. Non-2xx responses fail with the status and body
    /// text. There are no retries.
    pub async fn query(&self, query: &str, variables: Value, endpoint: Endpoint) -> Result<Value> {
        let url = self.url(endpoint);
        let payload = json!({
            "query": query,
            "variables": variables,
        });
        let res = self
            .http
            .post(url)
            .header("Content-Type", "application/json")
            .timeout(REQUEST_TIMEOUT)
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;
        let status = res.status();
        let text = res
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {} ({})", url, status))?;
        if !status.is_success() {
            anyhow::bail!("GraphQL query failed: {} ({})", status, text);
        }

        let body: Value = serde_json::from_str(&text)
            .with_context(|| format!("Response from {} was not valid JSON", url))?;
        if self.verbose {
            tracing::debug!("Response from {}: {}", url, body);
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use std::io::Write;

    fn client(server_url: &str) -> MeetupClient {
        MeetupClient::new(
            Client::new(),
            &format!("{}/gql-ext", server_url),
            &format!("{}/gql", server_url),
            false,
        )
    }

    #[tokio::test]
    async fn test_query_posts_query_and_variables() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/gql-ext")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "query": "query { ping }",
                "variables": {"eventId": "42"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"ping": "pong"}}"#)
            .create_async()
            .await;

        let resp = client(&server.url())
            .query("query { ping }", json!({"eventId": "42"}), Endpoint::Current)
            .await
            .unwrap();
        assert_eq!(resp, json!({"data": {"ping": "pong"}}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_query_routes_legacy_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let legacy = server
            .mock("POST", "/gql")
            .with_status(200)
            .with_body(r#"{"data": {}}"#)
            .expect(1)
            .create_async()
            .await;
        let current = server
            .mock("POST", "/gql-ext")
            .expect(0)
            .create_async()
            .await;

        client(&server.url())
            .query("query { ping }", json!({}), Endpoint::Legacy)
            .await
            .unwrap();
        legacy.assert_async().await;
        current.assert_async().await;
    }

    #[tokio::test]
    async fn test_query_error_includes_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/gql-ext")
            .with_status(503)
            .with_body("upstream unavailable")
            .create_async()
            .await;

        let err = client(&server.url())
            .query("query { ping }", json!({}), Endpoint::Current)
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("503"));
        assert!(message.contains("upstream unavailable"));
    }

    #[tokio::test]
    async fn test_query_reports_truncated_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/gql-ext")
            .with_status(200)
            .with_chunked_body(|w| {
                w.write_all(br#"{"data": {"ev"#)?;
                Err(std::io::Error::other("connection dropped"))
            })
            .create_async()
            .await;

        let err = client(&server.url())
            .query("query { ping }", json!({}), Endpoint::Current)
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Failed to read response body"), "{message}");
        assert!(!message.contains("not valid JSON"));
    }
}
