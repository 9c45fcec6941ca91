//! Google Sheets data source

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    config::SheetsConfig,
    error::{AppError, AppResult},
    models::row::RowRecord,
};

/// Longest slice of an upstream error body echoed into our own error
const BODY_EXCERPT_LEN: usize = 200;

/// Source of spreadsheet rows.
///
/// A failed fetch is an error; an empty range is `Ok(vec![])`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SheetSource: Send + Sync {
    async fn fetch(&self, spreadsheet_id: &str, range: &str) -> AppResult<Vec<RowRecord>>;
}

/// Body of `GET /v4/spreadsheets/{id}/values/{range}`
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl ValueRange {
    fn into_cells(self) -> Vec<Vec<String>> {
        self.values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect()
    }
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Clone)]
pub struct GoogleSheetsClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl GoogleSheetsClient {
    pub fn new(config: &SheetsConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| AppError::Internal(format!("Invalid sheets base URL: {}", e)))?;

        if config.api_key.is_empty() {
            tracing::warn!("No Google Sheets API key configured, requests will be anonymous");
        }

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// `{base}/{spreadsheet_id}/values/{range}` with each segment percent-encoded
    fn values_url(&self, spreadsheet_id: &str, range: &str) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Internal("Sheets base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .push(spreadsheet_id)
            .push("values")
            .push(range);
        Ok(url)
    }
}

#[async_trait]
impl SheetSource for GoogleSheetsClient {
    async fn fetch(&self, spreadsheet_id: &str, range: &str) -> AppResult<Vec<RowRecord>> {
        let url = self.values_url(spreadsheet_id, range)?;

        let mut request = self.client.get(url);
        if !self.api_key.is_empty() {
            request = request.query(&[("key", self.api_key.as_str())]);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(BODY_EXCERPT_LEN).collect();
            return Err(AppError::Upstream(format!(
                "Sheets API returned {} for {}: {}",
                status, range, excerpt
            )));
        }

        let payload: ValueRange = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Unreadable sheet payload for {}: {}", range, e)))?;

        let rows = RowRecord::from_values(payload.into_cells());
        tracing::debug!(range, rows = rows.len(), "Fetched sheet");

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, Query},
        http::StatusCode,
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;
    use std::net::SocketAddr;

    /// Minimal stand-in for the Sheets values endpoint
    async fn values_handler(
        Path((id, range)): Path<(String, String)>,
        Query(query): Query<HashMap<String, String>>,
    ) -> (StatusCode, Json<Value>) {
        if query.get("key").map(String::as_str) != Some("secret") {
            return (StatusCode::FORBIDDEN, Json(json!({ "error": "bad key" })));
        }
        match (id.as_str(), range.as_str()) {
            ("sheet", "Issues- Realtime!A:Z") => (
                StatusCode::OK,
                Json(json!({
                    "values": [
                        ["Clients", "Count", "Flag"],
                        ["Acme", 3, true],
                        ["Globex"]
                    ]
                })),
            ),
            ("sheet", "Empty!A:Z") => (StatusCode::OK, Json(json!({ "range": "Empty!A:Z" }))),
            _ => (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))),
        }
    }

    async fn spawn_backend() -> SocketAddr {
        let app = Router::new().route("/v4/spreadsheets/:id/values/:range", get(values_handler));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn client_for(addr: SocketAddr, api_key: &str) -> GoogleSheetsClient {
        GoogleSheetsClient::new(&SheetsConfig {
            base_url: format!("http://{}/v4/spreadsheets", addr),
            api_key: api_key.to_string(),
            timeout_secs: 5,
            ..SheetsConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_values_url_encodes_range() {
        let client = GoogleSheetsClient::new(&SheetsConfig::default()).unwrap();
        let url = client.values_url("abc", "Issues- Realtime!A:Z").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc/values/Issues-%20Realtime!A:Z"
        );
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(json!("x")), "x");
        assert_eq!(cell_text(json!(12)), "12");
        assert_eq!(cell_text(json!(false)), "false");
        assert_eq!(cell_text(Value::Null), "");
    }

    #[tokio::test]
    async fn test_fetch_decodes_rows() {
        let addr = spawn_backend().await;
        let rows = client_for(addr, "secret")
            .fetch("sheet", "Issues- Realtime!A:Z")
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Count"), Some("3"));
        assert_eq!(rows[0].get("Flag"), Some("true"));
        assert_eq!(rows[1].get("Clients"), Some("Globex"));
        assert_eq!(rows[1].get("Count"), Some(""));
    }

    #[tokio::test]
    async fn test_fetch_missing_values_is_empty_not_error() {
        let addr = spawn_backend().await;
        let rows = client_for(addr, "secret").fetch("sheet", "Empty!A:Z").await;
        tokio_test::assert_ok!(&rows);
        assert!(rows.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_error_status_is_reported() {
        let addr = spawn_backend().await;
        let err = client_for(addr, "wrong")
            .fetch("sheet", "Empty!A:Z")
            .await
            .unwrap_err();

        match err {
            AppError::Upstream(msg) => assert!(msg.contains("403"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_unreachable_backend() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(addr, "secret").fetch("sheet", "Empty!A:Z").await.unwrap_err();
        assert!(matches!(err, AppError::Http(_)));
    }
}
