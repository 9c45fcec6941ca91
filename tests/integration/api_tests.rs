//! Smoke tests against a running server with a real Sheets API key

use reqwest::Client;
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8080/api/v1";

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_reports_api_key() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready", "set GOOGLE_SHEETS_API_KEY before running");
}

#[tokio::test]
#[ignore]
async fn test_dashboard_shape() {
    let client = Client::new();

    let response = client
        .get(format!("{}/sheets", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    for dataset in ["alertTracking", "misalignmentTracking", "historicalVideoRequests"] {
        assert!(body[dataset]["total"].is_number(), "{dataset}");
        assert!(body[dataset]["monthlyBreakdown"].is_object(), "{dataset}");
        assert!(body[dataset]["clientBreakdown"].is_object(), "{dataset}");
        assert!(body[dataset]["resolutionStats"]["median"].is_number(), "{dataset}");
    }
    assert!(body["allIssues"]["totalRaised"].is_number());
    assert!(body["allIssues"]["monthlyClosed"].is_object());
    assert!(body["lastUpdated"].is_string());
    assert!(body["degraded"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_dashboard_months_are_ordered() {
    let client = Client::new();

    // Raw text: serde_json::Value would re-sort object keys on parse
    let body = client
        .get(format!("{}/sheets", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read response");

    let start = body
        .find("\"monthlyRaised\":{")
        .expect("monthlyRaised present")
        + "\"monthlyRaised\":{".len();
    let end = start + body[start..].find('}').expect("monthlyRaised closed");
    let months: Vec<&str> = body[start..end]
        .split(',')
        .filter_map(|entry| entry.split(':').next())
        .map(|key| key.trim_matches('"'))
        .filter(|key| !key.is_empty())
        .collect();

    let mut sorted = months.clone();
    sorted.sort();
    assert_eq!(months, sorted);
}
