//! Integration tests for Geocoder using wiremock.

use std::time::Duration;

use snowcast_weather::{Geocoder, WeatherError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn geocoder(server: &MockServer) -> Geocoder {
    Geocoder::new(
        format!("{}/v1/search", server.uri()),
        "ru",
        Duration::from_secs(5),
    )
    .unwrap()
}

fn city(name: &str, admin1: Option<&str>, country: &str, lat: f64, lon: f64) -> serde_json::Value {
    let mut value = serde_json::json!({
        "name": name,
        "country": country,
        "latitude": lat,
        "longitude": lon,
    });
    if let Some(admin1) = admin1 {
        value["admin1"] = serde_json::json!(admin1);
    }
    value
}

#[tokio::test]
async fn test_search_sends_expected_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Munich"))
        .and(query_param("count", "8"))
        .and(query_param("language", "ru"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                city("Munich", Some("Bavaria"), "Germany", 48.13743, 11.57549),
                city("Munich", None, "United States", 46.36, -97.89),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = geocoder(&server).search("Munich", 8).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].label(), "Munich, Bavaria, Germany");
    assert_eq!(results[1].label(), "Munich, United States");
}

#[tokio::test]
async fn test_search_trims_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Oslo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [city("Oslo", Some("Oslo"), "Norway", 59.91, 10.75)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = geocoder(&server).search("  Oslo ", 8).await.unwrap();
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_search_without_results_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "generationtime_ms": 0.4 })),
        )
        .mount(&server)
        .await;

    let results = geocoder(&server).search("Qwxz", 8).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_resolve_single_requests_one_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [city("Москва", Some("Москва"), "Россия", 55.75222, 37.61556)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let candidate = geocoder(&server).resolve_single("Москва").await.unwrap();
    assert_eq!(candidate.name, "Москва");
    assert_eq!(candidate.latitude, 55.75222);
}

#[tokio::test]
async fn test_resolve_single_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let err = geocoder(&server).resolve_single("Atlantis").await.unwrap_err();
    match err {
        WeatherError::NotFound(query) => assert_eq!(query, "Atlantis"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = geocoder(&server).search("Munich", 8).await.unwrap_err();
    assert!(matches!(err, WeatherError::Parse(_)));
}

#[tokio::test]
async fn test_provider_error_reason_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": true,
            "reason": "Parameter count must be between 1 and 100."
        })))
        .mount(&server)
        .await;

    let err = geocoder(&server).search("Munich", 500).await.unwrap_err();
    match err {
        WeatherError::Api(reason) => assert!(reason.contains("between 1 and 100")),
        other => panic!("expected Api error, got {other:?}"),
    }
}
