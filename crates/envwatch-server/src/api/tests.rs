use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use envwatch_core::{
    AirQualitySource, AqiForecast, Coordinate, FloodGaugeSource, GaugeReading, OutageArea,
    OutageSource, ReadingWindow, ReportAssembler, SourceError, Sources, StationCatalog,
    Summarizer, WeatherObservation, WeatherSource,
};

use crate::{api, state::AppState};

struct FixedAir(Option<i32>);

#[async_trait]
impl AirQualitySource for FixedAir {
    async fn forecast(&self, _point: &Coordinate) -> Result<Vec<AqiForecast>, SourceError> {
        Ok(vec![AqiForecast {
            reporting_area: "Seattle-Bellevue-Kent Valley".to_string(),
            date_forecast: "2024-11-20".to_string(),
            aqi: self.0,
        }])
    }
}

struct DownOutages;

#[async_trait]
impl OutageSource for DownOutages {
    async fn outage_areas(&self) -> Result<Vec<OutageArea>, SourceError> {
        Err(SourceError::Unavailable("connection refused".to_string()))
    }
}

struct FixedGauges;

#[async_trait]
impl FloodGaugeSource for FixedGauges {
    async fn readings(&self, _window: &ReadingWindow) -> Result<Vec<GaugeReading>, SourceError> {
        Ok(vec![GaugeReading {
            location_id: "SVPA-29".to_string(),
            flood_level: Some("Normal".to_string()),
            level_trend: Some("Steady".to_string()),
        }])
    }
}

struct FixedWeather;

#[async_trait]
impl WeatherSource for FixedWeather {
    async fn observation(&self, _point: &Coordinate) -> Result<WeatherObservation, SourceError> {
        Ok(WeatherObservation::from_summary_line(
            "Weathers include: Rain, and the temperature is 10",
        ))
    }
}

struct EchoSummarizer;

#[async_trait]
impl Summarizer for EchoSummarizer {
    async fn summarize(&self, prompt: &str) -> Result<String, SourceError> {
        if prompt.is_empty() {
            return Err(SourceError::Malformed("response had no content".to_string()));
        }
        Ok(format!("summary: {prompt}"))
    }
}

fn app_with_catalog(catalog: StationCatalog) -> axum::Router {
    let sources = Sources {
        air_quality: Arc::new(FixedAir(Some(72))),
        outages: Arc::new(DownOutages),
        flood_gauges: Arc::new(FixedGauges),
        weather: Arc::new(FixedWeather),
    };
    let assembler = ReportAssembler::new(sources, Arc::new(catalog));
    let state = Arc::new(AppState::new(assembler, Arc::new(EchoSummarizer)));
    api::routes().with_state(state)
}

fn app() -> axum::Router {
    app_with_catalog(StationCatalog::builtin())
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn root_greets() {
    let response = app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({"message": "Hello World"}));
}

#[tokio::test]
async fn weather_returns_report_with_isolated_failure() {
    let response = app()
        .oneshot(get("/weather?latitude=47.59645&longitude=-122.1165"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["air_quality"]["aqi"], 72);
    assert_eq!(body["air_quality"]["category"], "Moderate");
    assert_eq!(body["power_outage"], Value::Null);
    assert_eq!(body["flood_risk"]["station_id"], "SVPA-29");
    assert_eq!(body["flood_risk"]["current_level"], "Normal");
    assert_eq!(body["weather"]["conditions"], json!(["Rain"]));
    assert_eq!(body["weather"]["temperature_fahrenheit"], 50.0);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn weather_rejects_out_of_range_coordinate() {
    let response = app()
        .oneshot(get("/weather?latitude=91&longitude=0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("invalid coordinate"));
}

#[tokio::test]
async fn weather_rejects_missing_or_non_numeric_params() {
    for uri in ["/weather?latitude=47.6", "/weather?latitude=north&longitude=1"] {
        let response = app().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert!(read_json(response).await["error"].is_string());
    }
}

#[tokio::test]
async fn weather_with_empty_catalog_is_internal_error() {
    let response = app_with_catalog(StationCatalog::default())
        .oneshot(get("/weather?latitude=47.6&longitude=-122.1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        read_json(response).await,
        json!({"error": "station catalog is empty"})
    );
}

#[tokio::test]
async fn analyze_returns_summary() {
    let request = Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(Body::from(json!({"prompt": "rain in Bellevue"}).to_string()))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({"response": "summary: rain in Bellevue"})
    );
}

#[tokio::test]
async fn analyze_failure_is_500_with_detail() {
    let request = Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(Body::from(json!({"prompt": ""}).to_string()))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("no content"));
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc-123");

    let response = app().oneshot(get("/health")).await.unwrap();
    let generated = response.headers()["x-request-id"].to_str().unwrap();
    assert!(!generated.is_empty());
}
