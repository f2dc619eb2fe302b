//! End-to-end aggregation through the real HTTP fetcher.

mod integration;
use integration::common::mock_upstream::MockUpstream;

use std::sync::Arc;

use commute_app::render::render_board;
use commute_app::{AppConfig, AppError, Application};
use commute_feed::{BoardError, FeedKind, FetchError, HttpFetcher, TflCredentials};
use serde_json::json;

fn config_for(server: &MockUpstream) -> AppConfig {
    let mut config = AppConfig::default();
    config.board.tfl_base_url = server.url();
    config.board.weather.base_url = server.url();
    config.fetch.timeout_ms = 2_000;
    config
}

fn app_for(server: &MockUpstream, credentials: Option<TflCredentials>) -> Application {
    let config = config_for(server);
    let fetcher = Arc::new(HttpFetcher::new(&config.fetch).unwrap());
    Application::with_fetcher(config, fetcher, credentials)
}

fn credentials() -> Option<TflCredentials> {
    TflCredentials::from_values(Some("test-id".into()), Some("test-key".into()))
}

async fn seed(server: &MockUpstream) {
    server
        .set_body(
            "/Line/elizabeth/Status",
            json!([{"lineStatuses": [{"statusSeverityDescription": "Severe Delays"}]}]),
        )
        .await;
    server
        .set_body(
            "/StopPoint/910GACTONML/Arrivals",
            json!([
                {"lineId": "elizabeth", "direction": "outbound", "destinationName": "Reading", "timeToStation": 500},
                {"lineId": "elizabeth", "direction": "inbound", "destinationName": "Abbey Wood", "timeToStation": 45},
                {"lineId": "great-western-railway", "direction": "inbound", "destinationName": "Paddington", "timeToStation": 10}
            ]),
        )
        .await;
    server
        .set_body(
            "/StopPoint/490006737N/Arrivals",
            json!([
                {"lineId": "266", "direction": "inbound", "destinationName": "Hammersmith", "timeToStation": 240}
            ]),
        )
        .await;
    server
        .set_body(
            "/v1/forecast",
            json!({
                "current": {
                    "time": "2024-05-01T08:00",
                    "temperature_2m": 12.3,
                    "apparent_temperature": 10.8,
                    "wind_speed_10m": 9.9,
                    "weather_code": 2
                },
                "hourly": {
                    "time": ["2024-05-01T07:00", "2024-05-01T08:00"],
                    "precipitation_probability": [5, 20]
                }
            }),
        )
        .await;
}

#[tokio::test]
async fn test_end_to_end_snapshot() {
    let server = MockUpstream::start().await;
    seed(&server).await;
    let app = app_for(&server, credentials());

    let snapshot = app.run_once().await.unwrap();

    assert_eq!(snapshot.status.as_str(), "Severe Delays");
    assert_eq!(snapshot.trains.inbound.len(), 1);
    assert_eq!(snapshot.trains.inbound[0].destination_name, "Abbey Wood");
    assert_eq!(snapshot.trains.outbound[0].destination_name, "Reading");
    assert_eq!(snapshot.buses.inbound[0].line_id, "266");
    assert!(snapshot.buses.outbound.is_empty());
    assert_eq!(snapshot.weather.precip_prob, Some(20));
    assert_eq!(snapshot.weather.code, Some(2));

    let board = render_board(&snapshot);
    assert!(board.contains("Severe Delays"));
    assert!(board.contains("Partly cloudy"));

    let requests = server.requests().await;
    assert_eq!(requests.len(), 5);
    let status_request = requests
        .iter()
        .find(|r| r.starts_with("/Line/elizabeth/Status"))
        .unwrap();
    assert!(status_request.contains("app_id=test-id"));
    assert!(status_request.contains("app_key=test-key"));
    let weather_request = requests
        .iter()
        .find(|r| r.starts_with("/v1/forecast"))
        .unwrap();
    assert!(weather_request.contains("forecast_days=1"));
    assert!(!weather_request.contains("app_key"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_upstream_failure_surfaces_feed() {
    let server = MockUpstream::start().await;
    seed(&server).await;
    server
        .set_failure("/StopPoint/490015046S/Arrivals", 503)
        .await;
    let app = app_for(&server, credentials());

    let err = app.run_once().await.unwrap_err();
    match err {
        AppError::Board(BoardError::UpstreamFetch { feed, source }) => {
            assert_eq!(feed, FeedKind::BusOutbound);
            assert!(matches!(source, FetchError::Status { status: 503, .. }));
        }
        other => panic!("unexpected error: {other}"),
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_missing_credentials_make_no_requests() {
    let server = MockUpstream::start().await;
    let app = app_for(&server, None);

    let err = app.run_once().await.unwrap_err();
    assert!(matches!(err, AppError::Board(BoardError::Configuration(_))));
    assert!(server.requests().await.is_empty());

    server.shutdown().await;
}
