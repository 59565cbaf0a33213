use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use health_cell::models::SeriesRange;
use health_cell::HealthService;
use shared_session::MemorySessionStore;
use shared_utils::test_utils::{MockBackendResponses, TestConfig};

fn service(server: &MockServer) -> HealthService {
    let config = TestConfig::with_base_url(&server.uri()).to_app_config();
    HealthService::new(&config, Arc::new(MemorySessionStore::new()))
}

#[tokio::test]
async fn vitals_fetches_all_three_series() {
    let server = MockServer::start().await;
    let service = service(&server);

    Mock::given(method("GET"))
        .and(path("/health/heartrate"))
        .and(query_param("from", "2026-03-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::ok(json!([
            { "timestamp": "2026-03-01T07:00:00Z", "bpm": 62.0 }
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/health/sleep"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::ok(json!([
            { "date": "2026-03-01", "hours": 7.5, "quality": "GOOD" }
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/health/spo2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::ok(json!([
            { "timestamp": "2026-03-01T07:00:00Z", "percent": 97.0 }
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let vitals = service
        .vitals(SeriesRange {
            from: NaiveDate::from_ymd_opt(2026, 3, 1),
            to: None,
        })
        .await
        .unwrap();

    assert_eq!(vitals.heartrate.len(), 1);
    assert_eq!(vitals.sleep[0].hours, 7.5);
    assert_eq!(vitals.spo2[0].percent, 97.0);
}

#[tokio::test]
async fn summary_overview_targets_user_path() {
    let server = MockServer::start().await;
    let service = service(&server);

    Mock::given(method("GET"))
        .and(path("/health/get-summary-overview/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::ok(json!({
            "userId": "p1",
            "overview": {
                "restingHeartRateBpm": 61.0,
                "avgSleepHours": 7.2,
                "avgSpo2Percent": 97.5,
                "lastSyncedAt": "2026-03-01T07:00:00Z"
            },
            "alerts": ["LOW_SPO2_NIGHT"]
        }))))
        .mount(&server)
        .await;

    let summary = service.summary_overview("p1").await.unwrap();
    assert_eq!(summary.user_id, "p1");
    assert_eq!(summary.alerts, vec!["LOW_SPO2_NIGHT"]);
}
