use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use meeting_cell::models::{CreateMeetingRequest, MeetingListQuery, MeetingStatus};
use meeting_cell::MeetingService;
use shared_models::error::AppError;
use shared_models::pagination::ListParams;
use shared_session::MemorySessionStore;
use shared_utils::test_utils::{MockBackendResponses, TestConfig};

fn service(server: &MockServer) -> MeetingService {
    let config = TestConfig::with_base_url(&server.uri()).to_app_config();
    MeetingService::new(&config, Arc::new(MemorySessionStore::new()))
}

fn meeting_body(id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "orderId": "o1",
        "doctorId": "d1",
        "patientId": "p1",
        "doctorName": "BS. Hà",
        "patientName": "Trần Thị Bình",
        "startDate": "2026-03-02T09:00:00Z",
        "endDate": "2026-03-02T09:30:00Z",
        "status": status,
        "meetingUrl": "https://meet.example.com/m1"
    })
}

#[tokio::test]
async fn list_filters_by_doctor_and_range() {
    let server = MockServer::start().await;
    let service = service(&server);

    Mock::given(method("GET"))
        .and(path("/meeting-schedules"))
        .and(query_param("doctorId", "d1"))
        .and(query_param("from", "2026-03-01T00:00:00+00:00"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::paged(
            vec![meeting_body("m1", "PENDING")],
            1,
            1,
            20,
        )))
        .mount(&server)
        .await;

    let page = service
        .list(MeetingListQuery {
            params: ListParams::default().page(1).limit(20),
            doctor_id: Some("d1".to_string()),
            patient_id: None,
            from: Some(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()),
            to: None,
        })
        .await
        .unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].status, MeetingStatus::Pending);
    assert_eq!(
        page.data[0].meeting_url.as_deref(),
        Some("https://meet.example.com/m1")
    );
}

#[tokio::test]
async fn create_rejects_inverted_range_locally() {
    let server = MockServer::start().await;
    let service = service(&server);

    let result = service
        .create(CreateMeetingRequest {
            order_id: None,
            doctor_id: "d1".to_string(),
            patient_id: "p1".to_string(),
            start_date: Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
        })
        .await;

    assert_matches!(result, Err(AppError::BadRequest(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn cancel_patches_status() {
    let server = MockServer::start().await;
    let service = service(&server);

    Mock::given(method("PATCH"))
        .and(path("/meeting-schedules/m1"))
        .and(body_partial_json(json!({ "status": "CANCELLED" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockBackendResponses::ok(meeting_body("m1", "CANCELLED"))),
        )
        .mount(&server)
        .await;

    let meeting = service.cancel("m1").await.unwrap();
    assert_eq!(meeting.status, MeetingStatus::Cancelled);
}
