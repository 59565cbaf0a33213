use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use patient_cell::models::{AdherenceLog, AdherenceStatus, TimeOfDay};
use patient_cell::{PatientRecordService, PatientService};
use shared_models::pagination::ListParams;
use shared_session::MemorySessionStore;
use shared_utils::test_utils::{MockBackendResponses, TestConfig};

fn patient_service(server: &MockServer) -> PatientService {
    let config = TestConfig::with_base_url(&server.uri()).to_app_config();
    PatientService::new(&config, Arc::new(MemorySessionStore::new()))
}

fn record_service(server: &MockServer) -> PatientRecordService {
    let config = TestConfig::with_base_url(&server.uri()).to_app_config();
    PatientRecordService::new(&config, Arc::new(MemorySessionStore::new()))
}

#[tokio::test]
async fn search_routes_through_admin_users_with_patient_role() {
    let server = MockServer::start().await;
    let service = patient_service(&server);

    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(query_param("role", "PATIENT"))
        .and(query_param("q", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::paged(
            vec![MockBackendResponses::user("p1", "PATIENT")],
            1,
            1,
            10,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let page = service
        .list(ListParams::default().page(1).limit(10).search("abc"))
        .await
        .unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, "p1");
}

#[tokio::test]
async fn listing_without_search_defaults_to_created_at_desc() {
    let server = MockServer::start().await;
    let service = patient_service(&server);

    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(query_param("role", "PATIENT"))
        .and(query_param("sortBy", "createdAt"))
        .and(query_param("sortOrder", "desc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockBackendResponses::paged(vec![], 0, 1, 10)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let page = service.list(ListParams::default().page(1).limit(10)).await.unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.pagination.total_pages, 0);
}

#[tokio::test]
async fn detail_decodes_medical_history() {
    let server = MockServer::start().await;
    let service = patient_service(&server);

    Mock::given(method("GET"))
        .and(path("/patient/p1/detail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::ok(json!({
            "id": "p1",
            "phone": "0900000003",
            "name": "Trần Thị Bình",
            "role": "PATIENT",
            "medicalHistory": {
                "conditions": ["hypertension"],
                "allergies": ["penicillin"],
                "surgeries": [],
                "familyHistory": "diabetes",
                "lifestyle": "non-smoker",
                "currentMedications": ["amlodipine"],
                "extras": { "bloodType": "O+" }
            },
            "profile": {
                "gender": "FEMALE",
                "birthDate": "1987-04-12",
                "address": "Hà Nội"
            }
        }))))
        .mount(&server)
        .await;

    let patient = service.detail("p1").await.unwrap();
    let history = patient.medical_history.unwrap();

    assert_eq!(history.conditions, vec!["hypertension"]);
    assert_eq!(history.extras["bloodType"], json!("O+"));
    assert_eq!(patient.profile.unwrap().address.as_deref(), Some("Hà Nội"));
}

#[tokio::test]
async fn prescriptions_decode_items() {
    let server = MockServer::start().await;
    let service = record_service(&server);

    Mock::given(method("GET"))
        .and(path("/patient/prescriptions"))
        .and(query_param("patientId", "p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::ok(json!([{
            "id": "rx1",
            "patientId": "p1",
            "doctorId": "d1",
            "items": [{
                "id": "rxi1",
                "medication": "Sertraline 50mg",
                "dosage": "1 viên",
                "timesOfDay": ["MORNING", "EVENING"],
                "durationDays": 30,
                "note": null
            }],
            "issuedAt": "2026-02-01T08:00:00Z"
        }]))))
        .mount(&server)
        .await;

    let prescriptions = service.prescriptions("p1").await.unwrap();
    assert_eq!(prescriptions.len(), 1);

    let item = &prescriptions[0].items[0];
    assert_eq!(item.times_of_day, vec![TimeOfDay::Morning, TimeOfDay::Evening]);
    assert_eq!(item.duration_days, 30);
}

#[tokio::test]
async fn log_adherence_posts_dose_event() {
    let server = MockServer::start().await;
    let service = record_service(&server);

    Mock::given(method("POST"))
        .and(path("/patient/adherence"))
        .and(wiremock::matchers::body_partial_json(json!({
            "prescriptionItemId": "rxi1",
            "timeOfDay": "MORNING",
            "status": "TAKEN"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(MockBackendResponses::ok(json!({
            "id": "log1",
            "prescriptionItemId": "rxi1",
            "date": "2026-03-02",
            "timeOfDay": "MORNING",
            "status": "TAKEN"
        }))))
        .mount(&server)
        .await;

    let log = service
        .log_adherence(AdherenceLog {
            id: None,
            prescription_item_id: "rxi1".to_string(),
            date: chrono::NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            time_of_day: TimeOfDay::Morning,
            status: AdherenceStatus::Taken,
        })
        .await
        .unwrap();

    assert_eq!(log.id.as_deref(), Some("log1"));
}
