use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use catalog_cell::models::{CreateProductServiceRequest, CreateVoucherRequest};
use catalog_cell::{ProductCatalogService, VoucherService};
use shared_models::pagination::ListParams;
use shared_session::MemorySessionStore;
use shared_utils::test_utils::{MockBackendResponses, TestConfig};

fn products(server: &MockServer) -> ProductCatalogService {
    let config = TestConfig::with_base_url(&server.uri()).to_app_config();
    ProductCatalogService::new(&config, Arc::new(MemorySessionStore::new()))
}

fn vouchers(server: &MockServer) -> VoucherService {
    let config = TestConfig::with_base_url(&server.uri()).to_app_config();
    VoucherService::new(&config, Arc::new(MemorySessionStore::new()))
}

#[tokio::test]
async fn product_list_reshapes_pagination() {
    let server = MockServer::start().await;
    let service = products(&server);

    Mock::given(method("GET"))
        .and(path("/product-services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::paged(
            vec![json!({
                "id": "ps1",
                "name": "Khám tổng quát",
                "description": null,
                "price": 500000.0,
                "durationMinutes": 30
            })],
            11,
            1,
            5,
        )))
        .mount(&server)
        .await;

    let page = service
        .list(ListParams::default().page(1).limit(5))
        .await
        .unwrap();

    assert_eq!(page.data[0].name, "Khám tổng quát");
    assert!(page.data[0].is_active);
    assert_eq!(page.pagination.total_pages, 3);
    assert!(page.pagination.has_next_page);
}

#[tokio::test]
async fn create_product_posts_payload() {
    let server = MockServer::start().await;
    let service = products(&server);

    Mock::given(method("POST"))
        .and(path("/product-services"))
        .and(body_partial_json(json!({ "name": "Tư vấn dinh dưỡng", "price": 300000.0 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(MockBackendResponses::ok(json!({
            "id": "ps2",
            "name": "Tư vấn dinh dưỡng",
            "description": null,
            "price": 300000.0,
            "durationMinutes": 45
        }))))
        .mount(&server)
        .await;

    let product = service
        .create(CreateProductServiceRequest {
            name: "Tư vấn dinh dưỡng".to_string(),
            description: None,
            price: 300000.0,
            duration_minutes: Some(45),
        })
        .await
        .unwrap();

    assert_eq!(product.id, "ps2");
}

#[tokio::test]
async fn voucher_crud_round_trip() {
    let server = MockServer::start().await;
    let service = vouchers(&server);

    Mock::given(method("POST"))
        .and(path("/vouchers"))
        .and(body_partial_json(json!({ "code": "TET2026", "discountPercent": 15.0 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(MockBackendResponses::ok(json!({
            "id": "v1",
            "code": "TET2026",
            "discountPercent": 15.0,
            "validFrom": "2026-02-01T00:00:00Z",
            "validTo": "2026-02-28T23:59:59Z"
        }))))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/vouchers/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::ok(json!(null))))
        .mount(&server)
        .await;

    let voucher = service
        .create(CreateVoucherRequest {
            code: "TET2026".to_string(),
            discount_percent: 15.0,
            valid_from: None,
            valid_to: None,
        })
        .await
        .unwrap();

    assert_eq!(voucher.code, "TET2026");
    service.delete("v1").await.unwrap();
}
