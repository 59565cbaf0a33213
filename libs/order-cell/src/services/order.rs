use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use shared_config::AppConfig;
use shared_http::ApiClient;
use shared_models::error::AppError;
use shared_models::pagination::Page;
use shared_session::SessionStore;

use crate::models::{CreateOrderRequest, Order, OrderListQuery, OrderStatus, UpdateOrderRequest};

pub struct OrderService {
    client: ApiClient,
}

impl OrderService {
    pub fn new(config: &AppConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            client: ApiClient::new(config, store),
        }
    }

    pub async fn list(&self, query: OrderListQuery) -> Result<Page<Order>, AppError> {
        debug!("Listing orders, status filter {:?}", query.status);

        let pairs = query.to_query_pairs();
        self.client.get_paged("/orders", Some(&pairs)).await
    }

    pub async fn get(&self, order_id: &str) -> Result<Order, AppError> {
        self.client.get(&format!("/orders/{}", order_id), None).await
    }

    pub async fn create(&self, request: CreateOrderRequest) -> Result<Order, AppError> {
        debug!(
            "Creating order for patient {} on product-service {}",
            request.patient_id, request.product_service_id
        );

        let body = serde_json::to_value(&request)?;
        self.client.post("/orders", body).await
    }

    pub async fn update(
        &self,
        order_id: &str,
        request: UpdateOrderRequest,
    ) -> Result<Order, AppError> {
        debug!("Updating order: {}", order_id);

        let body = serde_json::to_value(&request)?;
        self.client
            .patch(&format!("/orders/{}", order_id), body)
            .await
    }

    pub async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, AppError> {
        debug!("Setting order {} status to {}", order_id, status);

        self.client
            .patch(&format!("/orders/{}", order_id), json!({ "status": status }))
            .await
    }

    pub async fn delete(&self, order_id: &str) -> Result<(), AppError> {
        debug!("Deleting order: {}", order_id);

        let _: serde_json::Value = self
            .client
            .delete(&format!("/orders/{}", order_id))
            .await?;
        Ok(())
    }
}
