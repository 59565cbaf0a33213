use std::sync::Arc;

use tracing::debug;

use shared_config::AppConfig;
use shared_http::ApiClient;
use shared_models::error::AppError;
use shared_models::pagination::{ListParams, Page};
use shared_session::SessionStore;

use crate::models::{CreateVoucherRequest, UpdateVoucherRequest, Voucher};

pub struct VoucherService {
    client: ApiClient,
}

impl VoucherService {
    pub fn new(config: &AppConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            client: ApiClient::new(config, store),
        }
    }

    pub async fn list(&self, params: ListParams) -> Result<Page<Voucher>, AppError> {
        let pairs = params.to_query_pairs();
        self.client.get_paged("/vouchers", Some(&pairs)).await
    }

    pub async fn get(&self, voucher_id: &str) -> Result<Voucher, AppError> {
        self.client
            .get(&format!("/vouchers/{}", voucher_id), None)
            .await
    }

    pub async fn create(&self, request: CreateVoucherRequest) -> Result<Voucher, AppError> {
        debug!("Creating voucher: {}", request.code);

        let body = serde_json::to_value(&request)?;
        self.client.post("/vouchers", body).await
    }

    pub async fn update(
        &self,
        voucher_id: &str,
        request: UpdateVoucherRequest,
    ) -> Result<Voucher, AppError> {
        debug!("Updating voucher: {}", voucher_id);

        let body = serde_json::to_value(&request)?;
        self.client
            .patch(&format!("/vouchers/{}", voucher_id), body)
            .await
    }

    pub async fn delete(&self, voucher_id: &str) -> Result<(), AppError> {
        debug!("Deleting voucher: {}", voucher_id);

        let _: serde_json::Value = self
            .client
            .delete(&format!("/vouchers/{}", voucher_id))
            .await?;
        Ok(())
    }
}
