use std::sync::Arc;

use tracing::debug;

use shared_config::AppConfig;
use shared_http::ApiClient;
use shared_models::error::AppError;
use shared_models::pagination::{ListParams, Page};
use shared_session::SessionStore;

use crate::models::{CreateProductServiceRequest, ProductService, UpdateProductServiceRequest};

pub struct ProductCatalogService {
    client: ApiClient,
}

impl ProductCatalogService {
    pub fn new(config: &AppConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            client: ApiClient::new(config, store),
        }
    }

    pub async fn list(&self, params: ListParams) -> Result<Page<ProductService>, AppError> {
        let pairs = params.to_query_pairs();
        self.client.get_paged("/product-services", Some(&pairs)).await
    }

    pub async fn get(&self, product_id: &str) -> Result<ProductService, AppError> {
        self.client
            .get(&format!("/product-services/{}", product_id), None)
            .await
    }

    pub async fn create(
        &self,
        request: CreateProductServiceRequest,
    ) -> Result<ProductService, AppError> {
        debug!("Creating product-service: {}", request.name);

        let body = serde_json::to_value(&request)?;
        self.client.post("/product-services", body).await
    }

    pub async fn update(
        &self,
        product_id: &str,
        request: UpdateProductServiceRequest,
    ) -> Result<ProductService, AppError> {
        debug!("Updating product-service: {}", product_id);

        let body = serde_json::to_value(&request)?;
        self.client
            .patch(&format!("/product-services/{}", product_id), body)
            .await
    }

    pub async fn delete(&self, product_id: &str) -> Result<(), AppError> {
        debug!("Deleting product-service: {}", product_id);

        let _: serde_json::Value = self
            .client
            .delete(&format!("/product-services/{}", product_id))
            .await?;
        Ok(())
    }
}
