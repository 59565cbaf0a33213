use std::sync::Arc;

use tracing::debug;

use shared_config::AppConfig;
use shared_http::ApiClient;
use shared_models::error::AppError;
use shared_models::pagination::Page;
use shared_models::user::User;
use shared_session::SessionStore;

use crate::models::{CreateUserRequest, UpdateUserRequest, UserListQuery};

/// Admin-scoped account management.
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(config: &AppConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            client: ApiClient::new(config, store),
        }
    }

    pub async fn list(&self, query: UserListQuery) -> Result<Page<User>, AppError> {
        debug!("Listing users with role filter {:?}", query.role);

        let pairs = query.to_query_pairs();
        self.client.get_paged("/admin/users", Some(&pairs)).await
    }

    pub async fn get(&self, user_id: &str) -> Result<User, AppError> {
        self.client
            .get(&format!("/admin/users/{}", user_id), None)
            .await
    }

    pub async fn create(&self, request: CreateUserRequest) -> Result<User, AppError> {
        debug!("Creating {} account for phone {}", request.role, request.phone);

        let body = serde_json::to_value(&request)?;
        self.client.post("/admin/users", body).await
    }

    pub async fn update(
        &self,
        user_id: &str,
        request: UpdateUserRequest,
    ) -> Result<User, AppError> {
        debug!("Updating user: {}", user_id);

        let body = serde_json::to_value(&request)?;
        self.client
            .patch(&format!("/admin/users/{}", user_id), body)
            .await
    }

    pub async fn delete(&self, user_id: &str) -> Result<(), AppError> {
        debug!("Deleting user: {}", user_id);

        let _: serde_json::Value = self
            .client
            .delete(&format!("/admin/users/{}", user_id))
            .await?;
        Ok(())
    }
}
