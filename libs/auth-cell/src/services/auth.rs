use std::sync::Arc;

use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_http::ApiClient;
use shared_models::error::AppError;
use shared_models::user::User;
use shared_session::SessionStore;

use crate::models::{CurrentUser, LoginRequest, LoginResponse, RegisterRequest};

pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(config: &AppConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            client: ApiClient::new(config, store),
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<User, AppError> {
        debug!("Registering account for phone: {}", request.phone);

        let body = serde_json::to_value(&request)?;
        self.client.post("/auth/register", body).await
    }

    /// Authenticate and persist the session (both tokens plus the roles
    /// array) on success.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        debug!("Logging in phone: {}", request.phone);

        let body = serde_json::to_value(&request)?;
        let response: LoginResponse = self.client.post("/auth/login", body).await?;

        self.client
            .session()
            .store_login(&response.tokens, &response.roles)
            .await;

        Ok(response)
    }

    /// End the session. The stored state is cleared even when the network
    /// call fails; the failure is logged and swallowed.
    pub async fn logout(&self) -> Result<(), AppError> {
        let result: Result<serde_json::Value, AppError> =
            self.client.post("/auth/logout", serde_json::json!({})).await;

        if let Err(e) = result {
            warn!("Logout request failed, clearing session anyway: {}", e);
        }

        self.client.session().clear_all().await;
        Ok(())
    }

    /// Fetch the authenticated account, normalizing the active role from
    /// the `roles` array when the payload has no `role` field.
    pub async fn current_user(&self) -> Result<CurrentUser, AppError> {
        let user: CurrentUser = self.client.get("/auth/me", None).await?;
        Ok(user.normalized())
    }
}
