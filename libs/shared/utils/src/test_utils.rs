use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::AuthUser;

pub struct TestConfig {
    pub jwt_secret: String,
    pub api_base_url: String,
    pub media_base_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            api_base_url: "http://localhost:9933/api".to_string(),
            media_base_url: "http://localhost:9944/api".to_string(),
        }
    }
}

impl TestConfig {
    /// Point both base URLs at a mock server.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api_base_url: base_url.to_string(),
            media_base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            api_base_url: self.api_base_url.clone(),
            media_base_url: self.media_base_url.clone(),
            jwt_secret: self.jwt_secret.clone(),
            request_timeout_secs: 5,
            session_file: None,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub phone: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            phone: "0900000000".to_string(),
            role: "PATIENT".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(phone: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            phone: phone.to_string(),
            role: role.to_string(),
        }
    }

    pub fn doctor(phone: &str) -> Self {
        Self::new(phone, "DOCTOR")
    }

    pub fn patient(phone: &str) -> Self {
        Self::new(phone, "PATIENT")
    }

    pub fn admin(phone: &str) -> Self {
        Self::new(phone, "ADMIN")
    }

    pub fn to_auth_user(&self) -> AuthUser {
        AuthUser {
            id: self.id.clone(),
            phone: Some(self.phone.clone()),
            role: self.role.parse().ok(),
            created_at: Some(Utc::now()),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": user.id,
            "phone": user.phone,
            "role": user.role,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        Self::sign(header, payload, secret)
    }

    /// Token carrying only a `roles` array, the shape some backend
    /// payloads use instead of a single `role` claim.
    pub fn create_roles_array_token(user: &TestUser, secret: &str) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(24);

        let header = json!({ "alg": "HS256", "typ": "JWT" });
        let payload = json!({
            "sub": user.id,
            "phone": user.phone,
            "roles": [user.role],
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        Self::sign(header, payload, secret)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }

    fn sign(header: serde_json::Value, payload: serde_json::Value, secret: &str) -> String {
        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }
}

/// Canonical backend bodies for wiremock-based tests.
pub struct MockBackendResponses;

impl MockBackendResponses {
    /// Standard envelope around a payload.
    pub fn ok(data: serde_json::Value) -> serde_json::Value {
        json!({
            "statusCode": 200,
            "data": data
        })
    }

    /// Paginated envelope as list endpoints return it.
    pub fn paged(
        items: Vec<serde_json::Value>,
        total: u64,
        page: u32,
        limit: u32,
    ) -> serde_json::Value {
        json!({
            "statusCode": 200,
            "data": {
                "items": items,
                "total": total,
                "page": page,
                "limit": limit
            }
        })
    }

    pub fn error(status: u16, message: &str) -> serde_json::Value {
        json!({
            "statusCode": status,
            "message": message
        })
    }

    pub fn user(id: &str, role: &str) -> serde_json::Value {
        json!({
            "id": id,
            "phone": "0900000001",
            "name": "Nguyễn Văn An",
            "role": role,
            "status": "ACTIVE",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        })
    }
}
