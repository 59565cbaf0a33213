use std::sync::Arc;
use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    multipart, Client, Method, Response, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

use shared_config::AppConfig;
use shared_models::envelope::{error_message, unwrap_envelope};
use shared_models::error::{AppError, DEFAULT_ERROR_MESSAGE};
use shared_models::pagination::{Page, PaginatedEnvelope, Pagination};
use shared_session::{Session, SessionStore};

/// HTTP client for the clinic backend.
///
/// Attaches the stored bearer token to every request, unwraps the backend
/// envelope, and treats any 401 as a fatal session error: the tokens are
/// dropped from the session and `SessionExpired` is returned.
pub struct ApiClient {
    client: Client,
    base_url: String,
    media_base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &AppConfig, store: Arc<dyn SessionStore>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("reqwest client builds with static configuration");

        Self {
            client,
            base_url: config.api_base_url.clone(),
            media_base_url: config.media_base_url.clone(),
            session: Session::new(store),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.session.access_token().await {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("Stored access token is not a valid header value"),
            }
        }

        headers
    }

    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(String, String)]>,
        body: Option<Value>,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let mut req = self.client.request(method, &url).headers(self.headers().await);

        if let Some(query) = query {
            req = req.query(query);
        }
        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        self.handle_response(response).await
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&[(String, String)]>,
    ) -> Result<T, AppError> {
        self.request(Method::GET, path, query, None).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
    ) -> Result<T, AppError> {
        self.request(Method::POST, path, None, Some(body)).await
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
    ) -> Result<T, AppError> {
        self.request(Method::PATCH, path, None, Some(body)).await
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T, AppError> {
        self.request(Method::PUT, path, None, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.request(Method::DELETE, path, None, None).await
    }

    /// Fetch a paginated listing and reshape the backend envelope
    /// (`items`/`total`/`page`/`limit`) into `Page<T>`.
    pub async fn get_paged<T>(
        &self,
        path: &str,
        query: Option<&[(String, String)]>,
    ) -> Result<Page<T>, AppError>
    where
        T: DeserializeOwned,
    {
        let envelope: PaginatedEnvelope = self.get(path, query).await?;
        let pagination = Pagination::from_counts(envelope.page, envelope.limit, envelope.total);

        let data = envelope
            .items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()?;

        Ok(Page { data, pagination })
    }

    /// Multipart upload against the media endpoint.
    pub async fn upload<T>(
        &self,
        path: &str,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.media_base_url, path);
        debug!("Uploading {} to {}", file_name, url);

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| AppError::BadRequest(format!("Invalid content type: {}", e)))?;
        let form = multipart::Form::new().part("file", part);

        let mut req = self.client.post(&url).multipart(form);
        if let Some(token) = self.session.access_token().await {
            req = req.bearer_auth(token);
        }

        let response = req
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        self.handle_response(response).await
    }

    async fn handle_response<T>(&self, response: Response) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("Received 401, clearing session tokens");
            self.session.clear_tokens().await;
            return Err(AppError::SessionExpired);
        }

        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message =
                error_message(&body).unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
            error!("API error ({}): {}", status, message);

            return Err(match status {
                StatusCode::NOT_FOUND => AppError::NotFound(message),
                _ => AppError::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        // Some mutation endpoints answer with an empty body.
        let body: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };

        let payload = unwrap_envelope(body);
        Ok(serde_json::from_value(payload)?)
    }
}
