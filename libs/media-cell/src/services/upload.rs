use std::sync::Arc;

use tracing::debug;

use shared_config::AppConfig;
use shared_http::ApiClient;
use shared_models::error::AppError;
use shared_session::SessionStore;

use crate::models::MediaUpload;

/// Uploads against the dedicated media endpoint.
pub struct MediaService {
    client: ApiClient,
}

impl MediaService {
    pub fn new(config: &AppConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            client: ApiClient::new(config, store),
        }
    }

    pub async fn upload(
        &self,
        meeting_schedule_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<MediaUpload, AppError> {
        debug!(
            "Uploading {} for meeting schedule {}",
            file_name, meeting_schedule_id
        );

        let content_type = content_type_for(file_name);
        self.client
            .upload(
                &format!("/media/upload/{}", meeting_schedule_id),
                file_name,
                content_type,
                bytes,
            )
            .await
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name.rsplit('.').next().unwrap_or_default();

    match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "pdf" => "application/pdf",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}
