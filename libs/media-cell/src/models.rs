use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUpload {
    pub id: String,
    pub meeting_schedule_id: String,
    pub url: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub uploaded_at: Option<DateTime<Utc>>,
}
