use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use shared_config::AppConfig;
use shared_http::ApiClient;
use shared_models::error::AppError;
use shared_models::pagination::Page;
use shared_session::SessionStore;

use crate::models::{
    CreateMeetingRequest, MeetingListQuery, MeetingSchedule, MeetingStatus, UpdateMeetingRequest,
};

pub struct MeetingService {
    client: ApiClient,
}

impl MeetingService {
    pub fn new(config: &AppConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            client: ApiClient::new(config, store),
        }
    }

    pub async fn list(&self, query: MeetingListQuery) -> Result<Page<MeetingSchedule>, AppError> {
        debug!(
            "Listing meeting schedules, doctor {:?}, patient {:?}",
            query.doctor_id, query.patient_id
        );

        let pairs = query.to_query_pairs();
        self.client.get_paged("/meeting-schedules", Some(&pairs)).await
    }

    pub async fn get(&self, meeting_id: &str) -> Result<MeetingSchedule, AppError> {
        self.client
            .get(&format!("/meeting-schedules/{}", meeting_id), None)
            .await
    }

    pub async fn create(&self, request: CreateMeetingRequest) -> Result<MeetingSchedule, AppError> {
        debug!(
            "Creating meeting for doctor {} and patient {}",
            request.doctor_id, request.patient_id
        );

        if request.start_date >= request.end_date {
            return Err(AppError::BadRequest(
                "Start time must be before end time".to_string(),
            ));
        }

        let body = serde_json::to_value(&request)?;
        self.client.post("/meeting-schedules", body).await
    }

    pub async fn update(
        &self,
        meeting_id: &str,
        request: UpdateMeetingRequest,
    ) -> Result<MeetingSchedule, AppError> {
        debug!("Updating meeting: {}", meeting_id);

        let body = serde_json::to_value(&request)?;
        self.client
            .patch(&format!("/meeting-schedules/{}", meeting_id), body)
            .await
    }

    pub async fn update_status(
        &self,
        meeting_id: &str,
        status: MeetingStatus,
    ) -> Result<MeetingSchedule, AppError> {
        debug!("Setting meeting {} status to {}", meeting_id, status);

        self.client
            .patch(
                &format!("/meeting-schedules/{}", meeting_id),
                json!({ "status": status }),
            )
            .await
    }

    pub async fn cancel(&self, meeting_id: &str) -> Result<MeetingSchedule, AppError> {
        self.update_status(meeting_id, MeetingStatus::Cancelled).await
    }
}
