use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use shared_config::AppConfig;
use shared_http::ApiClient;
use shared_models::error::AppError;
use shared_session::SessionStore;

use crate::models::{CreateScheduleRequest, Doctor, DoctorSchedule};

/// Doctor-owned bookable time slots.
pub struct ScheduleService {
    client: ApiClient,
}

impl ScheduleService {
    pub fn new(config: &AppConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            client: ApiClient::new(config, store),
        }
    }

    pub async fn schedules(
        &self,
        doctor_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<DoctorSchedule>, AppError> {
        debug!("Fetching schedules for doctor: {}", doctor_id);

        let mut pairs = Vec::new();
        if let Some(from) = from {
            pairs.push(("from".to_string(), from.to_string()));
        }
        if let Some(to) = to {
            pairs.push(("to".to_string(), to.to_string()));
        }

        self.client
            .get(&format!("/doctor/{}/schedules", doctor_id), Some(&pairs))
            .await
    }

    pub async fn create_schedule(
        &self,
        doctor_id: &str,
        request: CreateScheduleRequest,
    ) -> Result<DoctorSchedule, AppError> {
        debug!("Creating schedule for doctor: {}", doctor_id);

        if request.start_date >= request.end_date {
            return Err(AppError::BadRequest(
                "Start time must be before end time".to_string(),
            ));
        }

        let body = serde_json::to_value(&request)?;
        self.client
            .post(&format!("/doctor/{}/schedules", doctor_id), body)
            .await
    }

    pub async fn delete_schedule(
        &self,
        doctor_id: &str,
        schedule_id: &str,
    ) -> Result<(), AppError> {
        debug!("Deleting schedule {} for doctor {}", schedule_id, doctor_id);

        let _: serde_json::Value = self
            .client
            .delete(&format!("/doctor/{}/schedules/{}", doctor_id, schedule_id))
            .await?;
        Ok(())
    }

    /// Doctors with at least one free slot on the given date.
    pub async fn available_doctors(
        &self,
        date: NaiveDate,
        major_doctor: Option<&str>,
    ) -> Result<Vec<Doctor>, AppError> {
        debug!("Fetching available doctors on {}", date);

        let mut pairs = vec![("date".to_string(), date.to_string())];
        if let Some(major) = major_doctor {
            pairs.push(("majorDoctor".to_string(), major.to_string()));
        }

        self.client.get("/doctor/available", Some(&pairs)).await
    }
}
