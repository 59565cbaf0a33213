use std::sync::Arc;

use tracing::debug;

use shared_config::AppConfig;
use shared_http::ApiClient;
use shared_models::error::AppError;
use shared_session::SessionStore;

use crate::models::{
    AdherenceLog, MedicalHistory, PatientAlert, PatientOverview, Prescription, Reminder,
};

/// Medical-record and adherence endpoints for a patient.
pub struct PatientRecordService {
    client: ApiClient,
}

impl PatientRecordService {
    pub fn new(config: &AppConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            client: ApiClient::new(config, store),
        }
    }

    pub async fn history(&self, patient_id: &str) -> Result<MedicalHistory, AppError> {
        let pairs = vec![("patientId".to_string(), patient_id.to_string())];
        self.client.get("/patient/history", Some(&pairs)).await
    }

    pub async fn prescriptions(&self, patient_id: &str) -> Result<Vec<Prescription>, AppError> {
        let pairs = vec![("patientId".to_string(), patient_id.to_string())];
        self.client.get("/patient/prescriptions", Some(&pairs)).await
    }

    pub async fn reminders(&self, patient_id: &str) -> Result<Vec<Reminder>, AppError> {
        let pairs = vec![("patientId".to_string(), patient_id.to_string())];
        self.client.get("/patient/reminders", Some(&pairs)).await
    }

    pub async fn adherence(&self, patient_id: &str) -> Result<Vec<AdherenceLog>, AppError> {
        let pairs = vec![("patientId".to_string(), patient_id.to_string())];
        self.client.get("/patient/adherence", Some(&pairs)).await
    }

    /// Record a taken or missed dose.
    pub async fn log_adherence(&self, log: AdherenceLog) -> Result<AdherenceLog, AppError> {
        debug!(
            "Recording {:?} dose for item {}",
            log.status, log.prescription_item_id
        );

        let body = serde_json::to_value(&log)?;
        self.client.post("/patient/adherence", body).await
    }

    pub async fn overview(&self, patient_id: &str) -> Result<PatientOverview, AppError> {
        let pairs = vec![("patientId".to_string(), patient_id.to_string())];
        self.client.get("/patient/overview", Some(&pairs)).await
    }

    pub async fn alerts(&self, patient_id: &str) -> Result<Vec<PatientAlert>, AppError> {
        let pairs = vec![("patientId".to_string(), patient_id.to_string())];
        self.client.get("/patient/alerts", Some(&pairs)).await
    }
}
