use std::sync::Arc;

use tracing::debug;

use shared_config::AppConfig;
use shared_http::ApiClient;
use shared_models::error::AppError;
use shared_models::pagination::{ListParams, Page};
use shared_models::user::User;
use shared_session::SessionStore;

use crate::models::{
    CreateDoctorRequest, Doctor, DoctorField, DoctorListQuery, UpdateDoctorRequest,
};

pub struct DoctorService {
    client: ApiClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            client: ApiClient::new(config, store),
        }
    }

    pub async fn list(&self, query: DoctorListQuery) -> Result<Page<Doctor>, AppError> {
        debug!("Listing doctors, specialty filter {:?}", query.major_doctor);

        let pairs = query.to_query_pairs();
        self.client.get_paged("/doctor/doctor", Some(&pairs)).await
    }

    pub async fn get(&self, doctor_id: &str) -> Result<Doctor, AppError> {
        self.client
            .get(&format!("/doctor/doctor/{}", doctor_id), None)
            .await
    }

    pub async fn create(&self, request: CreateDoctorRequest) -> Result<Doctor, AppError> {
        debug!("Creating doctor account for phone {}", request.phone);

        let body = serde_json::to_value(&request)?;
        self.client.post("/doctor/doctor", body).await
    }

    pub async fn update(
        &self,
        doctor_id: &str,
        request: UpdateDoctorRequest,
    ) -> Result<Doctor, AppError> {
        debug!("Updating doctor: {}", doctor_id);

        let body = serde_json::to_value(&request)?;
        self.client
            .patch(&format!("/doctor/doctor/{}", doctor_id), body)
            .await
    }

    pub async fn delete(&self, doctor_id: &str) -> Result<(), AppError> {
        debug!("Deleting doctor: {}", doctor_id);

        let _: serde_json::Value = self
            .client
            .delete(&format!("/doctor/doctor/{}", doctor_id))
            .await?;
        Ok(())
    }

    /// Specialty catalog used by the doctor forms.
    pub async fn fields(&self) -> Result<Vec<DoctorField>, AppError> {
        self.client.get("/doctor/fields", None).await
    }

    /// Patients visible to the authenticated doctor.
    pub async fn patients(&self, params: ListParams) -> Result<Page<User>, AppError> {
        let pairs = params.to_query_pairs();
        self.client.get_paged("/doctor/patients", Some(&pairs)).await
    }

    pub async fn patient(&self, patient_id: &str) -> Result<User, AppError> {
        self.client
            .get(&format!("/doctor/patients/{}", patient_id), None)
            .await
    }
}
