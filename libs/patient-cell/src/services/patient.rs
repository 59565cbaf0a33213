use std::sync::Arc;

use tracing::debug;

use shared_config::AppConfig;
use shared_http::ApiClient;
use shared_models::error::AppError;
use shared_models::pagination::{ListParams, Page};
use shared_models::user::User;
use shared_session::SessionStore;

use crate::models::{Patient, PatientFieldDescriptor};

pub struct PatientService {
    client: ApiClient,
}

impl PatientService {
    pub fn new(config: &AppConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            client: ApiClient::new(config, store),
        }
    }

    /// Paginated patient listing.
    ///
    /// Routed through the admin users endpoint with the role pinned to
    /// `PATIENT`; without an explicit search the default `createdAt`
    /// descending sort applies.
    pub async fn list(&self, params: ListParams) -> Result<Page<User>, AppError> {
        debug!("Listing patients, search {:?}", params.q);

        let mut pairs = vec![("role".to_string(), "PATIENT".to_string())];
        pairs.extend(params.to_query_pairs());

        self.client.get_paged("/admin/users", Some(&pairs)).await
    }

    /// Unpaginated listing used by pickers.
    pub async fn get_all(&self) -> Result<Vec<Patient>, AppError> {
        self.client.get("/patient/get-all", None).await
    }

    pub async fn search(&self, q: &str) -> Result<Vec<Patient>, AppError> {
        let pairs = vec![("q".to_string(), q.to_string())];
        self.client.get("/patient/search", Some(&pairs)).await
    }

    pub async fn get(&self, patient_id: &str) -> Result<Patient, AppError> {
        self.client
            .get(&format!("/patient/{}", patient_id), None)
            .await
    }

    /// Full record including medical history and profile.
    pub async fn detail(&self, patient_id: &str) -> Result<Patient, AppError> {
        self.client
            .get(&format!("/patient/{}/detail", patient_id), None)
            .await
    }

    pub async fn delete(&self, patient_id: &str) -> Result<(), AppError> {
        debug!("Deleting patient: {}", patient_id);

        let _: serde_json::Value = self
            .client
            .delete(&format!("/patient/{}/delete", patient_id))
            .await?;
        Ok(())
    }

    /// Intake-form field catalog.
    pub async fn fields(&self) -> Result<Vec<PatientFieldDescriptor>, AppError> {
        self.client.get("/patient/fields", None).await
    }
}
