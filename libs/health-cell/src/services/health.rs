use std::sync::Arc;

use futures::try_join;
use tracing::debug;

use shared_config::AppConfig;
use shared_http::ApiClient;
use shared_models::error::AppError;
use shared_session::SessionStore;

use crate::models::{
    HealthOverview, HealthSummary, HeartRateSample, SeriesRange, SleepSample, Spo2Sample, Vitals,
};

pub struct HealthService {
    client: ApiClient,
}

impl HealthService {
    pub fn new(config: &AppConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            client: ApiClient::new(config, store),
        }
    }

    pub async fn overview(&self) -> Result<HealthOverview, AppError> {
        self.client.get("/health/overview", None).await
    }

    pub async fn heartrate(&self, range: SeriesRange) -> Result<Vec<HeartRateSample>, AppError> {
        let pairs = range.to_query_pairs();
        self.client.get("/health/heartrate", Some(&pairs)).await
    }

    pub async fn sleep(&self, range: SeriesRange) -> Result<Vec<SleepSample>, AppError> {
        let pairs = range.to_query_pairs();
        self.client.get("/health/sleep", Some(&pairs)).await
    }

    pub async fn spo2(&self, range: SeriesRange) -> Result<Vec<Spo2Sample>, AppError> {
        let pairs = range.to_query_pairs();
        self.client.get("/health/spo2", Some(&pairs)).await
    }

    /// Fetch the three metric series concurrently for the dashboard.
    pub async fn vitals(&self, range: SeriesRange) -> Result<Vitals, AppError> {
        debug!("Fetching vitals series");

        let (heartrate, sleep, spo2) = try_join!(
            self.heartrate(range),
            self.sleep(range),
            self.spo2(range)
        )?;

        Ok(Vitals {
            heartrate,
            sleep,
            spo2,
        })
    }

    pub async fn summary_overview(&self, user_id: &str) -> Result<HealthSummary, AppError> {
        self.client
            .get(&format!("/health/get-summary-overview/{}", user_id), None)
            .await
    }
}
