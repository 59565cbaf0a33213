use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthOverview {
    pub resting_heart_rate_bpm: Option<f32>,
    pub avg_sleep_hours: Option<f32>,
    pub avg_spo2_percent: Option<f32>,
    pub last_synced_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateSample {
    pub timestamp: DateTime<Utc>,
    pub bpm: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepSample {
    pub date: NaiveDate,
    pub hours: f32,
    pub quality: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spo2Sample {
    pub timestamp: DateTime<Utc>,
    pub percent: f32,
}

/// The three metric series a dashboard renders together.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    pub heartrate: Vec<HeartRateSample>,
    pub sleep: Vec<SleepSample>,
    pub spo2: Vec<Spo2Sample>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummary {
    pub user_id: String,
    pub overview: HealthOverview,
    #[serde(default)]
    pub alerts: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl SeriesRange {
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(from) = self.from {
            pairs.push(("from".to_string(), from.to_string()));
        }
        if let Some(to) = self.to {
            pairs.push(("to".to_string(), to.to_string()));
        }
        pairs
    }
}
