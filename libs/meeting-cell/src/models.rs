use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use shared_models::pagination::ListParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingStatus {
    Pending,
    Completed,
    Cancelled,
}

impl fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeetingStatus::Pending => write!(f, "PENDING"),
            MeetingStatus::Completed => write!(f, "COMPLETED"),
            MeetingStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A booked appointment instance, optionally linked to a billing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSchedule {
    pub id: String,
    pub order_id: Option<String>,
    pub doctor_id: String,
    pub patient_id: String,
    pub doctor_name: Option<String>,
    pub patient_name: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: MeetingStatus,
    pub meeting_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeetingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    pub doctor_id: String,
    pub patient_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeetingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MeetingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MeetingListQuery {
    pub params: ListParams,
    pub doctor_id: Option<String>,
    pub patient_id: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl MeetingListQuery {
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(doctor_id) = &self.doctor_id {
            pairs.push(("doctorId".to_string(), doctor_id.clone()));
        }
        if let Some(patient_id) = &self.patient_id {
            pairs.push(("patientId".to_string(), patient_id.clone()));
        }
        if let Some(from) = self.from {
            pairs.push(("from".to_string(), from.to_rfc3339()));
        }
        if let Some(to) = self.to {
            pairs.push(("to".to_string(), to.to_rfc3339()));
        }
        pairs.extend(self.params.to_query_pairs());
        pairs
    }
}
