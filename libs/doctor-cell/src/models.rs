use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use shared_models::auth::Role;
use shared_models::pagination::ListParams;
use shared_models::user::{Profile, UserStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub phone: String,
    pub name: String,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
    /// Specialty code, e.g. `TAM_THAN`, `DINH_DUONG`.
    pub major_doctor: Option<String>,
    pub profile: Option<Profile>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A specialty entry from the fields catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorField {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleStatus {
    Free,
    Booked,
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleStatus::Free => write!(f, "FREE"),
            ScheduleStatus::Booked => write!(f, "BOOKED"),
        }
    }
}

/// A doctor-owned, bookable time slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSchedule {
    pub id: String,
    pub doctor_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: ScheduleStatus,
}

impl DoctorSchedule {
    pub fn is_free(&self) -> bool {
        self.status == ScheduleStatus::Free
    }

    pub fn overlaps(&self, other: &DoctorSchedule) -> bool {
        self.start_date < other.end_date && other.start_date < self.end_date
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDoctorRequest {
    pub phone: String,
    pub name: String,
    pub password: String,
    pub major_doctor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDoctorRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_doctor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
}

#[derive(Debug, Clone, Default)]
pub struct DoctorListQuery {
    pub params: ListParams,
    /// Filter by specialty code.
    pub major_doctor: Option<String>,
}

impl DoctorListQuery {
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(major) = &self.major_doctor {
            pairs.push(("majorDoctor".to_string(), major.clone()));
        }
        pairs.extend(self.params.to_query_pairs());
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn schedule(start_hour: u32, end_hour: u32) -> DoctorSchedule {
        DoctorSchedule {
            id: format!("s-{}", start_hour),
            doctor_id: "d1".to_string(),
            start_date: Utc.with_ymd_and_hms(2026, 3, 2, start_hour, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2026, 3, 2, end_hour, 0, 0).unwrap(),
            status: ScheduleStatus::Free,
        }
    }

    #[test]
    fn overlap_detection() {
        assert!(schedule(9, 11).overlaps(&schedule(10, 12)));
        assert!(!schedule(9, 10).overlaps(&schedule(10, 11)));
    }
}
