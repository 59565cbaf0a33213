use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use shared_models::auth::Role;
use shared_models::user::{Profile, UserStatus};

// ==============================================================================
// PATIENT PROFILE
// ==============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalHistory {
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub surgeries: Vec<String>,
    pub family_history: Option<String>,
    pub lifestyle: Option<String>,
    #[serde(default)]
    pub current_medications: Vec<String>,
    /// Free-form fields the intake forms attach beyond the fixed set.
    #[serde(default)]
    pub extras: HashMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub phone: String,
    pub name: String,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
    pub medical_history: Option<MedicalHistory>,
    pub profile: Option<Profile>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

// ==============================================================================
// PRESCRIPTIONS AND ADHERENCE
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeOfDay {
    Morning,
    Noon,
    Evening,
    Night,
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeOfDay::Morning => write!(f, "MORNING"),
            TimeOfDay::Noon => write!(f, "NOON"),
            TimeOfDay::Evening => write!(f, "EVENING"),
            TimeOfDay::Night => write!(f, "NIGHT"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionItem {
    pub id: String,
    pub medication: String,
    pub dosage: String,
    pub times_of_day: Vec<TimeOfDay>,
    pub duration_days: u32,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: Option<String>,
    pub items: Vec<PrescriptionItem>,
    pub issued_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdherenceStatus {
    Taken,
    Missed,
}

/// One dose event for a prescription item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdherenceLog {
    pub id: Option<String>,
    pub prescription_item_id: String,
    pub date: NaiveDate,
    pub time_of_day: TimeOfDay,
    pub status: AdherenceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub prescription_item_id: String,
    pub time_of_day: TimeOfDay,
    pub enabled: bool,
}

// ==============================================================================
// DASHBOARD PAYLOADS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientOverview {
    pub active_prescriptions: u32,
    pub adherence_rate: f32,
    pub upcoming_meetings: u32,
    pub open_alerts: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientAlert {
    pub id: String,
    pub severity: String,
    pub message: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Intake-form field descriptor from the fields catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientFieldDescriptor {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
}
