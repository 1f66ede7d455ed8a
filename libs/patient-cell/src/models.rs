use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

// Serde renames below carry the store's historical field spellings
// (camelCase and snake_case mixed); existing documents depend on them.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    #[serde(rename = "patientId")]
    pub patient_id: String,
    #[serde(rename = "patientName")]
    pub patient_name: String,
    pub start_time: DateTime<Utc>,
    pub reason_for_visit: String,
    #[serde(rename = "visitType")]
    pub visit_type: String,
    pub payment_method: String,
    pub payment_amount: f64,
    #[serde(rename = "paymentStatus")]
    pub payment_status: String,
    pub status: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Read-only from this codebase's perspective; written by clinic staff
/// tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnosis {
    pub id: String,
    #[serde(rename = "patientId")]
    pub patient_id: String,
    pub prescription: String,
    pub instructions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treatment {
    pub id: String,
    #[serde(rename = "diagnosisId")]
    pub diagnosis_id: String,
    #[serde(rename = "medicationName")]
    pub medication_name: String,
    #[serde(rename = "diagnoseName")]
    pub diagnose_name: String,
    pub dosage: String,
    pub frequency: String,
    pub refills: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

pub const DEFAULT_APPOINTMENT_STATUS: &str = "pending";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub patient_id: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub reason_for_visit: String,
    pub visit_type: String,
    pub payment_method: String,
    pub payment_amount: f64,
    /// Defaults to [`DEFAULT_APPOINTMENT_STATUS`] when unset.
    pub status: Option<String>,
}

impl BookAppointmentRequest {
    /// Combine the booking form's date and time into the stored timestamp.
    pub fn start_time(&self) -> DateTime<Utc> {
        self.appointment_date
            .and_time(self.appointment_time)
            .and_utc()
    }
}
