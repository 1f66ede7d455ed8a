use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::firestore::{Direction, FirestoreClient};
use shared_database::value::{double_value, string_value, timestamp_value};
use shared_models::error::AppError;

use crate::models::{
    Appointment, BookAppointmentRequest, Diagnosis, Treatment, DEFAULT_APPOINTMENT_STATUS,
};

/// The read operations the Medical History screen consumes, injectable so
/// the screen can be tested without a live document store.
#[async_trait]
pub trait RecordsGateway: Send + Sync {
    async fn patient_appointments(
        &self,
        patient_id: &str,
        auth_token: &str,
    ) -> Result<Vec<Appointment>, AppError>;

    async fn patient_diagnoses(
        &self,
        patient_id: &str,
        auth_token: &str,
    ) -> Result<Vec<Diagnosis>, AppError>;

    async fn treatment_history(
        &self,
        diagnosis_id: &str,
        auth_token: &str,
    ) -> Result<Vec<Treatment>, AppError>;
}

/// Accessors for the patient's appointment, diagnosis and treatment
/// collections. Each method is a single scoped query; backend failures
/// propagate unchanged and nothing is cached or retried.
pub struct PatientRecords {
    store: FirestoreClient,
}

impl PatientRecords {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: FirestoreClient::new(config),
        }
    }

    /// Store a new appointment; returns the created record's id.
    pub async fn add_appointment(
        &self,
        request: &BookAppointmentRequest,
        payment_status: &str,
        patient_name: &str,
        auth_token: &str,
    ) -> Result<String, AppError> {
        debug!("Adding appointment for patient {}", request.patient_id);

        let status = request
            .status
            .as_deref()
            .unwrap_or(DEFAULT_APPOINTMENT_STATUS);

        let fields = serde_json::json!({
            "patientId": string_value(&request.patient_id),
            "patientName": string_value(patient_name),
            "paymentStatus": string_value(payment_status),
            "createdAt": timestamp_value(Utc::now()),
            "start_time": timestamp_value(request.start_time()),
            "reason_for_visit": string_value(&request.reason_for_visit),
            "visitType": string_value(&request.visit_type),
            "payment_method": string_value(&request.payment_method),
            "payment_amount": double_value(request.payment_amount),
            "status": string_value(status),
        });

        self.store
            .add("appointments", fields, Some(auth_token))
            .await
    }

    /// All appointment start times system-wide, for slot-availability
    /// checks by the booking flow. Records without a start time are
    /// skipped.
    pub async fn scheduled_appointments(
        &self,
        auth_token: &str,
    ) -> Result<Vec<DateTime<Utc>>, AppError> {
        debug!("Fetching scheduled appointment times");

        let rows = self
            .store
            .query("appointments", &[], None, Some(auth_token))
            .await?;

        let times = rows
            .iter()
            .filter_map(|row| row.get("start_time").and_then(Value::as_str))
            .filter_map(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|ts| ts.with_timezone(&Utc))
            .collect();

        Ok(times)
    }
}

#[async_trait]
impl RecordsGateway for PatientRecords {
    async fn patient_appointments(
        &self,
        patient_id: &str,
        auth_token: &str,
    ) -> Result<Vec<Appointment>, AppError> {
        debug!("Fetching appointments for patient {}", patient_id);

        let rows = self
            .store
            .query(
                "appointments",
                &[("patientId", string_value(patient_id))],
                Some(("start_time", Direction::Descending)),
                Some(auth_token),
            )
            .await?;

        decode_rows(rows)
    }

    async fn patient_diagnoses(
        &self,
        patient_id: &str,
        auth_token: &str,
    ) -> Result<Vec<Diagnosis>, AppError> {
        debug!("Fetching diagnoses for patient {}", patient_id);

        let rows = self
            .store
            .query(
                "diagnoses",
                &[("patientId", string_value(patient_id))],
                None,
                Some(auth_token),
            )
            .await?;

        decode_rows(rows)
    }

    async fn treatment_history(
        &self,
        diagnosis_id: &str,
        auth_token: &str,
    ) -> Result<Vec<Treatment>, AppError> {
        debug!("Fetching treatments for diagnosis {}", diagnosis_id);

        let rows = self
            .store
            .query(
                "treatments",
                &[("diagnosisId", string_value(diagnosis_id))],
                None,
                Some(auth_token),
            )
            .await?;

        decode_rows(rows)
    }
}

fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, AppError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(|e| AppError::Decode(e.to_string())))
        .collect()
}
