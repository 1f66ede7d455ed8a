use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use patient_cell::models::{Appointment, Diagnosis, Treatment};
use patient_cell::services::records::RecordsGateway;
use shared_models::auth::Identity;
use shared_models::error::AppError;

use crate::models::{
    DocumentSummary, Notice, PickOutcome, Route, UploadedFile,
};

/// Device file picker, injectable because it is a platform service.
#[async_trait]
pub trait FilePicker: Send + Sync {
    async fn pick_documents(&self) -> Result<PickOutcome, AppError>;
}

#[derive(Debug, Default)]
pub struct HistoryData {
    pub appointments: Vec<Appointment>,
    pub diagnoses: Vec<Diagnosis>,
    pub treatments: Vec<Treatment>,
}

/// Medical history screen: the fetched record sets plus the local upload
/// list. Loading aborts on an appointment or diagnosis failure but keeps
/// partial treatment results when a single diagnosis lookup fails.
pub struct MedicalHistoryScreen {
    records: Arc<dyn RecordsGateway>,
    picker: Arc<dyn FilePicker>,
    pub data: HistoryData,
    pub documents: Vec<DocumentSummary>,
    pub uploaded_files: Vec<UploadedFile>,
    pub loading: bool,
}

impl MedicalHistoryScreen {
    pub fn new(records: Arc<dyn RecordsGateway>, picker: Arc<dyn FilePicker>) -> Self {
        Self {
            records,
            picker,
            data: HistoryData::default(),
            documents: placeholder_documents(),
            uploaded_files: Vec::new(),
            loading: true,
        }
    }

    /// Fetch the signed-in patient's history. Returns a notice only on the
    /// aborting failure case.
    pub async fn load(&mut self, identity: &Identity) -> Option<Notice> {
        self.loading = true;
        let result = self.fetch_all(identity).await;
        self.loading = false;

        match result {
            Ok(()) => None,
            Err(err) => {
                error!("Error fetching medical history: {}", err);
                Some(Notice::error("Failed to load medical history"))
            }
        }
    }

    async fn fetch_all(&mut self, identity: &Identity) -> Result<(), AppError> {
        let token = identity.id_token.as_str();

        self.data.appointments = self
            .records
            .patient_appointments(&identity.id, token)
            .await?;

        let diagnoses = self.records.patient_diagnoses(&identity.id, token).await?;

        // Treatments expand per diagnosis, sequentially; a failing
        // diagnosis is skipped and the rest of the pass continues.
        let mut treatments = Vec::new();
        for diagnosis in &diagnoses {
            match self.records.treatment_history(&diagnosis.id, token).await {
                Ok(mut batch) => treatments.append(&mut batch),
                Err(err) => {
                    warn!(
                        "Error fetching treatments for diagnosis {}: {}",
                        diagnosis.id, err
                    );
                }
            }
        }

        self.data.diagnoses = diagnoses;
        self.data.treatments = treatments;
        Ok(())
    }

    /// Open the device picker and append the selection to the local list.
    /// Nothing is sent to the backend.
    pub async fn pick_files(&mut self) -> Option<Notice> {
        match self.picker.pick_documents().await {
            Ok(PickOutcome::Cancelled) => None,
            Ok(PickOutcome::Selected(files)) => {
                let count = files.len();
                self.uploaded_files
                    .extend(files.into_iter().map(UploadedFile::from_picked));
                Some(Notice::success(format!(
                    "{count} file(s) uploaded successfully"
                )))
            }
            Err(err) => {
                error!("Error picking documents: {}", err);
                Some(Notice::error("Failed to upload document"))
            }
        }
    }

    pub fn remove_file(&mut self, id: &str) {
        self.uploaded_files.retain(|file| file.id != id);
    }

    /// Persisting the picked documents is not wired to any backend; the
    /// action is a stub and the list stays local.
    pub fn save_all_documents(&mut self) {}

    pub fn back_to_home(&self) -> Route {
        Route::Home
    }
}

// Sample summaries shown in the Documents section until document listing
// is backed by the store.
fn placeholder_documents() -> Vec<DocumentSummary> {
    vec![
        DocumentSummary {
            name: "Blood Test Results".to_string(),
            date: "July 16, 2024".to_string(),
            doc_type: "Lab Report".to_string(),
        },
        DocumentSummary {
            name: "Allergy Test Results".to_string(),
            date: "June 21, 2024".to_string(),
            doc_type: "Lab Report".to_string(),
        },
    ]
}
