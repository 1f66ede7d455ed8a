use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transient notification shown at the top of a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

/// Navigation targets a screen can ask for. Wiring them into an actual
/// navigation stack is the host UI's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Home,
    Booking,
    MedicalHistory,
}

/// Inline validation failure for one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Outcome of a form submission.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; no network call was made.
    Blocked(Vec<FieldError>),
    Success {
        notice: Notice,
        navigate: Option<Route>,
    },
    Failed {
        notice: Notice,
    },
}

/// File descriptor returned by the device file picker.
#[derive(Debug, Clone)]
pub struct PickedFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub uri: String,
}

#[derive(Debug)]
pub enum PickOutcome {
    Cancelled,
    Selected(Vec<PickedFile>),
}

/// Locally selected document. Never persisted to the backend in this
/// flow; lives only in the screen's upload list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub uri: String,
    pub uploaded_at: DateTime<Utc>,
}

impl UploadedFile {
    pub fn from_picked(file: PickedFile) -> Self {
        // Id only needs to be unique within the screen's list.
        let id = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            rand::random::<u32>()
        );

        Self {
            id,
            name: file.name,
            size: file.size,
            mime_type: file.mime_type,
            uri: file.uri,
            uploaded_at: Utc::now(),
        }
    }

    /// Human-readable size: "0 Bytes", "1.5 KB", "2 MB", ...
    pub fn format_size(&self) -> String {
        format_file_size(self.size)
    }
}

pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exponent = (((bytes as f64).ln() / 1024_f64.ln()) as usize).min(UNITS.len() - 1);
    let scaled = bytes as f64 / 1024_f64.powi(exponent as i32);

    let rendered = format!("{:.2}", scaled);
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", rendered, UNITS[exponent])
}

/// Entry in the screen's previously uploaded documents section.
#[derive(Debug, Clone)]
pub struct DocumentSummary {
    pub name: String,
    pub date: String,
    pub doc_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_file_size_handles_zero() {
        assert_eq!(format_file_size(0), "0 Bytes");
    }

    #[test]
    fn format_file_size_trims_trailing_zeros() {
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2 * 1024 * 1024), "2 MB");
    }

    #[test]
    fn format_file_size_keeps_small_values_in_bytes() {
        assert_eq!(format_file_size(512), "512 Bytes");
    }

    #[test]
    fn picked_files_get_distinct_ids() {
        let picked = PickedFile {
            name: "scan.pdf".to_string(),
            size: 100,
            mime_type: "application/pdf".to_string(),
            uri: "file:///tmp/scan.pdf".to_string(),
        };

        let a = UploadedFile::from_picked(picked.clone());
        let b = UploadedFile::from_picked(picked);
        assert_ne!(a.id, b.id);
    }
}
