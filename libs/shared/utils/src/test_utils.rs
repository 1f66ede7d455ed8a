use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::Identity;

pub struct TestConfig {
    pub project_id: String,
    pub api_key: String,
    pub identity_url: String,
    pub firestore_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        // Local emulator ports.
        Self {
            project_id: "test-project".to_string(),
            api_key: "test-api-key".to_string(),
            identity_url: "http://localhost:9099".to_string(),
            firestore_url: "http://localhost:8080".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            firebase_project_id: self.project_id.clone(),
            firebase_api_key: self.api_key.clone(),
            identity_base_url: self.identity_url.clone(),
            firestore_base_url: self.firestore_url.clone(),
        }
    }

    /// Config with both service base urls pointed at one mock server.
    pub fn with_mock_server(uri: &str) -> AppConfig {
        AppConfig {
            firebase_project_id: "test-project".to_string(),
            firebase_api_key: "test-api-key".to_string(),
            identity_base_url: uri.to_string(),
            firestore_base_url: uri.to_string(),
        }
    }
}

pub struct TestIdentity {
    pub id: String,
    pub email: String,
    pub token: String,
}

impl Default for TestIdentity {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            token: "test-id-token".to_string(),
        }
    }
}

impl TestIdentity {
    pub fn new(email: &str) -> Self {
        Self {
            email: email.to_string(),
            ..Self::default()
        }
    }

    pub fn to_identity(&self) -> Identity {
        Identity {
            id: self.id.clone(),
            email: Some(self.email.clone()),
            display_name: None,
            id_token: self.token.clone(),
        }
    }
}

pub struct MockIdentityResponses;

impl MockIdentityResponses {
    pub fn session(local_id: &str, email: &str) -> Value {
        json!({
            "kind": "identitytoolkit#VerifyPasswordResponse",
            "localId": local_id,
            "email": email,
            "idToken": "test-id-token",
            "refreshToken": "test-refresh-token",
            "expiresIn": "3600"
        })
    }

    pub fn error(code: &str) -> Value {
        json!({
            "error": {
                "code": 400,
                "message": code,
                "errors": [{ "message": code, "domain": "global", "reason": "invalid" }]
            }
        })
    }
}

pub struct MockStoreResponses;

impl MockStoreResponses {
    pub fn document_name(collection: &str, id: &str) -> String {
        format!(
            "projects/test-project/databases/(default)/documents/{}/{}",
            collection, id
        )
    }

    pub fn document(collection: &str, id: &str, fields: Value) -> Value {
        json!({
            "name": Self::document_name(collection, id),
            "fields": fields,
            "createTime": "2024-01-01T00:00:00Z",
            "updateTime": "2024-01-01T00:00:00Z"
        })
    }

    /// Wrap documents as query result rows, trailed by a read-time-only
    /// row the way live query responses end.
    pub fn query_result(documents: Vec<Value>) -> Value {
        let mut rows: Vec<Value> = documents
            .into_iter()
            .map(|doc| json!({ "document": doc, "readTime": "2024-01-01T00:00:00Z" }))
            .collect();
        rows.push(json!({ "readTime": "2024-01-01T00:00:00Z" }));
        Value::Array(rows)
    }

    pub fn profile_fields(name: &str, email: &str, role: &str) -> Value {
        json!({
            "name": { "stringValue": name },
            "email": { "stringValue": email },
            "phone": { "stringValue": "01012345678" },
            "dob": { "stringValue": "16-07-1990" },
            "gender": { "stringValue": "female" },
            "role": { "stringValue": role },
            "createdAt": { "timestampValue": Utc::now().to_rfc3339() }
        })
    }

    pub fn appointment_fields(patient_id: &str, start_time: &str) -> Value {
        json!({
            "patientId": { "stringValue": patient_id },
            "patientName": { "stringValue": "Test Patient" },
            "paymentStatus": { "stringValue": "paid" },
            "createdAt": { "timestampValue": "2024-07-01T09:00:00Z" },
            "start_time": { "timestampValue": start_time },
            "reason_for_visit": { "stringValue": "checkup" },
            "visitType": { "stringValue": "consultation" },
            "payment_method": { "stringValue": "cash" },
            "payment_amount": { "doubleValue": 50.0 },
            "status": { "stringValue": "pending" }
        })
    }

    pub fn diagnosis_fields(patient_id: &str, prescription: &str) -> Value {
        json!({
            "patientId": { "stringValue": patient_id },
            "prescription": { "stringValue": prescription },
            "instructions": { "stringValue": "Twice daily after meals" }
        })
    }

    pub fn treatment_fields(diagnosis_id: &str, medication: &str) -> Value {
        json!({
            "diagnosisId": { "stringValue": diagnosis_id },
            "medicationName": { "stringValue": medication },
            "diagnoseName": { "stringValue": "Sinusitis" },
            "dosage": { "stringValue": "500mg" },
            "frequency": { "stringValue": "2x daily" },
            "refills": { "integerValue": "1" }
        })
    }
}
