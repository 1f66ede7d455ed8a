use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use patient_cell::models::BookAppointmentRequest;
use patient_cell::services::records::{PatientRecords, RecordsGateway};
use shared_models::error::AppError;
use shared_utils::test_utils::{MockStoreResponses, TestConfig};

const RUN_QUERY: &str = "/v1/projects/test-project/databases/(default)/documents:runQuery";

fn records_for(server: &MockServer) -> PatientRecords {
    PatientRecords::new(&TestConfig::with_mock_server(&server.uri()))
}

#[tokio::test]
async fn add_appointment_stores_derived_fields_and_returns_the_id() {
    let server = MockServer::start().await;
    let records = records_for(&server);

    Mock::given(method("POST"))
        .and(path(
            "/v1/projects/test-project/databases/(default)/documents/appointments",
        ))
        .and(body_partial_json(json!({
            "fields": {
                "patientId": { "stringValue": "p1" },
                "patientName": { "stringValue": "Test Patient" },
                "paymentStatus": { "stringValue": "paid" },
                "visitType": { "stringValue": "consultation" },
                "status": { "stringValue": "pending" },
                "start_time": { "timestampValue": "2024-07-20T14:30:00Z" }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockStoreResponses::document(
            "appointments",
            "appt-1",
            json!({}),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let request = BookAppointmentRequest {
        patient_id: "p1".to_string(),
        appointment_date: NaiveDate::from_ymd_opt(2024, 7, 20).unwrap(),
        appointment_time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
        reason_for_visit: "checkup".to_string(),
        visit_type: "consultation".to_string(),
        payment_method: "cash".to_string(),
        payment_amount: 50.0,
        status: None,
    };

    let id = records
        .add_appointment(&request, "paid", "Test Patient", "token")
        .await
        .unwrap();

    assert_eq!(id, "appt-1");
}

#[tokio::test]
async fn patient_appointments_filters_and_orders_descending() {
    let server = MockServer::start().await;
    let records = records_for(&server);

    Mock::given(method("POST"))
        .and(path(RUN_QUERY))
        .and(body_partial_json(json!({
            "structuredQuery": {
                "from": [{ "collectionId": "appointments" }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": "patientId" },
                        "op": "EQUAL",
                        "value": { "stringValue": "p1" }
                    }
                },
                "orderBy": [{
                    "field": { "fieldPath": "start_time" },
                    "direction": "DESCENDING"
                }]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockStoreResponses::query_result(vec![
                MockStoreResponses::document(
                    "appointments",
                    "later",
                    MockStoreResponses::appointment_fields("p1", "2024-07-20T10:00:00Z"),
                ),
                MockStoreResponses::document(
                    "appointments",
                    "earlier",
                    MockStoreResponses::appointment_fields("p1", "2024-07-01T10:00:00Z"),
                ),
            ]),
        ))
        .mount(&server)
        .await;

    let appointments = records.patient_appointments("p1", "token").await.unwrap();

    assert_eq!(appointments.len(), 2);
    assert_eq!(appointments[0].id, "later");
    assert_eq!(appointments[1].id, "earlier");
    assert!(appointments[0].start_time > appointments[1].start_time);
    assert!(appointments.iter().all(|a| a.patient_id == "p1"));
}

#[tokio::test]
async fn scheduled_appointments_projects_start_times_and_skips_records_without_one() {
    let server = MockServer::start().await;
    let records = records_for(&server);

    Mock::given(method("POST"))
        .and(path(RUN_QUERY))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockStoreResponses::query_result(vec![
                MockStoreResponses::document(
                    "appointments",
                    "a1",
                    json!({ "start_time": { "timestampValue": "2024-07-20T10:00:00Z" } }),
                ),
                MockStoreResponses::document(
                    "appointments",
                    "a2",
                    json!({ "status": { "stringValue": "pending" } }),
                ),
            ]),
        ))
        .mount(&server)
        .await;

    let times = records.scheduled_appointments("token").await.unwrap();

    assert_eq!(
        times,
        vec![Utc.with_ymd_and_hms(2024, 7, 20, 10, 0, 0).unwrap()]
    );
}

#[tokio::test]
async fn patient_diagnoses_queries_by_patient_id() {
    let server = MockServer::start().await;
    let records = records_for(&server);

    Mock::given(method("POST"))
        .and(path(RUN_QUERY))
        .and(body_partial_json(json!({
            "structuredQuery": {
                "from": [{ "collectionId": "diagnoses" }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": "patientId" },
                        "op": "EQUAL",
                        "value": { "stringValue": "p1" }
                    }
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockStoreResponses::query_result(vec![MockStoreResponses::document(
                "diagnoses",
                "d1",
                MockStoreResponses::diagnosis_fields("p1", "Amoxicillin 500mg"),
            )]),
        ))
        .mount(&server)
        .await;

    let diagnoses = records.patient_diagnoses("p1", "token").await.unwrap();

    assert_eq!(diagnoses.len(), 1);
    assert_eq!(diagnoses[0].id, "d1");
    assert_eq!(diagnoses[0].prescription, "Amoxicillin 500mg");
}

#[tokio::test]
async fn treatment_history_queries_by_diagnosis_id() {
    let server = MockServer::start().await;
    let records = records_for(&server);

    Mock::given(method("POST"))
        .and(path(RUN_QUERY))
        .and(body_partial_json(json!({
            "structuredQuery": {
                "from": [{ "collectionId": "treatments" }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": "diagnosisId" },
                        "op": "EQUAL",
                        "value": { "stringValue": "d1" }
                    }
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockStoreResponses::query_result(vec![MockStoreResponses::document(
                "treatments",
                "t1",
                MockStoreResponses::treatment_fields("d1", "Amoxicillin"),
            )]),
        ))
        .mount(&server)
        .await;

    let treatments = records.treatment_history("d1", "token").await.unwrap();

    assert_eq!(treatments.len(), 1);
    assert_eq!(treatments[0].medication_name, "Amoxicillin");
    assert_eq!(treatments[0].refills, 1);
    assert_eq!(treatments[0].notes, None);
}

#[tokio::test]
async fn backend_failures_propagate_unchanged() {
    let server = MockServer::start().await;
    let records = records_for(&server);

    Mock::given(method("POST"))
        .and(path(RUN_QUERY))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let result = records.patient_appointments("p1", "token").await;

    assert_matches!(result, Err(AppError::Store(_)));
}
