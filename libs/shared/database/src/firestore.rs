use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde_json::{json, Value};
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::value::document_to_json;

#[derive(Debug, Clone, Copy)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    fn as_str(&self) -> &'static str {
        match self {
            Direction::Ascending => "ASCENDING",
            Direction::Descending => "DESCENDING",
        }
    }
}

/// Thin client for the hosted document store's REST surface. Documents are
/// schemaless records grouped into named collections; callers build field
/// payloads with the helpers in [`crate::value`] and get flat JSON back.
pub struct FirestoreClient {
    client: Client,
    base_url: String,
    project_id: String,
    api_key: String,
}

impl FirestoreClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.firestore_base_url.clone(),
            project_id: config.firebase_project_id.clone(),
            api_key: config.firebase_api_key.clone(),
        }
    }

    fn documents_url(&self, suffix: &str) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents{}",
            self.base_url, self.project_id, suffix
        )
    }

    fn get_headers(&self, auth_token: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = auth_token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
            );
        }

        headers
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        auth_token: Option<&str>,
        body: Option<Value>,
    ) -> Result<Value, AppError> {
        debug!("Making request to {}", url);

        let headers = self.get_headers(auth_token);

        let mut req = self
            .client
            .request(method, url)
            .headers(headers)
            .query(&[("key", &self.api_key)]);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Document store error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                404 => AppError::NotFound(error_text),
                _ => AppError::Store(format!("({}) {}", status, error_text)),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))
    }

    /// Create a document with server-assigned id; returns the new id.
    pub async fn add(
        &self,
        collection: &str,
        fields: Value,
        auth_token: Option<&str>,
    ) -> Result<String, AppError> {
        let url = self.documents_url(&format!("/{}", collection));
        let doc = self
            .send(Method::POST, &url, auth_token, Some(json!({ "fields": fields })))
            .await?;

        let name = doc
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::Decode("created document has no name".to_string()))?;

        Ok(name.rsplit('/').next().unwrap_or(name).to_string())
    }

    /// Create a document under a caller-chosen id; returns the id.
    pub async fn add_with_id(
        &self,
        collection: &str,
        document_id: &str,
        fields: Value,
        auth_token: Option<&str>,
    ) -> Result<String, AppError> {
        let url = format!(
            "{}?documentId={}",
            self.documents_url(&format!("/{}", collection)),
            document_id
        );
        self.send(Method::POST, &url, auth_token, Some(json!({ "fields": fields })))
            .await?;

        Ok(document_id.to_string())
    }

    /// Fetch a single document by id; `None` when it does not exist.
    pub async fn get(
        &self,
        collection: &str,
        id: &str,
        auth_token: Option<&str>,
    ) -> Result<Option<Value>, AppError> {
        let url = self.documents_url(&format!("/{}/{}", collection, id));

        match self.send(Method::GET, &url, auth_token, None).await {
            Ok(doc) => Ok(Some(document_to_json(&doc)?)),
            Err(AppError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Run a structured query: ANDed equality filters plus an optional
    /// order-by. Result rows carrying only a read time (no document) are
    /// skipped.
    pub async fn query(
        &self,
        collection: &str,
        filters: &[(&str, Value)],
        order_by: Option<(&str, Direction)>,
        auth_token: Option<&str>,
    ) -> Result<Vec<Value>, AppError> {
        let mut structured = json!({
            "from": [{ "collectionId": collection }]
        });

        match filters {
            [] => {}
            [(field, value)] => {
                structured["where"] = field_filter(field, value);
            }
            many => {
                let clauses: Vec<Value> =
                    many.iter().map(|(f, v)| field_filter(f, v)).collect();
                structured["where"] = json!({
                    "compositeFilter": { "op": "AND", "filters": clauses }
                });
            }
        }

        if let Some((field, direction)) = order_by {
            structured["orderBy"] = json!([{
                "field": { "fieldPath": field },
                "direction": direction.as_str()
            }]);
        }

        let url = self.documents_url(":runQuery");
        let rows = self
            .send(
                Method::POST,
                &url,
                auth_token,
                Some(json!({ "structuredQuery": structured })),
            )
            .await?;

        let rows = rows
            .as_array()
            .ok_or_else(|| AppError::Decode("query response is not an array".to_string()))?;

        rows.iter()
            .filter_map(|row| row.get("document"))
            .map(document_to_json)
            .collect()
    }
}

fn field_filter(field: &str, value: &Value) -> Value {
    json!({
        "fieldFilter": {
            "field": { "fieldPath": field },
            "op": "EQUAL",
            "value": value
        }
    })
}
