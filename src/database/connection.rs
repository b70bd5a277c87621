//! Data store connection management
//!
//! The hosted store exposes each collection as a REST resource under
//! `<url>/rest/v1/<collection>`; filters, ordering and embedded joins are
//! expressed as query parameters.

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::config::StoreConfig;
use crate::utils::errors::{ExamResultsError, Result, StoreError};
use crate::utils::logging::log_store_request;

const REST_PATH: &str = "rest/v1/";
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Query parameters for a collection request
#[derive(Debug, Clone, Default)]
pub struct StoreQuery {
    params: Vec<(String, String)>,
}

impl StoreQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns (and embedded relations) to return
    pub fn select(mut self, columns: &str) -> Self {
        let compact: String = columns.split_whitespace().collect();
        self.params.push(("select".to_string(), compact));
        self
    }

    /// Ascending order by a column
    pub fn order(mut self, column: &str) -> Self {
        self.params.push(("order".to_string(), format!("{}.asc", column)));
        self
    }

    /// Equality filter
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params.push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// Columns of the uniqueness constraint an upsert resolves on
    pub fn on_conflict(mut self, columns: &str) -> Self {
        self.params.push(("on_conflict".to_string(), columns.to_string()));
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

/// Error body returned by the store
#[derive(Debug, Deserialize, Serialize)]
struct StoreErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

/// Generic query client for the hosted store.
///
/// Constructed once at startup and handed to every repository.
#[derive(Debug, Clone)]
pub struct StoreClient {
    client: Client,
    rest_url: Url,
}

impl StoreClient {
    /// Create a client from validated store configuration
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let mut base = config.url.trim_end_matches('/').to_string();
        base.push('/');
        let rest_url = Url::parse(&base)?.join(REST_PATH)?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value(&config.anon_key)?);
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", config.anon_key))?);
        headers.insert("Accept-Profile", header_value(&config.schema)?);
        headers.insert("Content-Profile", header_value(&config.schema)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("exam-results/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        debug!(rest_url = %rest_url, "Data store client created");
        Ok(Self { client, rest_url })
    }

    /// Base URL of the REST interface
    pub fn rest_url(&self) -> &Url {
        &self.rest_url
    }

    /// Read rows from a collection
    pub async fn select<T: DeserializeOwned>(&self, collection: &str, query: &StoreQuery) -> Result<Vec<T>> {
        let request = self.client.get(self.endpoint(collection)?).query(query.params());
        let response = self.send(collection, "select", request).await?;
        decode(response).await
    }

    /// Insert rows and return them as stored, with generated identities
    pub async fn insert<B, T>(&self, collection: &str, rows: &[B]) -> Result<Vec<T>>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = self
            .client
            .post(self.endpoint(collection)?)
            .header("Prefer", "return=representation")
            .json(rows);
        let response = self.send(collection, "insert", request).await?;
        decode(response).await
    }

    /// Insert rows, updating existing ones that collide on the given unique columns
    pub async fn upsert<B, T>(&self, collection: &str, rows: &[B], on_conflict: &str) -> Result<Vec<T>>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let query = StoreQuery::new().on_conflict(on_conflict);
        let request = self
            .client
            .post(self.endpoint(collection)?)
            .query(query.params())
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(rows);
        let response = self.send(collection, "upsert", request).await?;
        decode(response).await
    }

    /// Delete rows matching the query filters, returning how many were removed
    pub async fn delete(&self, collection: &str, query: &StoreQuery) -> Result<usize> {
        let request = self
            .client
            .delete(self.endpoint(collection)?)
            .query(query.params())
            .header("Prefer", "return=representation");
        let response = self.send(collection, "delete", request).await?;
        let removed: Vec<serde_json::Value> = decode(response).await?;
        Ok(removed.len())
    }

    /// Check that the store answers authenticated requests
    pub async fn health_check(&self) -> Result<()> {
        let request = self.client.get(self.rest_url.clone());
        self.send("", "health_check", request).await?;
        Ok(())
    }

    fn endpoint(&self, collection: &str) -> Result<Url> {
        Ok(self.rest_url.join(collection)?)
    }

    async fn send(&self, collection: &str, operation: &str, request: RequestBuilder) -> Result<Response> {
        let started = Instant::now();
        let outcome = execute(request).await;
        let elapsed = started.elapsed().as_millis() as u64;
        log_store_request(collection, operation, elapsed, outcome.is_ok());
        outcome
    }
}

async fn execute(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            StoreError::Timeout
        } else if e.is_connect() {
            StoreError::ServiceUnavailable
        } else {
            StoreError::RequestFailed {
                status: e.status().map(|s| s.as_u16()).unwrap_or_default(),
                message: e.to_string(),
            }
        }
    })?;

    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    Err(ExamResultsError::Store(classify_failure(status, &text)))
}

fn classify_failure(status: u16, body: &str) -> StoreError {
    let parsed = serde_json::from_str::<StoreErrorBody>(body).ok();
    let code = parsed.as_ref().and_then(|b| b.code.clone());
    let message = parsed
        .as_ref()
        .and_then(|b| b.message.clone())
        .unwrap_or_else(|| body.to_string());

    match code.as_deref() {
        Some(UNIQUE_VIOLATION) => StoreError::UniqueViolation(message),
        Some(FOREIGN_KEY_VIOLATION) => StoreError::ForeignKeyViolation(message),
        _ if status == 503 => StoreError::ServiceUnavailable,
        _ => StoreError::RequestFailed { status, message },
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<Vec<T>> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&text)
        .map_err(|e| ExamResultsError::Store(StoreError::InvalidResponse(e.to_string())))
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| ExamResultsError::Config("Store credentials contain invalid header characters".to_string()))
}
