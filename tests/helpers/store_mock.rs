//! Mock data store for testing
//!
//! This module provides a mock HTTP server that answers like the hosted
//! store's REST interface. It uses wiremock to create configurable responses.

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

use exam_results::config::{LoggingConfig, RosterDefaults, Settings, StoreConfig};
use exam_results::{DatabaseService, ServiceFactory, StoreClient};

pub const TEST_ANON_KEY: &str = "test-anon-key";

/// Mock hosted store for testing
pub struct StoreMockServer {
    pub server: MockServer,
}

impl StoreMockServer {
    /// Start a new mock store
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// REST path of a collection
    pub fn collection_path(collection: &str) -> String {
        format!("/rest/v1/{}", collection)
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            url: self.server.uri(),
            anon_key: TEST_ANON_KEY.to_string(),
            timeout_seconds: 5,
            schema: "public".to_string(),
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            store: self.store_config(),
            logging: LoggingConfig {
                level: "debug".to_string(),
                file_path: None,
                json: false,
            },
            roster: RosterDefaults {
                department: "CSE".to_string(),
                semester: 3,
            },
        }
    }

    pub fn client(&self) -> StoreClient {
        StoreClient::new(&self.store_config()).expect("mock store config is valid")
    }

    pub fn database(&self) -> DatabaseService {
        DatabaseService::new(self.client())
    }

    pub fn factory(&self) -> ServiceFactory {
        ServiceFactory::new(self.database(), self.settings())
    }

    /// Answer every read of `collection` with `rows`
    pub async fn mock_select(&self, collection: &str, rows: Value) {
        Mock::given(method("GET"))
            .and(path(Self::collection_path(collection)))
            .respond_with(ResponseTemplate::new(200).set_body_json(rows))
            .mount(&self.server)
            .await;
    }

    /// Answer only the next read of `collection` with `rows`.
    ///
    /// Mount before `mock_select` to model a collection that changes after a mutation.
    pub async fn mock_select_once(&self, collection: &str, rows: Value) {
        Mock::given(method("GET"))
            .and(path(Self::collection_path(collection)))
            .respond_with(ResponseTemplate::new(200).set_body_json(rows))
            .up_to_n_times(1)
            .mount(&self.server)
            .await;
    }

    /// Answer reads of `collection` after a delay
    pub async fn mock_select_delayed(&self, collection: &str, rows: Value, delay: Duration) {
        Mock::given(method("GET"))
            .and(path(Self::collection_path(collection)))
            .respond_with(ResponseTemplate::new(200).set_body_json(rows).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    /// Answer inserts and upserts into `collection` with the stored rows
    pub async fn mock_write(&self, collection: &str, returned: Value) {
        Mock::given(method("POST"))
            .and(path(Self::collection_path(collection)))
            .respond_with(ResponseTemplate::new(201).set_body_json(returned))
            .mount(&self.server)
            .await;
    }

    /// Answer deletes from `collection` with the removed rows
    pub async fn mock_delete(&self, collection: &str, removed: Value) {
        Mock::given(method("DELETE"))
            .and(path(Self::collection_path(collection)))
            .respond_with(ResponseTemplate::new(200).set_body_json(removed))
            .mount(&self.server)
            .await;
    }

    /// Fail requests with a store error body
    pub async fn mock_failure(&self, http_method: &str, collection: &str, status: u16, code: &str, message: &str) {
        Mock::given(method(http_method))
            .and(path(Self::collection_path(collection)))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "code": code,
                "message": message,
                "details": null,
                "hint": null
            })))
            .mount(&self.server)
            .await;
    }

    /// Requests received so far with the given method
    pub async fn received(&self, http_method: &str) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.method.as_str() == http_method)
            .collect()
    }
}
