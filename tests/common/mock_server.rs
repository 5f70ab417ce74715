//! Mock hosted backend for gateway tests
//!
//! The gateway under test is blocking and drives its own runtime, so the
//! mock server lives on a separate runtime owned by the fixture.

use gazi_admin::egui_app::gateway::FirebaseGateway;
use gazi_admin::shared::config::AppConfig;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

pub const TEST_API_KEY: &str = "test-key";
pub const TEST_PROJECT: &str = "gazi-test";

// Field order matters: the server is dropped before its runtime.
pub struct MockBackend {
    pub server: MockServer,
    pub runtime: Runtime,
}

impl MockBackend {
    pub fn start() -> Self {
        let runtime = Runtime::new().expect("mock runtime");
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    pub fn config(&self) -> AppConfig {
        AppConfig::builder()
            .api_key(TEST_API_KEY)
            .project_id(TEST_PROJECT)
            .auth_url(self.server.uri())
            .firestore_url(self.server.uri())
            .build()
            .expect("valid test config")
    }

    pub fn gateway(&self) -> FirebaseGateway {
        FirebaseGateway::new(self.config()).expect("gateway")
    }

    /// Path of the test collection on the document service
    pub fn collection_path(&self, collection: &str) -> String {
        format!(
            "/v1/projects/{}/databases/(default)/documents/{}",
            TEST_PROJECT, collection
        )
    }

    pub fn received(&self) -> Vec<wiremock::Request> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }
}
