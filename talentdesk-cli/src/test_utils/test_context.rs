//! A dashboard wired to a mock backend
use super::fakes::{FakeSession, RecordingNavigator, RecordingNotifier};
use crate::{client::ResourceClient, dashboard::Dashboard, settings::Settings};
use std::sync::Arc;
use url::Url;
use wiremock::MockServer;

#[derive(Debug)]
pub struct TestContext {
    pub server: MockServer,
    pub session: Arc<FakeSession>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
    dashboard: Dashboard,
}

impl TestContext {
    /// Context with a signed-in session
    pub async fn new() -> Self {
        Self::with_token(Some("t0k3n")).await
    }

    pub async fn with_token(token: Option<&str>) -> Self {
        let server = MockServer::start().await;
        let settings = Settings {
            api_endpoint: Url::parse(&format!("{}/company", server.uri()))
                .expect("mock server URI is a valid URL"),
            request_timeout_ms: 5_000,
            ..Default::default()
        };

        let session = Arc::new(FakeSession::new(token));
        let notifier = Arc::new(RecordingNotifier::default());
        let navigator = Arc::new(RecordingNavigator::default());

        let client = ResourceClient::new(&settings, session.clone()).expect("client builds");
        let dashboard = Dashboard::new(
            client,
            notifier.clone(),
            navigator.clone(),
            settings.login_route.clone(),
        );

        Self {
            server,
            session,
            notifier,
            navigator,
            dashboard,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn client(&self) -> &ResourceClient {
        &self.dashboard.client
    }
}
