use crate::{
    client::{ClientError, ResourceClient},
    notify::{Notification, Notifier},
    session::Navigator,
};
use std::sync::Arc;

/// Everything a view needs to talk to the backend and to the user
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub client: ResourceClient,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
    pub login_route: String,
}

impl Dashboard {
    pub fn new(
        client: ResourceClient,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        login_route: impl Into<String>,
    ) -> Self {
        Self {
            client,
            notifier,
            navigator,
            login_route: login_route.into(),
        }
    }

    /// Surface a failed request.
    ///
    /// An expired session sends the user to the login route instead of
    /// showing a notification. Everything else is logged and reported as an
    /// error notification with the given text.
    pub fn report(&self, err: &ClientError, title: &str, description: &str) {
        if let ClientError::AuthExpired = err {
            tracing::info!(route = %self.login_route, "Redirecting to login");
            self.navigator.redirect_to_login(&self.login_route);
            return;
        }

        tracing::error!(err = %err, "{title}");
        self.notifier.notify(Notification::error(title, description));
    }

    /// Input was rejected before anything was sent
    pub fn report_invalid(&self, description: &str) {
        self.notifier
            .notify(Notification::error("Invalid input", description));
    }

    pub fn confirm(&self, title: &str, description: &str) {
        self.notifier.notify(Notification::info(title, description));
    }
}
