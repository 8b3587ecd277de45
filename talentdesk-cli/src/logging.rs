use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use task_local_extensions::Extensions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logs every request and the status it came back with.
///
/// Error statuses are left for the resource client to interpret.
#[derive(Debug)]
pub(crate) struct LoggingMiddleware;

#[async_trait::async_trait]
impl Middleware for LoggingMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        tracing::info!(
            url = %req.url(),
            method = %req.method(),
            headers = ?req.headers(),
            "Running request"
        );
        match next.run(req, extensions).await {
            Ok(resp) => {
                let status = resp.status();
                if status.is_client_error() {
                    tracing::warn!(?status, "Client error on response");
                } else if status.is_server_error() {
                    tracing::error!(?status, "Server error on response");
                } else {
                    let content_length = resp.content_length();
                    tracing::info!(?status, ?content_length, "Got response");
                }
                Ok(resp)
            }
            Err(e) => {
                tracing::error!(err = %e, "Request failed before a response arrived");
                Err(e)
            }
        }
    }
}

pub fn setup_tracing(ansi: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(ansi)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::from_default_env())
        .init();
}
