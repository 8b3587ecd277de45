//! Attaches the session's bearer token to every outgoing request

use crate::session::SessionContext;
use anyhow::anyhow;
use reqwest::{
    header::{HeaderValue, AUTHORIZATION},
    Request, Response,
};
use reqwest_middleware::{Middleware, Next};
use std::sync::Arc;
use task_local_extensions::Extensions;

/// Request side of credential handling.
///
/// No resolvable token is not an error: the request goes out without an
/// `Authorization` header and the backend decides. The response side (401)
/// is handled by the resource client so it can surface a typed error.
#[derive(Debug, Clone)]
pub(crate) struct BearerAuthMiddleware {
    session: Arc<dyn SessionContext>,
}

impl BearerAuthMiddleware {
    pub(crate) fn new(session: Arc<dyn SessionContext>) -> Self {
        Self { session }
    }
}

#[async_trait::async_trait]
impl Middleware for BearerAuthMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        match self.session.resolve_token() {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                    .map_err(|e| anyhow!("Session token can't be sent as a header: {e}"))?;
                value.set_sensitive(true);
                req.headers_mut().insert(AUTHORIZATION, value);
            }
            None => {
                tracing::debug!(url = %req.url(), "No session token, sending request unauthenticated");
            }
        }

        next.run(req, extensions).await
    }
}
