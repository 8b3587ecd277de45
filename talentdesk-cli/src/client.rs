//! Typed client for the company recruitment API

use crate::{
    credentials::BearerAuthMiddleware, logging::LoggingMiddleware, session::SessionContext,
    settings::Settings,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use talentdesk_core::{
    application::Application,
    company::{Company, CompanyProfileUpdate},
    decode::{decode_enveloped, decode_or_default},
    internship::{Internship, InternshipPatch, NewInternship},
    responses::{
        Acknowledgement, LoginRequest, LoginResponse, APPLICATIONS_KEY, APPLICATION_KEY,
        COMPANY_KEY, INTERNSHIPS_KEY, INTERNSHIP_KEY,
    },
};
use url::Url;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// Network failure, timeout, or a middleware refusing the request
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest_middleware::Error),
    /// Any non-2xx response other than 401
    #[error("{route} responded with {status}: {body}")]
    Http {
        route: String,
        status: StatusCode,
        body: String,
    },
    /// The backend rejected the session (HTTP 401). The persisted token is gone already.
    #[error("Your session has expired, please log in again")]
    AuthExpired,
    /// A 2xx response whose payload didn't match the schema
    #[error("{endpoint} returned an unexpected payload at `{path}`: {message}")]
    SchemaMismatch {
        endpoint: String,
        path: String,
        message: String,
    },
    #[error("Can't build a request URL: {0}")]
    Url(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.into())
    }
}

#[derive(Debug, Clone)]
pub struct ResourceClient {
    base: Url,
    http: ClientWithMiddleware,
    session: Arc<dyn SessionContext>,
}

impl ResourceClient {
    pub fn new(settings: &Settings, session: Arc<dyn SessionContext>) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let http = ClientBuilder::new(builder.build()?)
            .with(BearerAuthMiddleware::new(Arc::clone(&session)))
            .with(LoggingMiddleware)
            .build();

        Ok(Self {
            base: settings.api_endpoint.clone(),
            http,
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    // Internships

    pub async fn get_all_internships(&self) -> ClientResult<Vec<Internship>> {
        let received = self.send(self.request(Method::GET, &["internships"])?).await?;
        received.decode(INTERNSHIPS_KEY)
    }

    pub async fn get_internship(&self, id: &str) -> ClientResult<Internship> {
        let received = self.send(self.request(Method::GET, &["internship", id])?).await?;
        received.decode(INTERNSHIP_KEY)
    }

    pub async fn create_internship(&self, internship: &NewInternship) -> ClientResult<Internship> {
        let request = self
            .request(Method::POST, &["internship", "create"])?
            .json(internship);
        self.send(request).await?.decode(INTERNSHIP_KEY)
    }

    pub async fn update_internship(
        &self,
        id: &str,
        patch: &InternshipPatch,
    ) -> ClientResult<Internship> {
        let request = self.request(Method::PATCH, &["internship", id])?.json(patch);
        self.send(request).await?.decode(INTERNSHIP_KEY)
    }

    pub async fn delete_internship(&self, id: &str) -> ClientResult<Acknowledgement> {
        let received = self
            .send(self.request(Method::DELETE, &["internship", id])?)
            .await?;
        received.acknowledgement()
    }

    /// Stop accepting applications; the backend flips `status` to false
    pub async fn close_internship(&self, id: &str) -> ClientResult<Acknowledgement> {
        let received = self
            .send(self.request(Method::PATCH, &["internship", id, "close"])?)
            .await?;
        received.acknowledgement()
    }

    // Applicants

    pub async fn get_applicants_for_internship(&self, id: &str) -> ClientResult<Vec<Application>> {
        let received = self
            .send(self.request(Method::GET, &["internship", id, "applicants"])?)
            .await?;
        received.decode(APPLICATIONS_KEY)
    }

    pub async fn get_application_detail(&self, application_id: &str) -> ClientResult<Application> {
        let received = self
            .send(self.request(Method::GET, &["internship", "applicant", application_id])?)
            .await?;
        received.decode(APPLICATION_KEY)
    }

    pub async fn accept_application(
        &self,
        internship_id: &str,
        user_id: &str,
    ) -> ClientResult<Acknowledgement> {
        let received = self
            .send(self.request(Method::POST, &[internship_id, "accept", user_id])?)
            .await?;
        received.acknowledgement()
    }

    pub async fn reject_application(
        &self,
        internship_id: &str,
        user_id: &str,
    ) -> ClientResult<Acknowledgement> {
        let received = self
            .send(self.request(Method::POST, &[internship_id, "reject", user_id])?)
            .await?;
        received.acknowledgement()
    }

    // Company profile

    pub async fn get_company_profile(&self) -> ClientResult<Company> {
        let received = self.send(self.request(Method::GET, &["profile"])?).await?;
        received.decode(COMPANY_KEY)
    }

    pub async fn update_company_profile(
        &self,
        update: &CompanyProfileUpdate,
    ) -> ClientResult<Company> {
        let request = self
            .request(Method::PATCH, &["profile", "update"])?
            .json(update);
        self.send(request).await?.decode(COMPANY_KEY)
    }

    // Authentication

    /// Exchange email and password for a session token.
    ///
    /// A 401 here means wrong credentials, not an expired session, so it
    /// comes back as [`ClientError::Http`] and leaves stored credentials alone.
    pub async fn login(&self, credentials: &LoginRequest) -> ClientResult<LoginResponse> {
        let mut request = self.request(Method::POST, &["login"])?.json(credentials);
        request.expires_session = false;
        self.send(request).await?.decode_bare()
    }

    fn request(&self, method: Method, segments: &[&str]) -> ClientResult<Pending> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Url(format!("{} can't be used as a base", self.base)))?
            .pop_if_empty()
            .extend(segments);

        let route = format!("{method} {}", url.path());
        tracing::debug!(%route, "Building request");

        Ok(Pending {
            route,
            builder: self.http.request(method, url),
            expires_session: true,
        })
    }

    async fn send(&self, pending: Pending) -> ClientResult<Received> {
        let Pending {
            route,
            builder,
            expires_session,
        } = pending;

        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED && expires_session {
            tracing::warn!(%route, "Session rejected, clearing persisted token");
            self.session.invalidate();
            return Err(ClientError::AuthExpired);
        }

        let body = response.bytes().await?.to_vec();

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body).into_owned();
            tracing::error!(%route, ?status, %body, "Request was erroneous");
            return Err(ClientError::Http {
                route,
                status,
                body,
            });
        }

        Ok(Received { route, body })
    }
}

struct Pending {
    route: String,
    builder: RequestBuilder,
    expires_session: bool,
}

impl Pending {
    fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.builder = self.builder.json(body);
        self
    }
}

#[derive(Debug)]
struct Received {
    route: String,
    body: Vec<u8>,
}

impl Received {
    fn decode<T: DeserializeOwned>(&self, key: &str) -> ClientResult<T> {
        decode_enveloped(&self.body, key).map_err(|err| self.mismatch(err))
    }

    fn decode_bare<T: DeserializeOwned + Default>(&self) -> ClientResult<T> {
        decode_or_default(&self.body).map_err(|err| self.mismatch(err))
    }

    fn acknowledgement(&self) -> ClientResult<Acknowledgement> {
        self.decode_bare()
    }

    fn mismatch(&self, err: talentdesk_core::decode::SchemaMismatch) -> ClientError {
        tracing::error!(route = %self.route, path = %err.path, "Payload failed schema check");
        ClientError::SchemaMismatch {
            endpoint: self.route.clone(),
            path: err.path,
            message: err.message,
        }
    }
}
