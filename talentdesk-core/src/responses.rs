//! Request and response bodies exchanged with the recruitment backend

use crate::company::Company;
use serde::{Deserialize, Serialize};

/// Envelope key of `GET /internships`
pub const INTERNSHIPS_KEY: &str = "internships";
/// Envelope key of single internship responses
pub const INTERNSHIP_KEY: &str = "internship";
/// Envelope key of `GET /internship/:id/applicants`
pub const APPLICATIONS_KEY: &str = "applications";
/// Envelope key of `GET /internship/applicant/:applicationId`
pub const APPLICATION_KEY: &str = "application";
/// Envelope key of profile responses
pub const COMPANY_KEY: &str = "company";

/// Response of mutations whose body the dashboard doesn't need
/// (close, delete, accept, reject).
///
/// Any JSON object is accepted; an empty body decodes to the default.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Acknowledgement {
    /// Whether the backend reported success
    #[serde(default)]
    pub success: Option<bool>,
    /// Human readable message from the backend
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /login`
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    /// Company account email
    pub email: String,
    /// Account password
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response of `POST /login`
#[derive(Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct LoginResponse {
    /// Whether the credentials were accepted
    #[serde(default)]
    pub success: bool,
    /// The logged in company
    #[serde(default)]
    pub company: Option<Company>,
    /// Bearer token for subsequent requests
    #[serde(default)]
    pub token: Option<String>,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("success", &self.success)
            .field("company", &self.company)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
