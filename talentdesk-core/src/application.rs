//! Applications to internships and the accept/reject status transitions

use crate::{internship::Internship, user::User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An applicant's application to one internship
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// The internship applied to
    pub internship: Reference<Internship>,
    /// The applicant
    pub applicant: Reference<User>,
    /// Review status
    pub status: ApplicationStatus,
    /// Screening quiz answers
    #[serde(default)]
    pub quiz: Vec<QuizEntry>,
    /// Attached document identifiers
    #[serde(default)]
    pub documents: Vec<String>,
    /// Submission timestamp
    #[serde(default)]
    pub applied_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Application {
    /// Identifier of the applicant, whether or not the profile is embedded
    pub fn applicant_id(&self) -> &str {
        self.applicant.id()
    }
}

/// One answered screening question
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizEntry {
    /// The question
    #[serde(default)]
    pub question: String,
    /// The applicant's answer
    #[serde(default)]
    pub answer: String,
    /// Grading status
    #[serde(default)]
    pub status: String,
}

/// A related document that is either referenced by id or embedded
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Reference<T> {
    /// Only the identifier was sent
    Id(String),
    /// The backend populated the full document
    Document(Box<T>),
}

/// Anything carrying a backend identifier
pub trait Identified {
    /// The `_id` of the document
    fn id(&self) -> &str;
}

impl Identified for User {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Internship {
    fn id(&self) -> &str {
        &self.id
    }
}

impl<T: Identified> Reference<T> {
    /// Identifier of the referenced document
    pub fn id(&self) -> &str {
        match self {
            Reference::Id(id) => id,
            Reference::Document(document) => document.id(),
        }
    }

    /// The embedded document, if the backend populated it
    pub fn document(&self) -> Option<&T> {
        match self {
            Reference::Id(_) => None,
            Reference::Document(document) => Some(document.as_ref()),
        }
    }
}

/// Review status of an application
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApplicationStatus {
    /// Freshly submitted
    Submitted,
    /// Being looked at
    #[serde(rename = "Under Review")]
    UnderReview,
    /// On the shortlist
    Shortlisted,
    /// Turned down (terminal)
    Rejected,
    /// Accepted (terminal)
    Hired,
}

/// The two decisions a company can make on an application
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Accept the applicant
    Accept,
    /// Reject the applicant
    Reject,
}

/// A decision that isn't allowed from the current status
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Can't {decision} an application that is already {from}")]
pub struct TransitionError {
    /// Status the application was in
    pub from: ApplicationStatus,
    /// The decision that was attempted
    pub decision: Decision,
}

impl ApplicationStatus {
    /// Whether no further decision can be made
    pub fn is_terminal(self) -> bool {
        matches!(self, ApplicationStatus::Rejected | ApplicationStatus::Hired)
    }

    /// Status after applying `decision`.
    ///
    /// Hired and Rejected are final; there is no way to re-open an application.
    pub fn decide(self, decision: Decision) -> Result<ApplicationStatus, TransitionError> {
        if self.is_terminal() {
            return Err(TransitionError {
                from: self,
                decision,
            });
        }

        Ok(match decision {
            Decision::Accept => ApplicationStatus::Hired,
            Decision::Reject => ApplicationStatus::Rejected,
        })
    }

    /// Wire and display label
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "Submitted",
            ApplicationStatus::UnderReview => "Under Review",
            ApplicationStatus::Shortlisted => "Shortlisted",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Hired => "Hired",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Accept => f.write_str("accept"),
            Decision::Reject => f.write_str("reject"),
        }
    }
}
