//! Applicant profiles. The dashboard only ever reads these.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An applicant
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Login handle
    pub username: String,
    /// Full name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Gender
    #[serde(default)]
    pub gender: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub avatar: Option<String>,
    /// Field of study or work
    #[serde(default)]
    pub field: Option<String>,
    /// Phone number
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Short self description
    #[serde(default)]
    pub about: Option<String>,
    /// Where the applicant lives
    #[serde(default)]
    pub residence: Option<Residence>,
    /// Previous work experience
    #[serde(default)]
    pub experience: Experience,
    /// Skills, projects and links
    #[serde(default)]
    pub resume: Resume,
    /// The applicant's internship history on the platform
    #[serde(default)]
    pub internships: UserInternships,
    /// Uploaded résumé document
    #[serde(default)]
    pub resume_doc: Option<ResumeDoc>,
}

/// Residence of an applicant
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Residence {
    /// Postal code
    #[serde(default)]
    pub pin: Option<u32>,
    /// City
    #[serde(default)]
    pub city: Option<String>,
    /// State
    #[serde(default)]
    pub state: Option<String>,
}

/// Work experience
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    /// Past internships, newest first as entered by the applicant
    #[serde(default)]
    pub internships: Vec<PastInternship>,
}

/// An internship listed in an applicant's experience
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PastInternship {
    /// Role title
    #[serde(default)]
    pub title: String,
    /// Company name
    #[serde(default)]
    pub company: String,
    /// Duration, free text
    #[serde(default)]
    pub duration: String,
    /// What the applicant did
    #[serde(default)]
    pub description: String,
}

/// Résumé contents
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    /// Skills
    #[serde(default)]
    pub skills: Vec<String>,
    /// Projects
    #[serde(default)]
    pub projects: Vec<String>,
    /// Certifications
    #[serde(default)]
    pub certifications: Vec<String>,
    /// Social profile links
    #[serde(default)]
    pub social_links: Option<SocialLinks>,
}

/// Social profile links
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    /// LinkedIn profile
    #[serde(default)]
    pub linkedin: Option<String>,
    /// GitHub profile
    #[serde(default)]
    pub github: Option<String>,
    /// Personal website
    #[serde(default)]
    pub website: Option<String>,
}

/// Internship history on the platform
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserInternships {
    /// Application identifiers
    #[serde(default)]
    pub applications: Vec<String>,
    /// Completed internship identifiers
    #[serde(default)]
    pub past_internships: Vec<String>,
    /// Internship the applicant is currently on
    #[serde(default)]
    pub current_internship: Option<String>,
}

/// Metadata of an uploaded résumé
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDoc {
    /// Original file name
    #[serde(default)]
    pub filename: Option<String>,
    /// Storage path on the backend
    #[serde(default)]
    pub path: Option<String>,
    /// MIME type
    #[serde(default)]
    pub mimetype: Option<String>,
    /// Size in bytes
    #[serde(default)]
    pub size: Option<u64>,
    /// Upload timestamp
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}
