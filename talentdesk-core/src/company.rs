//! Company profile records and profile updates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A company as returned by `GET /profile`
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Unique handle chosen at registration
    pub unique_name: String,
    /// Industry the company operates in
    pub industry: String,
    /// Headquarters location
    pub location: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Company website
    #[serde(default)]
    pub website: Option<String>,
    /// Identifiers of internships owned by this company
    #[serde(default)]
    pub internships: Vec<String>,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial profile update sent to `PATCH /profile/update`.
///
/// Fields left as `None` are not serialized, so the backend keeps its value.
#[derive(Deserialize, Serialize, Validate, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfileUpdate {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub name: Option<String>,
    /// New contact email
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New industry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// New website
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub website: Option<String>,
    /// New location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl CompanyProfileUpdate {
    /// Seed an edit form with every editable field of `company`
    pub fn from_company(company: &Company) -> Self {
        Self {
            name: Some(company.name.clone()),
            email: Some(company.email.clone()),
            description: company.description.clone(),
            industry: Some(company.industry.clone()),
            website: company.website.clone(),
            location: Some(company.location.clone()),
        }
    }

    /// Only the fields that differ from `company`
    pub fn changes_from(&self, company: &Company) -> Self {
        fn changed(new: &Option<String>, old: Option<&String>) -> Option<String> {
            new.as_ref().filter(|new| Some(*new) != old).cloned()
        }

        Self {
            name: changed(&self.name, Some(&company.name)),
            email: changed(&self.email, Some(&company.email)),
            description: changed(&self.description, company.description.as_ref()),
            industry: changed(&self.industry, Some(&company.industry)),
            website: changed(&self.website, company.website.as_ref()),
            location: changed(&self.location, Some(&company.location)),
        }
    }

    /// Whether this update would change nothing
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
