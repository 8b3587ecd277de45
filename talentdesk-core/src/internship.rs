//! Internship postings, the create-form draft and partial updates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// An internship posting owned by a company.
///
/// `status` is the only lifecycle state: `true` while applications are open,
/// `false` once the posting has been closed.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Internship {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Title, department, responsibilities and the rest of the posting
    pub internship_details: InternshipDetails,
    /// Optional eligibility filter for applicants
    #[serde(default)]
    pub eligibility: Option<Eligibility>,
    /// Application identifiers
    #[serde(default)]
    pub applications: Vec<String>,
    /// Assignment identifiers
    #[serde(default)]
    pub assignments: Vec<String>,
    /// Identifiers of the interns currently on this internship
    #[serde(default)]
    pub current_interns: Vec<String>,
    /// Skills of past and current hires
    #[serde(default)]
    pub ex_skills: ExSkills,
    /// Sample questions shown to applicants
    #[serde(default)]
    pub sample_questions: Vec<String>,
    /// Owning company identifier
    #[serde(default)]
    pub company: Option<String>,
    /// `true` = open, `false` = closed
    pub status: bool,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Internship {
    /// Title of the posting
    pub fn title(&self) -> &str {
        &self.internship_details.title
    }

    /// Department, if one was given
    pub fn department(&self) -> Option<&str> {
        self.internship_details.department.as_deref()
    }

    /// Whether the posting still accepts applications
    pub fn is_open(&self) -> bool {
        self.status
    }

    /// Numeric stipend, see [`parse_stipend`]
    pub fn stipend_amount(&self) -> u64 {
        self.internship_details
            .stipend
            .as_deref()
            .map_or(0, parse_stipend)
    }
}

/// The descriptive part of an internship
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InternshipDetails {
    /// Posting title
    pub title: String,
    /// Department
    #[serde(default)]
    pub department: Option<String>,
    /// Responsibilities, one entry per bullet point
    #[serde(default)]
    pub responsibilities: Vec<String>,
    /// Required skills
    #[serde(default)]
    pub skills_required: Vec<String>,
    /// Number of open positions
    #[serde(default)]
    pub openings: Option<u32>,
    /// Duration, free text (e.g. "3 months")
    #[serde(default)]
    pub duration: Option<String>,
    /// Deadline for applications, free text date
    #[serde(default)]
    pub application_deadline: Option<String>,
    /// Start date, free text date
    #[serde(default)]
    pub start_date: Option<String>,
    /// Where the internship takes place
    #[serde(default)]
    pub location: Location,
    /// Stipend, free text (e.g. "₹15000/month")
    #[serde(default)]
    pub stipend: Option<String>,
}

/// Internship location
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Street address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Postal code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_code: Option<u32>,
    /// City
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// Who may apply
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Eligibility {
    /// Whether the eligibility criteria are merely advisory
    #[serde(default)]
    pub optional: Option<bool>,
    /// Minimum education level
    #[serde(default)]
    pub highest_level_of_education: Option<String>,
    /// Preferred degrees
    #[serde(default)]
    pub preferred_degrees: Vec<String>,
    /// Accepted graduation years, usually `[from, to]`
    #[serde(default)]
    pub graduation_year_range: Vec<i32>,
}

/// Skills of people hired on this internship
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExSkills {
    /// Skills of past hires
    #[serde(default)]
    pub past_hired: Vec<String>,
    /// Skills of current hires
    #[serde(default)]
    pub curr_hired: Vec<String>,
}

/// Numeric value of a free-text stipend.
///
/// Every non-digit character is dropped, so "₹15,000/month" is 15000.
/// Text without digits (or too many to fit) counts as 0.
pub fn parse_stipend(stipend: &str) -> u64 {
    let digits: String = stipend.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Raw input of the "create internship" form.
///
/// Everything is text as typed; [`InternshipDraft::normalize`] turns it into
/// the request body.
#[derive(Deserialize, Serialize, Validate, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InternshipDraft {
    /// Posting title, required
    #[validate(custom = "not_blank")]
    pub title: String,
    /// Department
    pub department: String,
    /// Responsibilities, may contain blank rows
    pub responsibilities: Vec<String>,
    /// Required skills, may contain blank rows
    pub skills_required: Vec<String>,
    /// Openings as typed
    pub openings: String,
    /// Duration
    pub duration: String,
    /// Deadline for applications
    pub application_deadline: String,
    /// Stipend
    pub stipend: String,
    /// Location as typed
    pub location: DraftLocation,
}

/// Location part of [`InternshipDraft`]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DraftLocation {
    /// Street address
    pub address: String,
    /// City
    pub city: String,
    /// Postal code as typed
    pub pin_code: String,
}

/// Body of `POST /internship/create`
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewInternship {
    /// Posting title
    pub title: String,
    /// Department
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Non-blank responsibilities
    pub responsibilities: Vec<String>,
    /// Non-blank required skills
    pub skills_required: Vec<String>,
    /// Number of openings, 0 when the input has no leading number
    pub openings: u32,
    /// Duration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Deadline for applications
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<String>,
    /// Stipend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stipend: Option<String>,
    /// Location
    pub location: Location,
}

impl InternshipDraft {
    /// Validate the draft and build the request body
    pub fn normalize(self) -> Result<NewInternship, ValidationErrors> {
        self.validate()?;

        Ok(NewInternship {
            title: self.title.trim().to_string(),
            department: non_blank(self.department),
            responsibilities: strip_blank_entries(self.responsibilities),
            skills_required: strip_blank_entries(self.skills_required),
            openings: parse_openings(&self.openings),
            duration: non_blank(self.duration),
            application_deadline: non_blank(self.application_deadline),
            stipend: non_blank(self.stipend),
            location: Location {
                address: non_blank(self.location.address),
                pin_code: self.location.pin_code.trim().parse().ok(),
                city: non_blank(self.location.city),
            },
        })
    }
}

/// Partial update sent to `PATCH /internship/:id`
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InternshipPatch {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New department
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Replacement responsibilities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<Vec<String>>,
    /// Replacement required skills
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills_required: Option<Vec<String>>,
    /// New number of openings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openings: Option<u32>,
    /// New duration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// New application deadline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<String>,
    /// New stipend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stipend: Option<String>,
}

impl InternshipPatch {
    /// Drop blank list entries and reject a blank title
    pub fn normalize(mut self) -> Result<Self, ValidationErrors> {
        if let Some(title) = &self.title {
            if let Err(err) = not_blank(title) {
                let mut errors = ValidationErrors::new();
                errors.add("title", err);
                return Err(errors);
            }
        }

        self.responsibilities = self.responsibilities.map(strip_blank_entries);
        self.skills_required = self.skills_required.map(strip_blank_entries);
        Ok(self)
    }

    /// Whether the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn strip_blank_entries(entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .filter(|entry| !entry.trim().is_empty())
        .collect()
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Leading integer of the openings field, so "3 interns" and "3.5" are 3.
/// No leading digits (or too many to fit) is 0.
fn parse_openings(openings: &str) -> u32 {
    let trimmed = openings.trim();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().unwrap_or(0)
}

fn not_blank(s: &str) -> Result<(), ValidationError> {
    if s.trim().is_empty() {
        Err(ValidationError::new("must not be blank"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use testresult::TestResult;

    #[test]
    fn test_parse_stipend() {
        assert_eq!(parse_stipend("₹10000"), 10_000);
        assert_eq!(parse_stipend("₹15,000/month"), 15_000);
        assert_eq!(parse_stipend("Unpaid"), 0);
        assert_eq!(parse_stipend(""), 0);
    }

    #[test]
    fn test_draft_strips_blank_entries() -> TestResult {
        let draft = InternshipDraft {
            title: "X".to_string(),
            responsibilities: vec!["a".to_string(), "".to_string()],
            skills_required: vec!["b".to_string(), "  ".to_string()],
            openings: "three".to_string(),
            ..Default::default()
        };

        let body = serde_json::to_value(draft.normalize()?)?;

        assert_eq!(body["title"], json!("X"));
        assert_eq!(body["responsibilities"], json!(["a"]));
        assert_eq!(body["skillsRequired"], json!(["b"]));
        assert_eq!(body["openings"], json!(0));
        assert_eq!(body["location"], json!({}));
        assert!(body.get("department").is_none());

        Ok(())
    }

    #[test]
    fn test_draft_parses_numbers() -> TestResult {
        let draft = InternshipDraft {
            title: "Backend Intern".to_string(),
            openings: " 3 ".to_string(),
            location: DraftLocation {
                city: "Pune".to_string(),
                pin_code: "411001".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let body = draft.normalize()?;

        assert_eq!(body.openings, 3);
        assert_eq!(body.location.pin_code, Some(411_001));
        assert_eq!(body.location.city.as_deref(), Some("Pune"));

        Ok(())
    }

    #[test]
    fn test_openings_reads_leading_integer() {
        assert_eq!(parse_openings("3 interns"), 3);
        assert_eq!(parse_openings("3.5"), 3);
        assert_eq!(parse_openings(" 12"), 12);
        assert_eq!(parse_openings("+4"), 4);
        assert_eq!(parse_openings("three"), 0);
        assert_eq!(parse_openings("-2"), 0);
        assert_eq!(parse_openings(""), 0);
        assert_eq!(parse_openings("99999999999"), 0);
    }

    #[test]
    fn test_draft_openings_with_trailing_text() -> TestResult {
        let draft = InternshipDraft {
            title: "Design Intern".to_string(),
            openings: "3 interns".to_string(),
            ..Default::default()
        };

        assert_eq!(draft.normalize()?.openings, 3);

        Ok(())
    }

    #[test]
    fn test_draft_requires_title() {
        let draft = InternshipDraft {
            title: "   ".to_string(),
            ..Default::default()
        };

        assert_matches!(draft.normalize(), Err(errors) if errors.field_errors().contains_key("title"));
    }

    #[test]
    fn test_patch_normalization() -> TestResult {
        let patch = InternshipPatch {
            skills_required: Some(vec!["Rust".to_string(), "".to_string()]),
            ..Default::default()
        }
        .normalize()?;

        assert_eq!(
            serde_json::to_value(&patch)?,
            json!({ "skillsRequired": ["Rust"] })
        );
        assert!(InternshipPatch::default().is_empty());
        assert_matches!(
            InternshipPatch {
                title: Some(String::new()),
                ..Default::default()
            }
            .normalize(),
            Err(_)
        );

        Ok(())
    }

    #[test]
    fn test_internship_deserializes_backend_document() -> TestResult {
        let internship: Internship = serde_json::from_value(json!({
            "_id": "abc",
            "internshipDetails": {
                "title": "Full-Stack Developer Intern",
                "department": "Engineering",
                "responsibilities": ["Build features"],
                "skillsRequired": ["React", "Node.js"],
                "openings": 3,
                "stipend": "₹15000/month",
                "location": { "city": "Pune", "pinCode": 411001 }
            },
            "applications": ["app1", "app2"],
            "exSkills": { "pastHired": [], "currHired": ["React"] },
            "status": true,
            "company": "c1",
        }))?;

        assert_eq!(internship.title(), "Full-Stack Developer Intern");
        assert_eq!(internship.department(), Some("Engineering"));
        assert!(internship.is_open());
        assert_eq!(internship.stipend_amount(), 15_000);
        assert_eq!(internship.applications.len(), 2);
        assert_eq!(internship.internship_details.location.pin_code, Some(411_001));

        Ok(())
    }
}
