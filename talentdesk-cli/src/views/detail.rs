//! One internship with its applications, and the applicant profile opened from it

use super::{or_not_specified, Lifecycle};
use crate::{client::ClientError, dashboard::Dashboard};
use chrono::{DateTime, Utc};
use talentdesk_core::{
    application::{Application, ApplicationStatus},
    internship::Internship,
    user::User,
};

/// Shown wherever an optional applicant field is missing
pub const NOT_PROVIDED: &str = "Not provided";

#[derive(Debug)]
pub struct DetailView {
    internship: Internship,
    applications: Vec<Application>,
    selected: Option<String>,
    session_expired: bool,
    lifecycle: Lifecycle,
}

impl DetailView {
    pub fn new(internship: Internship) -> Self {
        Self {
            internship,
            applications: Vec::new(),
            selected: None,
            session_expired: false,
            lifecycle: Lifecycle::new(),
        }
    }

    /// Open the detail of `internship` and fetch its applications.
    ///
    /// A failed fetch still opens the view, with no applications.
    pub async fn open(dashboard: &Dashboard, internship: Internship) -> Self {
        let mut view = Self::new(internship);
        view.refresh(dashboard).await;
        view
    }

    pub async fn refresh(&mut self, dashboard: &Dashboard) {
        let Some(fetched) = self
            .lifecycle
            .guard(
                dashboard
                    .client
                    .get_applicants_for_internship(&self.internship.id),
            )
            .await
        else {
            return;
        };

        match fetched {
            Ok(applications) => {
                tracing::info!(
                    internship = %self.internship.id,
                    count = applications.len(),
                    "Loaded applications"
                );
                self.applications = applications;
                self.session_expired = false;
            }
            Err(err) => {
                self.session_expired = matches!(err, ClientError::AuthExpired);
                dashboard.report(
                    &err,
                    "Error",
                    "Failed to fetch applications. Please try again.",
                );
                self.applications = Vec::new();
            }
        }
    }

    /// Whether the last refresh was turned away because the session expired
    pub fn session_expired(&self) -> bool {
        self.session_expired
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn internship(&self) -> &Internship {
        &self.internship
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn find_application(&self, application_id: &str) -> Option<&Application> {
        self.applications
            .iter()
            .find(|application| application.id == application_id)
    }

    pub fn summary(&self) -> InternshipSummary {
        InternshipSummary::from(&self.internship)
    }

    pub fn rows(&self) -> Vec<ApplicantRow> {
        self.applications.iter().map(ApplicantRow::from).collect()
    }

    /// Open the nested profile of one application
    pub fn select_applicant(&mut self, application_id: &str) -> Option<ApplicantProfile> {
        let profile = self.find_application(application_id).map(ApplicantProfile::from)?;
        self.selected = Some(application_id.to_string());
        Some(profile)
    }

    /// The open applicant profile, rebuilt from the latest applications
    pub fn selected(&self) -> Option<ApplicantProfile> {
        let id = self.selected.as_deref()?;
        self.find_application(id).map(ApplicantProfile::from)
    }

    pub fn close_applicant(&mut self) {
        self.selected = None;
    }
}

/// Descriptive fields of the internship, with fallbacks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternshipSummary {
    pub title: String,
    pub open: bool,
    pub department: String,
    pub duration: String,
    pub openings: String,
    pub stipend: String,
    pub deadline: String,
    pub start_date: String,
    pub location: String,
    pub responsibilities: Vec<String>,
    pub skills: Vec<String>,
}

impl From<&Internship> for InternshipSummary {
    fn from(internship: &Internship) -> Self {
        let details = &internship.internship_details;
        let location = &details.location;
        let place = [
            location.address.clone(),
            location.city.clone(),
            location.pin_code.map(|pin| pin.to_string()),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ");

        Self {
            title: internship.title().to_string(),
            open: internship.is_open(),
            department: or_not_specified(internship.department()),
            duration: or_not_specified(details.duration.as_deref()),
            openings: details
                .openings
                .map_or_else(|| super::NOT_SPECIFIED.to_string(), |n| n.to_string()),
            stipend: or_not_specified(details.stipend.as_deref()),
            deadline: or_not_specified(details.application_deadline.as_deref()),
            start_date: or_not_specified(details.start_date.as_deref()),
            location: or_not_specified(Some(&place)),
            responsibilities: details.responsibilities.clone(),
            skills: details.skills_required.clone(),
        }
    }
}

/// One line of the applications table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicantRow {
    pub application_id: String,
    pub name: String,
    pub email: String,
    pub status: ApplicationStatus,
    pub applied: String,
}

impl From<&Application> for ApplicantRow {
    fn from(application: &Application) -> Self {
        let user = application.applicant.document();
        Self {
            application_id: application.id.clone(),
            name: display_name(application),
            email: or_not_provided(user.map(|user| user.email.as_str())),
            status: application.status,
            applied: applied_on(application.applied_at),
        }
    }
}

/// Everything shown in the applicant profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicantProfile {
    pub application_id: String,
    pub applicant_id: String,
    pub status: ApplicationStatus,
    pub applied: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub field: String,
    pub residence: String,
    pub about: String,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub projects: Vec<String>,
    pub certifications: Vec<String>,
    pub links: Vec<String>,
    pub resume: String,
    pub documents: Vec<String>,
    pub quiz: Vec<(String, String)>,
}

impl From<&Application> for ApplicantProfile {
    fn from(application: &Application) -> Self {
        let user = application.applicant.document();

        Self {
            application_id: application.id.clone(),
            applicant_id: application.applicant_id().to_string(),
            status: application.status,
            applied: applied_on(application.applied_at),
            name: display_name(application),
            email: or_not_provided(user.map(|user| user.email.as_str())),
            phone: or_not_provided(user.and_then(|user| user.phone_number.as_deref())),
            field: or_not_provided(user.and_then(|user| user.field.as_deref())),
            residence: or_not_provided(user.and_then(residence).as_deref()),
            about: or_not_provided(user.and_then(|user| user.about.as_deref())),
            skills: user.map(|user| user.resume.skills.clone()).unwrap_or_default(),
            experience: user
                .map(|user| {
                    user.experience
                        .internships
                        .iter()
                        .map(|past| format!("{} at {} ({})", past.title, past.company, past.duration))
                        .collect()
                })
                .unwrap_or_default(),
            projects: user.map(|user| user.resume.projects.clone()).unwrap_or_default(),
            certifications: user
                .map(|user| user.resume.certifications.clone())
                .unwrap_or_default(),
            links: user.map(links).unwrap_or_default(),
            resume: or_not_provided(
                user.and_then(|user| user.resume_doc.as_ref())
                    .and_then(|doc| doc.filename.as_deref()),
            ),
            documents: application.documents.clone(),
            quiz: application
                .quiz
                .iter()
                .map(|entry| (entry.question.clone(), entry.answer.clone()))
                .collect(),
        }
    }
}

fn or_not_provided(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => NOT_PROVIDED.to_string(),
    }
}

fn display_name(application: &Application) -> String {
    match application.applicant.document() {
        Some(user) if !user.name.trim().is_empty() => user.name.clone(),
        Some(user) => user.username.clone(),
        None => format!("Applicant {}", application.applicant_id()),
    }
}

fn applied_on(applied_at: Option<DateTime<Utc>>) -> String {
    applied_at.map_or_else(
        || NOT_PROVIDED.to_string(),
        |at| at.format("%b %d, %Y").to_string(),
    )
}

fn residence(user: &User) -> Option<String> {
    let residence = user.residence.as_ref()?;
    let parts: Vec<String> = [
        residence.city.clone(),
        residence.state.clone(),
        residence.pin.map(|pin| pin.to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    (!parts.is_empty()).then(|| parts.join(", "))
}

fn links(user: &User) -> Vec<String> {
    user.resume
        .social_links
        .as_ref()
        .map(|links| {
            [&links.linkedin, &links.github, &links.website]
                .into_iter()
                .flatten()
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}
