//! Mutations triggered from the views.
//!
//! Every action sends at most one request. A success is confirmed and the
//! affected list is re-fetched; a failure is reported and leaves the view as
//! it was.

use crate::{
    dashboard::Dashboard,
    views::{detail::DetailView, list::ListView},
};
use talentdesk_core::{
    application::Decision,
    internship::{InternshipDraft, InternshipPatch},
};
use validator::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Failed,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }
}

pub(crate) fn describe_invalid(errors: &ValidationErrors) -> String {
    let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    fields.sort_unstable();
    format!("Please check the following fields: {}", fields.join(", "))
}

pub async fn create_internship(
    dashboard: &Dashboard,
    list: &mut ListView,
    draft: InternshipDraft,
) -> Outcome {
    let internship = match draft.normalize() {
        Ok(internship) => internship,
        Err(errors) => {
            tracing::warn!(%errors, "Internship draft is invalid");
            dashboard.report_invalid(&describe_invalid(&errors));
            return Outcome::Failed;
        }
    };

    match dashboard.client.create_internship(&internship).await {
        Ok(created) => {
            tracing::info!(id = %created.id, "Created internship");
            dashboard.confirm(
                "Internship Created",
                "Your internship has been posted successfully.",
            );
            list.load(dashboard).await;
            Outcome::Applied
        }
        Err(err) => {
            dashboard.report(&err, "Error", "Failed to create internship. Please try again.");
            Outcome::Failed
        }
    }
}

pub async fn update_internship(
    dashboard: &Dashboard,
    list: &mut ListView,
    id: &str,
    patch: InternshipPatch,
) -> Outcome {
    let patch = match patch.normalize() {
        Ok(patch) if patch.is_empty() => {
            dashboard.report_invalid("Nothing to update");
            return Outcome::Failed;
        }
        Ok(patch) => patch,
        Err(errors) => {
            dashboard.report_invalid(&describe_invalid(&errors));
            return Outcome::Failed;
        }
    };

    match dashboard.client.update_internship(id, &patch).await {
        Ok(_) => {
            dashboard.confirm(
                "Internship Updated",
                "The internship has been successfully updated.",
            );
            list.load(dashboard).await;
            Outcome::Applied
        }
        Err(err) => {
            dashboard.report(&err, "Error", "Failed to update internship. Please try again.");
            Outcome::Failed
        }
    }
}

pub async fn close_internship(dashboard: &Dashboard, list: &mut ListView, id: &str) -> Outcome {
    match dashboard.client.close_internship(id).await {
        Ok(_) => {
            dashboard.confirm(
                "Applications Closed",
                "No new applications will be accepted for this internship.",
            );
            list.load(dashboard).await;
            Outcome::Applied
        }
        Err(err) => {
            dashboard.report(&err, "Error", "Failed to close applications. Please try again.");
            Outcome::Failed
        }
    }
}

pub async fn delete_internship(dashboard: &Dashboard, list: &mut ListView, id: &str) -> Outcome {
    match dashboard.client.delete_internship(id).await {
        Ok(_) => {
            dashboard.confirm(
                "Internship Deleted",
                "The internship has been successfully deleted.",
            );
            list.load(dashboard).await;
            Outcome::Applied
        }
        Err(err) => {
            dashboard.report(&err, "Error", "Failed to delete internship. Please try again.");
            Outcome::Failed
        }
    }
}

/// Accept or reject one application of the internship shown in `detail`.
///
/// Applications that already reached a final status are refused locally.
/// Nothing is reported when the applications never loaded because the
/// session expired; that was already handled by the redirect.
pub async fn decide(
    dashboard: &Dashboard,
    detail: &mut DetailView,
    application_id: &str,
    decision: Decision,
) -> Outcome {
    if detail.session_expired() {
        return Outcome::Failed;
    }

    let Some(application) = detail.find_application(application_id) else {
        dashboard.report_invalid(&format!(
            "No application {application_id} for this internship"
        ));
        return Outcome::Failed;
    };

    if let Err(err) = application.status.decide(decision) {
        tracing::warn!(%err, application = %application_id, "Refusing status change");
        dashboard.report_invalid(&err.to_string());
        return Outcome::Failed;
    }

    let internship_id = detail.internship().id.clone();
    let user_id = application.applicant_id().to_string();

    let sent = match decision {
        Decision::Accept => {
            dashboard
                .client
                .accept_application(&internship_id, &user_id)
                .await
        }
        Decision::Reject => {
            dashboard
                .client
                .reject_application(&internship_id, &user_id)
                .await
        }
    };

    match sent {
        Ok(_) => {
            tracing::info!(application = %application_id, %decision, "Application decided");
            dashboard.confirm(
                "Applications Status Updated",
                "Internship application status has been updated.",
            );
            detail.refresh(dashboard).await;
            Outcome::Applied
        }
        Err(err) => {
            dashboard.report(
                &err,
                "Error",
                "Failed to update application status. Please try again.",
            );
            Outcome::Failed
        }
    }
}
