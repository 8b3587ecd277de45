//! The company profile, viewed and edited in place

use super::Lifecycle;
use crate::{
    actions::{describe_invalid, Outcome},
    dashboard::Dashboard,
};
use talentdesk_core::company::{Company, CompanyProfileUpdate};
use validator::Validate;

#[derive(Debug, Default)]
pub struct ProfileView {
    company: Option<Company>,
    form: Option<CompanyProfileUpdate>,
    lifecycle: Lifecycle,
}

impl ProfileView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn company(&self) -> Option<&Company> {
        self.company.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.form.is_some()
    }

    pub async fn load(&mut self, dashboard: &Dashboard) {
        let Some(fetched) = self
            .lifecycle
            .guard(dashboard.client.get_company_profile())
            .await
        else {
            return;
        };

        match fetched {
            Ok(company) => {
                tracing::info!(company = %company.unique_name, "Loaded company profile");
                self.company = Some(company);
            }
            Err(err) => dashboard.report(
                &err,
                "Error",
                "Failed to fetch company profile. Please try again.",
            ),
        }
    }

    /// Seed the edit form from the loaded profile. Does nothing before a load.
    pub fn begin_edit(&mut self) -> Option<&mut CompanyProfileUpdate> {
        let company = self.company.as_ref()?;
        Some(
            self.form
                .insert(CompanyProfileUpdate::from_company(company)),
        )
    }

    pub fn form_mut(&mut self) -> Option<&mut CompanyProfileUpdate> {
        self.form.as_mut()
    }

    pub fn cancel(&mut self) {
        self.form = None;
    }

    /// Validate the edit form and send the fields that changed.
    ///
    /// The form stays open on any failure.
    pub async fn save(&mut self, dashboard: &Dashboard) -> Outcome {
        let (Some(form), Some(company)) = (self.form.as_ref(), self.company.as_ref()) else {
            return Outcome::Failed;
        };

        if let Err(errors) = form.validate() {
            tracing::warn!(%errors, "Profile form is invalid");
            dashboard.report_invalid(&describe_invalid(&errors));
            return Outcome::Failed;
        }

        let changes = form.changes_from(company);
        if changes.is_empty() {
            dashboard.report_invalid("Nothing to update");
            return Outcome::Failed;
        }

        let Some(sent) = self
            .lifecycle
            .guard(dashboard.client.update_company_profile(&changes))
            .await
        else {
            return Outcome::Failed;
        };

        match sent {
            Ok(company) => {
                self.company = Some(company);
                self.form = None;
                dashboard.confirm(
                    "Profile Updated",
                    "Your company profile has been successfully updated.",
                );
                Outcome::Applied
            }
            Err(err) => {
                dashboard.report(&err, "Error", "Failed to update profile. Please try again.");
                Outcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        notify::Severity,
        test_utils::{fixtures, TestContext},
    };
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        matchers::{body_partial_json, method, path},
        Mock, ResponseTemplate,
    };

    async fn loaded(ctx: &TestContext) -> ProfileView {
        Mock::given(method("GET"))
            .and(path("/company/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::company()))
            .mount(&ctx.server)
            .await;

        let mut view = ProfileView::new();
        view.load(ctx.dashboard()).await;
        view
    }

    #[test_log::test(tokio::test)]
    async fn test_edit_and_save() -> TestResult {
        let ctx = TestContext::new().await;
        let mut view = loaded(&ctx).await;

        let mut updated = fixtures::company();
        updated["industry"] = json!("Fintech");

        Mock::given(method("PATCH"))
            .and(path("/company/profile/update"))
            .and(body_partial_json(json!({ "industry": "Fintech" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true, "company": updated })),
            )
            .expect(1)
            .mount(&ctx.server)
            .await;

        let form = view.begin_edit().expect("profile is loaded");
        form.industry = Some("Fintech".to_string());

        assert_eq!(view.save(ctx.dashboard()).await, Outcome::Applied);
        assert!(!view.is_editing());
        assert_eq!(view.company().map(|c| c.industry.as_str()), Some("Fintech"));

        let notifications = ctx.notifier.take();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].title, "Profile Updated");

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_invalid_form_is_not_sent() -> TestResult {
        let ctx = TestContext::new().await;
        let mut view = loaded(&ctx).await;

        Mock::given(method("PATCH"))
            .and(path("/company/profile/update"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&ctx.server)
            .await;

        let form = view.begin_edit().expect("profile is loaded");
        form.email = Some("not-an-email".to_string());

        assert_eq!(view.save(ctx.dashboard()).await, Outcome::Failed);
        assert!(view.is_editing());

        let notifications = ctx.notifier.take();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].severity, Severity::Error);
        assert!(notifications[0].description.contains("email"));

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_failed_save_keeps_form_and_company() -> TestResult {
        let ctx = TestContext::new().await;
        let mut view = loaded(&ctx).await;

        Mock::given(method("PATCH"))
            .and(path("/company/profile/update"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&ctx.server)
            .await;

        view.begin_edit().expect("profile is loaded").name = Some("Renamed".to_string());

        assert_eq!(view.save(ctx.dashboard()).await, Outcome::Failed);
        assert!(view.is_editing());
        assert_eq!(
            view.company().map(|c| c.name.as_str()),
            Some("Tech Solutions Pvt Ltd")
        );
        assert_eq!(
            ctx.notifier.take()[0].description,
            "Failed to update profile. Please try again."
        );

        view.cancel();
        assert!(!view.is_editing());

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_unchanged_form_is_not_sent() -> TestResult {
        let ctx = TestContext::new().await;
        let mut view = loaded(&ctx).await;

        Mock::given(method("PATCH"))
            .and(path("/company/profile/update"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&ctx.server)
            .await;

        view.begin_edit().expect("profile is loaded");

        assert_eq!(view.save(ctx.dashboard()).await, Outcome::Failed);
        assert!(view.is_editing());
        assert_eq!(ctx.notifier.take()[0].description, "Nothing to update");

        Ok(())
    }

    #[test]
    fn test_edit_needs_a_loaded_profile() {
        let mut view = ProfileView::new();
        assert!(view.begin_edit().is_none());
    }
}
