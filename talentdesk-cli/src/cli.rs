//! Main talentdesk command line entry points
use crate::{
    actions::{self, Outcome},
    client::{ClientError, ResourceClient},
    dashboard::Dashboard,
    logging::setup_tracing,
    notify::ConsoleNotifier,
    paths::config_file,
    render,
    session::{Navigator, Session, Token, TokenStore},
    settings::Settings,
    views::{detail::DetailView, list::ListView, profile::ProfileView},
};
use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use inquire::ui::RenderConfig;
use reqwest::StatusCode;
use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use talentdesk_core::{
    application::Decision,
    company::CompanyProfileUpdate,
    filter::StatusFilter,
    internship::{DraftLocation, Internship, InternshipDraft, InternshipPatch},
    responses::LoginRequest,
};
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "talentdesk")]
#[command(about = "Manage your company's internships and applicants from the command line")]
pub struct Cli {
    #[arg(long, help = "Whether to turn off ansi terminal colors")]
    no_colors: bool,
    #[arg(long, help = "Base URL of the company API")]
    api_endpoint: Option<Url>,
    #[arg(long, help = "Path to the file the session token is persisted in")]
    credentials_file: Option<PathBuf>,
    #[arg(
        long,
        env = "TALENTDESK_TOKEN",
        hide_env_values = true,
        help = "Session token to use instead of the persisted one"
    )]
    token: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in with your company account and persist the session
    Login(LoginCommand),
    /// Forget the persisted session
    Logout,
    /// Show or edit your company profile
    Profile(ProfileCmds),
    /// Manage internship postings
    Internships(InternshipCmds),
    /// Review the applications to an internship
    Applications(ApplicationCmds),
    /// Print file paths used by the application (e.g. the path to config)
    Paths,
}

#[derive(Debug, Parser)]
pub struct LoginCommand {
    /// Account email. Prompted for if not provided.
    #[arg(long)]
    email: Option<String>,
}

#[derive(Debug, Parser)]
pub struct ProfileCmds {
    #[command(subcommand)]
    command: ProfileCommands,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommands {
    /// Show your company profile
    Show,
    /// Edit your company profile interactively
    Edit,
}

#[derive(Debug, Parser)]
pub struct InternshipCmds {
    #[command(subcommand)]
    command: InternshipCommands,
}

#[derive(Debug, Subcommand)]
pub enum InternshipCommands {
    /// List your internships with summary statistics
    List(ListCommand),
    /// Show one internship and its applications
    Show(InternshipArg),
    /// Post a new internship
    Create,
    /// Change an existing internship
    Update(InternshipArg),
    /// Stop accepting applications for an internship
    Close(InternshipArg),
    /// Delete an internship
    Delete(DeleteCommand),
}

#[derive(Debug, Parser)]
pub struct ListCommand {
    /// Only show internships whose title or department contains this text
    #[arg(long, short = 's')]
    search: Option<String>,
    /// Only show internships in this state (all, open, closed)
    #[arg(long, default_value_t = StatusFilter::All)]
    status: StatusFilter,
}

#[derive(Debug, Parser)]
pub struct InternshipArg {
    /// Identifier of the internship
    id: String,
}

#[derive(Debug, Parser)]
pub struct DeleteCommand {
    /// Identifier of the internship
    id: String,
    /// Don't ask for confirmation
    #[arg(long, short = 'y')]
    yes: bool,
}

#[derive(Debug, Parser)]
pub struct ApplicationCmds {
    #[command(subcommand)]
    command: ApplicationCommands,
}

#[derive(Debug, Subcommand)]
pub enum ApplicationCommands {
    /// List the applications to an internship, or show one applicant's profile
    Show(ShowApplicationsCommand),
    /// Accept an application
    Accept(DecideCommand),
    /// Reject an application
    Reject(DecideCommand),
}

#[derive(Debug, Parser)]
pub struct ShowApplicationsCommand {
    /// Identifier of the internship
    internship_id: String,
    /// Show the full profile behind this application
    #[arg(long)]
    application: Option<String>,
}

#[derive(Debug, Parser)]
pub struct DecideCommand {
    /// Identifier of the internship
    internship_id: String,
    /// Identifier of the application
    application_id: String,
}

impl Cli {
    pub async fn run(&self, mut settings: Settings) -> Result<()> {
        let ansi = !self.no_colors;
        setup_tracing(ansi);

        if let Some(api_endpoint) = &self.api_endpoint {
            settings.api_endpoint = api_endpoint.clone();
        }
        if let Some(credentials_file) = &self.credentials_file {
            settings.credentials_file = credentials_file.clone();
        }

        match &self.command {
            Commands::Paths => {
                println!(
                    "{}",
                    config_file().to_str().expect("non utf8 config file path?")
                );
                println!(
                    "{}",
                    settings
                        .credentials_file
                        .to_str()
                        .expect("non utf8 credentials file path")
                );
                return Ok(());
            }
            Commands::Logout => {
                Session::new(TokenStore::new(&settings.credentials_file)).sign_out()?;
                println!("Logged out.");
                return Ok(());
            }
            _ => {}
        }

        let state = CliState::load(&settings, self.token.clone(), ansi)?;

        let result = match &self.command {
            Commands::Login(login) => state.login(login.email.clone()).await,
            Commands::Profile(profile) => match profile.command {
                ProfileCommands::Show => state.show_profile().await,
                ProfileCommands::Edit => state.edit_profile().await,
            },
            Commands::Internships(internships) => match &internships.command {
                InternshipCommands::List(list) => state.list_internships(list).await,
                InternshipCommands::Show(show) => state.show_internship(&show.id, None).await,
                InternshipCommands::Create => state.create_internship().await,
                InternshipCommands::Update(update) => state.update_internship(&update.id).await,
                InternshipCommands::Close(close) => state.close_internship(&close.id).await,
                InternshipCommands::Delete(delete) => {
                    state.delete_internship(&delete.id, delete.yes).await
                }
            },
            Commands::Applications(applications) => match &applications.command {
                ApplicationCommands::Show(show) => {
                    state
                        .show_internship(&show.internship_id, show.application.as_deref())
                        .await
                }
                ApplicationCommands::Accept(decide) => {
                    state.decide(decide, Decision::Accept).await
                }
                ApplicationCommands::Reject(decide) => {
                    state.decide(decide, Decision::Reject).await
                }
            },
            Commands::Paths | Commands::Logout => Ok(()),
        };

        if state.navigator.expired() {
            bail!("Your session has expired. Run `talentdesk login` to sign in again.");
        }

        result
    }
}

/// Terminal counterpart of redirecting to the login page
#[derive(Debug, Default)]
pub(crate) struct CliNavigator {
    expired: AtomicBool,
}

impl CliNavigator {
    pub(crate) fn expired(&self) -> bool {
        self.expired.load(Ordering::SeqCst)
    }
}

impl Navigator for CliNavigator {
    fn redirect_to_login(&self, login_route: &str) {
        if !self.expired.swap(true, Ordering::SeqCst) {
            tracing::info!(login_route, "Session expired, login required");
        }
    }
}

#[derive(Debug)]
pub(crate) struct CliState {
    pub(crate) render_config: RenderConfig,
    pub(crate) session: Arc<Session>,
    pub(crate) navigator: Arc<CliNavigator>,
    pub(crate) dashboard: Dashboard,
}

impl CliState {
    fn load(settings: &Settings, token: Option<String>, colors: bool) -> Result<Self> {
        let render_config = if colors {
            RenderConfig::default_colored()
        } else {
            RenderConfig::empty()
        };

        let session = Arc::new(
            Session::new(TokenStore::new(&settings.credentials_file))
                .with_active(token.map(Token::new)),
        );
        let navigator = Arc::new(CliNavigator::default());

        let client = ResourceClient::new(settings, session.clone())
            .context("Setting up the HTTP client")?;
        tracing::info!(api_endpoint = %client.base_url(), "Using company API");

        let dashboard = Dashboard::new(
            client,
            Arc::new(ConsoleNotifier { ansi: colors }),
            navigator.clone(),
            settings.login_route.clone(),
        );

        Ok(Self {
            render_config,
            session,
            navigator,
            dashboard,
        })
    }

    async fn login(&self, email: Option<String>) -> Result<()> {
        let email = match email {
            Some(email) => email,
            None => inquire::Text::new("What's your account email?")
                .with_render_config(self.render_config)
                .prompt()?,
        };
        let password = inquire::Password::new("Password:")
            .without_confirmation()
            .with_render_config(self.render_config)
            .prompt()?;
        tracing::info!(email, "Logging in");

        let response = match self
            .dashboard
            .client
            .login(&LoginRequest { email, password })
            .await
        {
            Ok(response) => response,
            Err(ClientError::Http { status, .. })
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::BAD_REQUEST =>
            {
                bail!("Invalid email or password.")
            }
            Err(err) => return Err(err).context("Logging in"),
        };

        let token = match (response.success, response.token) {
            (true, Some(token)) => Token::new(token),
            _ => bail!("The server didn't accept the login."),
        };
        self.session.sign_in(token)?;

        match response.company {
            Some(company) => println!("Successfully logged in as {}.", company.name),
            None => println!("Successfully logged in."),
        }

        Ok(())
    }

    async fn show_profile(&self) -> Result<()> {
        let mut view = ProfileView::new();
        view.load(&self.dashboard).await;

        let company = view
            .company()
            .ok_or_else(|| anyhow!("Couldn't load your company profile."))?;
        println!("{}", render::company(company));

        Ok(())
    }

    async fn edit_profile(&self) -> Result<()> {
        let mut view = ProfileView::new();
        view.load(&self.dashboard).await;

        let render_config = self.render_config;
        let Some(form) = view.begin_edit() else {
            bail!("Couldn't load your company profile.");
        };
        prompt_profile(form, render_config)?;

        expect_applied(view.save(&self.dashboard).await)?;
        if let Some(company) = view.company() {
            println!("{}", render::company(company));
        }

        Ok(())
    }

    async fn list_internships(&self, command: &ListCommand) -> Result<()> {
        let mut list = ListView::new();
        if let Some(search) = &command.search {
            list.set_query(search.clone());
        }
        list.set_status(command.status);

        list.load(&self.dashboard).await;
        println!("{}", render::list(&list));

        Ok(())
    }

    async fn fetch_internship(&self, id: &str) -> Result<Internship> {
        match self.dashboard.client.get_internship(id).await {
            Ok(internship) => Ok(internship),
            Err(err) => {
                self.dashboard.report(
                    &err,
                    "Error",
                    "Failed to fetch internship. Please try again.",
                );
                Err(err).with_context(|| format!("Fetching internship {id}"))
            }
        }
    }

    async fn show_internship(&self, id: &str, application_id: Option<&str>) -> Result<()> {
        let internship = self.fetch_internship(id).await?;
        let mut detail = DetailView::open(&self.dashboard, internship).await;

        match application_id {
            None => println!("{}", render::detail(&detail)),
            Some(application_id) => {
                let profile = detail
                    .select_applicant(application_id)
                    .ok_or_else(|| anyhow!("No application {application_id} for internship {id}"))?;
                println!("{}", render::applicant(&profile));
            }
        }

        Ok(())
    }

    async fn create_internship(&self) -> Result<()> {
        let draft = prompt_draft(self.render_config)?;

        let mut list = ListView::new();
        expect_applied(actions::create_internship(&self.dashboard, &mut list, draft).await)?;
        println!("{}", render::list(&list));

        Ok(())
    }

    async fn update_internship(&self, id: &str) -> Result<()> {
        let current = self.fetch_internship(id).await?;
        let patch = prompt_patch(&current, self.render_config)?;

        let mut list = ListView::new();
        expect_applied(actions::update_internship(&self.dashboard, &mut list, id, patch).await)?;
        println!("{}", render::list(&list));

        Ok(())
    }

    async fn close_internship(&self, id: &str) -> Result<()> {
        let mut list = ListView::new();
        expect_applied(actions::close_internship(&self.dashboard, &mut list, id).await)?;
        println!("{}", render::list(&list));

        Ok(())
    }

    async fn delete_internship(&self, id: &str, confirmed: bool) -> Result<()> {
        let confirmed = confirmed
            || inquire::Confirm::new(&format!("Delete internship {id}? This can't be undone."))
                .with_default(false)
                .with_render_config(self.render_config)
                .prompt()?;
        if !confirmed {
            println!("Nothing deleted.");
            return Ok(());
        }

        let mut list = ListView::new();
        expect_applied(actions::delete_internship(&self.dashboard, &mut list, id).await)?;
        println!("{}", render::list(&list));

        Ok(())
    }

    async fn decide(&self, command: &DecideCommand, decision: Decision) -> Result<()> {
        let internship = self.fetch_internship(&command.internship_id).await?;
        let mut detail = DetailView::open(&self.dashboard, internship).await;

        expect_applied(
            actions::decide(&self.dashboard, &mut detail, &command.application_id, decision).await,
        )?;
        println!("{}", render::detail(&detail));

        Ok(())
    }
}

fn expect_applied(outcome: Outcome) -> Result<()> {
    match outcome {
        Outcome::Applied => Ok(()),
        Outcome::Failed => bail!("Nothing was changed."),
    }
}

fn prompt_text(message: &str, default: &str, render_config: RenderConfig) -> Result<String> {
    let mut text = inquire::Text::new(message).with_render_config(render_config);
    if !default.is_empty() {
        text = text.with_default(default);
    }
    Ok(text.prompt()?)
}

fn prompt_list(message: &str, default: &[String], render_config: RenderConfig) -> Result<Vec<String>> {
    let joined = default.join(", ");
    let answer = prompt_text(message, &joined, render_config)?;
    Ok(answer.split(',').map(|entry| entry.trim().to_string()).collect())
}

fn prompt_profile(form: &mut CompanyProfileUpdate, render_config: RenderConfig) -> Result<()> {
    for (message, field) in [
        ("Company name:", &mut form.name),
        ("Contact email:", &mut form.email),
        ("Industry:", &mut form.industry),
        ("Location:", &mut form.location),
        ("Website:", &mut form.website),
        ("Description:", &mut form.description),
    ] {
        let answer = prompt_text(message, field.as_deref().unwrap_or_default(), render_config)?;
        *field = (!answer.trim().is_empty()).then(|| answer.trim().to_string());
    }

    Ok(())
}

fn prompt_draft(render_config: RenderConfig) -> Result<InternshipDraft> {
    let ask = |message: &str| prompt_text(message, "", render_config);

    Ok(InternshipDraft {
        title: ask("Title:")?,
        department: ask("Department:")?,
        responsibilities: prompt_list("Responsibilities (comma separated):", &[], render_config)?,
        skills_required: prompt_list("Required skills (comma separated):", &[], render_config)?,
        openings: ask("Number of openings:")?,
        duration: ask("Duration (e.g. 3 months):")?,
        application_deadline: ask("Application deadline:")?,
        stipend: ask("Stipend (e.g. ₹15000/month):")?,
        location: DraftLocation {
            address: ask("Address:")?,
            city: ask("City:")?,
            pin_code: ask("PIN code:")?,
        },
    })
}

/// Prompt for every editable field, keeping only the ones that changed
fn prompt_patch(current: &Internship, render_config: RenderConfig) -> Result<InternshipPatch> {
    let details = &current.internship_details;
    let changed = |message: &str, old: Option<&str>| -> Result<Option<String>> {
        let old = old.unwrap_or_default();
        let answer = prompt_text(message, old, render_config)?;
        Ok((answer.trim() != old).then(|| answer.trim().to_string()))
    };

    let title = changed("Title:", Some(details.title.as_str()))?;
    let department = changed("Department:", details.department.as_deref())?;
    let responsibilities = prompt_list(
        "Responsibilities (comma separated):",
        &details.responsibilities,
        render_config,
    )?;
    let skills_required = prompt_list(
        "Required skills (comma separated):",
        &details.skills_required,
        render_config,
    )?;
    let openings = changed(
        "Number of openings:",
        details.openings.map(|n| n.to_string()).as_deref(),
    )?;
    let duration = changed("Duration:", details.duration.as_deref())?;
    let application_deadline =
        changed("Application deadline:", details.application_deadline.as_deref())?;
    let stipend = changed("Stipend:", details.stipend.as_deref())?;

    let openings = match openings {
        Some(openings) => Some(
            openings
                .parse()
                .with_context(|| format!("{openings:?} is not a number of openings"))?,
        ),
        None => None,
    };

    let unchanged = |new: &[String], old: &[String]| {
        new.iter().filter(|entry| !entry.is_empty()).eq(old.iter())
    };

    Ok(InternshipPatch {
        title,
        department,
        responsibilities: (!unchanged(&responsibilities, &details.responsibilities))
            .then_some(responsibilities),
        skills_required: (!unchanged(&skills_required, &details.skills_required))
            .then_some(skills_required),
        openings,
        duration,
        application_deadline,
        stipend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_navigator_reports_expiry_once() {
        let navigator = CliNavigator::default();
        assert!(!navigator.expired());

        navigator.redirect_to_login("/login");
        navigator.redirect_to_login("/login");

        assert!(navigator.expired());
    }

    #[test]
    fn test_status_filter_argument() {
        let cli = Cli::try_parse_from(["talentdesk", "internships", "list", "--status", "Closed"])
            .expect("valid arguments");

        match cli.command {
            Commands::Internships(InternshipCmds {
                command: InternshipCommands::List(list),
            }) => assert_eq!(list.status, StatusFilter::Closed),
            other => panic!("Unexpected command {other:?}"),
        }
    }
}
