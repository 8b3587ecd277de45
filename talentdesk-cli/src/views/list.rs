//! The internship list: loading, filtering, statistics and summary cards

use super::{or_not_specified, Lifecycle};
use crate::dashboard::Dashboard;
use talentdesk_core::{
    filter::{InternshipFilter, StatusFilter},
    internship::Internship,
    stats::DashboardStats,
};

/// Placeholder cards rendered while the list loads
pub const SKELETON_CARDS: usize = 6;

/// Skills listed on a card before collapsing into "+N more"
pub const CARD_SKILLS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Filtering,
}

/// What to show when nothing matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub hint: &'static str,
}

impl EmptyState {
    const FILTERED: Self = Self {
        title: "No internships found",
        hint: "Try adjusting your search criteria or filters.",
    };

    const NOTHING_POSTED: Self = Self {
        title: "No internships found",
        hint: "Get started by creating your first internship posting.",
    };
}

#[derive(Debug, Default)]
pub struct ListView {
    internships: Vec<Internship>,
    filter: InternshipFilter,
    loaded: bool,
    lifecycle: Lifecycle,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn phase(&self) -> Phase {
        match (self.loaded, self.filter.is_active()) {
            (false, _) => Phase::Loading,
            (true, false) => Phase::Ready,
            (true, true) => Phase::Filtering,
        }
    }

    /// Fetch every internship of the company.
    ///
    /// On failure the list is emptied and an error notification is shown.
    pub async fn load(&mut self, dashboard: &Dashboard) {
        let Some(fetched) = self
            .lifecycle
            .guard(dashboard.client.get_all_internships())
            .await
        else {
            return;
        };

        match fetched {
            Ok(internships) => {
                tracing::info!(count = internships.len(), "Loaded internships");
                self.internships = internships;
            }
            Err(err) => {
                dashboard.report(&err, "Error", "Failed to fetch internships. Please try again.");
                self.internships = Vec::new();
            }
        }
        self.loaded = true;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.filter.status = status;
    }

    pub fn filter(&self) -> &InternshipFilter {
        &self.filter
    }

    /// The full, unfiltered list
    pub fn internships(&self) -> &[Internship] {
        &self.internships
    }

    pub fn find(&self, id: &str) -> Option<&Internship> {
        self.internships.iter().find(|internship| internship.id == id)
    }

    pub fn filtered(&self) -> Vec<&Internship> {
        self.filter.apply(&self.internships)
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats::from_internships(&self.internships)
    }

    pub fn cards(&self) -> Vec<InternshipCard> {
        self.filtered().into_iter().map(InternshipCard::from).collect()
    }

    /// `None` unless the view is loaded and nothing passes the filter
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.loaded || !self.filtered().is_empty() {
            return None;
        }

        Some(if self.filter.is_active() {
            EmptyState::FILTERED
        } else {
            EmptyState::NOTHING_POSTED
        })
    }
}

/// Display values of one internship in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternshipCard {
    pub id: String,
    pub title: String,
    pub open: bool,
    pub department: String,
    pub summary: String,
    pub openings: u32,
    pub duration: String,
    pub stipend: String,
    pub applicants: usize,
    pub skills: Vec<String>,
    pub more_skills: usize,
}

impl InternshipCard {
    pub fn badge(&self) -> &'static str {
        if self.open {
            "open"
        } else {
            "closed"
        }
    }

    pub fn skills_label(&self) -> String {
        let mut label = self.skills.join(", ");
        if self.more_skills > 0 {
            label.push_str(&format!(" +{} more", self.more_skills));
        }
        label
    }
}

impl From<&Internship> for InternshipCard {
    fn from(internship: &Internship) -> Self {
        let details = &internship.internship_details;
        let summary = if details.responsibilities.is_empty() {
            "No description available".to_string()
        } else {
            details.responsibilities.join(", ")
        };

        Self {
            id: internship.id.clone(),
            title: internship.title().to_string(),
            open: internship.is_open(),
            department: or_not_specified(internship.department()),
            summary,
            openings: details.openings.unwrap_or(0),
            duration: or_not_specified(details.duration.as_deref()),
            stipend: or_not_specified(details.stipend.as_deref()),
            applicants: internship.applications.len(),
            skills: details
                .skills_required
                .iter()
                .take(CARD_SKILLS)
                .cloned()
                .collect(),
            more_skills: details.skills_required.len().saturating_sub(CARD_SKILLS),
        }
    }
}
