//! Client-side filtering of the internship list

use crate::internship::Internship;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Which internships to show by open/closed state
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Open and closed
    #[default]
    All,
    /// Only internships accepting applications
    Open,
    /// Only closed internships
    Closed,
}

impl StatusFilter {
    /// Whether an internship with the given `status` passes
    pub fn admits(self, status: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Open => status,
            StatusFilter::Closed => !status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusFilter::All => "all",
            StatusFilter::Open => "open",
            StatusFilter::Closed => "closed",
        })
    }
}

/// Error parsing a [`StatusFilter`]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown status filter {0:?}, expected one of all, open, closed")]
pub struct UnknownStatusFilter(pub String);

impl FromStr for StatusFilter {
    type Err = UnknownStatusFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "open" => Ok(StatusFilter::Open),
            "closed" => Ok(StatusFilter::Closed),
            _ => Err(UnknownStatusFilter(s.to_string())),
        }
    }
}

/// Free-text query plus status filter.
///
/// Applying it is pure: the same list, query and status always give the same
/// result, and nothing is fetched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InternshipFilter {
    /// Matched case-insensitively against title and department
    pub query: String,
    /// Open/closed restriction
    pub status: StatusFilter,
}

impl InternshipFilter {
    /// New filter from a query and status
    pub fn new(query: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            query: query.into(),
            status,
        }
    }

    /// Whether anything is filtered out at all
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || self.status != StatusFilter::All
    }

    /// Whether `internship` passes both the query and the status filter
    pub fn matches(&self, internship: &Internship) -> bool {
        self.matches_query(internship) && self.status.admits(internship.status)
    }

    fn matches_query(&self, internship: &Internship) -> bool {
        if self.query.is_empty() {
            return true;
        }

        let needle = self.query.to_lowercase();
        internship.title().to_lowercase().contains(&needle)
            || internship
                .department()
                .map_or(false, |department| department.to_lowercase().contains(&needle))
    }

    /// Internships passing the filter, in their original order
    pub fn apply<'a>(&self, internships: &'a [Internship]) -> Vec<&'a Internship> {
        internships
            .iter()
            .filter(|internship| self.matches(internship))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internship::InternshipDetails;
    use assert_matches::assert_matches;

    fn internship(id: &str, title: &str, department: Option<&str>, status: bool) -> Internship {
        Internship {
            id: id.to_string(),
            internship_details: InternshipDetails {
                title: title.to_string(),
                department: department.map(str::to_string),
                ..Default::default()
            },
            eligibility: None,
            applications: vec![],
            assignments: vec![],
            current_interns: vec![],
            ex_skills: Default::default(),
            sample_questions: vec![],
            company: None,
            status,
            created_at: None,
            updated_at: None,
        }
    }

    fn sample() -> Vec<Internship> {
        vec![
            internship("1", "Full-Stack Developer Intern", Some("Engineering"), true),
            internship("2", "UI/UX Design Intern", Some("Design"), true),
            internship("3", "Backend Developer Intern", Some("Engineering"), false),
            internship("4", "Marketing Intern", None, false),
        ]
    }

    fn ids(list: Vec<&Internship>) -> Vec<&str> {
        list.into_iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let list = sample();
        let filter = InternshipFilter::default();

        assert!(!filter.is_active());
        assert_eq!(ids(filter.apply(&list)), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_query_matches_title_or_department_case_insensitively() {
        let list = sample();

        assert_eq!(
            ids(InternshipFilter::new("DEVELOPER", StatusFilter::All).apply(&list)),
            vec!["1", "3"]
        );
        assert_eq!(
            ids(InternshipFilter::new("design", StatusFilter::All).apply(&list)),
            vec!["2"]
        );
        assert_eq!(
            ids(InternshipFilter::new("engineering", StatusFilter::All).apply(&list)),
            vec!["1", "3"]
        );
        assert!(InternshipFilter::new("sales", StatusFilter::All)
            .apply(&list)
            .is_empty());
    }

    #[test]
    fn test_status_filter_is_homogeneous() {
        let list = sample();

        for (status, expected) in [(StatusFilter::Open, true), (StatusFilter::Closed, false)] {
            let filtered = InternshipFilter::new("", status).apply(&list);
            assert!(!filtered.is_empty());
            assert!(filtered.iter().all(|i| i.status == expected));
        }

        assert_eq!(
            ids(InternshipFilter::new("intern", StatusFilter::Closed).apply(&list)),
            vec!["3", "4"]
        );
    }

    #[test]
    fn test_parse_status_filter() {
        assert_matches!("Open".parse::<StatusFilter>(), Ok(StatusFilter::Open));
        assert_matches!(" closed ".parse::<StatusFilter>(), Ok(StatusFilter::Closed));
        assert_matches!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_matches!("pending".parse::<StatusFilter>(), Err(_));
        assert_eq!(StatusFilter::Closed.to_string(), "closed");
    }
}
