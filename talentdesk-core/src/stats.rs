//! Aggregate statistics shown above the internship list

use crate::internship::Internship;
use std::fmt;

/// Statistics over the full, unfiltered internship list
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DashboardStats {
    /// Number of internships
    pub total: usize,
    /// Number of internships accepting applications
    pub open: usize,
    /// Sum of application counts over all internships
    pub total_applications: usize,
    /// Mean stipend; 0 for an empty list
    pub average_stipend: f64,
}

impl DashboardStats {
    /// Compute statistics for `internships`
    pub fn from_internships(internships: &[Internship]) -> Self {
        let total = internships.len();
        let open = internships.iter().filter(|i| i.is_open()).count();
        let total_applications = internships.iter().map(|i| i.applications.len()).sum();
        let stipend_sum: f64 = internships
            .iter()
            .map(|i| i.stipend_amount() as f64)
            .sum();

        Self {
            total,
            open,
            total_applications,
            average_stipend: stipend_sum / total.max(1) as f64,
        }
    }

    /// The average stipend the way the dashboard shows it, e.g. `₹15K`
    pub fn average_stipend_label(&self) -> AverageStipend {
        AverageStipend(self.average_stipend)
    }
}

/// Display adapter rounding a stipend to whole thousands
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AverageStipend(pub f64);

impl fmt::Display for AverageStipend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}K", (self.0 / 1000.0).round())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use testresult::TestResult;

    fn internships(value: serde_json::Value) -> serde_json::Result<Vec<Internship>> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_empty_list_is_finite() {
        let stats = DashboardStats::from_internships(&[]);

        assert_eq!(stats.total, 0);
        assert_eq!(stats.open, 0);
        assert_eq!(stats.total_applications, 0);
        assert!(stats.average_stipend.is_finite());
        assert_eq!(stats.average_stipend, 0.0);
        assert_eq!(stats.average_stipend_label().to_string(), "₹0K");
    }

    #[test]
    fn test_average_of_two_stipends() -> TestResult {
        let list = internships(json!([
            {
                "_id": "1",
                "internshipDetails": { "title": "A", "stipend": "₹10000" },
                "applications": ["x", "y"],
                "status": true
            },
            {
                "_id": "2",
                "internshipDetails": { "title": "B", "stipend": "₹20000" },
                "applications": ["z"],
                "status": false
            }
        ]))?;

        let stats = DashboardStats::from_internships(&list);

        assert_eq!(stats.total, 2);
        assert_eq!(stats.open, 1);
        assert_eq!(stats.total_applications, 3);
        assert_eq!(stats.average_stipend, 15_000.0);
        assert_eq!(stats.average_stipend_label().to_string(), "₹15K");

        Ok(())
    }

    #[test]
    fn test_missing_and_textual_stipends_count_as_zero() -> TestResult {
        let list = internships(json!([
            { "_id": "1", "internshipDetails": { "title": "A", "stipend": "₹12,500/month" }, "status": true },
            { "_id": "2", "internshipDetails": { "title": "B", "stipend": "Unpaid" }, "status": true },
            { "_id": "3", "internshipDetails": { "title": "C" }, "status": true }
        ]))?;

        let stats = DashboardStats::from_internships(&list);

        assert!((stats.average_stipend - 12_500.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.average_stipend_label().to_string(), "₹4K");

        Ok(())
    }

    #[test]
    fn test_huge_stipends_do_not_overflow() -> TestResult {
        let list = internships(json!([
            { "_id": "1", "internshipDetails": { "title": "A", "stipend": "₹18446744073709551615" }, "status": true },
            { "_id": "2", "internshipDetails": { "title": "B", "stipend": "₹10000" }, "status": true }
        ]))?;

        let stats = DashboardStats::from_internships(&list);

        assert!(stats.average_stipend.is_finite());
        assert!(stats.average_stipend > 9.2e18);

        Ok(())
    }
}
