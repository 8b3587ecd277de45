//! Plain text rendering of the views for the terminal

use crate::views::{
    detail::{ApplicantProfile, DetailView},
    list::{InternshipCard, ListView, Phase, SKELETON_CARDS},
};
use talentdesk_core::{company::Company, stats::DashboardStats};

const RULE: &str = "────────────────────────────────────────";

/// Deterministic placeholder shown while the list loads
pub fn skeleton() -> String {
    let mut lines = vec!["░░░░░░░░░░░░░░░░░░░░  ░░░░░░░░".to_string(), RULE.to_string()];
    for _ in 0..SKELETON_CARDS {
        lines.push("░░░░░░░░░░░░░░░░  ░░░░".to_string());
        lines.push("  ░░░░░░░░░░░░░░░░░░░░░░░░░░░░".to_string());
        lines.push("  ░░░░░░  ░░░░░░  ░░░░░░".to_string());
    }
    lines.join("\n")
}

pub fn stats(stats: &DashboardStats) -> String {
    format!(
        "Total: {}   Open: {}   Applications: {}   Avg. stipend: {}",
        stats.total,
        stats.open,
        stats.total_applications,
        stats.average_stipend_label()
    )
}

pub fn card(card: &InternshipCard) -> String {
    let mut lines = vec![
        format!("{} [{}]  ({})", card.title, card.badge(), card.id),
        format!("  {}", card.department),
        format!("  {}", card.summary),
        format!(
            "  {} openings · {} · {} · {} applicants",
            card.openings, card.duration, card.stipend, card.applicants
        ),
    ];
    let skills = card.skills_label();
    if !skills.is_empty() {
        lines.push(format!("  Skills: {skills}"));
    }
    lines.join("\n")
}

pub fn list(view: &ListView) -> String {
    if view.phase() == Phase::Loading {
        return skeleton();
    }

    let mut sections = vec![stats(&view.stats()), RULE.to_string()];

    if let Some(empty) = view.empty_state() {
        sections.push(format!("{}\n{}", empty.title, empty.hint));
    } else {
        sections.extend(view.cards().iter().map(card));
    }

    sections.join("\n")
}

pub fn detail(view: &DetailView) -> String {
    let summary = view.summary();
    let state = if summary.open { "open" } else { "closed" };

    let mut lines = vec![
        format!("{} [{state}]", summary.title),
        RULE.to_string(),
        format!("Department:   {}", summary.department),
        format!("Duration:     {}", summary.duration),
        format!("Openings:     {}", summary.openings),
        format!("Stipend:      {}", summary.stipend),
        format!("Deadline:     {}", summary.deadline),
        format!("Start date:   {}", summary.start_date),
        format!("Location:     {}", summary.location),
    ];

    if !summary.responsibilities.is_empty() {
        lines.push("Responsibilities:".to_string());
        lines.extend(summary.responsibilities.iter().map(|r| format!("  - {r}")));
    }
    if !summary.skills.is_empty() {
        lines.push(format!("Skills: {}", summary.skills.join(", ")));
    }

    lines.push(RULE.to_string());
    let rows = view.rows();
    if rows.is_empty() {
        lines.push("No applications yet".to_string());
    } else {
        lines.push(format!("Applications ({})", rows.len()));
        lines.extend(rows.iter().map(|row| {
            format!(
                "  {}  {} <{}>  {}  applied {}",
                row.application_id, row.name, row.email, row.status, row.applied
            )
        }));
    }

    lines.join("\n")
}

pub fn applicant(profile: &ApplicantProfile) -> String {
    let mut lines = vec![
        format!("{} [{}]", profile.name, profile.status),
        RULE.to_string(),
        format!("Email:      {}", profile.email),
        format!("Phone:      {}", profile.phone),
        format!("Field:      {}", profile.field),
        format!("Residence:  {}", profile.residence),
        format!("Résumé:     {}", profile.resume),
        format!("Applied on {}", profile.applied),
        String::new(),
        profile.about.clone(),
    ];

    let mut section = |title: &str, entries: &[String]| {
        if !entries.is_empty() {
            lines.push(format!("{title}:"));
            lines.extend(entries.iter().map(|entry| format!("  - {entry}")));
        }
    };
    section("Skills", &profile.skills);
    section("Experience", &profile.experience);
    section("Projects", &profile.projects);
    section("Certifications", &profile.certifications);
    section("Links", &profile.links);
    section("Documents", &profile.documents);

    if !profile.quiz.is_empty() {
        lines.push("Quiz:".to_string());
        for (question, answer) in &profile.quiz {
            lines.push(format!("  Q: {question}"));
            lines.push(format!("  A: {answer}"));
        }
    }

    lines.join("\n")
}

pub fn company(company: &Company) -> String {
    let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| "—".to_string());
    [
        format!("{} (@{})", company.name, company.unique_name),
        RULE.to_string(),
        format!("Email:       {}", company.email),
        format!("Industry:    {}", company.industry),
        format!("Location:    {}", company.location),
        format!("Website:     {}", optional(&company.website)),
        format!("Internships: {}", company.internships.len()),
        String::new(),
        optional(&company.description),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;
    use talentdesk_core::internship::Internship;
    use testresult::TestResult;

    #[test]
    fn test_skeleton_is_header_and_six_cards() {
        let first = skeleton();
        assert_eq!(first, skeleton());
        assert_eq!(first.lines().count(), 2 + SKELETON_CARDS * 3);
    }

    #[test]
    fn test_list_shows_skeleton_until_loaded() {
        assert_eq!(list(&ListView::new()), skeleton());
    }

    #[test]
    fn test_stats_line() -> TestResult {
        let internships: Vec<Internship> = serde_json::from_value(serde_json::json!([
            fixtures::internship("1", "A", "Engineering", true),
            fixtures::internship("2", "B", "Design", false),
        ]))?;

        let line = stats(&DashboardStats::from_internships(&internships));

        assert_eq!(
            line,
            "Total: 2   Open: 1   Applications: 4   Avg. stipend: ₹15K"
        );

        Ok(())
    }

    #[test]
    fn test_company_without_optional_fields() -> TestResult {
        let mut value = fixtures::company();
        value["website"] = serde_json::Value::Null;
        let company: Company = serde_json::from_value(value)?;

        let text = super::company(&company);

        assert!(text.starts_with("Tech Solutions Pvt Ltd (@techsolutions)"));
        assert!(text.contains("Website:     —"));

        Ok(())
    }
}
