//! Backend payloads as the company API sends them
use serde_json::{json, Value};

pub fn internship(id: &str, title: &str, department: &str, open: bool) -> Value {
    json!({
        "_id": id,
        "internshipDetails": {
            "title": title,
            "department": department,
            "responsibilities": ["Develop new user-facing features", "Write tests"],
            "skillsRequired": ["JavaScript", "React", "Node.js", "MongoDB", "Docker"],
            "openings": 3,
            "duration": "3 months",
            "applicationDeadline": "2025-10-15",
            "location": { "address": "Baner Road", "city": "Pune", "pinCode": 411045 },
            "stipend": "₹15000/month"
        },
        "applications": ["app1", "app2"],
        "company": "c1",
        "status": open,
        "createdAt": "2024-09-01T09:00:00Z"
    })
}

pub fn user(id: &str) -> Value {
    json!({
        "_id": id,
        "username": id,
        "name": format!("Applicant {id} Name"),
        "email": format!("{id}@example.test"),
        "field": "Computer Science",
        "residence": { "city": "Pune", "state": "Maharashtra" },
        "resume": {
            "skills": ["Rust", "SQL"],
            "socialLinks": { "github": format!("https://github.com/{id}") }
        }
    })
}

pub fn application(id: &str, user_id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "internship": "abc",
        "applicant": user(user_id),
        "status": status,
        "quiz": [{ "question": "Why us?", "answer": "Great team", "status": "answered" }],
        "appliedAt": "2024-10-15T10:00:00Z"
    })
}

pub fn company() -> Value {
    json!({
        "_id": "c1",
        "name": "Tech Solutions Pvt Ltd",
        "email": "hr@techsolutions.test",
        "uniqueName": "techsolutions",
        "industry": "Software",
        "location": "Pune",
        "description": "We build things.",
        "website": "https://techsolutions.test",
        "internships": ["abc"]
    })
}
