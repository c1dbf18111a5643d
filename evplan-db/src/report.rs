//! Plain-text table dumps

use evplan_common::db::{StoredModerator, StoredParticipant};
use std::fmt::Write as _;

const RULE_WIDTH: usize = 60;
const ROW_RULE_WIDTH: usize = 40;

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn section_header(out: &mut String, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "\n{}\n{}\n{}", rule, title, rule);
}

pub fn format_moderators(moderators: &[StoredModerator]) -> String {
    let mut out = String::new();
    section_header(&mut out, "MODERATORS TABLE");

    if moderators.is_empty() {
        out.push_str("No moderators found.\n");
        return out;
    }

    let row_rule = "-".repeat(ROW_RULE_WIDTH);
    for m in moderators {
        let _ = writeln!(out, "\nID: {}", m.id);
        let _ = writeln!(out, "Name: {}", m.name);
        let _ = writeln!(out, "City: {}", field(&m.city));
        let _ = writeln!(out, "Email: {}", field(&m.email));
        let _ = writeln!(out, "Expertise: {}", field(&m.expertise));
        let _ = writeln!(out, "Description: {}", field(&m.description));
        let _ = writeln!(out, "{}", row_rule);
    }
    out
}

pub fn format_participants(participants: &[StoredParticipant]) -> String {
    let mut out = String::new();
    section_header(&mut out, "PARTICIPANTS TABLE");

    if participants.is_empty() {
        out.push_str("No participants found.\n");
        return out;
    }

    let row_rule = "-".repeat(ROW_RULE_WIDTH);
    for p in participants {
        let _ = writeln!(out, "\nID: {}", p.id);
        let _ = writeln!(out, "Name: {}", p.name);
        let _ = writeln!(out, "Email: {}", p.email);
        let _ = writeln!(out, "Company: {}", field(&p.company));
        let _ = writeln!(out, "Role: {}", field(&p.role));
        let _ = writeln!(out, "{}", row_rule);
    }
    out
}
