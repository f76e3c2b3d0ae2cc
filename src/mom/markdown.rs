//! Markdown rendering of a minutes record.
//!
//! Section order is fixed: header, attendees, purpose, discussions,
//! decisions, action items, next steps, footer. Rendering is total: missing
//! fields produce fallback text, never an error, and list order is always
//! preserved as-is.

use super::{ActionEntry, MoMRecord, Point};

/// Render a record (full or redacted) as a Markdown document.
pub fn render_markdown(mom: &MoMRecord) -> String {
    let mut lines: Vec<String> = Vec::new();

    // Header
    lines.push("## Minutes of Meeting (MoM)\n".to_string());
    lines.push(format!(
        "**Meeting Title:** {}",
        mom.title.as_deref().unwrap_or("N/A")
    ));

    let dt_line = match (mom.date.as_deref(), mom.time.as_deref()) {
        (Some(date), Some(time)) => Some(format!("{} - {}", date, time)),
        (Some(date), None) => Some(date.to_string()),
        (None, Some(time)) => Some(time.to_string()),
        (None, None) => None,
    };
    if let Some(dt) = dt_line {
        lines.push(format!("**Date & Time:** {}", dt));
    }
    if let Some(venue) = &mom.venue {
        lines.push(format!("**Venue:** {}", venue));
    }

    // Attendees
    lines.push("**Attendees:**".to_string());
    if mom.attendees.is_empty() {
        lines.push("No attendees listed.".to_string());
    } else {
        for attendee in &mom.attendees {
            lines.push(format!("*   {}", attendee));
        }
    }

    lines.push("---\n".to_string());

    // Purpose
    lines.push("### **1. Purpose of Meeting**".to_string());
    match &mom.purpose {
        Some(purpose) => lines.push(format!("{}\n", purpose)),
        None => lines.push("No purpose specified.\n".to_string()),
    }

    // Discussions
    if mom.discussions.is_empty() {
        lines.push("### **2. Key Discussion Points**".to_string());
        lines.push("No discussion points available.\n".to_string());
    } else {
        lines.push("### **2. Key Discussion Points**\n".to_string());
        for (idx, section) in mom.discussions.iter().enumerate() {
            lines.push(format!("**2.{} {}:**\n", idx + 1, section.section_title));
            // Points join as prose fragments rather than bullets.
            for point in &section.points {
                match point {
                    Point::Plain(text) => lines.push(format!("{} ", text.trim())),
                    Point::Structured { text, subpoints } => {
                        if !text.is_empty() {
                            lines.push(format!("{} ", text.trim()));
                        }
                        for subpoint in subpoints {
                            lines.push(format!("{} ", subpoint.trim()));
                        }
                    }
                }
            }
            lines.push(String::new());
        }
    }

    // Decisions
    lines.push("### **3. Decisions**".to_string());
    if mom.decisions.is_empty() {
        lines.push("No formal decisions were made during this meeting.".to_string());
    } else {
        for decision in &mom.decisions {
            lines.push(format!("*   {}", decision.display_text()));
        }
    }
    lines.push(String::new());

    // Action Items
    if mom.actions.is_empty() {
        lines.push("### **4. Action Items**".to_string());
        lines.push("No action items assigned.\n".to_string());
    } else if all_structured(&mom.actions) {
        lines.push("### **4. Action Items**\n".to_string());
        lines.push("| Action Item | Owner | Status | Notes |".to_string());
        lines.push("| :---------- | :---- | :----- | :---- |".to_string());
        for entry in &mom.actions {
            if let ActionEntry::Structured(action) = entry {
                lines.push(format!(
                    "| {} | {} | {} | {} |",
                    action.item, action.owner, action.status, action.notes
                ));
            }
        }
        lines.push(String::new());
    } else {
        lines.push("### **4. Action Items**".to_string());
        for entry in &mom.actions {
            lines.push(format!("*   {}", entry.display_text()));
        }
        lines.push(String::new());
    }

    // Next Steps
    lines.push("### **5. Next Steps**".to_string());
    if mom.next_steps.is_empty() {
        lines.push("No next steps specified.\n".to_string());
    } else {
        for step in &mom.next_steps {
            lines.push(format!("*   {}", step));
        }
        lines.push(String::new());
    }

    // Footer
    lines.push("---".to_string());
    if let Some(prepared_by) = &mom.prepared_by {
        lines.push(format!("**Minutes Prepared By:** {}", prepared_by));
    }
    if let Some(prep_date) = &mom.preparation_date {
        lines.push(format!("**Date of Preparation:** {}", prep_date));
    }

    lines.join("\n")
}

/// The table layout is only used when every entry carries the full columns.
fn all_structured(entries: &[ActionEntry]) -> bool {
    entries
        .iter()
        .all(|e| matches!(e, ActionEntry::Structured(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mom::{ActionItem, DiscussionSection};

    #[test]
    fn test_empty_record_renders_all_fallbacks() {
        let markdown = render_markdown(&MoMRecord::default());

        assert!(markdown.contains("**Meeting Title:** N/A"));
        assert!(markdown.contains("No attendees listed."));
        assert!(markdown.contains("No purpose specified."));
        assert!(markdown.contains("No discussion points available."));
        assert!(markdown.contains("No formal decisions were made during this meeting."));
        assert!(markdown.contains("No action items assigned."));
        assert!(markdown.contains("No next steps specified."));
    }

    #[test]
    fn test_structured_actions_render_as_table() {
        let mom = MoMRecord {
            actions: vec![ActionEntry::Structured(ActionItem {
                item: "Write report".to_string(),
                owner: "Bob".to_string(),
                status: "Pending".to_string(),
                notes: String::new(),
            })],
            ..Default::default()
        };

        let markdown = render_markdown(&mom);
        assert!(markdown.contains("| Action Item | Owner | Status | Notes |"));
        assert!(markdown.contains("| Write report | Bob | Pending |  |"));
        assert!(!markdown.contains("*   Write report"));
    }

    #[test]
    fn test_plain_actions_render_as_bullets() {
        let mom = MoMRecord {
            actions: vec![ActionEntry::Plain("Write report".to_string())],
            ..Default::default()
        };

        let markdown = render_markdown(&mom);
        assert!(markdown.contains("*   Write report"));
        assert!(!markdown.contains("| Action Item |"));
    }

    #[test]
    fn test_discussion_points_render_in_input_order() {
        let mom = MoMRecord {
            discussions: vec![DiscussionSection {
                section_title: "Planning".to_string(),
                points: vec![
                    Point::Plain("first".to_string()),
                    Point::Structured {
                        text: "second".to_string(),
                        subpoints: vec!["third".to_string(), "fourth".to_string()],
                    },
                    Point::Plain("fifth".to_string()),
                ],
            }],
            ..Default::default()
        };

        let markdown = render_markdown(&mom);
        assert!(markdown.contains("**2.1 Planning:**"));

        let positions: Vec<usize> = ["first", "second", "third", "fourth", "fifth"]
            .iter()
            .map(|word| markdown.find(word).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_header_lines() {
        let mom = MoMRecord {
            title: Some("Weekly Sync".to_string()),
            date: Some("2025-06-02".to_string()),
            time: Some("10:00".to_string()),
            venue: Some("Room 4".to_string()),
            prepared_by: Some("Carol".to_string()),
            ..Default::default()
        };

        let markdown = render_markdown(&mom);
        assert!(markdown.contains("**Meeting Title:** Weekly Sync"));
        assert!(markdown.contains("**Date & Time:** 2025-06-02 - 10:00"));
        assert!(markdown.contains("**Venue:** Room 4"));
        assert!(markdown.contains("**Minutes Prepared By:** Carol"));
        assert!(!markdown.contains("**Date of Preparation:**"));
    }
}
