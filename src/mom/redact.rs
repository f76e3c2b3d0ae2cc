//! Keyword redaction for external audiences.
//!
//! Derives an external-safe copy of a record by dropping agenda items and
//! discussion points that mention a sensitive keyword. Only `agenda` and
//! `discussions` are filtered; the remaining fields pass through unchanged
//! (the narrow scope is the policy, not an oversight). The input record is
//! never mutated: the redacted record is built from cloned data.

use super::{DiscussionSection, MoMRecord, Point};

/// Case-insensitive substrings that mark content as sensitive.
pub const SENSITIVE_KEYWORDS: [&str; 4] = ["confidential", "internal", "salary", "budget"];

fn is_sensitive(text: &str) -> bool {
    let lower = text.to_lowercase();
    SENSITIVE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Derive a redacted copy of a record.
///
/// Idempotent: redacting an already-redacted record removes nothing further.
pub fn redact(record: &MoMRecord) -> MoMRecord {
    let mut redacted = record.clone();

    redacted.agenda.retain(|item| !is_sensitive(item));

    redacted.discussions = record
        .discussions
        .iter()
        .map(|section| DiscussionSection {
            section_title: section.section_title.clone(),
            points: section
                .points
                .iter()
                .filter_map(|point| match point {
                    Point::Plain(text) => {
                        (!is_sensitive(text)).then(|| Point::Plain(text.clone()))
                    }
                    Point::Structured { text, subpoints } => {
                        if is_sensitive(text) {
                            return None;
                        }
                        Some(Point::Structured {
                            text: text.clone(),
                            subpoints: subpoints
                                .iter()
                                .filter(|sp| !is_sensitive(sp))
                                .cloned()
                                .collect(),
                        })
                    }
                })
                .collect(),
        })
        .collect();

    redacted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mom::ActionEntry;

    fn sample_record() -> MoMRecord {
        MoMRecord {
            title: Some("Planning".to_string()),
            agenda: vec![
                "Discuss Q3 budget".to_string(),
                "Plan offsite".to_string(),
            ],
            discussions: vec![DiscussionSection {
                section_title: "Finance".to_string(),
                points: vec![
                    Point::Plain("Salary bands under review".to_string()),
                    Point::Plain("Vendor selection".to_string()),
                    Point::Structured {
                        text: "Hiring plan".to_string(),
                        subpoints: vec![
                            "Two backend roles".to_string(),
                            "Confidential referral pipeline".to_string(),
                        ],
                    },
                    Point::Structured {
                        text: "Internal tooling migration".to_string(),
                        subpoints: vec!["Keep the old CLI".to_string()],
                    },
                ],
            }],
            decisions: vec![ActionEntry::Plain(
                "Approve the budget increase".to_string(),
            )],
            ..Default::default()
        }
    }

    #[test]
    fn test_agenda_filtering() {
        let redacted = redact(&sample_record());
        assert_eq!(redacted.agenda, vec!["Plan offsite"]);
    }

    #[test]
    fn test_discussion_point_filtering() {
        let redacted = redact(&sample_record());
        let points = &redacted.discussions[0].points;

        // Keyworded plain point and keyworded structured point are dropped
        // wholesale; surviving structured points keep only clean subpoints.
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], Point::Plain("Vendor selection".to_string()));
        assert_eq!(
            points[1],
            Point::Structured {
                text: "Hiring plan".to_string(),
                subpoints: vec!["Two backend roles".to_string()],
            }
        );
    }

    #[test]
    fn test_sections_survive_even_when_emptied() {
        let record = MoMRecord {
            discussions: vec![DiscussionSection {
                section_title: "Compensation".to_string(),
                points: vec![Point::Plain("Salary adjustments".to_string())],
            }],
            ..Default::default()
        };

        let redacted = redact(&record);
        assert_eq!(redacted.discussions.len(), 1);
        assert_eq!(redacted.discussions[0].section_title, "Compensation");
        assert!(redacted.discussions[0].points.is_empty());
    }

    #[test]
    fn test_other_fields_pass_through() {
        let record = sample_record();
        let redacted = redact(&record);
        // Decisions mention "budget" but the policy does not touch them.
        assert_eq!(redacted.decisions, record.decisions);
        assert_eq!(redacted.title, record.title);
    }

    #[test]
    fn test_input_record_is_not_mutated() {
        let record = sample_record();
        let before = record.clone();
        let _redacted = redact(&record);
        assert_eq!(record, before);
    }

    #[test]
    fn test_redaction_is_idempotent() {
        let once = redact(&sample_record());
        let twice = redact(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let record = MoMRecord {
            agenda: vec!["CONFIDENTIAL roadmap".to_string(), "Lunch".to_string()],
            ..Default::default()
        };
        assert_eq!(redact(&record).agenda, vec!["Lunch"]);
    }
}
