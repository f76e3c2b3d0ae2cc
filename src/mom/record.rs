//! The canonical structured minutes record.
//!
//! Generation output has no fixed schema, so the record is projected out of
//! an untyped JSON value through total, field-by-field accessors: every
//! absent or mistyped field falls back to its default instead of failing.
//! Strictness about parseability lives in the extractor; this module is
//! deliberately lenient about content.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The canonical structured Minutes of Meeting record.
///
/// Absence of any field never fails rendering; each renderer supplies a
/// documented fallback. List order is preserved from the input everywhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoMRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub agenda: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub discussions: Vec<DiscussionSection>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub decisions: Vec<ActionEntry>,
    #[serde(alias = "action_items", skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub next_steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prepared_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparation_date: Option<String>,
}

/// One titled discussion section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscussionSection {
    #[serde(alias = "title")]
    pub section_title: String,
    pub points: Vec<Point>,
}

/// A discussion point: either plain prose or a text with subpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Point {
    Plain(String),
    Structured {
        text: String,
        #[serde(default)]
        subpoints: Vec<String>,
    },
}

/// A decision or action entry: either a plain line or a structured item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionEntry {
    Structured(ActionItem),
    Plain(String),
}

impl ActionEntry {
    /// Display text for bullet rendering.
    pub fn display_text(&self) -> &str {
        match self {
            ActionEntry::Plain(s) => s,
            ActionEntry::Structured(item) => &item.item,
        }
    }
}

/// A structured action item for the four-column table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionItem {
    pub item: String,
    pub owner: String,
    pub status: String,
    pub notes: String,
}

impl MoMRecord {
    /// Project an untyped JSON value into a record. Total: never fails.
    ///
    /// Non-object values yield the empty record; within an object, every
    /// field is read leniently and mistyped values fall back to defaults.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        Self {
            title: opt_string(obj.get("title")),
            date: opt_string(obj.get("date")),
            time: opt_string(obj.get("time")),
            venue: opt_string(obj.get("venue")),
            purpose: opt_string(obj.get("purpose")),
            attendees: string_list(obj.get("attendees")),
            agenda: string_list(obj.get("agenda")),
            discussions: discussion_list(obj.get("discussions")),
            decisions: action_list(obj.get("decisions")),
            actions: action_list(obj.get("actions").or_else(|| obj.get("action_items"))),
            next_steps: string_list(obj.get("next_steps")),
            conclusion: opt_string(obj.get("conclusion")),
            summary: opt_string(obj.get("summary")),
            prepared_by: opt_string(obj.get("prepared_by")),
            preparation_date: opt_string(obj.get("preparation_date")),
        }
    }

    /// Serialize the record to pretty JSON for the human-edit step.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Read an optional string field. Blank strings count as absent.
fn opt_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Read a list of display strings.
///
/// Accepts an array (string elements kept, scalar elements stringified) or
/// a single newline-separated string, mirroring the shapes generation
/// output has been seen to produce.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(Value::String(s)) => s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read the discussions list, resolving section titles positionally.
fn discussion_list(value: Option<&Value>) -> Vec<DiscussionSection> {
    let Some(Value::Array(sections)) = value else {
        return Vec::new();
    };

    sections
        .iter()
        .enumerate()
        .filter_map(|(idx, section)| {
            let obj = section.as_object()?;
            let section_title = opt_string(obj.get("section_title"))
                .or_else(|| opt_string(obj.get("title")))
                .unwrap_or_else(|| format!("Section {}", idx + 1));

            let points = match obj.get("points") {
                Some(Value::Array(points)) => points.iter().filter_map(point_from).collect(),
                _ => Vec::new(),
            };

            Some(DiscussionSection {
                section_title,
                points,
            })
        })
        .collect()
}

fn point_from(value: &Value) -> Option<Point> {
    match value {
        Value::String(s) => Some(Point::Plain(s.clone())),
        Value::Object(obj) => Some(Point::Structured {
            text: opt_string(obj.get("text")).unwrap_or_default(),
            subpoints: string_list(obj.get("subpoints")),
        }),
        _ => None,
    }
}

/// Read a decisions/actions list, keeping whichever shape each entry has.
fn action_list(value: Option<&Value>) -> Vec<ActionEntry> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(ActionEntry::Plain(s.clone())),
                Value::Object(obj) => Some(ActionEntry::Structured(ActionItem {
                    item: opt_string(obj.get("item")).unwrap_or_default(),
                    owner: opt_string(obj.get("owner")).unwrap_or_default(),
                    status: opt_string(obj.get("status")).unwrap_or_default(),
                    notes: opt_string(obj.get("notes")).unwrap_or_default(),
                })),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| ActionEntry::Plain(l.to_string()))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_projection_is_total_on_non_objects() {
        assert_eq!(MoMRecord::from_value(&json!(null)), MoMRecord::default());
        assert_eq!(MoMRecord::from_value(&json!([1, 2])), MoMRecord::default());
        assert_eq!(MoMRecord::from_value(&json!("text")), MoMRecord::default());
    }

    #[test]
    fn test_mistyped_fields_fall_back() {
        let record = MoMRecord::from_value(&json!({
            "title": 42,
            "attendees": "Alice\nBob",
            "agenda": {"not": "a list"},
            "discussions": "free prose",
        }));

        assert_eq!(record.title, None);
        assert_eq!(record.attendees, vec!["Alice", "Bob"]);
        assert!(record.agenda.is_empty());
        assert!(record.discussions.is_empty());
    }

    #[test]
    fn test_discussion_points_keep_both_shapes_in_order() {
        let record = MoMRecord::from_value(&json!({
            "discussions": [{
                "section_title": "Roadmap",
                "points": [
                    "Opening remarks",
                    {"text": "Q3 milestones", "subpoints": ["API freeze", "Beta cut"]}
                ]
            }]
        }));

        assert_eq!(record.discussions.len(), 1);
        let section = &record.discussions[0];
        assert_eq!(section.section_title, "Roadmap");
        assert_eq!(section.points[0], Point::Plain("Opening remarks".to_string()));
        assert_eq!(
            section.points[1],
            Point::Structured {
                text: "Q3 milestones".to_string(),
                subpoints: vec!["API freeze".to_string(), "Beta cut".to_string()],
            }
        );
    }

    #[test]
    fn test_section_title_alias_and_positional_default() {
        let record = MoMRecord::from_value(&json!({
            "discussions": [
                {"title": "Budget review", "points": []},
                {"points": ["untitled section point"]}
            ]
        }));

        assert_eq!(record.discussions[0].section_title, "Budget review");
        assert_eq!(record.discussions[1].section_title, "Section 2");
    }

    #[test]
    fn test_actions_accept_both_shapes_and_alias_key() {
        let record = MoMRecord::from_value(&json!({
            "action_items": [
                "Write report",
                {"item": "Book room", "owner": "Bob", "status": "Pending", "notes": ""}
            ]
        }));

        assert_eq!(record.actions.len(), 2);
        assert_eq!(record.actions[0], ActionEntry::Plain("Write report".to_string()));
        assert_eq!(
            record.actions[1],
            ActionEntry::Structured(ActionItem {
                item: "Book room".to_string(),
                owner: "Bob".to_string(),
                status: "Pending".to_string(),
                notes: String::new(),
            })
        );
    }

    #[test]
    fn test_edit_round_trip_is_lossless() {
        let record = MoMRecord::from_value(&json!({
            "title": "Weekly Sync",
            "date": "2025-06-02",
            "time": "10:00",
            "attendees": ["Alice", "Bob"],
            "agenda": ["Status", "Planning"],
            "discussions": [{
                "section_title": "Status",
                "points": ["On track", {"text": "Risks", "subpoints": ["Vendor delay"]}]
            }],
            "decisions": ["Ship Friday"],
            "actions": [{"item": "Write report", "owner": "Bob", "status": "Pending", "notes": ""}],
            "next_steps": ["Schedule retro"],
            "conclusion": "Wrapped on time.",
            "summary": "Short and focused.",
            "prepared_by": "Carol",
            "preparation_date": "2025-06-02"
        }));

        let json = record.to_json_pretty();
        let reparsed = MoMRecord::from_value(&serde_json::from_str(&json).unwrap());
        assert_eq!(record, reparsed);
    }
}
