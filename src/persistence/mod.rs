//! Remote relational meeting store.
//!
//! Talks to a PostgREST-style API (Supabase or compatible): rows are posted
//! as JSON to `/rest/v1/<table>` with the project key in both the `apikey`
//! and `Authorization` headers. Three tables: `meetings`, `meeting_minutes`
//! and `meeting_attendees`. The key comes from the `PERSISTENCE_API_KEY`
//! environment variable.

use crate::config::PersistenceSettings;
use crate::error::{ReferatError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// A meeting row. `meeting_code` is the stable external identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingRow {
    pub meeting_code: String,
    pub title: String,
    pub scheduled_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Assigned by the store; never sent on insert.
    #[serde(skip_serializing, default)]
    pub id: Option<i64>,
}

/// Minutes attached to a meeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinutesRow {
    pub meeting_code: String,
    pub mom_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript_text: Option<String>,
}

/// One attendee of a meeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendeeRow {
    pub meeting_code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Generate a fresh meeting code.
pub fn new_meeting_code() -> String {
    format!("MOM-{}", Uuid::new_v4())
}

/// REST client for the meeting store.
pub struct MeetingStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MeetingStore {
    /// Build a store client from settings plus `PERSISTENCE_API_KEY`.
    pub fn new(settings: &PersistenceSettings) -> Result<Self> {
        if settings.base_url.is_empty() {
            return Err(ReferatError::Config(
                "persistence.base_url is not configured".to_string(),
            ));
        }
        let api_key = std::env::var("PERSISTENCE_API_KEY").map_err(|_| {
            ReferatError::Config("PERSISTENCE_API_KEY environment variable not set".to_string())
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn insert<T: Serialize>(&self, table: &str, row: &T) -> Result<()> {
        debug!(table, "inserting row");
        let response = self
            .client
            .post(self.table_url(table))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ReferatError::Persistence(format!(
                "insert into {} failed with {}: {}",
                table, status, body
            )));
        }
        Ok(())
    }

    /// Record a meeting. Returns the row as stored.
    pub async fn insert_meeting(&self, row: &MeetingRow) -> Result<()> {
        self.insert("meetings", row).await?;
        info!(meeting_code = %row.meeting_code, "meeting persisted");
        Ok(())
    }

    /// Attach minutes text to a meeting.
    pub async fn insert_minutes(&self, row: &MinutesRow) -> Result<()> {
        self.insert("meeting_minutes", row).await
    }

    /// Record one attendee of a meeting.
    pub async fn insert_attendee(&self, row: &AttendeeRow) -> Result<()> {
        self.insert("meeting_attendees", row).await
    }

    /// List stored meetings, newest first.
    pub async fn list_meetings(&self) -> Result<Vec<MeetingRow>> {
        let response = self
            .client
            .get(self.table_url("meetings"))
            .query(&[("select", "*"), ("order", "scheduled_at.desc")])
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReferatError::Persistence(format!(
                "listing meetings failed with {}",
                response.status()
            )));
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meeting_codes_are_unique_and_prefixed() {
        let a = new_meeting_code();
        let b = new_meeting_code();
        assert!(a.starts_with("MOM-"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_attendee_row_serializes_with_email() {
        let row = AttendeeRow {
            meeting_code: "MOM-test".to_string(),
            name: "bob".to_string(),
            email: Some("bob@example.com".to_string()),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["email"], "bob@example.com");
        assert_eq!(json["name"], "bob");
    }

    #[test]
    fn test_meeting_row_serializes_without_id() {
        let row = MeetingRow {
            meeting_code: "MOM-test".to_string(),
            title: "Weekly Sync".to_string(),
            scheduled_at: Utc::now(),
            description: None,
            id: None,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("description").is_none());
        assert_eq!(json["meeting_code"], "MOM-test");
    }
}
