use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_POLICY_STATUS: &str = "draft";
pub const STATUS_PUBLISHED: &str = "published";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRow {
    pub id: Uuid,
    pub title: String,
    pub version: Option<String>,
    pub category: Option<String>,
    pub status: String,
    pub owner: Option<String>,
    pub effective_date: Option<NaiveDate>,
    pub file_url: Option<String>,
    pub summary: Option<String>,
    pub tags: Option<Json<Vec<String>>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPolicy {
    pub title: String,
    pub version: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub owner: Option<String>,
    pub effective_date: Option<NaiveDate>,
    pub file_url: Option<String>,
    pub summary: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl NewPolicy {
    pub fn into_row(self, id: Uuid, now: DateTime<Utc>) -> PolicyRow {
        PolicyRow {
            id,
            title: self.title,
            version: self.version,
            category: self.category,
            status: self
                .status
                .unwrap_or_else(|| DEFAULT_POLICY_STATUS.to_string()),
            owner: self.owner,
            effective_date: self.effective_date,
            file_url: self.file_url,
            summary: self.summary,
            tags: self.tags.map(Json),
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyPatch {
    pub title: Option<String>,
    pub version: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub owner: Option<String>,
    pub effective_date: Option<NaiveDate>,
    pub file_url: Option<String>,
    pub summary: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PolicyPatch {
    pub fn apply_to(self, row: &mut PolicyRow) {
        if let Some(v) = self.title {
            row.title = v;
        }
        if let Some(v) = self.version {
            row.version = Some(v);
        }
        if let Some(v) = self.category {
            row.category = Some(v);
        }
        if let Some(v) = self.status {
            row.status = v;
        }
        if let Some(v) = self.owner {
            row.owner = Some(v);
        }
        if let Some(v) = self.effective_date {
            row.effective_date = Some(v);
        }
        if let Some(v) = self.file_url {
            row.file_url = Some(v);
        }
        if let Some(v) = self.summary {
            row.summary = Some(v);
        }
        if let Some(v) = self.tags {
            row.tags = Some(Json(v));
        }
    }
}

/// One acknowledgment of a policy by an employee. Rows are not unique per
/// (policy, employee); repeated submissions produce repeated rows.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PolicyAckRow {
    pub id: Uuid,
    pub policy_id: Option<Uuid>,
    pub employee_id: String,
    pub version: Option<String>,
    pub ack_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPolicyAck {
    pub policy_id: Option<Uuid>,
    pub employee_id: Option<String>,
    pub version: Option<String>,
}

impl NewPolicyAck {
    pub fn into_row(self, id: Uuid, now: DateTime<Utc>, employee_id: String) -> PolicyAckRow {
        PolicyAckRow {
            id,
            policy_id: self.policy_id,
            employee_id,
            version: self.version,
            ack_at: now,
        }
    }
}
