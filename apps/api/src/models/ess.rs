use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_ESS_STATUS: &str = "open";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EssRequestRow {
    pub id: Uuid,
    pub employee_id: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub status: String,
    pub payload: Option<Value>,
    pub attachments: Option<Json<Vec<String>>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEssRequest {
    pub employee_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: Option<String>,
    pub payload: Option<Value>,
    pub attachments: Option<Vec<String>>,
}

impl NewEssRequest {
    /// `employee_id` is resolved by the caller, since the body may omit it.
    pub fn into_row(self, id: Uuid, now: DateTime<Utc>, employee_id: String) -> EssRequestRow {
        EssRequestRow {
            id,
            employee_id,
            kind: self.kind,
            status: self.status.unwrap_or_else(|| DEFAULT_ESS_STATUS.to_string()),
            payload: self.payload,
            attachments: self.attachments.map(Json),
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EssRequestPatch {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub payload: Option<Value>,
    pub attachments: Option<Vec<String>>,
}

impl EssRequestPatch {
    pub fn apply_to(self, row: &mut EssRequestRow) {
        if let Some(v) = self.kind {
            row.kind = v;
        }
        if let Some(v) = self.status {
            row.status = v;
        }
        if let Some(v) = self.payload {
            row.payload = Some(v);
        }
        if let Some(v) = self.attachments {
            row.attachments = Some(Json(v));
        }
    }
}
