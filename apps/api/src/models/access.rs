use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_PASS_STATUS: &str = "active";
pub const DEFAULT_PASS_MAX_USES: i32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PassRow {
    pub id: Uuid,
    pub user_id: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub scope: Option<Json<Vec<String>>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_uses: i32,
    pub used_count: i32,
    pub status: String,
    pub meta: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/passes`. `usedCount` is server-controlled and not
/// accepted from clients.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPass {
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub scope: Option<Vec<String>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_uses: Option<i32>,
    pub status: Option<String>,
    pub meta: Option<Value>,
}

impl NewPass {
    pub fn into_row(self, id: Uuid, now: DateTime<Utc>) -> PassRow {
        PassRow {
            id,
            user_id: self.user_id,
            kind: self.kind,
            scope: self.scope.map(Json),
            expires_at: self.expires_at,
            max_uses: self.max_uses.unwrap_or(DEFAULT_PASS_MAX_USES),
            used_count: 0,
            status: self.status.unwrap_or_else(|| DEFAULT_PASS_STATUS.to_string()),
            meta: self.meta,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogRow {
    pub id: Uuid,
    pub actor: Option<String>,
    pub action: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAuditLog {
    pub actor: Option<String>,
    pub action: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub metadata: Option<Value>,
}

impl NewAuditLog {
    pub fn into_row(self, id: Uuid, now: DateTime<Utc>) -> AuditLogRow {
        AuditLogRow {
            id,
            actor: self.actor,
            action: self.action,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
            metadata: self.metadata,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogFilter {
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
}

impl AuditLogFilter {
    pub fn matches(&self, row: &AuditLogRow) -> bool {
        let type_ok = match &self.entity_type {
            Some(t) => row.entity_type.as_deref() == Some(t.as_str()),
            None => true,
        };
        let id_ok = match &self.entity_id {
            Some(id) => row.entity_id.as_deref() == Some(id.as_str()),
            None => true,
        };
        type_ok && id_ok
    }
}
