use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRow {
    pub id: Uuid,
    pub title: String,
    pub category: Option<String>,
    pub file_url: Option<String>,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    pub title: String,
    pub category: Option<String>,
    pub file_url: Option<String>,
    pub description: Option<String>,
}

impl NewTemplate {
    pub fn into_row(self, id: Uuid, now: DateTime<Utc>) -> TemplateRow {
        TemplateRow {
            id,
            title: self.title,
            category: self.category,
            file_url: self.file_url,
            description: self.description,
            updated_at: now,
        }
    }
}
