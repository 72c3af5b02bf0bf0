use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef};
use sqlx::{Decode, Encode, Postgres, Type};
use thiserror::Error;

use crate::models::recruitment::CandidateRow;

/// The fixed, ordered set of stages a candidate can occupy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    #[default]
    Applied,
    Screen,
    Interview,
    Offer,
    Onboarding,
    Hired,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pipeline stage '{0}'")]
pub struct UnknownStage(pub String);

impl PipelineStage {
    /// Board order, left to right.
    pub const ALL: [PipelineStage; 7] = [
        PipelineStage::Applied,
        PipelineStage::Screen,
        PipelineStage::Interview,
        PipelineStage::Offer,
        PipelineStage::Onboarding,
        PipelineStage::Hired,
        PipelineStage::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Applied => "applied",
            PipelineStage::Screen => "screen",
            PipelineStage::Interview => "interview",
            PipelineStage::Offer => "offer",
            PipelineStage::Onboarding => "onboarding",
            PipelineStage::Hired => "hired",
            PipelineStage::Rejected => "rejected",
        }
    }

    /// Hired and rejected candidates have left the pipeline.
    pub fn is_active(&self) -> bool {
        !matches!(self, PipelineStage::Hired | PipelineStage::Rejected)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PipelineStage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PipelineStage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| UnknownStage(s.to_string()))
    }
}

// Stored as plain text in `candidates.current_stage`.
impl Type<Postgres> for PipelineStage {
    fn type_info() -> PgTypeInfo {
        <&str as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <&str as Type<Postgres>>::compatible(ty)
    }
}

impl<'q> Encode<'q, Postgres> for PipelineStage {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> IsNull {
        <&str as Encode<'q, Postgres>>::encode(self.as_str(), buf)
    }
}

impl<'r> Decode<'r, Postgres> for PipelineStage {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let raw = <&str as Decode<'r, Postgres>>::decode(value)?;
        Ok(raw.parse()?)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineColumn {
    pub stage: PipelineStage,
    pub count: usize,
    pub candidates: Vec<CandidateRow>,
}

/// Groups candidates into one column per stage, in board order. Candidates
/// keep their relative order within a column.
pub fn build_board(candidates: Vec<CandidateRow>) -> Vec<PipelineColumn> {
    let mut columns: Vec<PipelineColumn> = PipelineStage::ALL
        .into_iter()
        .map(|stage| PipelineColumn {
            stage,
            count: 0,
            candidates: Vec::new(),
        })
        .collect();

    for candidate in candidates {
        if let Some(column) = columns
            .iter_mut()
            .find(|c| c.stage == candidate.current_stage)
        {
            column.candidates.push(candidate);
        }
    }
    for column in &mut columns {
        column.count = column.candidates.len();
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn candidate(name: &str, stage: PipelineStage) -> CandidateRow {
        CandidateRow {
            id: Uuid::new_v4(),
            rr_id: None,
            name: name.to_string(),
            email: format!("{name}@example.com"),
            phone: None,
            resume_url: None,
            source: None,
            current_stage: stage,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_every_stage_parses_from_its_wire_name() {
        for stage in PipelineStage::ALL {
            assert_eq!(stage.as_str().parse::<PipelineStage>(), Ok(stage));
        }
    }

    #[test]
    fn test_unknown_stage_is_rejected() {
        let err = "withdrawn".parse::<PipelineStage>().unwrap_err();
        assert_eq!(err, UnknownStage("withdrawn".to_string()));
        assert!("Applied".parse::<PipelineStage>().is_err(), "case sensitive");
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&PipelineStage::Onboarding).unwrap();
        assert_eq!(json, "\"onboarding\"");
    }

    #[test]
    fn test_terminal_stages_are_inactive() {
        assert!(PipelineStage::Offer.is_active());
        assert!(!PipelineStage::Hired.is_active());
        assert!(!PipelineStage::Rejected.is_active());
    }

    #[test]
    fn test_board_has_every_column_in_order() {
        let board = build_board(vec![]);
        let stages: Vec<_> = board.iter().map(|c| c.stage).collect();
        assert_eq!(stages, PipelineStage::ALL.to_vec());
        assert!(board.iter().all(|c| c.count == 0));
    }

    #[test]
    fn test_board_groups_candidates_and_keeps_order() {
        let board = build_board(vec![
            candidate("ana", PipelineStage::Screen),
            candidate("ben", PipelineStage::Applied),
            candidate("cy", PipelineStage::Screen),
        ]);
        let screen = &board[1];
        assert_eq!(screen.stage, PipelineStage::Screen);
        assert_eq!(screen.count, 2);
        assert_eq!(screen.candidates[0].name, "ana");
        assert_eq!(screen.candidates[1].name, "cy");
        assert_eq!(board[0].count, 1);
    }
}
