//! Candidate entity model, DTOs, and query filter types.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use skillgate_core::assessment::AssessmentAnswers;
use skillgate_core::types::{DbId, Timestamp};

/// Full candidate row from the `candidates` table.
///
/// `assigned_tier` and `tier_assigned_at` are written exactly once at
/// creation; the classification engine is never re-invoked for an existing
/// row. The raw `assigned_tier` integer is converted to a typed
/// `SkillTier` at the API boundary.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Candidate {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country: Option<String>,
    pub answers: Json<AssessmentAnswers>,
    pub assigned_tier: i16,
    pub tier_assigned_at: Timestamp,
    pub notification_sent: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new candidate.
#[derive(Debug)]
pub struct CreateCandidate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country: Option<String>,
    pub answers: AssessmentAnswers,
    pub assigned_tier: i16,
}

/// DTO for updating personal info. All fields are optional; the answers
/// snapshot and assigned tier are deliberately not updatable.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCandidate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
}

/// Filter parameters shared by list, count, and export queries.
#[derive(Debug, Default, Clone)]
pub struct CandidateFilter {
    /// Restrict to these tiers (empty = all tiers).
    pub tiers: Vec<i16>,
    /// Case-insensitive substring match over name, email, and phone.
    pub search: Option<String>,
    /// Registered at or after this instant.
    pub start_date: Option<Timestamp>,
    /// Registered at or before this instant.
    pub end_date: Option<Timestamp>,
}

/// Sortable columns for candidate listing. The whitelist keeps user-supplied
/// sort keys out of the SQL string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSortBy {
    Name,
    Email,
    #[default]
    CreatedAt,
    AssignedTier,
}

impl CandidateSortBy {
    pub fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::CreatedAt => "created_at",
            Self::AssignedTier => "assigned_tier",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One row of the per-tier distribution aggregate.
#[derive(Debug, Clone, FromRow)]
pub struct TierCount {
    pub tier: i16,
    pub count: i64,
}

/// One row of the registrations-per-day aggregate. `day` is the UTC date
/// formatted as `YYYY-MM-DD`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyCount {
    pub day: String,
    pub count: i64,
}
