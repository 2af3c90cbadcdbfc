//! Assessment answer types: the ordinal experience scale and the answer record.

use serde::{Deserialize, Serialize};

/// Self-reported proficiency on a fixed ordinal scale.
///
/// The derived `Ord` follows declaration order: `None < Basic < Intermediate
/// < Advanced`. All tier predicates compare levels through [`Self::meets`];
/// the only equality checks anywhere in the rules are against `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    None,
    Basic,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    /// Numeric rank on the ordinal scale (`none` = 0 .. `advanced` = 3).
    pub fn rank(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Basic => 1,
            Self::Intermediate => 2,
            Self::Advanced => 3,
        }
    }

    /// True iff `self` is at or above `required` on the ordinal scale.
    pub fn meets(self, required: Self) -> bool {
        self.rank() >= required.rank()
    }

    /// Parse one of the four wire strings (`"none"`, `"basic"`,
    /// `"intermediate"`, `"advanced"`). Case-sensitive.
    pub fn from_str_value(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "basic" => Some(Self::Basic),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

/// A candidate's complete assessment answer set.
///
/// All 13 fields are required; completeness is enforced by deserialization
/// (there is no partially-answered state). Field names are camelCase on the
/// wire to match the questionnaire frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentAnswers {
    pub html_css_js_knowledge: ExperienceLevel,
    pub react_next_js_knowledge: ExperienceLevel,
    pub can_build_crud_app: bool,
    pub can_implement_auth: bool,
    pub can_implement_google_auth: bool,
    pub database_knowledge: ExperienceLevel,
    pub express_hono_knowledge: ExperienceLevel,
    pub can_build_authenticated_api: bool,
    pub can_document_api: bool,
    pub laravel_knowledge: ExperienceLevel,
    pub golang_knowledge: ExperienceLevel,
    pub can_build_go_api: bool,
    pub can_deploy_apps: bool,
}
