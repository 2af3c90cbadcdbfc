//! Skill tier enum and its static metadata table.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordinal skill classification, 0 (beginner) through 5 (expert).
///
/// Tier 5 is reserved for manual elevation: it has metadata but no
/// classification rule ever produces it. Serializes as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkillTier {
    Tier0,
    Tier1,
    Tier2,
    Tier3,
    Tier4,
    Tier5,
}

/// Human-readable metadata for one tier, from the static table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierInfo {
    pub tier: SkillTier,
    pub name: &'static str,
    pub description: &'static str,
}

impl SkillTier {
    /// All six tiers in ascending order.
    pub const ALL: [SkillTier; 6] = [
        Self::Tier0,
        Self::Tier1,
        Self::Tier2,
        Self::Tier3,
        Self::Tier4,
        Self::Tier5,
    ];

    /// The tier as its wire/storage integer (0..=5).
    pub fn as_i16(self) -> i16 {
        match self {
            Self::Tier0 => 0,
            Self::Tier1 => 1,
            Self::Tier2 => 2,
            Self::Tier3 => 3,
            Self::Tier4 => 4,
            Self::Tier5 => 5,
        }
    }

    /// Convert a storage integer back into a tier.
    ///
    /// Out-of-range values are a caller error (the engine only ever produces
    /// 0..=4, and the database column is constrained to 0..=5).
    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            0 => Some(Self::Tier0),
            1 => Some(Self::Tier1),
            2 => Some(Self::Tier2),
            3 => Some(Self::Tier3),
            4 => Some(Self::Tier4),
            5 => Some(Self::Tier5),
            _ => None,
        }
    }

    /// Tier display name from the static table.
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Full metadata entry for this tier. Total over all six tiers.
    pub fn info(self) -> TierInfo {
        let (name, description) = match self {
            Self::Tier0 => (
                "Beginner",
                "A complete beginner. Has done HTML, CSS, and basic JavaScript. Knows the \
                 basics of Next.js or React but is not capable of building a CRUD app with \
                 a database.",
            ),
            Self::Tier1 => (
                "CRUD Developer",
                "I know some Next.js/React. I can build a CRUD application with a database \
                 using server actions or API routes, but I cannot add advanced \
                 authentication (e.g., password and Google Sign-In).",
            ),
            Self::Tier2 => (
                "Full-Stack Next.js Developer",
                "I know Next.js/React. I can build an authenticated (password + Google) \
                 CRUD App, deploy it, but I don't have knowledge of Express/Hono or other \
                 backend frameworks to build an authenticated CRUD API.",
            ),
            Self::Tier3 => (
                "Multi-Framework Developer",
                "I know Next.js/React, and can build an authenticated CRUD app. I know \
                 Express/Hono and can build an authenticated CRUD API with API \
                 documentation, but I do not know Golang.",
            ),
            Self::Tier4 => (
                "Advanced Full-Stack Developer",
                "I know Next.js/React, Express/Hono, and I know Golang. I can build a \
                 simple API with Go and integrate it with a frontend.",
            ),
            Self::Tier5 => (
                "Expert Full-Stack Developer",
                "Advanced proficiency in all areas with expert-level skills in multiple \
                 frameworks and languages. Demonstrated excellence in Next.js, Express, \
                 Golang, and full-stack development.",
            ),
        };
        TierInfo {
            tier: self,
            name,
            description,
        }
    }
}

impl Serialize for SkillTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i16(self.as_i16())
    }
}

impl<'de> Deserialize<'de> for SkillTier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i16::deserialize(deserializer)?;
        SkillTier::from_i16(value)
            .ok_or_else(|| D::Error::custom(format!("invalid skill tier {value}, expected 0..=5")))
    }
}
