//! Skill assessment domain: answers, tiers, and the classification engine.
//!
//! - [`answers`] -- the 13-field answer record and the ordinal experience scale.
//! - [`tier`] -- the 0..=5 skill tier enum and its static metadata table.
//! - [`classify`] -- the priority-ordered rule evaluator (the actual engine).
//! - [`normalize`] -- converts the frontend's `{questionId, answer}` array
//!   form into a validated [`answers::AssessmentAnswers`].

pub mod answers;
pub mod classify;
pub mod normalize;
pub mod tier;

pub use answers::{AssessmentAnswers, ExperienceLevel};
pub use classify::classify;
pub use tier::{SkillTier, TierInfo};
