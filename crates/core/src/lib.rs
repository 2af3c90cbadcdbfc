//! Domain logic for the candidate skill-assessment platform.
//!
//! The `core` crate contains no database or HTTP dependencies. The one piece
//! of real decision logic lives in [`assessment`]: the tier classification
//! engine that maps a candidate's self-reported answers to a skill tier.

pub mod assessment;
pub mod error;
pub mod roles;
pub mod types;
