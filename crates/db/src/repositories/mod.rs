//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod candidate_repo;
pub mod user_repo;

pub use candidate_repo::CandidateRepo;
pub use user_repo::UserRepo;
