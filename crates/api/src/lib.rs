//! HTTP API for the candidate skill-assessment platform.
//!
//! Exposes the public questionnaire registration endpoint and the admin
//! dashboard API (candidate review, statistics, CSV export, admin-account
//! approval). Domain logic lives in `skillgate_core`; persistence in
//! `skillgate_db`.

pub mod auth;
pub mod config;
pub mod email;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod routes;
pub mod state;
