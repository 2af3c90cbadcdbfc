pub mod admin;
pub mod auth;
pub mod candidate;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                         admin registration (public, unapproved)
/// /auth/login                            login (public)
/// /auth/me                               current user (requires auth)
/// /auth/logout                           logout (requires auth)
///
/// /candidates/register                   questionnaire submission (public)
/// /candidates                            list with filters (admin)
/// /candidates/stats                      dashboard aggregates (admin)
/// /candidates/export                     CSV download (admin)
/// /candidates/{id}                       get, update, delete (admin)
/// /candidates/{id}/resend-email          re-send tier result (admin)
///
/// /admins/pending                        approval queue (super admin)
/// /admins/{id}/approve                   approve account (super admin)
/// /admins/{id}/reject                    reject and delete account (super admin)
/// /admins/bulk-approve                   approve many (super admin)
/// /admins/bulk-reject                    reject many (super admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/candidates", candidate::router())
        .nest("/admins", admin::router())
}
