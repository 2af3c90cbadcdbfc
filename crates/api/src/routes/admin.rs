//! Route definitions for the `/admins` resource (approval queue).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admins`. All require the super-admin role.
///
/// ```text
/// GET  /pending             -> list_pending
/// POST /{id}/approve        -> approve_admin
/// POST /{id}/reject         -> reject_admin
/// POST /bulk-approve        -> bulk_approve
/// POST /bulk-reject         -> bulk_reject
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pending", get(admin::list_pending))
        .route("/{id}/approve", post(admin::approve_admin))
        .route("/{id}/reject", post(admin::reject_admin))
        .route("/bulk-approve", post(admin::bulk_approve))
        .route("/bulk-reject", post(admin::bulk_reject))
}
