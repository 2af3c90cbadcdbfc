//! Route definitions for the `/candidates` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::candidate;
use crate::state::AppState;

/// Routes mounted at `/candidates`.
///
/// The static paths (`/stats`, `/export`) are registered alongside `/{id}`;
/// Axum gives static segments priority over the capture.
///
/// ```text
/// POST   /register           -> register_candidate (public)
/// GET    /                   -> list_candidates (admin)
/// GET    /stats              -> candidate_stats (admin)
/// GET    /export             -> export_candidates (admin)
/// GET    /{id}               -> get_candidate (admin)
/// PATCH  /{id}               -> update_candidate (admin)
/// DELETE /{id}               -> delete_candidate (admin)
/// POST   /{id}/resend-email  -> resend_notification (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(candidate::register_candidate))
        .route("/", get(candidate::list_candidates))
        .route("/stats", get(candidate::candidate_stats))
        .route("/export", get(candidate::export_candidates))
        .route(
            "/{id}",
            get(candidate::get_candidate)
                .patch(candidate::update_candidate)
                .delete(candidate::delete_candidate),
        )
        .route("/{id}/resend-email", post(candidate::resend_notification))
}
