//! Handlers for the `/admins` resource (account approval queue).
//!
//! Every endpoint here requires the super-admin role: regular admins can
//! never act on other admin accounts.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use skillgate_core::error::CoreError;
use skillgate_core::types::DbId;
use skillgate_db::models::user::{User, UserResponse};
use skillgate_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireSuperAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Fallback reason included in rejection emails when the super-admin gives
/// none.
const DEFAULT_REJECT_REASON: &str = "Your application did not meet our requirements";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admins/{id}/reject` (reason is optional).
#[derive(Debug, Default, Deserialize)]
pub struct RejectRequest {
    pub reason: Option<String>,
}

/// Request body for the bulk approve/reject endpoints.
#[derive(Debug, Deserialize)]
pub struct BulkRequest {
    pub ids: Vec<DbId>,
    pub reason: Option<String>,
}

/// Response body for the bulk endpoints: which accounts were acted on.
#[derive(Debug, Serialize)]
pub struct BulkResponse {
    pub processed: Vec<DbId>,
    /// Requested ids that were not pending admin accounts.
    pub skipped: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Send the approval email in the background. Delivery failure is logged,
/// never surfaced to the caller.
fn notify_approved(state: &AppState, user: &User) {
    if let Some(mailer) = state.mailer.clone() {
        let email = user.email.clone();
        let name = user.name.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send_admin_approved(&email, &name).await {
                tracing::error!(email = %email, error = %e, "Failed to send approval email");
            }
        });
    }
}

/// Send the rejection email in the background.
fn notify_rejected(state: &AppState, user: &User, reason: &str) {
    if let Some(mailer) = state.mailer.clone() {
        let email = user.email.clone();
        let name = user.name.clone();
        let reason = reason.to_string();
        tokio::spawn(async move {
            if let Err(e) = mailer.send_admin_rejected(&email, &name, &reason).await {
                tracing::error!(email = %email, error = %e, "Failed to send rejection email");
            }
        });
    }
}

/// Fetch a user and confirm it is an approvable pending admin account.
async fn find_pending(state: &AppState, id: DbId) -> AppResult<User> {
    let user =
        UserRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "User",
                id,
            }))?;

    if user.role == skillgate_core::roles::ROLE_SUPER_ADMIN {
        return Err(AppError::BadRequest(
            "Super admin accounts are not subject to approval".into(),
        ));
    }
    if user.approved {
        return Err(AppError::BadRequest("Account is already approved".into()));
    }
    Ok(user)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/admins/pending
///
/// List admin accounts awaiting approval, newest first.
pub async fn list_pending(
    RequireSuperAdmin(_user): RequireSuperAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list_pending(&state.pool).await?;
    Ok(Json(DataResponse {
        data: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// POST /api/admins/{id}/approve
pub async fn approve_admin(
    RequireSuperAdmin(actor): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    find_pending(&state, id).await?;

    let user = UserRepo::approve(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id,
        }))?;

    tracing::info!(user_id = id, approved_by = actor.user_id, "Admin account approved");
    notify_approved(&state, &user);

    Ok(Json(DataResponse { data: user.into() }))
}

/// POST /api/admins/{id}/reject
///
/// Reject a pending admin account: send the rejection notice and delete the
/// account. Rejection is final, a rejected applicant must re-register.
pub async fn reject_admin(
    RequireSuperAdmin(actor): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    input: Option<Json<RejectRequest>>,
) -> AppResult<StatusCode> {
    let user = find_pending(&state, id).await?;

    let reason = input
        .and_then(|Json(r)| r.reason)
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_REJECT_REASON.to_string());

    notify_rejected(&state, &user, &reason);
    UserRepo::delete(&state.pool, id).await?;

    tracing::info!(user_id = id, rejected_by = actor.user_id, "Admin account rejected");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admins/bulk-approve
///
/// Approve every pending account in `ids`. Ids that are not pending admin
/// accounts are reported back as skipped rather than failing the batch.
pub async fn bulk_approve(
    RequireSuperAdmin(actor): RequireSuperAdmin,
    State(state): State<AppState>,
    Json(input): Json<BulkRequest>,
) -> AppResult<Json<DataResponse<BulkResponse>>> {
    if input.ids.is_empty() {
        return Err(AppError::BadRequest("ids must not be empty".into()));
    }

    let pending = UserRepo::find_pending_by_ids(&state.pool, &input.ids).await?;
    let mut processed = Vec::with_capacity(pending.len());

    for user in &pending {
        if let Some(approved) = UserRepo::approve(&state.pool, user.id).await? {
            notify_approved(&state, &approved);
            processed.push(user.id);
        }
    }

    let skipped = input
        .ids
        .iter()
        .copied()
        .filter(|id| !processed.contains(id))
        .collect();

    tracing::info!(
        count = processed.len(),
        approved_by = actor.user_id,
        "Bulk admin approval"
    );

    Ok(Json(DataResponse {
        data: BulkResponse { processed, skipped },
    }))
}

/// POST /api/admins/bulk-reject
pub async fn bulk_reject(
    RequireSuperAdmin(actor): RequireSuperAdmin,
    State(state): State<AppState>,
    Json(input): Json<BulkRequest>,
) -> AppResult<Json<DataResponse<BulkResponse>>> {
    if input.ids.is_empty() {
        return Err(AppError::BadRequest("ids must not be empty".into()));
    }

    let reason = input
        .reason
        .clone()
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_REJECT_REASON.to_string());

    let pending = UserRepo::find_pending_by_ids(&state.pool, &input.ids).await?;
    let mut processed = Vec::with_capacity(pending.len());

    for user in &pending {
        notify_rejected(&state, user, &reason);
        if UserRepo::delete(&state.pool, user.id).await? {
            processed.push(user.id);
        }
    }

    let skipped = input
        .ids
        .iter()
        .copied()
        .filter(|id| !processed.contains(id))
        .collect();

    tracing::info!(
        count = processed.len(),
        rejected_by = actor.user_id,
        "Bulk admin rejection"
    );

    Ok(Json(DataResponse {
        data: BulkResponse { processed, skipped },
    }))
}
