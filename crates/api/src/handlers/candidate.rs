//! Handlers for the `/candidates` resource.
//!
//! The registration endpoint is public (the questionnaire frontend calls it
//! without credentials); everything else requires an admin account.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use skillgate_core::assessment::normalize::{normalize, RawAnswers};
use skillgate_core::assessment::{classify, ExperienceLevel, SkillTier, TierInfo};
use skillgate_core::error::CoreError;
use skillgate_core::types::DbId;
use skillgate_db::models::candidate::{
    Candidate, CandidateFilter, CandidateSortBy, CreateCandidate, DailyCount, SortOrder,
    UpdateCandidate,
};
use skillgate_db::repositories::CandidateRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::{DataResponse, PageResponse, Pagination};
use crate::state::AppState;

/// Window for the "recent registrations" stat, in days.
const RECENT_WINDOW_DAYS: i64 = 30;

/// Window for the registrations-per-day chart, in days.
const DAILY_CHART_DAYS: i64 = 7;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /candidates/register`.
///
/// `answers` accepts either the canonical 13-field object or the frontend's
/// `[{questionId, answer}]` array; normalization handles both.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCandidateRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 5, max = 30, message = "Phone must be 5-30 characters"))]
    pub phone: String,
    pub country: Option<String>,
    pub answers: RawAnswers,
}

/// Candidate row plus the resolved tier metadata.
#[derive(Debug, Serialize)]
pub struct CandidateView {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub tier_info: TierInfo,
}

/// Query parameters for `GET /candidates`.
#[derive(Debug, Deserialize)]
pub struct ListCandidatesParams {
    // Flattening PaginationParams breaks under serde_urlencoded, so the
    // fields are repeated here.
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Comma-separated tier numbers, e.g. `?tiers=1,2`.
    pub tiers: Option<String>,
    /// Case-insensitive substring over name, email, and phone.
    pub search: Option<String>,
    /// RFC 3339 lower bound on registration time.
    pub start_date: Option<chrono::DateTime<Utc>>,
    /// RFC 3339 upper bound on registration time.
    pub end_date: Option<chrono::DateTime<Utc>>,
    pub sort_by: Option<CandidateSortBy>,
    pub sort_order: Option<SortOrder>,
}

/// One tier's slice of the distribution stat. Every tier appears, even
/// with a zero count.
#[derive(Debug, Serialize)]
pub struct TierStat {
    pub tier: i16,
    pub name: &'static str,
    pub count: i64,
    pub percentage: f64,
}

/// Response body for `GET /candidates/stats`.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_candidates: i64,
    /// Registrations in the last 30 days.
    pub recent_candidates: i64,
    pub tier_distribution: Vec<TierStat>,
    /// Registrations per UTC day over the last 7 days.
    pub registrations_per_day: Vec<DailyCount>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve a stored tier integer into a typed view. The database constrains
/// the column to 0..=5 so a miss here indicates corruption.
fn to_view(candidate: Candidate) -> AppResult<CandidateView> {
    let tier = SkillTier::from_i16(candidate.assigned_tier).ok_or_else(|| {
        AppError::InternalError(format!(
            "Candidate {} has out-of-range tier {}",
            candidate.id, candidate.assigned_tier
        ))
    })?;
    Ok(CandidateView {
        tier_info: tier.info(),
        candidate,
    })
}

/// Parse the comma-separated `tiers` query parameter into validated numbers.
fn parse_tiers(raw: &str) -> AppResult<Vec<i16>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i16>()
                .ok()
                .filter(|t| (0..=5).contains(t))
                .ok_or_else(|| AppError::BadRequest(format!("Invalid tier value: {s}")))
        })
        .collect()
}

fn build_filter(params: &ListCandidatesParams) -> AppResult<CandidateFilter> {
    Ok(CandidateFilter {
        tiers: match &params.tiers {
            Some(raw) => parse_tiers(raw)?,
            None => Vec::new(),
        },
        search: params.search.clone().filter(|s| !s.trim().is_empty()),
        start_date: params.start_date,
        end_date: params.end_date,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/candidates/register
///
/// Public questionnaire submission. Normalizes the answers, runs the
/// classification engine once, persists the result, and fires the tier
/// notification email in the background.
pub async fn register_candidate(
    State(state): State<AppState>,
    Json(input): Json<RegisterCandidateRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CandidateView>>)> {
    input.validate()?;

    let normalized = normalize(input.answers)?;
    for warning in &normalized.warnings {
        tracing::warn!(email = %input.email, "Ignoring unknown answer field: {warning}");
    }

    let email = input.email.trim().to_lowercase();

    if CandidateRepo::find_by_email(&state.pool, &email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A candidate with this email has already registered".into(),
        )));
    }

    let tier = classify(&normalized.answers);

    let candidate = CandidateRepo::create(
        &state.pool,
        &CreateCandidate {
            name: input.name.trim().to_string(),
            email,
            phone: input.phone.trim().to_string(),
            country: input.country.map(|c| c.trim().to_string()),
            answers: normalized.answers,
            assigned_tier: tier.as_i16(),
        },
    )
    .await?;

    tracing::info!(
        candidate_id = candidate.id,
        tier = tier.as_i16(),
        "Candidate registered and classified"
    );

    // Notification failure never fails the registration.
    if let Some(mailer) = state.mailer.clone() {
        let pool = state.pool.clone();
        let to_email = candidate.email.clone();
        let name = candidate.name.clone();
        let candidate_id = candidate.id;
        tokio::spawn(async move {
            match mailer.send_tier_result(&to_email, &name, tier).await {
                Ok(()) => {
                    if let Err(e) = CandidateRepo::mark_notified(&pool, candidate_id).await {
                        tracing::error!(candidate_id, error = %e, "Failed to record notification");
                    }
                }
                Err(e) => {
                    tracing::error!(candidate_id, error = %e, "Failed to send tier result email");
                }
            }
        });
    } else {
        tracing::debug!(
            candidate_id = candidate.id,
            "SMTP not configured, skipping tier result email"
        );
    }

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: to_view(candidate)?,
        }),
    ))
}

/// GET /api/candidates
///
/// Filtered, sorted, paginated candidate listing for the dashboard.
pub async fn list_candidates(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListCandidatesParams>,
) -> AppResult<Json<PageResponse<CandidateView>>> {
    let filter = build_filter(&params)?;
    let (page, limit, offset) = PaginationParams {
        page: params.page,
        limit: params.limit,
    }
    .resolve();
    let sort_by = params.sort_by.unwrap_or_default();
    let sort_order = params.sort_order.unwrap_or_default();

    let total = CandidateRepo::count(&state.pool, &filter).await?;
    let rows = CandidateRepo::list(&state.pool, &filter, sort_by, sort_order, limit, offset).await?;

    let data = rows.into_iter().map(to_view).collect::<AppResult<_>>()?;

    Ok(Json(PageResponse {
        data,
        pagination: Pagination::new(total, page, limit),
    }))
}

/// GET /api/candidates/stats
///
/// Dashboard aggregates: totals, tier distribution, and a 7-day
/// registrations chart.
pub async fn candidate_stats(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<StatsResponse>>> {
    let now = Utc::now();

    let total = CandidateRepo::count_all(&state.pool).await?;
    let recent =
        CandidateRepo::count_since(&state.pool, now - Duration::days(RECENT_WINDOW_DAYS)).await?;
    let counts = CandidateRepo::tier_distribution(&state.pool).await?;
    let per_day =
        CandidateRepo::registrations_per_day(&state.pool, now - Duration::days(DAILY_CHART_DAYS))
            .await?;

    // Every tier gets a row, zero-filled where no candidates landed.
    let tier_distribution = SkillTier::ALL
        .iter()
        .map(|&tier| {
            let count = counts
                .iter()
                .find(|c| c.tier == tier.as_i16())
                .map(|c| c.count)
                .unwrap_or(0);
            let percentage = if total > 0 {
                (count as f64 * 1000.0 / total as f64).round() / 10.0
            } else {
                0.0
            };
            TierStat {
                tier: tier.as_i16(),
                name: tier.name(),
                count,
                percentage,
            }
        })
        .collect();

    Ok(Json(DataResponse {
        data: StatsResponse {
            total_candidates: total,
            recent_candidates: recent,
            tier_distribution,
            registrations_per_day: per_day,
        },
    }))
}

/// GET /api/candidates/export
///
/// CSV download of all candidates matching the same filters as the listing
/// endpoint. Returns 404 when the filter matches nothing.
pub async fn export_candidates(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListCandidatesParams>,
) -> AppResult<Response> {
    let filter = build_filter(&params)?;
    let rows = CandidateRepo::export(&state.pool, &filter).await?;

    if rows.is_empty() {
        let body = json!({
            "error": "No candidates match the export filter",
            "code": "NOT_FOUND",
        });
        return Ok((StatusCode::NOT_FOUND, Json(body)).into_response());
    }

    let csv = render_csv(&rows)?;
    let filename = format!("candidates_export_{}.csv", Utc::now().format("%Y-%m-%d"));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response())
}

/// GET /api/candidates/{id}
pub async fn get_candidate(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CandidateView>>> {
    let candidate = CandidateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Candidate",
            id,
        }))?;

    Ok(Json(DataResponse {
        data: to_view(candidate)?,
    }))
}

/// PATCH /api/candidates/{id}
///
/// Update personal fields only. The answers snapshot and assigned tier are
/// immutable after registration.
pub async fn update_candidate(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCandidate>,
) -> AppResult<Json<DataResponse<CandidateView>>> {
    if let Some(name) = &input.name {
        if name.trim().len() < 2 {
            return Err(AppError::Core(CoreError::Validation(
                "Name must be at least 2 characters".into(),
            )));
        }
    }

    let candidate = CandidateRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Candidate",
            id,
        }))?;

    tracing::info!(candidate_id = id, admin_id = user.user_id, "Candidate updated");

    Ok(Json(DataResponse {
        data: to_view(candidate)?,
    }))
}

/// DELETE /api/candidates/{id}
pub async fn delete_candidate(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CandidateRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Candidate",
            id,
        }));
    }

    tracing::info!(candidate_id = id, admin_id = user.user_id, "Candidate deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/candidates/{id}/resend-email
///
/// Re-send the tier result notification. Unlike registration this sends
/// synchronously so the admin sees delivery failures.
pub async fn resend_notification(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CandidateView>>> {
    let mailer = state.mailer.clone().ok_or_else(|| {
        AppError::BadRequest("Email delivery is not configured on this server".into())
    })?;

    let candidate = CandidateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Candidate",
            id,
        }))?;

    let tier = SkillTier::from_i16(candidate.assigned_tier).ok_or_else(|| {
        AppError::InternalError(format!(
            "Candidate {} has out-of-range tier {}",
            candidate.id, candidate.assigned_tier
        ))
    })?;

    mailer
        .send_tier_result(&candidate.email, &candidate.name, tier)
        .await
        .map_err(|e| AppError::InternalError(format!("Email delivery failed: {e}")))?;

    CandidateRepo::mark_notified(&state.pool, id).await?;

    tracing::info!(candidate_id = id, admin_id = user.user_id, "Tier result email re-sent");

    let refreshed = CandidateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Candidate",
            id,
        }))?;

    Ok(Json(DataResponse {
        data: to_view(refreshed)?,
    }))
}

// ---------------------------------------------------------------------------
// CSV rendering
// ---------------------------------------------------------------------------

/// Quote a CSV field if it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn level_str(level: ExperienceLevel) -> &'static str {
    match level {
        ExperienceLevel::None => "none",
        ExperienceLevel::Basic => "basic",
        ExperienceLevel::Intermediate => "intermediate",
        ExperienceLevel::Advanced => "advanced",
    }
}

/// Render candidate rows as a CSV document, answers included.
fn render_csv(rows: &[Candidate]) -> AppResult<String> {
    let mut out = String::from(
        "id,name,email,phone,country,assigned_tier,tier_name,tier_assigned_at,\
         notification_sent,created_at,html_css_js,react_next_js,can_build_crud_app,\
         can_implement_auth,can_implement_google_auth,database,express_hono,\
         can_build_authenticated_api,can_document_api,laravel,golang,can_build_go_api,\
         can_deploy_apps\n",
    );

    for row in rows {
        let tier = SkillTier::from_i16(row.assigned_tier).ok_or_else(|| {
            AppError::InternalError(format!(
                "Candidate {} has out-of-range tier {}",
                row.id, row.assigned_tier
            ))
        })?;
        let a = &row.answers.0;

        let fields = [
            row.id.to_string(),
            csv_field(&row.name),
            csv_field(&row.email),
            csv_field(&row.phone),
            csv_field(row.country.as_deref().unwrap_or("")),
            row.assigned_tier.to_string(),
            csv_field(tier.name()),
            row.tier_assigned_at.to_rfc3339(),
            row.notification_sent.to_string(),
            row.created_at.to_rfc3339(),
            level_str(a.html_css_js_knowledge).to_string(),
            level_str(a.react_next_js_knowledge).to_string(),
            a.can_build_crud_app.to_string(),
            a.can_implement_auth.to_string(),
            a.can_implement_google_auth.to_string(),
            level_str(a.database_knowledge).to_string(),
            level_str(a.express_hono_knowledge).to_string(),
            a.can_build_authenticated_api.to_string(),
            a.can_document_api.to_string(),
            level_str(a.laravel_knowledge).to_string(),
            level_str(a.golang_knowledge).to_string(),
            a.can_build_go_api.to_string(),
            a.can_deploy_apps.to_string(),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("has,comma"), "\"has,comma\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_parse_tiers() {
        assert_eq!(parse_tiers("1,2").unwrap(), vec![1, 2]);
        assert_eq!(parse_tiers(" 0 , 4 ").unwrap(), vec![0, 4]);
        assert!(parse_tiers("6").is_err());
        assert!(parse_tiers("abc").is_err());
    }
}
