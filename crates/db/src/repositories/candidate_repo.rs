//! Repository for the `candidates` table.

use sqlx::PgPool;
use skillgate_core::types::{DbId, Timestamp};

use crate::models::candidate::{
    Candidate, CandidateFilter, CandidateSortBy, CreateCandidate, DailyCount, SortOrder, TierCount,
    UpdateCandidate,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone, country, answers, assigned_tier, \
                       tier_assigned_at, notification_sent, created_at, updated_at";

/// An owned bind value for dynamically assembled filter queries.
enum BindValue {
    Text(String),
    Timestamp(Timestamp),
    SmallIntArray(Vec<i16>),
}

/// Build a WHERE clause and bind values from filter parameters.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The
/// `where_clause` is empty if no filters are active, or starts with `WHERE `.
fn build_candidate_filter(filter: &CandidateFilter) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if !filter.tiers.is_empty() {
        conditions.push(format!("assigned_tier = ANY(${bind_idx})"));
        bind_idx += 1;
        bind_values.push(BindValue::SmallIntArray(filter.tiers.clone()));
    }

    if let Some(ref search) = filter.search {
        conditions.push(format!(
            "(name ILIKE ${bind_idx} OR email ILIKE ${bind_idx} OR phone ILIKE ${bind_idx})"
        ));
        bind_idx += 1;
        bind_values.push(BindValue::Text(format!("%{search}%")));
    }

    if let Some(start) = filter.start_date {
        conditions.push(format!("created_at >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(start));
    }

    if let Some(end) = filter.end_date {
        conditions.push(format!("created_at <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(end));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_filter_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Timestamp(v) => q = q.bind(*v),
            BindValue::SmallIntArray(v) => q = q.bind(v.as_slice()),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_filter_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Timestamp(v) => q = q.bind(*v),
            BindValue::SmallIntArray(v) => q = q.bind(v.as_slice()),
        }
    }
    q
}

/// Provides CRUD and reporting queries for candidates.
pub struct CandidateRepo;

impl CandidateRepo {
    /// Insert a new candidate, returning the created row.
    ///
    /// `tier_assigned_at` is set server-side to the insertion instant.
    pub async fn create(pool: &PgPool, input: &CreateCandidate) -> Result<Candidate, sqlx::Error> {
        let query = format!(
            "INSERT INTO candidates (name, email, phone, country, answers, assigned_tier, tier_assigned_at)
             VALUES ($1, $2, $3, $4, $5, $6, NOW())
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Candidate>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.country)
            .bind(sqlx::types::Json(&input.answers))
            .bind(input.assigned_tier)
            .fetch_one(pool)
            .await
    }

    /// Find a candidate by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Candidate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM candidates WHERE id = $1");
        sqlx::query_as::<_, Candidate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a candidate by email (case-sensitive).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Candidate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM candidates WHERE email = $1");
        sqlx::query_as::<_, Candidate>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List candidates matching `filter`, sorted and paginated.
    pub async fn list(
        pool: &PgPool,
        filter: &CandidateFilter,
        sort_by: CandidateSortBy,
        sort_order: SortOrder,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Candidate>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_candidate_filter(filter);

        let query = format!(
            "SELECT {COLUMNS} FROM candidates {where_clause} \
             ORDER BY {} {} \
             LIMIT ${bind_idx} OFFSET ${}",
            sort_by.column(),
            sort_order.keyword(),
            bind_idx + 1
        );

        let q = bind_filter_values(sqlx::query_as::<_, Candidate>(&query), &bind_values);
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count candidates matching `filter` (for pagination metadata).
    pub async fn count(pool: &PgPool, filter: &CandidateFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_candidate_filter(filter);

        let query = format!("SELECT COUNT(*)::BIGINT FROM candidates {where_clause}");

        let q = bind_filter_values_scalar(sqlx::query_scalar::<_, i64>(&query), &bind_values);
        q.fetch_one(pool).await
    }

    /// Fetch all candidates matching `filter`, newest first, without
    /// pagination. Used by CSV export.
    pub async fn export(
        pool: &PgPool,
        filter: &CandidateFilter,
    ) -> Result<Vec<Candidate>, sqlx::Error> {
        let (where_clause, bind_values, _) = build_candidate_filter(filter);

        let query =
            format!("SELECT {COLUMNS} FROM candidates {where_clause} ORDER BY created_at DESC");

        let q = bind_filter_values(sqlx::query_as::<_, Candidate>(&query), &bind_values);
        q.fetch_all(pool).await
    }

    /// Update a candidate's personal fields. Only non-`None` fields in
    /// `input` are applied; the answers snapshot and assigned tier are
    /// untouched by design.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCandidate,
    ) -> Result<Option<Candidate>, sqlx::Error> {
        let query = format!(
            "UPDATE candidates SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                country = COALESCE($4, country),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Candidate>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.country)
            .fetch_optional(pool)
            .await
    }

    /// Delete a candidate. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record that the tier-result notification was sent.
    pub async fn mark_notified(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE candidates SET notification_sent = TRUE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Total number of candidates.
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM candidates")
            .fetch_one(pool)
            .await
    }

    /// Number of candidates registered at or after `since`.
    pub async fn count_since(pool: &PgPool, since: Timestamp) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM candidates WHERE created_at >= $1",
        )
        .bind(since)
        .fetch_one(pool)
        .await
    }

    /// Candidate counts grouped by assigned tier, ascending by tier.
    pub async fn tier_distribution(pool: &PgPool) -> Result<Vec<TierCount>, sqlx::Error> {
        sqlx::query_as::<_, TierCount>(
            "SELECT assigned_tier AS tier, COUNT(*)::BIGINT AS count
             FROM candidates
             GROUP BY assigned_tier
             ORDER BY assigned_tier ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Registrations per UTC day since `since`, ascending by day.
    pub async fn registrations_per_day(
        pool: &PgPool,
        since: Timestamp,
    ) -> Result<Vec<DailyCount>, sqlx::Error> {
        sqlx::query_as::<_, DailyCount>(
            "SELECT TO_CHAR(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD') AS day,
                    COUNT(*)::BIGINT AS count
             FROM candidates
             WHERE created_at >= $1
             GROUP BY day
             ORDER BY day ASC",
        )
        .bind(since)
        .fetch_all(pool)
        .await
    }
}
