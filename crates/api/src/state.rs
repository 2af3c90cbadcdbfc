use std::sync::Arc;

use crate::config::ServerConfig;
use crate::email::Mailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: skillgate_db::DbPool,
    /// Server configuration (accessed by extractors and handlers).
    pub config: Arc<ServerConfig>,
    /// Outbound email service. `None` when SMTP is not configured; all
    /// notification sends become logged no-ops in that case.
    pub mailer: Option<Arc<Mailer>>,
}
