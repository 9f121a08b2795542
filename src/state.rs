use sqlx::SqlitePool;

/// Shared application state handed to handlers and middleware by the router.
/// The pool is the only cross-request shared resource; per-request identity
/// travels in request extensions, never here.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}
