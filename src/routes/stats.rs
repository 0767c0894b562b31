use axum::{routing::get, Router};
use sqlx::SqlitePool;

use crate::handlers::stats::get_stats;

pub fn routes() -> Router<SqlitePool> {
    Router::new().route("/", get(get_stats))
}
