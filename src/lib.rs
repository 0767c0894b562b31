//! College football game tracker API.
//!
//! Four-endpoint CRUD resource over a SQLite `games` table plus a stats
//! endpoint. See [`app`] for the route table.

use axum::{http::Method, routing::get, Router};
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod database;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

use routes::{games, stats};

/// Build the application router.
///
/// | Method | Path | |
/// |---|---|---|
/// | GET | `/api/games` | filtered, sorted, paged list |
/// | POST | `/api/games` | create |
/// | GET / PUT / DELETE | `/api/games/:id` | read, replace, remove |
/// | GET | `/api/stats` | win/loss and scoring summary |
pub fn app(pool: SqlitePool) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/", get(|| async { "College Football Game Tracker API" }))
        .nest("/api/games", games::routes())
        .nest("/api/stats", stats::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(pool)
}
