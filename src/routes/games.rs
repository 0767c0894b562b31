use axum::{routing::get, Router};
use sqlx::SqlitePool;

use crate::handlers::games::{create_game, delete_game, get_game, get_games, update_game};

pub fn routes() -> Router<SqlitePool> {
    Router::new()
        .route("/", get(get_games).post(create_game))
        .route("/:id", get(get_game).put(update_game).delete(delete_game))
}
