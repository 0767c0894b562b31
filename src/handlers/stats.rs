use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::database::games::GameStore;
use crate::errors::Result;
use crate::services::stats::{summarize, Summary};

pub async fn get_stats(State(pool): State<SqlitePool>) -> Result<Json<Summary>> {
    let all = GameStore::acquire(&pool).await?.get_all().await?;
    let summary = summarize(&all);

    tracing::info!(
        total = summary.total_games,
        wins = summary.wins,
        losses = summary.losses,
        "computed stats"
    );
    Ok(Json(summary))
}
