use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::Config;

const CREATE_GAMES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS games (
    id             TEXT PRIMARY KEY NOT NULL,
    week           INTEGER NOT NULL,
    team           TEXT NOT NULL,
    opponent       TEXT NOT NULL,
    home_away      TEXT NOT NULL,
    points_for     INTEGER NOT NULL,
    points_against INTEGER NOT NULL,
    result         TEXT NOT NULL,
    image_url      TEXT NOT NULL
)
"#;

pub async fn get_db_pool(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    connect(
        &config.database_url,
        config.max_connections,
        config.acquire_timeout,
    )
    .await
}

/// Open a pool on `database_url`, creating the database file if needed,
/// and make sure the `games` table exists.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect_with(options)
        .await?;

    sqlx::query(CREATE_GAMES_TABLE).execute(&pool).await?;
    tracing::debug!("games table ready");

    Ok(pool)
}
