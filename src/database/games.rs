//! Connection-scoped access to the `games` table.
//!
//! A [`GameStore`] owns one pooled connection for the lifetime of a request.
//! Dropping it hands the connection back to the pool, whichever way the
//! request ends. Each write is a single statement, so a record is either
//! fully written or not at all.

use sqlx::pool::PoolConnection;
use sqlx::{FromRow, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::game::{Game, GameResult, HomeAway, NewGame};

const SELECT_COLUMNS: &str = "SELECT id, week, team, opponent, home_away, points_for, \
     points_against, result, image_url FROM games";

#[derive(Debug, FromRow)]
struct GameRow {
    id: String,
    week: i32,
    team: String,
    opponent: String,
    home_away: String,
    points_for: i32,
    points_against: i32,
    result: String,
    image_url: String,
}

impl GameRow {
    fn into_game(self) -> Result<Game> {
        let corrupt = |reason: String| AppError::CorruptRecord {
            id: self.id.clone(),
            reason,
        };

        let home_away = self
            .home_away
            .parse::<HomeAway>()
            .map_err(|_| corrupt(format!("bad home_away {:?}", self.home_away)))?;
        let result = self
            .result
            .parse::<GameResult>()
            .map_err(|_| corrupt(format!("bad result {:?}", self.result)))?;

        Ok(Game {
            id: self.id,
            week: self.week,
            team: self.team,
            opponent: self.opponent,
            home_away,
            points_for: self.points_for,
            points_against: self.points_against,
            result,
            image_url: self.image_url,
        })
    }
}

pub struct GameStore {
    conn: PoolConnection<Sqlite>,
}

impl GameStore {
    pub async fn acquire(pool: &SqlitePool) -> Result<Self> {
        let conn = pool.acquire().await?;
        Ok(Self { conn })
    }

    /// Persist a new game under a freshly generated id and return the id.
    pub async fn insert(&mut self, game: &NewGame) -> Result<String> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO games (
                id, week, team, opponent, home_away,
                points_for, points_against, result, image_url
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(game.week)
        .bind(&game.team)
        .bind(&game.opponent)
        .bind(game.home_away.as_str())
        .bind(game.points_for)
        .bind(game.points_against)
        .bind(game.result.as_str())
        .bind(&game.image_url)
        .execute(&mut *self.conn)
        .await?;

        Ok(id)
    }

    /// Replace every field of game `id`. Returns `false` if there is no such game.
    pub async fn update(&mut self, id: &str, game: &NewGame) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE games
            SET week = ?, team = ?, opponent = ?, home_away = ?,
                points_for = ?, points_against = ?, result = ?, image_url = ?
            WHERE id = ?
            "#,
        )
        .bind(game.week)
        .bind(&game.team)
        .bind(&game.opponent)
        .bind(game.home_away.as_str())
        .bind(game.points_for)
        .bind(game.points_against)
        .bind(game.result.as_str())
        .bind(&game.image_url)
        .bind(id)
        .execute(&mut *self.conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&mut self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM games WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All games in insertion order.
    pub async fn get_all(&mut self) -> Result<Vec<Game>> {
        let rows = sqlx::query_as::<_, GameRow>(&format!("{SELECT_COLUMNS} ORDER BY rowid"))
            .fetch_all(&mut *self.conn)
            .await?;

        rows.into_iter().map(GameRow::into_game).collect()
    }

    pub async fn get_by_id(&mut self, id: &str) -> Result<Option<Game>> {
        let row = sqlx::query_as::<_, GameRow>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        row.map(GameRow::into_game).transpose()
    }
}
