use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::database::games::GameStore;
use crate::errors::{AppError, Result};
use crate::models::game::{Game, GamePayload};
use crate::models::validation::{validate, CleanGame};
use crate::services::query::{self, ListParams, ListQuery};

#[derive(Debug, Serialize)]
pub struct GameListResponse {
    pub items: Vec<Game>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

fn read_payload(payload: std::result::Result<Json<GamePayload>, JsonRejection>) -> Result<GamePayload> {
    payload.map(|Json(p)| p).map_err(|rejection| {
        warn!(error = %rejection.body_text(), "rejected game body");
        AppError::MalformedBody(rejection.body_text())
    })
}

fn check(payload: &GamePayload, require_id: bool) -> Result<CleanGame> {
    validate(payload, require_id).map_err(|errors| {
        warn!(errors = %errors, "game failed validation");
        AppError::from(errors)
    })
}

pub async fn get_games(
    State(pool): State<SqlitePool>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<GameListResponse>> {
    // Bad query strings degrade to the default listing rather than failing.
    let params = params.map(|Query(p)| p).unwrap_or_else(|rejection| {
        warn!(error = %rejection, "ignoring unparsable query string");
        ListParams::default()
    });
    let list_query = ListQuery::from(&params);

    let all = GameStore::acquire(&pool).await?.get_all().await?;
    let page = query::list(all, &list_query);

    info!(
        total = page.total,
        returned = page.items.len(),
        page = list_query.page,
        "listed games"
    );

    Ok(Json(GameListResponse {
        items: page.items,
        total: page.total,
        page: list_query.page,
        page_size: list_query.page_size,
    }))
}

pub async fn get_game(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Game>> {
    let mut store = GameStore::acquire(&pool).await?;

    match store.get_by_id(&id).await? {
        Some(game) => Ok(Json(game)),
        None => {
            warn!(%id, "game not found");
            Err(AppError::GameNotFound(id))
        }
    }
}

pub async fn create_game(
    State(pool): State<SqlitePool>,
    payload: std::result::Result<Json<GamePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Game>)> {
    let payload = read_payload(payload)?;
    let clean = check(&payload, false)?;

    let mut store = GameStore::acquire(&pool).await?;
    let id = store.insert(&clean.game).await?;

    info!(%id, team = %clean.game.team, opponent = %clean.game.opponent, "created game");
    Ok((StatusCode::CREATED, Json(Game::from_new(id, clean.game))))
}

pub async fn update_game(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<GamePayload>, JsonRejection>,
) -> Result<Json<Game>> {
    let mut payload = read_payload(payload)?;
    // The path decides which record is updated.
    payload.id = Some(Value::String(id.clone()));
    let clean = check(&payload, true)?;

    let mut store = GameStore::acquire(&pool).await?;
    if !store.update(&id, &clean.game).await? {
        warn!(%id, "update of missing game");
        return Err(AppError::GameNotFound(id));
    }

    info!(%id, "updated game");
    Ok(Json(Game::from_new(id, clean.game)))
}

pub async fn delete_game(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let mut store = GameStore::acquire(&pool).await?;

    if !store.delete(&id).await? {
        warn!(%id, "delete of missing game");
        return Err(AppError::GameNotFound(id));
    }

    info!(%id, "deleted game");
    Ok(Json(json!({ "ok": true })))
}
