use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use cfb_game_tracker::{app, database::connection::connect};

struct TestApp {
    _dir: TempDir,
    pool: SqlitePool,
    router: Router,
}

impl TestApp {
    async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("games.db").display());
        let pool = connect(&url, 2, Duration::from_secs(2)).await.unwrap();
        Self {
            _dir: dir,
            pool: pool.clone(),
            router: app(pool),
        }
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn create(&self, body: Value) -> Value {
        let (status, game) = self.send("POST", "/api/games", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {game}");
        game
    }
}

fn game_body(week: i64, team: &str, points_for: i64, result: &str) -> Value {
    json!({
        "week": week,
        "team": team,
        "opponent": "notre dame",
        "homeAway": "Home",
        "pointsFor": points_for,
        "pointsAgainst": 17,
        "result": result
    })
}

#[tokio::test]
async fn create_then_fetch_roundtrip() {
    let app = TestApp::new().await;

    let created = app.create(game_body(3, "usc  trojans", 24, "W")).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["team"], "Usc Trojans");
    assert_eq!(created["opponent"], "Notre Dame");
    assert!(created["imageUrl"].as_str().is_some());

    let (status, fetched) = app.send("GET", &format!("/api/games/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_with_invalid_fields_returns_all_errors() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            "POST",
            "/api/games",
            Some(json!({ "week": 21, "team": "", "opponent": "Rice", "homeAway": "Home",
                         "pointsFor": 10, "pointsAgainst": 7, "result": "W" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Week must be between 1 and 20; Team is required"
    );
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);

    let (_, list) = app.send("GET", "/api/games", None).await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/games")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_game_is_404() {
    let app = TestApp::new().await;

    let (status, body) = app.send("GET", "/api/games/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("nope"));

    let (status, _) = app
        .send("PUT", "/api/games/nope", Some(game_body(1, "Ucla", 3, "L")))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send("DELETE", "/api/games/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_replaces_record() {
    let app = TestApp::new().await;
    let created = app.create(game_body(2, "Lsu", 28, "W")).await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = app
        .send(
            "PUT",
            &format!("/api/games/{id}"),
            Some(json!({ "id": "ignored", "week": 9, "team": "lsu tigers", "opponent": "Alabama",
                         "homeAway": "away", "pointsFor": 20, "pointsAgainst": 42, "result": "L" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["week"], 9);
    assert_eq!(updated["team"], "Lsu Tigers");
    assert_eq!(updated["homeAway"], "Away");
    assert_eq!(updated["result"], "L");

    let (_, fetched) = app.send("GET", &format!("/api/games/{id}"), None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_with_invalid_body_is_400_and_keeps_record() {
    let app = TestApp::new().await;
    let created = app.create(game_body(2, "Tcu", 28, "W")).await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = app
        .send("PUT", &format!("/api/games/{id}"), Some(game_body(0, "Tcu", 28, "W")))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, fetched) = app.send("GET", &format!("/api/games/{id}"), None).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn delete_then_delete_again() {
    let app = TestApp::new().await;
    let created = app.create(game_body(1, "Kansas", 10, "L")).await;
    let uri = format!("/api/games/{}", created["id"].as_str().unwrap());

    let (status, body) = app.send("DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));

    let (status, _) = app.send("DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send("GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_paginates_filters_and_sorts() {
    let app = TestApp::new().await;
    for week in 1..=12 {
        let result = if week % 3 == 0 { "L" } else { "W" };
        app.create(game_body(week, &format!("Team {week}"), week * 2, result))
            .await;
    }

    let (status, page) = app.send("GET", "/api/games?page=2&page_size=5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 12);
    assert_eq!(page["page"], 2);
    assert_eq!(page["page_size"], 5);
    let weeks: Vec<i64> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["week"].as_i64().unwrap())
        .collect();
    assert_eq!(weeks, [6, 7, 8, 9, 10]);

    let (_, losses) = app
        .send("GET", "/api/games?result=L&sort_by=pointsFor&sort_dir=desc", None)
        .await;
    assert_eq!(losses["total"], 4);
    assert_eq!(losses["items"][0]["week"], 12);

    let (_, search) = app.send("GET", "/api/games?q=team%201", None).await;
    // "Team 1", "Team 10", "Team 11", "Team 12"
    assert_eq!(search["total"], 4);

    let (status, clamped) = app
        .send("GET", "/api/games?page=0&page_size=abc&sort_by=nonsense", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(clamped["page"], 1);
    assert_eq!(clamped["page_size"], 10);
    assert_eq!(clamped["items"][0]["week"], 1);

    let (_, beyond) = app.send("GET", "/api/games?page=9", None).await;
    assert_eq!(beyond["items"], json!([]));
    assert_eq!(beyond["total"], 12);
}

#[tokio::test]
async fn stats_endpoint() {
    let app = TestApp::new().await;

    let (status, empty) = app.send("GET", "/api/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty["totalGames"], 0);
    assert_eq!(empty["avgPF"], 0.0);
    assert!(empty["highPFGame"].is_null());

    app.create(game_body(1, "Army", 10, "L")).await;
    app.create(game_body(2, "Navy", 30, "W")).await;
    app.create(game_body(3, "Air Force", 20, "W")).await;

    let (_, stats) = app.send("GET", "/api/stats", None).await;
    assert_eq!(stats["totalGames"], 3);
    assert_eq!(stats["wins"], 2);
    assert_eq!(stats["losses"], 1);
    assert_eq!(stats["avgPF"], 20.0);
    assert_eq!(stats["highPFGame"]["pointsFor"], 30);
    assert_eq!(stats["highPFGame"]["team"], "Navy");
}

#[tokio::test]
async fn huge_page_number_is_past_the_end() {
    let app = TestApp::new().await;
    for week in 1..=3 {
        app.create(game_body(week, "Rice", 7, "L")).await;
    }

    let (status, page) = app
        .send("GET", "/api/games?page=99999999999999999999", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["items"], json!([]));
    assert_eq!(page["total"], 3);
}

#[tokio::test]
async fn unreadable_row_is_a_500_without_details() {
    let app = TestApp::new().await;
    app.create(game_body(1, "Tulane", 35, "W")).await;
    sqlx::query("INSERT INTO games VALUES ('bad', 2, 'A', 'B', 'Home', 1, 2, 'Tie', '')")
        .execute(&app.pool)
        .await
        .unwrap();

    for uri in ["/api/games", "/api/games/bad", "/api/stats"] {
        let (status, body) = app.send("GET", uri, None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(body, json!({ "error": "Database error" }), "{uri}");
    }
}
