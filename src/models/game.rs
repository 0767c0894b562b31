use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shown by the front end when a game has no image of its own.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/64x64?text=CFB";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HomeAway {
    Home,
    Away,
}

impl HomeAway {
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeAway::Home => "Home",
            HomeAway::Away => "Away",
        }
    }
}

impl FromStr for HomeAway {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(HomeAway::Home),
            "away" => Ok(HomeAway::Away),
            _ => Err(()),
        }
    }
}

impl fmt::Display for HomeAway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameResult {
    W,
    L,
}

impl GameResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameResult::W => "W",
            GameResult::L => "L",
        }
    }
}

impl FromStr for GameResult {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "W" | "WIN" => Ok(GameResult::W),
            "L" | "LOSS" => Ok(GameResult::L),
            _ => Err(()),
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted game as served over the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub week: i32,
    pub team: String,
    pub opponent: String,
    pub home_away: HomeAway,
    pub points_for: i32,
    pub points_against: i32,
    pub result: GameResult,
    pub image_url: String,
}

impl Game {
    pub fn from_new(id: String, game: NewGame) -> Self {
        Self {
            id,
            week: game.week,
            team: game.team,
            opponent: game.opponent,
            home_away: game.home_away,
            points_for: game.points_for,
            points_against: game.points_against,
            result: game.result,
            image_url: game.image_url,
        }
    }
}

/// A fully validated record that has not been given an id by the store yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGame {
    pub week: i32,
    pub team: String,
    pub opponent: String,
    pub home_away: HomeAway,
    pub points_for: i32,
    pub points_against: i32,
    pub result: GameResult,
    pub image_url: String,
}

/// Untyped request body for create/update.
///
/// Every field is kept as raw JSON so that the validator can coerce
/// and report problems instead of the extractor rejecting the body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GamePayload {
    pub id: Option<Value>,
    pub week: Option<Value>,
    pub team: Option<Value>,
    pub opponent: Option<Value>,
    pub home_away: Option<Value>,
    pub points_for: Option<Value>,
    pub points_against: Option<Value>,
    pub result: Option<Value>,
    pub image_url: Option<Value>,
}
