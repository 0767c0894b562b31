//! Normalisation and validation of incoming game payloads.
//!
//! All problems are collected in field order and reported together.
//! Numeric fields are coerced leniently: a missing or non-numeric value
//! becomes an out-of-range sentinel, so it fails the range check instead
//! of aborting validation, while the message still says which case it was.

use serde_json::Value;
use thiserror::Error;

use super::game::{GamePayload, GameResult, HomeAway, NewGame, PLACEHOLDER_IMAGE_URL};

pub const WEEK_RANGE: (i64, i64) = (1, 20);
pub const POINTS_RANGE: (i64, i64) = (0, 100);

const SENTINEL: i64 = -1;

/// Every constraint violation found in one payload, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .0.join("; "))]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

/// Output of a successful validation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanGame {
    pub id: Option<String>,
    pub game: NewGame,
}

enum Coerced {
    Missing,
    NotANumber,
    Number(i64),
}

impl Coerced {
    fn value(&self) -> i64 {
        match self {
            Coerced::Number(n) => *n,
            _ => SENTINEL,
        }
    }
}

/// Fractional numbers drop their fraction, whether sent as JSON or as text.
fn truncate(value: Option<f64>) -> Coerced {
    match value {
        Some(f) if f.is_finite() => Coerced::Number(f.trunc() as i64),
        _ => Coerced::NotANumber,
    }
}

fn coerce_int(value: Option<&Value>) -> Coerced {
    match value {
        None | Some(Value::Null) => Coerced::Missing,
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => Coerced::Number(i),
            None => truncate(n.as_f64()),
        },
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Coerced::Missing
            } else if let Ok(i) = s.parse::<i64>() {
                Coerced::Number(i)
            } else {
                truncate(s.parse::<f64>().ok())
            }
        }
        Some(_) => Coerced::NotANumber,
    }
}

fn check_range(
    label: &str,
    coerced: Coerced,
    (lo, hi): (i64, i64),
    errors: &mut Vec<String>,
) -> i32 {
    let value = coerced.value();
    match coerced {
        Coerced::Missing => errors.push(format!("{label} is required ({lo}-{hi})")),
        Coerced::NotANumber => errors.push(format!("{label} must be a whole number ({lo}-{hi})")),
        Coerced::Number(n) if n < lo || n > hi => {
            errors.push(format!("{label} must be between {lo} and {hi}"))
        }
        Coerced::Number(_) => {}
    }

    i32::try_from(value).unwrap_or(SENTINEL as i32)
}

/// Trim and title-case a display name: the first letter of each
/// whitespace-separated word upper-cased, the rest lower-cased.
pub fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

pub fn validate(payload: &GamePayload, require_id: bool) -> Result<CleanGame, ValidationErrors> {
    let mut errors = Vec::new();

    let id = Some(text(payload.id.as_ref())).filter(|id| !id.is_empty());
    if require_id && id.is_none() {
        errors.push("Id is required".to_string());
    }

    let week = check_range("Week", coerce_int(payload.week.as_ref()), WEEK_RANGE, &mut errors);

    let team = title_case(&text(payload.team.as_ref()));
    if team.is_empty() {
        errors.push("Team is required".to_string());
    }

    let opponent = title_case(&text(payload.opponent.as_ref()));
    if opponent.is_empty() {
        errors.push("Opponent is required".to_string());
    }

    let home_away = text(payload.home_away.as_ref()).parse::<HomeAway>().ok();
    if home_away.is_none() {
        errors.push("HomeAway must be Home or Away".to_string());
    }

    let points_for = check_range(
        "PointsFor",
        coerce_int(payload.points_for.as_ref()),
        POINTS_RANGE,
        &mut errors,
    );
    let points_against = check_range(
        "PointsAgainst",
        coerce_int(payload.points_against.as_ref()),
        POINTS_RANGE,
        &mut errors,
    );

    let result = text(payload.result.as_ref()).parse::<GameResult>().ok();
    if result.is_none() {
        errors.push("Result must be W or L".to_string());
    }

    let image_url = Some(text(payload.image_url.as_ref()))
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string());

    match (home_away, result) {
        (Some(home_away), Some(result)) if errors.is_empty() => Ok(CleanGame {
            id,
            game: NewGame {
                week,
                team,
                opponent,
                home_away,
                points_for,
                points_against,
                result,
                image_url,
            },
        }),
        _ => Err(ValidationErrors(errors)),
    }
}
