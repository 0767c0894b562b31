//! Filtering, sorting and paging of the game list.
//!
//! Query parameters arrive untyped and are never rejected: unknown sort
//! fields fall back to `week`, unknown result filters are ignored, and
//! page numbers are clamped into range.

use std::cmp::Ordering;
use std::num::IntErrorKind;

use serde::Deserialize;

use crate::models::game::{Game, GameResult};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Week,
    Team,
    PointsFor,
}

impl SortField {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("team") => SortField::Team,
            Some("pointsfor") | Some("points_for") => SortField::PointsFor,
            _ => SortField::Week,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(dir) if dir.trim().eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

/// Raw query string of `GET /api/games`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub result: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListQuery {
    pub text: Option<String>,
    pub result: Option<GameResult>,
    pub sort_by: SortField,
    pub sort_dir: SortDirection,
    pub page: usize,
    pub page_size: usize,
}

impl From<&ListParams> for ListQuery {
    fn from(params: &ListParams) -> Self {
        let text = params
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let result = params
            .result
            .as_deref()
            .and_then(|r| r.parse::<GameResult>().ok());

        Self {
            text,
            result,
            sort_by: SortField::parse(params.sort_by.as_deref()),
            sort_dir: SortDirection::parse(params.sort_dir.as_deref()),
            page: clamp_page(parse_number(params.page.as_deref()).unwrap_or(1)),
            page_size: clamp_page_size(
                parse_number(params.page_size.as_deref()).unwrap_or(DEFAULT_PAGE_SIZE as i64),
            ),
        }
    }
}

/// Parse an integer parameter. Values beyond `i64` saturate; anything
/// that is not a number yields `None`.
fn parse_number(raw: Option<&str>) -> Option<i64> {
    match raw?.trim().parse::<i64>() {
        Ok(n) => Some(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

fn clamp_page(page: i64) -> usize {
    usize::try_from(page.max(1)).unwrap_or(usize::MAX)
}

fn clamp_page_size(size: i64) -> usize {
    size.clamp(1, MAX_PAGE_SIZE as i64) as usize
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    pub items: Vec<Game>,
    /// Matches after filtering, before the page window is applied.
    pub total: usize,
}

fn matches(game: &Game, query: &ListQuery) -> bool {
    let text_ok = match &query.text {
        Some(needle) => {
            game.team.to_lowercase().contains(needle.as_str())
                || game.opponent.to_lowercase().contains(needle.as_str())
        }
        None => true,
    };

    text_ok && query.result.map_or(true, |r| game.result == r)
}

fn compare(a: &Game, b: &Game, field: SortField) -> Ordering {
    match field {
        SortField::Week => a.week.cmp(&b.week),
        SortField::Team => a.team.to_lowercase().cmp(&b.team.to_lowercase()),
        SortField::PointsFor => a.points_for.cmp(&b.points_for),
    }
}

pub fn list(all: Vec<Game>, query: &ListQuery) -> ListPage {
    let mut filtered: Vec<Game> = all.into_iter().filter(|g| matches(g, query)).collect();

    // sort_by is stable; flipping the comparator keeps ties in place for desc too.
    match query.sort_dir {
        SortDirection::Asc => filtered.sort_by(|a, b| compare(a, b, query.sort_by)),
        SortDirection::Desc => filtered.sort_by(|a, b| compare(b, a, query.sort_by)),
    }

    let total = filtered.len();
    let page = query.page.max(1);
    let page_size = query.page_size.clamp(1, MAX_PAGE_SIZE);
    let items = filtered
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .collect();

    ListPage { items, total }
}
