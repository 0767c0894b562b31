use serde::Serialize;

use crate::models::game::{Game, GameResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    #[serde(rename = "totalGames")]
    pub total_games: usize,
    pub wins: usize,
    pub losses: usize,
    #[serde(rename = "avgPF")]
    pub avg_points_for: f64,
    #[serde(rename = "highPFGame")]
    pub high_points_for_game: Option<Game>,
}

pub fn summarize(all: &[Game]) -> Summary {
    let wins = all.iter().filter(|g| g.result == GameResult::W).count();
    let losses = all.iter().filter(|g| g.result == GameResult::L).count();

    let avg_points_for = if all.is_empty() {
        0.0
    } else {
        all.iter().map(|g| f64::from(g.points_for)).sum::<f64>() / all.len() as f64
    };

    // First occurrence wins ties, unlike Iterator::max_by_key.
    let high_points_for_game = all
        .iter()
        .fold(None::<&Game>, |best, g| match best {
            Some(b) if b.points_for >= g.points_for => Some(b),
            _ => Some(g),
        })
        .cloned();

    Summary {
        total_games: all.len(),
        wins,
        losses,
        avg_points_for,
        high_points_for_game,
    }
}
