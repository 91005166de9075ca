use std::fmt::Display;

use chrono::{DateTime, Utc};
use types::{Game, GameResult, ResultId};

use crate::Roster;

/// One match as shown in the history list, with names already resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: ResultId,
    pub date: DateTime<Utc>,
    pub winner: String,
    pub winner_deck: String,
    pub loser: String,
    pub loser_deck: String,
}

impl HistoryEntry {
    pub fn from_result(result: &GameResult, roster: &Roster) -> Self {
        Self {
            id: result.id.clone(),
            date: result.date,
            winner: roster.player_name(&result.winner).to_string(),
            winner_deck: roster.deck_name(result.winning_deck()).to_string(),
            loser: roster.player_name(result.losing_player()).to_string(),
            loser_deck: roster.deck_name(result.losing_deck()).to_string(),
        }
    }
}

impl Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}  {} ({}) beat {} ({})",
            format_date(&self.date),
            self.winner,
            self.winner_deck,
            self.loser,
            self.loser_deck
        )
    }
}

/// The game's matches in stored order, newest first.
pub fn history(results: &[GameResult], game: Game, roster: &Roster) -> Vec<HistoryEntry> {
    results
        .iter()
        .filter(|result| result.game == game)
        .map(|result| HistoryEntry::from_result(result, roster))
        .collect()
}

/// `May 1, 2024, 06:30 PM`
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y, %I:%M %p").to_string()
}
