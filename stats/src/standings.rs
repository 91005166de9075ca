//! Win/loss tables derived from the match history.
//!
//! Both tables are built the same way: walk the results in order, give each
//! participant an entry the first time it shows up, count every match it
//! played and every match it won, then rank by win rate. Ranking is stable,
//! so entries with equal win rates stay in the order they were first seen.

use std::{fmt::Display, hash::Hash};

use indexmap::IndexMap;
use itertools::Itertools;
use types::{DeckId, Game, GameResult, PlayerId};

use crate::Roster;

#[derive(Clone, Debug, PartialEq)]
pub struct Standing<Id> {
    pub id: Id,
    pub name: String,
    pub wins: u32,
    pub total: u32,
    /// Percentage rounded to one decimal place.
    pub winrate: f64,
}

impl<Id> Standing<Id> {
    pub fn losses(&self) -> u32 {
        self.total - self.wins
    }
}

impl<Id> Display for Standing<Id> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}W-{}L ({:.1}%)",
            self.name,
            self.wins,
            self.losses(),
            self.winrate
        )
    }
}

/// Both tables for one slice of the history.
#[derive(Clone, Debug, PartialEq)]
pub struct Standings {
    pub players: Vec<Standing<PlayerId>>,
    pub decks: Vec<Standing<DeckId>>,
}

impl Standings {
    /// `game` restricts the tables to that game's results.
    pub fn compute(results: &[GameResult], game: Option<Game>, roster: &Roster) -> Self {
        let in_scope = |result: &&GameResult| game.map_or(true, |game| result.game == game);
        Self {
            players: player_standings(results.iter().filter(in_scope), roster),
            decks: deck_standings(results.iter().filter(in_scope), roster),
        }
    }
}

pub fn player_standings<'r>(
    results: impl IntoIterator<Item = &'r GameResult>,
    roster: &Roster,
) -> Vec<Standing<PlayerId>> {
    let matchups = results.into_iter().map(|result| Matchup {
        first: &result.player1,
        second: &result.player2,
        winner: &result.winner,
    });
    tabulate(matchups, |id| roster.player_name(id))
}

/// The winning deck is the one played by `winner`, falling back to
/// `player2Deck` when `winner` is not `player1`.
pub fn deck_standings<'r>(
    results: impl IntoIterator<Item = &'r GameResult>,
    roster: &Roster,
) -> Vec<Standing<DeckId>> {
    let matchups = results.into_iter().map(|result| Matchup {
        first: &result.player1_deck,
        second: &result.player2_deck,
        winner: result.winning_deck(),
    });
    tabulate(matchups, |id| roster.deck_name(id))
}

struct Matchup<'r, Id> {
    first: &'r Id,
    second: &'r Id,
    winner: &'r Id,
}

struct Tally {
    name: String,
    wins: u32,
    total: u32,
}

fn tabulate<'r, 'n, Id, N>(
    matchups: impl Iterator<Item = Matchup<'r, Id>>,
    name_of: N,
) -> Vec<Standing<Id>>
where
    Id: Clone + Eq + Hash + 'r,
    N: Fn(&Id) -> &'n str,
{
    let mut table: IndexMap<&Id, Tally> = IndexMap::new();

    for matchup in matchups {
        for id in [matchup.first, matchup.second] {
            let tally = table.entry(id).or_insert_with(|| Tally {
                name: name_of(id).to_string(),
                wins: 0,
                total: 0,
            });
            tally.total += 1;
        }
        // a winner that played in neither seat is credited to nobody
        if matchup.winner == matchup.first || matchup.winner == matchup.second {
            if let Some(tally) = table.get_mut(matchup.winner) {
                tally.wins += 1;
            }
        }
    }

    table
        .into_iter()
        .map(|(id, tally)| Standing {
            id: id.clone(),
            name: tally.name,
            wins: tally.wins,
            total: tally.total,
            winrate: winrate(tally.wins, tally.total),
        })
        // sorted_by is stable
        .sorted_by(|a, b| b.winrate.total_cmp(&a.winrate))
        .collect()
}

fn winrate(wins: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = f64::from(wins) / f64::from(total) * 100.0;
    (percent * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use types::{Deck, NewResult, Player};

    use super::*;

    struct Fixture {
        players: Vec<Player>,
        decks: Vec<Deck>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                players: ["A", "B", "C"].map(|name| Player::new(name)).to_vec(),
                decks: ["X", "Y", "Z"].map(|name| Deck::new(Game::Lorcana, name)).to_vec(),
            }
        }

        fn result(&self, p1: usize, d1: usize, p2: usize, d2: usize, winner: usize) -> GameResult {
            GameResult::record(NewResult {
                game: Game::Lorcana,
                player1: self.players[p1].id.clone(),
                player1_deck: self.decks[d1].id.clone(),
                player2: self.players[p2].id.clone(),
                player2_deck: self.decks[d2].id.clone(),
                winner: self.players[winner].id.clone(),
            })
        }

        fn roster(&self) -> Roster<'_> {
            Roster::new(&self.players, &self.decks)
        }
    }

    fn lines<Id>(standings: &[Standing<Id>]) -> Vec<String> {
        standings.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_two_match_example() {
        let f = Fixture::new();
        let results = vec![f.result(0, 0, 1, 1, 0), f.result(0, 0, 2, 2, 2)];
        let roster = f.roster();

        let players = player_standings(&results, &roster);
        assert_eq!(
            lines(&players),
            ["C: 1W-0L (100.0%)", "A: 1W-1L (50.0%)", "B: 0W-1L (0.0%)"]
        );

        let decks = deck_standings(&results, &roster);
        assert_eq!(
            lines(&decks),
            ["Z: 1W-0L (100.0%)", "X: 1W-1L (50.0%)", "Y: 0W-1L (0.0%)"]
        );
        assert_eq!(decks[0].id, f.decks[2].id);
    }

    #[test]
    fn test_equal_winrates_keep_first_seen_order() {
        let f = Fixture::new();
        // C is seen before B; both end on 0%
        let results = vec![f.result(0, 0, 2, 2, 0), f.result(0, 0, 1, 1, 0)];

        let players = player_standings(&results, &f.roster());
        let names: Vec<_> = players.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["A", "C", "B"]);
    }

    #[test]
    fn test_empty_history_gives_empty_tables() {
        let f = Fixture::new();
        let standings = Standings::compute(&[], None, &f.roster());
        assert!(standings.players.is_empty());
        assert!(standings.decks.is_empty());
    }

    #[test]
    fn test_winrate_is_rounded_to_one_decimal() {
        let f = Fixture::new();
        let results = vec![
            f.result(0, 0, 1, 1, 0),
            f.result(0, 0, 1, 1, 0),
            f.result(0, 0, 1, 1, 1),
        ];

        let players = player_standings(&results, &f.roster());
        assert_eq!(players[0].winrate, 66.7);
        assert_eq!(players[1].winrate, 33.3);
        assert_eq!(players[0].losses(), 1);
    }

    #[test]
    fn test_corrupt_winner_credits_player2_deck_but_no_player() {
        let f = Fixture::new();
        let mut result = f.result(0, 0, 1, 1, 0);
        result.winner = PlayerId::from("stranger");
        let results = vec![result];
        let roster = f.roster();

        let players = player_standings(&results, &roster);
        assert!(players.iter().all(|s| s.wins == 0));

        let decks = deck_standings(&results, &roster);
        assert_eq!(lines(&decks), ["Y: 1W-0L (100.0%)", "X: 0W-1L (0.0%)"]);
    }

    #[test]
    fn test_deleted_records_show_as_unknown() {
        let f = Fixture::new();
        let results = vec![f.result(0, 0, 1, 1, 0)];
        let roster = Roster::new(&f.players[1..], &f.decks[1..]);

        let standings = Standings::compute(&results, None, &roster);
        assert_eq!(standings.players[0].name, crate::UNKNOWN_PLAYER);
        assert_eq!(standings.decks[0].name, crate::UNKNOWN_DECK);
    }

    #[test]
    fn test_game_filter() {
        let f = Fixture::new();
        let mut gwent = f.result(0, 0, 1, 1, 1);
        gwent.game = Game::Gwent;
        let results = vec![f.result(0, 0, 2, 2, 0), gwent];

        let lorcana = Standings::compute(&results, Some(Game::Lorcana), &f.roster());
        assert_eq!(lines(&lorcana.players), ["A: 1W-0L (100.0%)", "C: 0W-1L (0.0%)"]);

        let all = Standings::compute(&results, None, &f.roster());
        assert_eq!(all.players.len(), 3);
        assert_eq!(all.decks.len(), 3);
    }
}
