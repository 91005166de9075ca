use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{date, DeckId, Game, PlayerId, ResultId};

/// One recorded match between two players.
///
/// The store does not check that the two players and decks differ or that
/// `winner` is one of the participants; see [`crate::ResultDraft`] for that.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub id: ResultId,
    pub game: Game,
    pub player1: PlayerId,
    pub player1_deck: DeckId,
    pub player2: PlayerId,
    pub player2_deck: DeckId,
    pub winner: PlayerId,
    #[serde(with = "date::iso_millis")]
    pub date: DateTime<Utc>,
}

impl GameResult {
    /// Stamps a new result with a fresh id and the current time.
    pub fn record(new: NewResult) -> Self {
        Self {
            id: ResultId::generate(),
            game: new.game,
            player1: new.player1,
            player1_deck: new.player1_deck,
            player2: new.player2,
            player2_deck: new.player2_deck,
            winner: new.winner,
            date: date::now(),
        }
    }

    pub fn player1_won(&self) -> bool {
        self.winner == self.player1
    }

    /// Anything that is not player 1 counts as player 2 winning, including a
    /// winner id that matches neither participant.
    pub fn winning_deck(&self) -> &DeckId {
        if self.player1_won() {
            &self.player1_deck
        } else {
            &self.player2_deck
        }
    }

    pub fn losing_player(&self) -> &PlayerId {
        if self.player1_won() {
            &self.player2
        } else {
            &self.player1
        }
    }

    pub fn losing_deck(&self) -> &DeckId {
        if self.player1_won() {
            &self.player2_deck
        } else {
            &self.player1_deck
        }
    }
}

/// A result as submitted, before the store assigns an id and date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewResult {
    pub game: Game,
    pub player1: PlayerId,
    pub player1_deck: DeckId,
    pub player2: PlayerId,
    pub player2_deck: DeckId,
    pub winner: PlayerId,
}

/// Field-by-field update; `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultPatch {
    pub game: Option<Game>,
    pub player1: Option<PlayerId>,
    pub player1_deck: Option<DeckId>,
    pub player2: Option<PlayerId>,
    pub player2_deck: Option<DeckId>,
    pub winner: Option<PlayerId>,
    pub date: Option<DateTime<Utc>>,
}

impl ResultPatch {
    pub fn winner(winner: PlayerId) -> Self {
        Self {
            winner: Some(winner),
            ..Default::default()
        }
    }

    pub fn apply_to(self, result: &mut GameResult) {
        if let Some(game) = self.game {
            result.game = game;
        }
        if let Some(player1) = self.player1 {
            result.player1 = player1;
        }
        if let Some(deck) = self.player1_deck {
            result.player1_deck = deck;
        }
        if let Some(player2) = self.player2 {
            result.player2 = player2;
        }
        if let Some(deck) = self.player2_deck {
            result.player2_deck = deck;
        }
        if let Some(winner) = self.winner {
            result.winner = winner;
        }
        if let Some(date) = self.date {
            result.date = date;
        }
    }
}

impl From<NewResult> for ResultPatch {
    fn from(new: NewResult) -> Self {
        Self {
            game: Some(new.game),
            player1: Some(new.player1),
            player1_deck: Some(new.player1_deck),
            player2: Some(new.player2),
            player2_deck: Some(new.player2_deck),
            winner: Some(new.winner),
            date: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(winner: &str) -> GameResult {
        GameResult::record(NewResult {
            game: Game::Gwent,
            player1: "alice".into(),
            player1_deck: "northern".into(),
            player2: "bob".into(),
            player2_deck: "nilfgaard".into(),
            winner: winner.into(),
        })
    }

    #[test]
    fn test_winner_and_loser_resolution() {
        let result = sample("alice");
        assert_eq!(result.winning_deck().as_str(), "northern");
        assert_eq!(result.losing_player().as_str(), "bob");
        assert_eq!(result.losing_deck().as_str(), "nilfgaard");

        let result = sample("bob");
        assert_eq!(result.winning_deck().as_str(), "nilfgaard");
        assert_eq!(result.losing_player().as_str(), "alice");
        assert_eq!(result.losing_deck().as_str(), "northern");
    }

    #[test]
    fn test_unknown_winner_credits_player2_deck() {
        let result = sample("carol");
        assert_eq!(result.winning_deck().as_str(), "nilfgaard");
        assert_eq!(result.losing_player().as_str(), "alice");
    }

    #[test]
    fn test_patch_merges_only_given_fields() {
        let mut result = sample("alice");
        let before = result.clone();
        ResultPatch::winner("bob".into()).apply_to(&mut result);

        assert_eq!(result.winner.as_str(), "bob");
        assert_eq!(result.id, before.id);
        assert_eq!(result.player1_deck, before.player1_deck);
        assert_eq!(result.date, before.date);
    }

    #[test]
    fn test_saved_json_shape() {
        let json = r#"{
            "id": "1714588200000",
            "game": "lorcana",
            "player1": "1714500000000",
            "player1Deck": "1714400000000",
            "player2": "1714500000001",
            "player2Deck": "1714400000001",
            "winner": "1714500000001",
            "date": "2024-05-01T18:30:00.000Z"
        }"#;
        let result: GameResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.game, Game::Lorcana);
        assert_eq!(result.player2_deck.as_str(), "1714400000001");
        assert!(!result.player1_won());

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["player1Deck"], "1714400000000");
        assert_eq!(value["date"], "2024-05-01T18:30:00.000Z");
    }
}
