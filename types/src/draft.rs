use crate::{DeckId, Game, GameResult, NewResult, PlayerId, ValidationError};

/// A result form as the user fills it in. Every selection is optional until
/// [`ResultDraft::validate`] is called.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultDraft {
    pub game: Game,
    pub player1: Option<PlayerId>,
    pub player1_deck: Option<DeckId>,
    pub player2: Option<PlayerId>,
    pub player2_deck: Option<DeckId>,
    pub winner: Option<PlayerId>,
}

impl ResultDraft {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            player1: None,
            player1_deck: None,
            player2: None,
            player2_deck: None,
            winner: None,
        }
    }

    /// Pre-fills the form from a stored result for editing.
    pub fn from_result(result: &GameResult) -> Self {
        Self {
            game: result.game,
            player1: Some(result.player1.clone()),
            player1_deck: Some(result.player1_deck.clone()),
            player2: Some(result.player2.clone()),
            player2_deck: Some(result.player2_deck.clone()),
            winner: Some(result.winner.clone()),
        }
    }

    pub fn validate(self) -> Result<NewResult, ValidationError> {
        let (Some(player1), Some(player1_deck), Some(player2), Some(player2_deck), Some(winner)) = (
            self.player1,
            self.player1_deck,
            self.player2,
            self.player2_deck,
            self.winner,
        ) else {
            return Err(ValidationError::MissingFields);
        };

        if player1 == player2 {
            return Err(ValidationError::SamePlayers);
        }
        if player1_deck == player2_deck {
            return Err(ValidationError::SameDecks);
        }
        if winner != player1 && winner != player2 {
            return Err(ValidationError::WinnerNotParticipant);
        }

        Ok(NewResult {
            game: self.game,
            player1,
            player1_deck,
            player2,
            player2_deck,
            winner,
        })
    }
}

/// Trims a deck or player name, rejecting names that are empty once trimmed.
pub fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::BlankName);
    }
    Ok(name.to_string())
}
