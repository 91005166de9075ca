use serde::{Deserialize, Serialize};

use crate::{DeckId, Game};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: DeckId,
    pub game: Game,
    pub name: String,
}

impl Deck {
    pub fn new(game: Game, name: impl Into<String>) -> Self {
        Self {
            id: DeckId::generate(),
            game,
            name: name.into(),
        }
    }
}

/// Decks are only ever renamed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeckPatch {
    pub name: Option<String>,
}

impl DeckPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub fn apply_to(self, deck: &mut Deck) {
        if let Some(name) = self.name {
            deck.name = name;
        }
    }
}
