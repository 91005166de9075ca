use std::collections::HashMap;

use types::{Deck, DeckId, Player, PlayerId};

pub const UNKNOWN_PLAYER: &str = "Unknown Player";
pub const UNKNOWN_DECK: &str = "Unknown Deck";

/// Display-name lookup for the ids a result refers to. Ids that no longer
/// exist resolve to a placeholder instead of failing.
#[derive(Debug, Default)]
pub struct Roster<'a> {
    players: HashMap<&'a PlayerId, &'a str>,
    decks: HashMap<&'a DeckId, &'a str>,
}

impl<'a> Roster<'a> {
    pub fn new(players: &'a [Player], decks: &'a [Deck]) -> Self {
        let mut roster = Self::default();
        // first record wins if an id was ever duplicated
        for player in players {
            roster.players.entry(&player.id).or_insert(&player.name);
        }
        for deck in decks {
            roster.decks.entry(&deck.id).or_insert(&deck.name);
        }
        roster
    }

    pub fn player_name(&self, id: &PlayerId) -> &'a str {
        self.players.get(id).copied().unwrap_or(UNKNOWN_PLAYER)
    }

    pub fn deck_name(&self, id: &DeckId) -> &'a str {
        self.decks.get(id).copied().unwrap_or(UNKNOWN_DECK)
    }
}

#[cfg(test)]
mod tests {
    use types::Game;

    use super::*;

    #[test]
    fn test_missing_ids_fall_back() {
        let players = vec![Player::new("Geralt")];
        let decks = vec![Deck::new(Game::Gwent, "Monsters")];
        let roster = Roster::new(&players, &decks);

        assert_eq!(roster.player_name(&players[0].id), "Geralt");
        assert_eq!(roster.deck_name(&decks[0].id), "Monsters");
        assert_eq!(roster.player_name(&PlayerId::from("gone")), UNKNOWN_PLAYER);
        assert_eq!(roster.deck_name(&DeckId::from("gone")), UNKNOWN_DECK);
    }
}
