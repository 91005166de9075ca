use std::fmt::Display;

use serde::{de::DeserializeOwned, Serialize};
use types::{Deck, DeckId, DeckPatch, GameResult, Player, PlayerId, PlayerPatch, ResultId, ResultPatch};

/// The backing-store key a collection is saved under.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Decks,
    Players,
    Results,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 3] = [
        CollectionKey::Decks,
        CollectionKey::Players,
        CollectionKey::Results,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKey::Decks => "decks",
            CollectionKey::Players => "players",
            CollectionKey::Results => "results",
        }
    }
}

impl Display for CollectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a freshly added record goes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    Append,
    /// Newest first.
    Prepend,
}

pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: PartialEq + Display;
    type Patch;

    const KEY: CollectionKey;
    const PLACEMENT: Placement;

    fn id(&self) -> &Self::Id;
    fn apply(&mut self, patch: Self::Patch);
}

impl Record for Deck {
    type Id = DeckId;
    type Patch = DeckPatch;

    const KEY: CollectionKey = CollectionKey::Decks;
    const PLACEMENT: Placement = Placement::Append;

    fn id(&self) -> &DeckId {
        &self.id
    }

    fn apply(&mut self, patch: DeckPatch) {
        patch.apply_to(self);
    }
}

impl Record for Player {
    type Id = PlayerId;
    type Patch = PlayerPatch;

    const KEY: CollectionKey = CollectionKey::Players;
    const PLACEMENT: Placement = Placement::Append;

    fn id(&self) -> &PlayerId {
        &self.id
    }

    fn apply(&mut self, patch: PlayerPatch) {
        patch.apply_to(self);
    }
}

impl Record for GameResult {
    type Id = ResultId;
    type Patch = ResultPatch;

    const KEY: CollectionKey = CollectionKey::Results;
    const PLACEMENT: Placement = Placement::Prepend;

    fn id(&self) -> &ResultId {
        &self.id
    }

    fn apply(&mut self, patch: ResultPatch) {
        patch.apply_to(self);
    }
}
