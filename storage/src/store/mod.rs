//! The in-memory record store.
//!
//! [`RecordStore`] owns the deck, player and result lists. Every mutation is
//! applied in memory before the call returns, then a snapshot of the whole
//! list is queued for the backing store. Callers that care whether the write
//! landed can await the returned [`PersistHandle`]; everyone else drops it.
//!
//! Nothing here checks references between records: a result may name decks
//! or players that were deleted (or never existed). Display code resolves
//! those with a fallback name.

mod collection;
mod persist;
mod record;

use std::sync::Arc;

use types::{
    Deck, DeckId, DeckPatch, Game, GameResult, NewResult, Player, PlayerId, PlayerPatch,
    ResultId, ResultPatch,
};

use crate::{
    backend::{KeyValueStore, MemoryKeyValueStore},
    StorageError,
};
use collection::Collection;
use persist::PersistQueue;

pub use persist::PersistHandle;
pub use record::{CollectionKey, Placement, Record};

pub struct RecordStore {
    decks: Collection<Deck>,
    players: Collection<Player>,
    results: Collection<GameResult>,
}

impl RecordStore {
    /// Loads all three collections from `backend` and starts their writers.
    ///
    /// A key that is missing, unreadable or unparsable yields an empty
    /// collection; the failure is logged and not retried.
    pub async fn open(backend: Arc<dyn KeyValueStore>) -> Self {
        let decks = Self::open_collection::<Deck>(&backend).await;
        let players = Self::open_collection::<Player>(&backend).await;
        let results = Self::open_collection::<GameResult>(&backend).await;
        Self {
            decks,
            players,
            results,
        }
    }

    /// A store backed by a fresh [`MemoryKeyValueStore`].
    pub async fn in_memory() -> Self {
        Self::open(Arc::new(MemoryKeyValueStore::new())).await
    }

    async fn open_collection<T: Record>(backend: &Arc<dyn KeyValueStore>) -> Collection<T> {
        let items = match load::<T>(backend.as_ref()).await {
            Ok(items) => {
                tracing::info!("Loaded {} {}", items.len(), T::KEY);
                items
            }
            Err(e) => {
                tracing::error!("Error loading {}: {e}", T::KEY);
                Vec::new()
            }
        };
        Collection::new(items, PersistQueue::spawn(T::KEY, Arc::clone(backend)))
    }

    pub fn decks(&self) -> Vec<Deck> {
        self.decks.snapshot()
    }

    pub fn decks_for_game(&self, game: Game) -> Vec<Deck> {
        self.decks.filtered(|deck| deck.game == game)
    }

    pub fn deck(&self, id: &DeckId) -> Option<Deck> {
        self.decks.get(id)
    }

    pub fn add_deck(&self, game: Game, name: impl Into<String>) -> (DeckId, PersistHandle) {
        let deck = Deck::new(game, name);
        let id = deck.id.clone();
        (id, self.decks.insert(deck))
    }

    pub fn update_deck(&self, id: &DeckId, name: impl Into<String>) -> PersistHandle {
        self.decks.update(id, DeckPatch::rename(name))
    }

    /// Results that reference the deck are left alone.
    pub fn delete_deck(&self, id: &DeckId) -> PersistHandle {
        self.decks.remove(id)
    }

    pub fn players(&self) -> Vec<Player> {
        self.players.snapshot()
    }

    pub fn player(&self, id: &PlayerId) -> Option<Player> {
        self.players.get(id)
    }

    pub fn add_player(&self, name: impl Into<String>) -> (PlayerId, PersistHandle) {
        let player = Player::new(name);
        let id = player.id.clone();
        (id, self.players.insert(player))
    }

    pub fn update_player(&self, id: &PlayerId, name: impl Into<String>) -> PersistHandle {
        self.players.update(id, PlayerPatch::rename(name))
    }

    /// Results that reference the player are left alone.
    pub fn delete_player(&self, id: &PlayerId) -> PersistHandle {
        self.players.remove(id)
    }

    /// Newest first.
    pub fn results(&self) -> Vec<GameResult> {
        self.results.snapshot()
    }

    pub fn results_for_game(&self, game: Game) -> Vec<GameResult> {
        self.results.filtered(|result| result.game == game)
    }

    pub fn result(&self, id: &ResultId) -> Option<GameResult> {
        self.results.get(id)
    }

    /// Stamps the result with a new id and the current time and puts it at
    /// the front of the history. The fields are stored as given.
    pub fn add_result(&self, new: NewResult) -> (ResultId, PersistHandle) {
        let result = GameResult::record(new);
        let id = result.id.clone();
        (id, self.results.insert(result))
    }

    pub fn update_result(&self, id: &ResultId, patch: ResultPatch) -> PersistHandle {
        self.results.update(id, patch)
    }

    pub fn delete_result(&self, id: &ResultId) -> PersistHandle {
        self.results.remove(id)
    }

    /// Queues a write of the current contents of one collection, e.g. to
    /// retry after a handle reported a failure.
    pub fn persist(&self, key: CollectionKey) -> PersistHandle {
        match key {
            CollectionKey::Decks => self.decks.persist(),
            CollectionKey::Players => self.players.persist(),
            CollectionKey::Results => self.results.persist(),
        }
    }
}

async fn load<T: Record>(backend: &dyn KeyValueStore) -> Result<Vec<T>, StorageError> {
    match backend.get_item(T::KEY.as_str()).await? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}
