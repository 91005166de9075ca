//! Integration tests for the record store on top of the SQLite backend.

use std::sync::Arc;

use storage::{
    CollectionKey, KeyValueStore, MemoryKeyValueStore, RecordStore, SqliteKeyValueStore,
    StoreConfig,
};
use types::{Game, NewResult};

async fn open_file_store(path: &std::path::Path) -> Arc<SqliteKeyValueStore> {
    let config = StoreConfig::from_cli_or_env_or_yaml(Some(path.display().to_string()), None);
    Arc::new(config.connect().await.expect("Failed to open database"))
}

/// Data written through one store is what the next session loads.
#[tokio::test]
async fn test_sqlite_store_survives_restart() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("journal.db");

    let store = RecordStore::open(open_file_store(&path).await).await;
    let (ash, _) = store.add_player("Ash");
    let (gary, _) = store.add_player("Gary");
    let (pikachu, _) = store.add_deck(Game::Pokemon, "Pikachu ex");
    let (eevee, _) = store.add_deck(Game::Pokemon, "Eevee Box");
    store.add_result(NewResult {
        game: Game::Pokemon,
        player1: ash.clone(),
        player1_deck: pikachu,
        player2: gary,
        player2_deck: eevee,
        winner: ash,
    });
    for key in CollectionKey::ALL {
        store
            .persist(key)
            .wait()
            .await
            .expect("Failed to persist collection");
    }
    drop(store);

    let reopened = RecordStore::open(open_file_store(&path).await).await;
    assert_eq!(reopened.players().len(), 2);
    assert_eq!(reopened.decks_for_game(Game::Pokemon).len(), 2);
    let results = reopened.results();
    assert_eq!(results.len(), 1);
    assert!(results[0].player1_won());
}

/// Saved data from older installs: timestamp ids, camelCase keys and
/// millisecond dates, newest result first.
#[tokio::test]
async fn test_loads_existing_saved_data() {
    let backend = MemoryKeyValueStore::with_items([
        (
            "decks",
            r#"[{"id":"1714400000000","game":"lorcana","name":"Amber/Amethyst"},
                {"id":"1714400000001","game":"lorcana","name":"Ruby/Sapphire"}]"#,
        ),
        (
            "players",
            r#"[{"id":"1714500000000","name":"Mickey"},{"id":"1714500000001","name":"Minnie"}]"#,
        ),
        (
            "results",
            r#"[{"id":"1714588200000","game":"lorcana","player1":"1714500000000",
                 "player1Deck":"1714400000000","player2":"1714500000001",
                 "player2Deck":"1714400000001","winner":"1714500000001",
                 "date":"2024-05-01T18:30:00.000Z"}]"#,
        ),
    ]);

    let store = RecordStore::open(Arc::new(backend.clone())).await;
    assert_eq!(store.decks().len(), 2);
    assert_eq!(store.players()[1].name, "Minnie");
    let result = &store.results()[0];
    assert_eq!(result.id.as_str(), "1714588200000");
    assert_eq!(result.winning_deck().as_str(), "1714400000001");

    // rewriting keeps the same shape
    store
        .persist(CollectionKey::Results)
        .wait()
        .await
        .expect("Failed to persist results");
    let saved = backend.get_item("results").await.unwrap().unwrap();
    let saved: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(saved[0]["player2Deck"], "1714400000001");
    assert_eq!(saved[0]["date"], "2024-05-01T18:30:00.000Z");
}

/// Any backend can sit behind the store as a trait object.
#[tokio::test]
async fn test_backends_as_trait_objects() {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to connect");
    let sqlite: Arc<dyn KeyValueStore> = Arc::new(
        SqliteKeyValueStore::connect(pool)
            .await
            .expect("Failed to create table"),
    );
    let memory: Arc<dyn KeyValueStore> = Arc::new(MemoryKeyValueStore::new());

    for backend in [sqlite, memory] {
        let store = RecordStore::open(Arc::clone(&backend)).await;
        store
            .add_deck(Game::Gwent, "Syndicate")
            .1
            .wait()
            .await
            .expect("Failed to persist deck");

        let saved = backend.get_item("decks").await.unwrap().unwrap();
        assert!(saved.contains("Syndicate"));
    }
}

/// Results may be shared across tasks behind an `Arc` and mutated
/// concurrently; every write lands and the last save holds everything.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_are_not_lost() {
    let backend = MemoryKeyValueStore::new();
    let store = Arc::new(RecordStore::open(Arc::new(backend.clone())).await);

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.add_player(format!("Player {i}")).1.wait().await })
        })
        .collect();
    for task in tasks {
        task.await
            .expect("Task panicked")
            .expect("Failed to persist player");
    }

    assert_eq!(store.players().len(), 16);
    let saved = backend.get_item("players").await.unwrap().unwrap();
    let saved: Vec<types::Player> = serde_json::from_str(&saved).unwrap();
    assert_eq!(saved, store.players());
}
