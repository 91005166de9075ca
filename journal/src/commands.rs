use std::io::Write;

use itertools::Itertools;
use stats::{Roster, Standings};
use storage::{retry_with_backoff, JournalConfig, PersistHandle, RecordStore, StorageError};
use types::{validate_name, Deck, Game, GameResult, Player, ResultDraft, ResultId, ResultPatch};

use crate::{
    cli::{Command, DeckCommand, PlayerCommand, ResultCommand, Seats},
    CommandError,
};

/// Runs one command against `store`, writing what the user should see to
/// `out`. Returns the writes the command queued; see [`flush`].
pub fn run(
    store: &RecordStore,
    command: Command,
    out: &mut impl Write,
) -> Result<Vec<PersistHandle>, CommandError> {
    match command {
        Command::Deck(command) => deck(store, command, out),
        Command::Player(command) => player(store, command, out),
        Command::Result(command) => result(store, command, out),
        Command::History { game } => {
            show_history(store, game, out)?;
            Ok(Vec::new())
        }
        Command::Stats { game } => {
            show_stats(store, game, out)?;
            Ok(Vec::new())
        }
    }
}

/// Waits for queued writes. A write that failed is retried from the store's
/// current state with backoff before giving up.
pub async fn flush(
    store: &RecordStore,
    handles: Vec<PersistHandle>,
    config: &JournalConfig,
) -> Result<(), StorageError> {
    for handle in handles {
        let key = handle.key();
        if let Err(e) = handle.wait().await {
            log::error!("Saving {key} failed: {e}");
            retry_with_backoff(
                || store.persist(key).wait(),
                config.retries,
                config.retry_delay(),
            )
            .await?;
            log::info!("Saved {key} after retrying");
        }
    }
    Ok(())
}

fn deck(
    store: &RecordStore,
    command: DeckCommand,
    out: &mut impl Write,
) -> Result<Vec<PersistHandle>, CommandError> {
    match command {
        DeckCommand::Add { game, name } => {
            let name = validate_name(&name)?;
            let (id, handle) = store.add_deck(game, &name);
            log::info!("Added deck {id}");
            writeln!(out, "Added {game} deck {name} ({id})")?;
            Ok(vec![handle])
        }
        DeckCommand::Rename { deck, name } => {
            let name = validate_name(&name)?;
            let found = find_deck(store, None, &deck)?;
            writeln!(out, "Renamed {} to {name}", found.name)?;
            Ok(vec![store.update_deck(&found.id, name)])
        }
        DeckCommand::Delete { deck } => {
            let found = find_deck(store, None, &deck)?;
            writeln!(out, "Deleted deck {}", found.name)?;
            Ok(vec![store.delete_deck(&found.id)])
        }
        DeckCommand::List { game } => {
            let decks = match game {
                Some(game) => store.decks_for_game(game),
                None => store.decks(),
            };
            if decks.is_empty() {
                writeln!(out, "No decks yet")?;
            }
            for deck in decks {
                writeln!(out, "{}  {}  [{}]", deck.id, deck.name, deck.game)?;
            }
            Ok(Vec::new())
        }
    }
}

fn player(
    store: &RecordStore,
    command: PlayerCommand,
    out: &mut impl Write,
) -> Result<Vec<PersistHandle>, CommandError> {
    match command {
        PlayerCommand::Add { name } => {
            let name = validate_name(&name)?;
            let (id, handle) = store.add_player(&name);
            log::info!("Added player {id}");
            writeln!(out, "Added player {name} ({id})")?;
            Ok(vec![handle])
        }
        PlayerCommand::Rename { player, name } => {
            let name = validate_name(&name)?;
            let found = find_player(store, &player)?;
            writeln!(out, "Renamed {found} to {name}")?;
            Ok(vec![store.update_player(&found.id, name)])
        }
        PlayerCommand::Delete { player } => {
            let found = find_player(store, &player)?;
            writeln!(out, "Deleted player {found}")?;
            Ok(vec![store.delete_player(&found.id)])
        }
        PlayerCommand::List => {
            let players = store.players();
            if players.is_empty() {
                writeln!(out, "No players yet")?;
            }
            for player in players {
                writeln!(out, "{}  {}", player.id, player.name)?;
            }
            Ok(Vec::new())
        }
    }
}

fn result(
    store: &RecordStore,
    command: ResultCommand,
    out: &mut impl Write,
) -> Result<Vec<PersistHandle>, CommandError> {
    match command {
        ResultCommand::Add { game, seats } => {
            let mut draft = ResultDraft::new(game);
            fill_seats(store, &mut draft, seats)?;
            let new = draft.validate()?;
            let (id, handle) = store.add_result(new);
            log::info!("Added result {id}");
            writeln!(out, "Result added to history ({id})")?;
            Ok(vec![handle])
        }
        ResultCommand::Edit { result, seats } => {
            let found = find_result(store, &result)?;
            let mut draft = ResultDraft::from_result(&found);
            fill_seats(store, &mut draft, seats)?;
            let patch = ResultPatch::from(draft.validate()?);
            writeln!(out, "Updated result {}", found.id)?;
            Ok(vec![store.update_result(&found.id, patch)])
        }
        ResultCommand::Delete { result } => {
            let found = find_result(store, &result)?;
            writeln!(out, "Deleted result {}", found.id)?;
            Ok(vec![store.delete_result(&found.id)])
        }
    }
}

fn show_history(store: &RecordStore, game: Game, out: &mut impl Write) -> Result<(), CommandError> {
    let (players, decks, results) = (store.players(), store.decks(), store.results());
    let entries = stats::history(&results, game, &Roster::new(&players, &decks));

    if entries.is_empty() {
        writeln!(out, "No matches yet")?;
        return Ok(());
    }
    writeln!(out, "{}", entries.iter().join("\n"))?;
    Ok(())
}

fn show_stats(
    store: &RecordStore,
    game: Option<Game>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let (players, decks, results) = (store.players(), store.decks(), store.results());
    let standings = Standings::compute(&results, game, &Roster::new(&players, &decks));

    if standings.players.is_empty() {
        writeln!(out, "No matches yet")?;
        return Ok(());
    }
    writeln!(out, "Players")?;
    writeln!(out, "{}", standings.players.iter().map(|s| format!("  {s}")).join("\n"))?;
    writeln!(out, "Decks")?;
    writeln!(out, "{}", standings.decks.iter().map(|s| format!("  {s}")).join("\n"))?;
    Ok(())
}

/// Overrides whichever seats were given. Decks are looked up among the
/// draft's game only.
fn fill_seats(
    store: &RecordStore,
    draft: &mut ResultDraft,
    seats: Seats,
) -> Result<(), CommandError> {
    if let Some(key) = seats.player1 {
        draft.player1 = Some(find_player(store, &key)?.id);
    }
    if let Some(key) = seats.deck1 {
        draft.player1_deck = Some(find_deck(store, Some(draft.game), &key)?.id);
    }
    if let Some(key) = seats.player2 {
        draft.player2 = Some(find_player(store, &key)?.id);
    }
    if let Some(key) = seats.deck2 {
        draft.player2_deck = Some(find_deck(store, Some(draft.game), &key)?.id);
    }
    if let Some(key) = seats.winner {
        draft.winner = Some(find_player(store, &key)?.id);
    }
    Ok(())
}

// Ids match exactly; names match case-insensitively, first one wins.
fn find_player(store: &RecordStore, key: &str) -> Result<Player, CommandError> {
    let players = store.players();
    players
        .iter()
        .find(|p| p.id.as_str() == key)
        .or_else(|| players.iter().find(|p| p.name.eq_ignore_ascii_case(key.trim())))
        .cloned()
        .ok_or_else(|| CommandError::not_found("player", key))
}

fn find_deck(store: &RecordStore, game: Option<Game>, key: &str) -> Result<Deck, CommandError> {
    let decks = match game {
        Some(game) => store.decks_for_game(game),
        None => store.decks(),
    };
    decks
        .iter()
        .find(|d| d.id.as_str() == key)
        .or_else(|| decks.iter().find(|d| d.name.eq_ignore_ascii_case(key.trim())))
        .cloned()
        .ok_or_else(|| CommandError::not_found("deck", key))
}

fn find_result(store: &RecordStore, key: &str) -> Result<GameResult, CommandError> {
    store
        .result(&ResultId::from(key))
        .ok_or_else(|| CommandError::not_found("result", key))
}
