use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use types::Game;

/// Decks, players and match history for Pokémon TCG, Lorcana and Gwent.
#[derive(Parser, Debug)]
#[command(name = "journal")]
pub struct Params {
    /// SQLite file or `sqlite:` URL; overrides TCG_JOURNAL_DATABASE and the
    /// config file
    #[arg(long)]
    pub database: Option<String>,

    /// YAML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(subcommand)]
    Deck(DeckCommand),
    #[command(subcommand)]
    Player(PlayerCommand),
    #[command(subcommand)]
    Result(ResultCommand),
    /// Matches for one game, newest first
    History {
        #[arg(short, long)]
        game: Game,
    },
    /// Win rates per player and per deck
    Stats {
        /// Limit to one game; all games when omitted
        #[arg(short, long)]
        game: Option<Game>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DeckCommand {
    Add {
        #[arg(short, long)]
        game: Game,
        name: String,
    },
    Rename {
        deck: String,
        name: String,
    },
    Delete {
        deck: String,
    },
    List {
        #[arg(short, long)]
        game: Option<Game>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PlayerCommand {
    Add { name: String },
    Rename { player: String, name: String },
    Delete { player: String },
    List,
}

/// Players and decks may be given by id or by name.
#[derive(Subcommand, Debug)]
pub enum ResultCommand {
    Add {
        #[arg(short, long)]
        game: Game,
        #[command(flatten)]
        seats: Seats,
    },
    Edit {
        result: String,
        #[command(flatten)]
        seats: Seats,
    },
    Delete {
        result: String,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct Seats {
    #[arg(long)]
    pub player1: Option<String>,
    #[arg(long)]
    pub deck1: Option<String>,
    #[arg(long)]
    pub player2: Option<String>,
    #[arg(long)]
    pub deck2: Option<String>,
    #[arg(long)]
    pub winner: Option<String>,
}
