use thiserror::Error;

/// Input problems caught before anything reaches the record store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Please select different players")]
    SamePlayers,

    #[error("Please select different decks")]
    SameDecks,

    #[error("Winner must be Player 1 or Player 2")]
    WinnerNotParticipant,

    #[error("Name must not be blank")]
    BlankName,

    #[error("Unknown game: {0}")]
    UnknownGame(String),
}
