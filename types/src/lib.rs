pub mod date;
pub mod deck;
pub mod draft;
pub mod error;
pub mod game;
pub mod game_result;
pub mod ids;
pub mod player;

pub use deck::{Deck, DeckPatch};
pub use draft::{validate_name, ResultDraft};
pub use error::ValidationError;
pub use game::Game;
pub use game_result::{GameResult, NewResult, ResultPatch};
pub use ids::{DeckId, PlayerId, ResultId};
pub use player::{Player, PlayerPatch};
