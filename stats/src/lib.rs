pub mod history;
pub mod names;
pub mod standings;

pub use history::{format_date, history, HistoryEntry};
pub use names::{Roster, UNKNOWN_DECK, UNKNOWN_PLAYER};
pub use standings::{deck_standings, player_standings, Standing, Standings};
