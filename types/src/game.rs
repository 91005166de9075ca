use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    Pokemon,
    Lorcana,
    Gwent,
}

impl Game {
    pub const ALL: [Game; 3] = [Game::Pokemon, Game::Lorcana, Game::Gwent];

    /// The key used in saved records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Game::Pokemon => "pokemon",
            Game::Lorcana => "lorcana",
            Game::Gwent => "gwent",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Game::Pokemon => "Pokémon TCG",
            Game::Lorcana => "Lorcana",
            Game::Gwent => "Gwent",
        }
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl FromStr for Game {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Game::ALL
            .into_iter()
            .find(|game| game.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownGame(s.to_string()))
    }
}
