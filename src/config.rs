//! Game configuration: board size and the ordered player list.

use serde::{Deserialize, Serialize};

use crate::error::{BlokusError, Result};
use crate::player::Player;

pub const MIN_BOARD_SIZE: usize = 2;
pub const MAX_BOARD_SIZE: usize = 1024;

/// One starting corner per player, so at most four players.
pub const MAX_PLAYERS: usize = 4;

/// Board size plus the players in turn order.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: usize,
    pub players: Vec<Player>,
}

impl GameConfig {
    pub fn new(size: usize, players: Vec<Player>) -> GameConfig {
        GameConfig { size, players }
    }

    /// Players 1 and 2 on a `size` × `size` board.
    pub fn two_player(size: usize) -> GameConfig {
        GameConfig::new(size, vec![Player::ONE, Player::TWO])
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<GameConfig> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_setup(self.size, &self.players)
    }
}

impl Default for GameConfig {
    /// Classic four-player 20×20 game.
    fn default() -> Self {
        GameConfig::new(20, (1..=4).map(Player).collect())
    }
}

/// Shared by `GameConfig::validate` and `BoardState::reset`.
pub(crate) fn validate_setup(size: usize, players: &[Player]) -> Result<()> {
    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        return Err(BlokusError::InvalidBoardSize {
            size,
            min: MIN_BOARD_SIZE,
            max: MAX_BOARD_SIZE,
        });
    }
    if players.is_empty() {
        return Err(BlokusError::NoPlayers);
    }
    if players.len() > MAX_PLAYERS {
        return Err(BlokusError::TooManyPlayers {
            count: players.len(),
            max: MAX_PLAYERS,
        });
    }
    for (i, p) in players.iter().enumerate() {
        if !p.is_valid() {
            return Err(BlokusError::InvalidPlayerId);
        }
        if players[..i].contains(p) {
            return Err(BlokusError::DuplicatePlayer(*p));
        }
    }
    Ok(())
}
