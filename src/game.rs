//! Driver-facing facade binding a catalog to a configuration.

use std::sync::Arc;

use crate::action::Action;
use crate::catalog::PieceCatalog;
use crate::config::GameConfig;
use crate::error::Result;
use crate::movegen;
use crate::player::Player;
use crate::rules;
use crate::state::BoardState;
use crate::transition::{self, StepResult};

/// A rules engine for one game setup.
///
/// Holds no position itself; every operation takes the state to act on, so
/// one engine serves any number of search branches.
#[derive(Clone, Debug)]
pub struct Blokus {
    catalog: Arc<PieceCatalog>,
    config: GameConfig,
}

impl Blokus {
    pub fn new(catalog: Arc<PieceCatalog>, config: GameConfig) -> Result<Blokus> {
        config.validate()?;
        Ok(Blokus { catalog, config })
    }

    /// Engine over the standard 21-piece set.
    pub fn standard(config: GameConfig) -> Result<Blokus> {
        Blokus::new(Arc::new(PieceCatalog::standard()), config)
    }

    pub fn catalog(&self) -> &PieceCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Initial position for the configured board and players.
    pub fn reset(&self) -> Result<BoardState> {
        BoardState::reset(self.config.size, &self.config.players, &self.catalog)
    }

    pub fn legal_actions(&self, state: &BoardState, player: Player) -> Result<Vec<Action>> {
        movegen::legal_actions(state, &self.catalog, player)
    }

    pub fn is_legal(&self, state: &BoardState, player: Player, action: &Action) -> bool {
        rules::is_legal(state, &self.catalog, player, action)
    }

    /// Like `is_legal`, but says why an action is refused.
    pub fn check_action(&self, state: &BoardState, player: Player, action: &Action) -> Result<()> {
        rules::check_action(state, &self.catalog, player, action)
    }

    pub fn step(&self, state: &BoardState, player: Player, action: &Action) -> Result<StepResult> {
        transition::step(state, &self.catalog, player, action)
    }

    /// True when `player` has no legal action left in `state`.
    pub fn is_player_finished(&self, state: &BoardState, player: Player) -> Result<bool> {
        movegen::has_legal_action(state, &self.catalog, player).map(|any| !any)
    }

    pub fn is_terminal(&self, state: &BoardState) -> bool {
        transition::is_terminal(state, &self.catalog)
    }
}
