//! Game session state
//!
//! Everything a single game mutates lives in [`GameSession`]; the state machine
//! is its only writer.

use serde::{Deserialize, Serialize};

use super::scheduler::Generation;
use super::sequence::{SessionRng, seeded_rng};
use crate::consts::*;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing started yet
    #[default]
    Idle,
    /// The sequence is being shown; clicks are ignored
    Playback,
    /// The player reproduces the sequence
    Input,
    /// The player made a mistake; waits for a new start
    GameOver,
}

impl GamePhase {
    /// Whether the start control may begin a new game
    pub fn can_start(self) -> bool {
        matches!(self, GamePhase::Idle | GamePhase::GameOver)
    }
}

/// Status line shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusMessage {
    Watch,
    YourTurn,
    GoodJob,
    GameOver { cleared: usize },
}

impl std::fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusMessage::Watch => f.write_str("Watch the sequence!"),
            StatusMessage::YourTurn => f.write_str("Your turn!"),
            StatusMessage::GoodJob => f.write_str("Good job! Watch the next sequence!"),
            StatusMessage::GameOver { cleared } => {
                write!(f, "Game Over! You cleared level: {}", cleared)
            }
        }
    }
}

/// What the control surface displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub status: Option<StatusMessage>,
    /// Current level (sequence length)
    pub level: usize,
    pub start_enabled: bool,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            status: None,
            level: 0,
            start_enabled: true,
        }
    }
}

/// One game, from start to game over
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Tiles the player must reproduce, in order
    pub sequence: Vec<usize>,
    /// Tiles entered so far this round
    pub progress: Vec<usize>,
    pub phase: GamePhase,
    /// Time slot per flashed step (ms)
    pub flash_delay_ms: u64,
    /// Pause after a cleared round (ms)
    pub round_pause_ms: u64,
    /// Number of tiles steps are drawn from
    pub tile_count: usize,
    /// Current round tag; timers from older generations are ignored
    pub generation: Generation,
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: SessionRng,
    pub hud: Hud,
}

impl GameSession {
    /// Fresh idle session with default timings
    pub fn new(seed: u64) -> Self {
        Self {
            sequence: Vec::new(),
            progress: Vec::new(),
            phase: GamePhase::Idle,
            flash_delay_ms: FLASH_DELAY_MS,
            round_pause_ms: ROUND_PAUSE_MS,
            tile_count: TILE_COUNT,
            generation: Generation::default(),
            seed,
            rng: seeded_rng(seed),
            hud: Hud::default(),
        }
    }

    /// Current level: the length of the sequence being played
    pub fn level(&self) -> usize {
        self.sequence.len()
    }

    /// Last fully cleared level
    pub fn cleared_level(&self) -> usize {
        self.sequence.len().saturating_sub(1)
    }

    /// How long a flash stays lit
    pub fn flash_window_ms(&self) -> u64 {
        self.flash_delay_ms / 2
    }

    /// Tile the player must click next, if the round still expects one
    pub fn expected_next(&self) -> Option<usize> {
        self.sequence.get(self.progress.len()).copied()
    }
}
