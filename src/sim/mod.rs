//! Game engine
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Time comes from the host, in integer milliseconds
//! - Seeded RNG only
//! - Drawing goes through the `Renderer` trait, never a concrete surface

pub mod board;
pub mod error;
pub mod input;
pub mod machine;
pub mod scheduler;
pub mod sequence;
pub mod state;

pub use board::{Board, Tile, build_board, hit_test, locate_tile};
pub use error::{Action, Anomaly};
pub use input::{ClickOutcome, resolve_click};
pub use machine::Game;
pub use scheduler::{Generation, Task, TaskKind, TimerQueue, schedule_playback};
pub use sequence::{SessionRng, append_step, seeded_rng};
pub use state::{GamePhase, GameSession, Hud, StatusMessage};
