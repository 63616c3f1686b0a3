//! Anomalies the engine absorbs instead of surfacing
//!
//! None of these reach the player. Operations that can be refused return them
//! so hosts and tests can see why, and the host logs and drops them.

use super::scheduler::{Generation, TaskKind};
use super::state::GamePhase;

/// Player/host actions that are only legal in some phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Click,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Anomaly {
    /// A tile has zero area and can never be hit
    GeometryDegenerate { tile: usize },
    /// A timer fired after its round or session was replaced
    StaleCallback {
        task: TaskKind,
        scheduled: Generation,
        current: Generation,
    },
    /// An action arrived in a phase that forbids it
    InvalidTransition { action: Action, phase: GamePhase },
}

impl std::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GeometryDegenerate { tile } => write!(f, "tile {} has zero area", tile),
            Self::StaleCallback {
                task,
                scheduled,
                current,
            } => write!(
                f,
                "stale {:?} from generation {} (current {})",
                task, scheduled.0, current.0
            ),
            Self::InvalidTransition { action, phase } => {
                write!(f, "{:?} not allowed during {:?}", action, phase)
            }
        }
    }
}

impl std::error::Error for Anomaly {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = Anomaly::InvalidTransition {
            action: Action::Click,
            phase: GamePhase::Playback,
        };
        assert_eq!(e.to_string(), "Click not allowed during Playback");

        let e = Anomaly::StaleCallback {
            task: TaskKind::PlaybackDone,
            scheduled: Generation(2),
            current: Generation(3),
        };
        assert_eq!(e.to_string(), "stale PlaybackDone from generation 2 (current 3)");
    }
}
