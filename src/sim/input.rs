//! Click resolution
//!
//! Maps a board-local pointer position to a tile and judges it against the
//! next expected step. Resolution is pure: the state machine applies the result.

use glam::Vec2;

use super::board::Board;
use super::state::{GamePhase, GameSession};

/// Result of a player click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Not the player's turn, or the click missed every tile
    Ignored,
    /// Right tile, more to go this round
    Correct(usize),
    /// Wrong tile, the game is over
    Mismatch(usize),
    /// Right tile and the last one of the round
    RoundComplete(usize),
}

impl ClickOutcome {
    /// Tile that was clicked, if any
    pub fn tile(self) -> Option<usize> {
        match self {
            ClickOutcome::Ignored => None,
            ClickOutcome::Correct(t)
            | ClickOutcome::Mismatch(t)
            | ClickOutcome::RoundComplete(t) => Some(t),
        }
    }
}

/// Judge a click at `point` against the session's next expected step
pub fn resolve_click(point: Vec2, board: &Board, session: &GameSession) -> ClickOutcome {
    if session.phase != GamePhase::Input {
        return ClickOutcome::Ignored;
    }
    let Some(tile) = board.locate(point) else {
        return ClickOutcome::Ignored;
    };
    // Progress is full only between rounds, never while Input is active
    let Some(expected) = session.expected_next() else {
        return ClickOutcome::Ignored;
    };

    if tile != expected {
        ClickOutcome::Mismatch(tile)
    } else if session.progress.len() + 1 == session.sequence.len() {
        ClickOutcome::RoundComplete(tile)
    } else {
        ClickOutcome::Correct(tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_center;
    use crate::consts::*;

    fn setup(sequence: &[usize], progress: &[usize]) -> (Board, GameSession) {
        let board = Board::new(TILE_COUNT, board_center(), BOARD_OUTER_RADIUS);
        let mut session = GameSession::new(0);
        session.sequence = sequence.to_vec();
        session.progress = progress.to_vec();
        session.phase = GamePhase::Input;
        (board, session)
    }

    fn click_on(board: &Board, tile: usize) -> Vec2 {
        board.tiles[tile].centroid()
    }

    #[test]
    fn test_correct_mid_round() {
        let (board, session) = setup(&[4, 1, 7], &[4]);
        assert_eq!(
            resolve_click(click_on(&board, 1), &board, &session),
            ClickOutcome::Correct(1)
        );
    }

    #[test]
    fn test_round_complete_on_last_step() {
        let (board, session) = setup(&[3], &[]);
        assert_eq!(
            resolve_click(click_on(&board, 3), &board, &session),
            ClickOutcome::RoundComplete(3)
        );
    }

    #[test]
    fn test_mismatch() {
        let (board, session) = setup(&[2, 5], &[2]);
        let outcome = resolve_click(click_on(&board, 0), &board, &session);
        assert_eq!(outcome, ClickOutcome::Mismatch(0));
        assert_eq!(outcome.tile(), Some(0));
    }

    #[test]
    fn test_ignored_outside_input() {
        let (board, mut session) = setup(&[3], &[]);
        for phase in [GamePhase::Idle, GamePhase::Playback, GamePhase::GameOver] {
            session.phase = phase;
            assert_eq!(
                resolve_click(click_on(&board, 3), &board, &session),
                ClickOutcome::Ignored
            );
        }
    }

    #[test]
    fn test_ignored_off_board() {
        let (board, session) = setup(&[3], &[]);
        assert_eq!(
            resolve_click(Vec2::new(-50.0, -50.0), &board, &session),
            ClickOutcome::Ignored
        );
    }

    #[test]
    fn test_center_counts_as_first_tile() {
        let (board, session) = setup(&[0, 0], &[]);
        assert_eq!(
            resolve_click(board.center, &board, &session),
            ClickOutcome::Correct(0)
        );
    }
}
