//! Game state machine
//!
//! Idle -> Playback -> Input -> (Playback | GameOver), GameOver -> Playback on start.
//!
//! The host feeds three things in: `start`, `click` and the passage of time via
//! `advance`. Timers are tagged with the session's generation so a restart or a
//! new round silently drops whatever the previous one left pending.

use glam::Vec2;

use super::board::Board;
use super::error::{Action, Anomaly};
use super::input::{ClickOutcome, resolve_click};
use super::scheduler::{Task, TaskKind, TimerQueue, schedule_playback};
use super::sequence::append_step;
use super::state::{GamePhase, GameSession, StatusMessage};
use crate::renderer::{Renderer, draw_board, draw_flash};
use crate::settings::Settings;

/// The engine: one session, its board, and its pending timers
pub struct Game {
    pub session: GameSession,
    pub board: Board,
    timers: TimerQueue<Task>,
}

impl Game {
    /// Idle game built from settings
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let settings = settings.clone().sanitized();
        let board = Board::new(settings.tile_count, crate::board_center(), settings.outer_radius);
        if let Err(e) = board.validate() {
            log::warn!("Board geometry: {}", e);
        }

        let mut session = GameSession::new(settings.seed.unwrap_or(seed));
        session.flash_delay_ms = settings.flash_delay_ms;
        session.round_pause_ms = settings.round_pause_ms;
        session.tile_count = board.len();

        Self {
            session,
            board,
            timers: TimerQueue::new(),
        }
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    /// Timers still waiting to fire (stale ones included until they come due)
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// When the next timer comes due
    pub fn next_due(&self) -> Option<u64> {
        self.timers.next_due()
    }

    /// Begin a new game. Only allowed from Idle or GameOver.
    pub fn start<R: Renderer + ?Sized>(
        &mut self,
        now: u64,
        renderer: &mut R,
    ) -> Result<(), Anomaly> {
        if !self.session.phase.can_start() {
            return Err(Anomaly::InvalidTransition {
                action: Action::Start,
                phase: self.session.phase,
            });
        }

        let session = &mut self.session;
        session.generation = session.generation.next();
        session.sequence.clear();
        session.progress.clear();
        session.hud.start_enabled = false;
        log::info!("Game started (generation {})", session.generation.0);

        // Clear any highlight a stale revert would have removed
        draw_board(renderer, &self.board);
        self.add_step();
        self.begin_playback(now);
        Ok(())
    }

    /// Handle a click at a board-local point
    pub fn click<R: Renderer + ?Sized>(
        &mut self,
        now: u64,
        point: Vec2,
        renderer: &mut R,
    ) -> ClickOutcome {
        if self.session.phase != GamePhase::Input {
            log::debug!(
                "{}",
                Anomaly::InvalidTransition {
                    action: Action::Click,
                    phase: self.session.phase,
                }
            );
            return ClickOutcome::Ignored;
        }

        let outcome = resolve_click(point, &self.board, &self.session);
        let Some(tile) = outcome.tile() else {
            return outcome;
        };

        self.session.progress.push(tile);
        self.flash(now, tile, renderer);

        match outcome {
            ClickOutcome::Correct(_) | ClickOutcome::Ignored => {}
            ClickOutcome::RoundComplete(_) => {
                log::debug!("Round {} cleared", self.session.level());
                // Clicks are ignored from here until the next playback ends
                self.session.phase = GamePhase::Playback;
                self.session.hud.status = Some(StatusMessage::GoodJob);
                self.timers.schedule(
                    now,
                    self.session.round_pause_ms,
                    Task {
                        generation: self.session.generation,
                        kind: TaskKind::NextRound,
                    },
                );
            }
            ClickOutcome::Mismatch(_) => {
                let cleared = self.session.cleared_level();
                log::info!("Game over: clicked {}, cleared level {}", tile, cleared);
                self.session.phase = GamePhase::GameOver;
                self.session.hud.status = Some(StatusMessage::GameOver { cleared });
                self.session.hud.start_enabled = true;
            }
        }
        outcome
    }

    /// Fire every timer due at or before `now`. Returns how many were applied.
    pub fn advance<R: Renderer + ?Sized>(&mut self, now: u64, renderer: &mut R) -> usize {
        let mut applied = 0;
        while let Some((due, task)) = self.timers.pop_due(now) {
            match self.fire(due, task, renderer) {
                Ok(()) => applied += 1,
                Err(e) => log::debug!("{}", e),
            }
        }
        applied
    }

    /// Apply one timer at its own due time
    fn fire<R: Renderer + ?Sized>(
        &mut self,
        due: u64,
        task: Task,
        renderer: &mut R,
    ) -> Result<(), Anomaly> {
        if task.generation != self.session.generation {
            return Err(Anomaly::StaleCallback {
                task: task.kind,
                scheduled: task.generation,
                current: self.session.generation,
            });
        }

        match task.kind {
            TaskKind::Flash { tile } => self.flash(due, tile, renderer),
            TaskKind::Revert => draw_board(renderer, &self.board),
            TaskKind::PlaybackDone => {
                self.session.phase = GamePhase::Input;
                self.session.progress.clear();
                self.session.hud.status = Some(StatusMessage::YourTurn);
                log::debug!("Input phase, {} steps to repeat", self.session.level());
            }
            TaskKind::NextRound => {
                self.session.generation = self.session.generation.next();
                self.add_step();
                self.begin_playback(due);
            }
        }
        Ok(())
    }

    /// Highlight a tile now and schedule its revert
    fn flash<R: Renderer + ?Sized>(&mut self, now: u64, tile: usize, renderer: &mut R) {
        let Some(t) = self.board.tile(tile) else {
            log::warn!("Flash for unknown tile {}", tile);
            return;
        };
        draw_flash(renderer, t);
        self.timers.schedule(
            now,
            self.session.flash_window_ms(),
            Task {
                generation: self.session.generation,
                kind: TaskKind::Revert,
            },
        );
    }

    fn add_step(&mut self) {
        let session = &mut self.session;
        session.sequence = append_step(&session.sequence, session.tile_count, &mut session.rng);
        session.hud.level = session.level();
    }

    fn begin_playback(&mut self, now: u64) {
        let session = &mut self.session;
        session.phase = GamePhase::Playback;
        session.hud.status = Some(StatusMessage::Watch);
        log::debug!("Playback of level {}", session.level());
        schedule_playback(
            &mut self.timers,
            now,
            &session.sequence,
            session.flash_delay_ms,
            session.generation,
        );
    }
}
