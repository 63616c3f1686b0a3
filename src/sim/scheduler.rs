//! Playback scheduling on a single-threaded timer queue
//!
//! The host owns the clock and hands the current time to the engine; nothing
//! here sleeps or spawns. Tasks fire in due-time order, ties in the order they
//! were scheduled.
//!
//! Every task carries the [`Generation`] it was scheduled under. Starting a
//! session or a new round bumps the generation, so timers left over from the
//! previous round are recognised as stale when they come due.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

/// Round/session tag captured by every scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Highlight a tile
    Flash { tile: usize },
    /// Redraw the neutral board after a flash
    Revert,
    /// Playback finished, hand over to the player
    PlaybackDone,
    /// Pause after a cleared round is over, grow the sequence and replay
    NextRound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    pub generation: Generation,
    pub kind: TaskKind,
}

struct Entry<T> {
    due: u64,
    order: u64,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.order == other.order
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Reversed so the max-heap yields the earliest entry first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Deferred callbacks keyed by absolute due time (ms)
pub struct TimerQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_order: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_order: 0,
        }
    }

    /// Run `task` once `delay` ms have passed since `now`
    pub fn schedule(&mut self, now: u64, delay: u64, task: T) {
        let order = self.next_order;
        self.next_order += 1;
        self.heap.push(Entry {
            due: now.saturating_add(delay),
            order,
            task,
        });
    }

    /// Take the earliest task due at or before `now`
    pub fn pop_due(&mut self, now: u64) -> Option<(u64, T)> {
        if self.heap.peek()?.due > now {
            return None;
        }
        self.heap.pop().map(|e| (e.due, e.task))
    }

    /// When the earliest pending task comes due
    pub fn next_due(&self) -> Option<u64> {
        self.heap.peek().map(|e| e.due)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Schedule the replay of `sequence`: one flash per slot of `flash_delay` ms,
/// starting now, then a completion at `len * flash_delay`.
///
/// Returns the number of tasks scheduled (`len + 1`).
pub fn schedule_playback(
    queue: &mut TimerQueue<Task>,
    now: u64,
    sequence: &[usize],
    flash_delay: u64,
    generation: Generation,
) -> usize {
    for (i, &tile) in sequence.iter().enumerate() {
        queue.schedule(
            now,
            (i as u64).saturating_mul(flash_delay),
            Task {
                generation,
                kind: TaskKind::Flash { tile },
            },
        );
    }
    queue.schedule(
        now,
        (sequence.len() as u64).saturating_mul(flash_delay),
        Task {
            generation,
            kind: TaskKind::PlaybackDone,
        },
    );
    sequence.len() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut TimerQueue<Task>, now: u64) -> Vec<(u64, TaskKind)> {
        std::iter::from_fn(|| queue.pop_due(now))
            .map(|(due, task)| (due, task.kind))
            .collect()
    }

    #[test]
    fn test_queue_orders_by_due_then_insertion() {
        let mut queue = TimerQueue::new();
        queue.schedule(0, 30, "c");
        queue.schedule(0, 10, "a");
        queue.schedule(0, 10, "b");
        assert_eq!(queue.next_due(), Some(10));

        assert_eq!(queue.pop_due(5), None);
        assert_eq!(queue.pop_due(10), Some((10, "a")));
        assert_eq!(queue.pop_due(10), Some((10, "b")));
        assert_eq!(queue.pop_due(29), None);
        assert_eq!(queue.pop_due(100), Some((30, "c")));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_playback_schedules_flashes_then_done() {
        let mut queue = TimerQueue::new();
        let scheduled = schedule_playback(&mut queue, 500, &[3, 1, 6], 1000, Generation(1));
        assert_eq!(scheduled, 4);
        assert_eq!(queue.len(), 4);

        let fired = drain(&mut queue, u64::MAX);
        assert_eq!(
            fired,
            vec![
                (500, TaskKind::Flash { tile: 3 }),
                (1500, TaskKind::Flash { tile: 1 }),
                (2500, TaskKind::Flash { tile: 6 }),
                (3500, TaskKind::PlaybackDone),
            ]
        );
    }

    #[test]
    fn test_done_never_fires_early() {
        let mut queue = TimerQueue::new();
        schedule_playback(&mut queue, 0, &[0, 0], 400, Generation(0));
        let early = drain(&mut queue, 799);
        assert_eq!(early.len(), 2);
        assert!(early.iter().all(|(_, k)| matches!(k, TaskKind::Flash { .. })));
        assert_eq!(drain(&mut queue, 800), vec![(800, TaskKind::PlaybackDone)]);
    }

    #[test]
    fn test_empty_sequence_only_completes() {
        let mut queue = TimerQueue::new();
        assert_eq!(schedule_playback(&mut queue, 0, &[], 1000, Generation(0)), 1);
        assert_eq!(drain(&mut queue, 0), vec![(0, TaskKind::PlaybackDone)]);
    }

    #[test]
    fn test_huge_delay_saturates() {
        let mut queue = TimerQueue::new();
        schedule_playback(&mut queue, 10, &[4, 5, 6], u64::MAX / 2 + 1, Generation(0));
        let fired = drain(&mut queue, u64::MAX);
        assert_eq!(fired[0], (10, TaskKind::Flash { tile: 4 }));
        assert_eq!(fired.last(), Some(&(u64::MAX, TaskKind::PlaybackDone)));
        assert!(fired.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    #[test]
    fn test_tasks_keep_generation() {
        let mut queue = TimerQueue::new();
        schedule_playback(&mut queue, 0, &[2], 10, Generation(7));
        while let Some((_, task)) = queue.pop_due(u64::MAX) {
            assert_eq!(task.generation, Generation(7));
        }
        assert_eq!(Generation(7).next(), Generation(8));
    }
}
