//! Progress tracking - moves, objectives, blockers and win/loss
//!
//! [`GameProgressTracker`] holds the mutable bookkeeping for one play session.
//! Terminal state is never stored; it is derived on demand from the counters,
//! and a win always takes precedence over a loss.
//!
//! Observers register with [`GameProgressTracker::subscribe`] and receive a
//! [`ProgressEvent`] synchronously, in mutation order, after every change.

use std::collections::BTreeMap;
use std::fmt;

use crate::level::{LevelTemplate, Objective};
use crate::types::{Coord, GameStatus, TileTypeId};

/// Change notification delivered to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    MovesChanged { remaining: u32 },
    BlockersChanged { remaining: u32 },
    /// Current progress for every objective, in objective order.
    ObjectivesChanged { progress: Vec<u32> },
    Reset,
}

/// Handle returned by [`GameProgressTracker::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ProgressEvent)>;

pub struct GameProgressTracker {
    initial_moves: u32,
    moves_remaining: u32,
    objectives: Vec<Objective>,
    progress: Vec<u32>,
    initial_blockers: u32,
    blockers_remaining: u32,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl GameProgressTracker {
    pub fn new(template: &LevelTemplate, initial_blockers: u32) -> Self {
        Self::with_objectives(template.moves(), template.objectives().to_vec(), initial_blockers)
    }

    pub fn with_objectives(moves: u32, objectives: Vec<Objective>, initial_blockers: u32) -> Self {
        let progress = vec![0; objectives.len()];
        Self {
            initial_moves: moves,
            moves_remaining: moves,
            objectives,
            progress,
            initial_blockers,
            blockers_remaining: initial_blockers,
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn blockers_remaining(&self) -> u32 {
        self.blockers_remaining
    }

    pub fn initial_blockers(&self) -> u32 {
        self.initial_blockers
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    /// Current count for every objective, in objective order.
    pub fn progress(&self) -> &[u32] {
        &self.progress
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ProgressEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: ProgressEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    /// Spend one move. Silently does nothing once moves are exhausted.
    pub fn decrement_moves(&mut self) {
        if self.moves_remaining == 0 {
            return;
        }
        self.moves_remaining -= 1;
        self.emit(ProgressEvent::MovesChanged {
            remaining: self.moves_remaining,
        });
    }

    /// Shorthand for clearing a single blocker.
    pub fn decrement_blocker(&mut self) {
        self.decrement_blockers_remaining(1);
    }

    /// Subtract `count` cleared blockers, floored at zero.
    pub fn decrement_blockers_remaining(&mut self, count: i64) {
        if count <= 0 || self.blockers_remaining == 0 {
            return;
        }
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        self.blockers_remaining = self.blockers_remaining.saturating_sub(count);
        self.emit(ProgressEvent::BlockersChanged {
            remaining: self.blockers_remaining,
        });
    }

    /// Credit cleared tiles to collect objectives, clamped to each target.
    ///
    /// Emits at most one notification, and only if some objective moved.
    pub fn process_cleared_tiles(&mut self, cleared: &BTreeMap<Coord, TileTypeId>) {
        if cleared.is_empty() {
            return;
        }

        let mut changed = false;
        for (i, objective) in self.objectives.iter().enumerate() {
            let Some(tile) = objective.collect_tile() else {
                continue;
            };
            let hits = cleared.values().filter(|&&t| t == tile).count() as u32;
            if hits == 0 {
                continue;
            }
            let next = self.progress[i].saturating_add(hits).min(objective.target);
            if next != self.progress[i] {
                self.progress[i] = next;
                changed = true;
            }
        }

        if changed {
            let progress = self.progress.clone();
            self.emit(ProgressEvent::ObjectivesChanged { progress });
        }
    }

    /// Restore the session's starting counters.
    pub fn reset(&mut self) {
        self.moves_remaining = self.initial_moves;
        self.blockers_remaining = self.initial_blockers;
        self.progress.iter_mut().for_each(|p| *p = 0);
        self.emit(ProgressEvent::Reset);
    }

    pub fn all_objectives_complete(&self) -> bool {
        self.objectives
            .iter()
            .zip(&self.progress)
            .all(|(o, &p)| p >= o.target)
    }

    pub fn requires_blocker_clear(&self) -> bool {
        self.initial_blockers > 0
    }

    pub fn all_blockers_cleared(&self) -> bool {
        self.blockers_remaining == 0
    }

    pub fn is_won(&self) -> bool {
        self.all_objectives_complete()
            && (!self.requires_blocker_clear() || self.all_blockers_cleared())
    }

    pub fn is_lost(&self) -> bool {
        self.moves_remaining == 0 && !self.is_won()
    }

    pub fn status(&self) -> GameStatus {
        if self.is_won() {
            GameStatus::Won
        } else if self.is_lost() {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }
}

impl fmt::Debug for GameProgressTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameProgressTracker")
            .field("moves_remaining", &self.moves_remaining)
            .field("objectives", &self.objectives)
            .field("progress", &self.progress)
            .field("initial_blockers", &self.initial_blockers)
            .field("blockers_remaining", &self.blockers_remaining)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
