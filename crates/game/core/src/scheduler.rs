//! The per-map turn queue.
//!
//! A cyclic, insertion-ordered collection of live actors. The scheduler never
//! reorders by priority: strict insertion-order round robin is load-bearing
//! for fairness and determinism (same seed, same turn order).

use std::collections::VecDeque;

use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

/// Errors that can occur during turn queue operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    /// Asking an empty queue for the next actor is a scheduler bug, not a
    /// gameplay situation; the owning loop must stop the cycle.
    #[error("turn queue is empty")]
    EmptyQueue,
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyQueue => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyQueue => "turn_queue_empty",
        }
    }
}

/// Ordered cyclic collection of actor ids scoped to one map.
///
/// The head of the deque is the actor whose turn it currently is. Advancing
/// rotates the head to the back, so removal during iteration never perturbs
/// the relative order of not-yet-acted actors.
#[derive(Clone, Debug, Default)]
pub struct TurnQueue {
    order: VecDeque<EntityId>,
    /// Set when the current head was removed mid-cycle; the next advance
    /// must then return the new head without rotating, so nobody is skipped.
    head_removed: bool,
}

impl TurnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an actor to the cyclic order. Idempotent: pushing an actor
    /// that is already queued is a no-op, preserving the at-most-once
    /// invariant.
    pub fn push(&mut self, id: EntityId) {
        if !self.contains(id) {
            self.order.push_back(id);
        }
    }

    /// Removes an actor wherever it sits in the cycle.
    ///
    /// Removing the current head arms compensation so the following
    /// [`Self::next_actor`] call returns the subsequent actor without
    /// skipping or repeating anyone.
    pub fn remove(&mut self, id: EntityId) {
        let Some(index) = self.order.iter().position(|&queued| queued == id) else {
            return;
        };
        if index == 0 {
            self.order.pop_front();
            self.head_removed = !self.order.is_empty();
        } else {
            self.order.remove(index);
        }
    }

    /// Advances the cycle and returns the actor whose turn it now is.
    pub fn next_actor(&mut self) -> Result<EntityId, TurnError> {
        if self.order.is_empty() {
            return Err(TurnError::EmptyQueue);
        }
        if self.head_removed {
            self.head_removed = false;
        } else if let Some(head) = self.order.pop_front() {
            self.order.push_back(head);
        }
        self.order.front().copied().ok_or(TurnError::EmptyQueue)
    }

    /// Peeks at the currently-acting actor without advancing.
    pub fn current_actor(&self) -> Option<EntityId> {
        self.order.front().copied()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.order.iter().any(|&queued| queued == id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates the cycle starting at the current actor.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.order.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_of(n: u32) -> TurnQueue {
        let mut queue = TurnQueue::new();
        for i in 0..n {
            queue.push(EntityId(i));
        }
        queue
    }

    #[test]
    fn round_robin_is_fair_and_cyclic() {
        let mut queue = queue_of(4);
        // Head starts at 0; a full cycle visits 1, 2, 3, then wraps to 0.
        let order: Vec<_> = (0..4).map(|_| queue.next_actor().unwrap()).collect();
        assert_eq!(
            order,
            vec![EntityId(1), EntityId(2), EntityId(3), EntityId(0)]
        );
        assert_eq!(queue.next_actor().unwrap(), EntityId(1));
    }

    #[test]
    fn push_is_idempotent() {
        let mut queue = queue_of(3);
        queue.push(EntityId(1));
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn removing_current_head_does_not_skip_successor() {
        let mut queue = queue_of(3);
        // 0 is acting; it dies mid-turn.
        queue.remove(EntityId(0));
        assert_eq!(queue.next_actor().unwrap(), EntityId(1));
        assert_eq!(queue.next_actor().unwrap(), EntityId(2));
        assert_eq!(queue.next_actor().unwrap(), EntityId(1));
    }

    #[test]
    fn removing_actor_ahead_in_cycle_preserves_order() {
        let mut queue = queue_of(4);
        assert_eq!(queue.next_actor().unwrap(), EntityId(1));
        queue.remove(EntityId(3));
        assert_eq!(queue.next_actor().unwrap(), EntityId(2));
        assert_eq!(queue.next_actor().unwrap(), EntityId(0));
        assert_eq!(queue.next_actor().unwrap(), EntityId(1));
    }

    #[test]
    fn next_actor_on_empty_queue_is_fatal() {
        use crate::error::{ErrorSeverity, GameError};

        let mut queue = TurnQueue::new();
        let err = queue.next_actor().unwrap_err();
        assert_eq!(err, TurnError::EmptyQueue);
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
    }

    #[test]
    fn remove_last_actor_then_push_recovers() {
        let mut queue = queue_of(1);
        queue.remove(EntityId(0));
        assert!(queue.is_empty());
        queue.push(EntityId(5));
        assert_eq!(queue.next_actor().unwrap(), EntityId(5));
    }
}
