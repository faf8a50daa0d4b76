//! Authoritative simulation state.
//!
//! This module owns the data structures that describe actors, their status
//! effects, and per-map turn bookkeeping. The engine and the external
//! command layer mutate this state; everything else only queries it.

mod actor;
mod common;

pub use actor::{ActorState, CorpseState, Mood, SpeciesKind};
pub use common::{EntityId, Position, ResourceMeter};

use std::collections::BTreeMap;

use crate::env::GameRng;
use crate::events::MessageLog;
use crate::scheduler::TurnQueue;
use crate::stats::ModifierLedger;

/// Canonical snapshot of the simulation state for one map.
///
/// Actors are stored in a `BTreeMap` so iteration order is deterministic:
/// same seed, same spawn sequence, same behavior.
#[derive(Debug)]
pub struct GameState {
    /// RNG seed set once at initialization, kept for diagnostics and replay.
    pub seed: u64,
    /// Completed game-turn counter; doubles as the effect-advance token.
    pub turn: u64,
    /// Cyclic acting order of live actors on this map.
    pub queue: TurnQueue,
    /// Seeded random source shared by AI rolls and effect damage ranges.
    pub rng: GameRng,
    /// Narrative event sink consumed by the external message UI.
    pub log: MessageLog,
    /// Stat modifier ledger mutated via apply/revert commands.
    pub ledger: ModifierLedger,
    pub actors: BTreeMap<EntityId, ActorState>,
    pub corpses: Vec<CorpseState>,
    /// Sequential id allocator; 0 is reserved for the player, never reused.
    next_entity_id: u32,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            turn: 0,
            queue: TurnQueue::default(),
            rng: GameRng::new(seed),
            log: MessageLog::default(),
            ledger: ModifierLedger::default(),
            actors: BTreeMap::new(),
            corpses: Vec::new(),
            next_entity_id: 1,
        }
    }

    /// Places the player on this map and enters it into the turn queue.
    ///
    /// The player persists across level transitions; this re-inserts it into
    /// the new map's queue under its reserved id.
    pub fn spawn_player(&mut self, position: Position) -> EntityId {
        let id = EntityId::PLAYER;
        self.actors
            .insert(id, ActorState::new(id, SpeciesKind::Player, position));
        self.queue.push(id);
        id
    }

    /// Creates an NPC of the given species and schedules it.
    pub fn spawn(&mut self, species: SpeciesKind, position: Position) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        self.actors
            .insert(id, ActorState::new(id, species, position));
        self.queue.push(id);
        id
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.actors.get_mut(&id)
    }

    pub fn player(&self) -> Option<&ActorState> {
        self.actors.get(&EntityId::PLAYER)
    }

    pub fn player_alive(&self) -> bool {
        self.player().is_some_and(ActorState::is_alive)
    }

    /// Removes a dead actor from the queue and converts it to a corpse.
    pub fn record_death(&mut self, id: EntityId) -> Option<CorpseState> {
        let actor = self.actors.remove(&id)?;
        self.queue.remove(id);
        let corpse = CorpseState {
            species: actor.species,
            position: actor.position,
        };
        self.corpses.push(corpse);
        Some(corpse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_allocates_sequential_ids_and_schedules() {
        let mut state = GameState::new(7);
        state.spawn_player(Position::ORIGIN);
        let a = state.spawn(SpeciesKind::Ant, Position::new(1, 0));
        let b = state.spawn(SpeciesKind::Cat, Position::new(2, 0));

        assert_eq!(a, EntityId(1));
        assert_eq!(b, EntityId(2));
        assert!(state.queue.contains(EntityId::PLAYER));
        assert!(state.queue.contains(a));
        assert!(state.queue.contains(b));
    }

    #[test]
    fn record_death_removes_actor_and_leaves_corpse() {
        let mut state = GameState::new(7);
        state.spawn_player(Position::ORIGIN);
        let ant = state.spawn(SpeciesKind::Ant, Position::new(3, 3));

        let corpse = state.record_death(ant).unwrap();
        assert_eq!(corpse.species, SpeciesKind::Ant);
        assert_eq!(corpse.position, Position::new(3, 3));
        assert!(state.actor(ant).is_none());
        assert!(!state.queue.contains(ant));
    }
}
