//! The per-cycle turn engine.
//!
//! A cycle starts when the player's input has been executed by the command
//! layer: [`TurnCycle::run`] finishes the player's turn (effect advance and
//! bookkeeping), then walks the turn queue giving every other live actor
//! exactly one turn, and stops when the queue comes back around to the
//! player. If the player dies at any point the remaining turns in the cycle
//! are cancelled.

use crate::action::Command;
use crate::ai::{self, AiContext, EnemyView};
use crate::config::GameConfig;
use crate::effects::EffectContext;
use crate::env::MapOracle;
use crate::events::{EventCategory, LogMessage};
use crate::scheduler::TurnError;
use crate::state::{EntityId, GameState};
use crate::vision::{self, ObserverView};

/// How a cycle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Every live actor took its turn; the player is next to act.
    Completed,
    /// The player died mid-cycle; remaining turns were cancelled.
    PlayerDied,
}

/// Executes command intents against the game state.
///
/// The core decides *what* actors want to do; movement rules, bump-attack
/// resolution, and spell application live behind this trait in the owning
/// command layer. Executors must reset `turns_since_move` when they actually
/// move an actor.
pub trait CommandExecutor {
    fn execute(&mut self, command: Command, state: &mut GameState, map: &dyn MapOracle);
}

/// No-op executor: intents are dropped. Turn-order and effect semantics are
/// fully exercised even when nothing moves, which is what scheduling tests
/// want.
#[derive(Debug, Default)]
pub struct DiscardCommands;

impl CommandExecutor for DiscardCommands {
    fn execute(&mut self, _command: Command, _state: &mut GameState, _map: &dyn MapOracle) {}
}

/// One full pass of the turn queue over a single game state.
pub struct TurnCycle<'a> {
    state: &'a mut GameState,
    map: &'a dyn MapOracle,
    config: &'a GameConfig,
}

impl<'a> TurnCycle<'a> {
    pub fn new(state: &'a mut GameState, map: &'a dyn MapOracle, config: &'a GameConfig) -> Self {
        Self { state, map, config }
    }

    /// Runs the rest of the cycle after the player's command has been
    /// executed.
    ///
    /// Increments the turn counter first: the new value is the generation
    /// token for every effect advance in this cycle, so an actor whose turn
    /// is finished twice by overlapping code paths only ticks once.
    pub fn run(&mut self, executor: &mut dyn CommandExecutor) -> Result<CycleOutcome, TurnError> {
        self.state.turn += 1;
        tracing::debug!(turn = self.state.turn, "cycle start");

        self.finish_turn(EntityId::PLAYER);
        if !self.state.player_alive() {
            return Ok(CycleOutcome::PlayerDied);
        }

        loop {
            let id = self.state.queue.next_actor()?;
            if id == EntityId::PLAYER {
                break;
            }
            self.npc_turn(id, executor);
            if !self.state.player_alive() {
                return Ok(CycleOutcome::PlayerDied);
            }
        }

        Ok(CycleOutcome::Completed)
    }

    /// One NPC's turn: AI dispatch, command execution, then end-of-turn
    /// effect resolution.
    fn npc_turn(&mut self, id: EntityId, executor: &mut dyn CommandExecutor) {
        let Some(player) = self.state.player() else {
            return;
        };
        let enemy = EnemyView::of(player);

        let mut commands: Vec<Command> = Vec::new();
        {
            let GameState { actors, rng, .. } = &mut *self.state;
            let Some(actor) = actors.get_mut(&id) else {
                return;
            };
            let mut ctx = AiContext {
                rng,
                map: self.map,
                config: self.config,
                sink: &mut commands,
            };
            let acted = ai::take_turn(actor, enemy, &mut ctx);
            tracing::debug!(actor = id.0, species = %actor.species, acted, "npc turn");
        }

        for command in commands {
            executor.execute(command, self.state, self.map);
        }

        self.finish_turn(id);
    }

    /// End-of-turn bookkeeping for any actor: stillness counter, effect
    /// advance, and death from damage over time.
    fn finish_turn(&mut self, id: EntityId) {
        let observer = match self.state.player() {
            Some(player) => ObserverView::of(player, self.config),
            None => return,
        };

        let died = {
            let GameState {
                actors,
                rng,
                log,
                ledger,
                turn,
                ..
            } = &mut *self.state;
            let Some(actor) = actors.get_mut(&id) else {
                return;
            };
            actor.turns_since_move = actor.turns_since_move.saturating_add(1);
            let mut ctx = EffectContext {
                rng,
                log,
                ledger,
                map: self.map,
                config: self.config,
                player: observer,
            };
            actor.advance_effects(*turn, &mut ctx);
            !actor.is_alive()
        };

        if died && !id.is_player() {
            // Narrate deaths the player can see before the corpse replaces
            // the actor.
            if let Some(actor) = self.state.actor(id) {
                if vision::occupant_visible(&observer, actor.position, self.map, self.config) {
                    self.state.log.push(LogMessage::new(
                        format!("The {} dies!", actor.species),
                        EventCategory::NpcDeath,
                    ));
                }
            }
            self.state.record_death(id);
        }
    }
}
