//! Deterministic turn-based simulation core for a grid roguelike.
//!
//! The crate owns the rules that make a dungeon tick: a cyclic turn queue,
//! species-resolved AI behavior dispatch, a timed status-effect engine, and
//! grid visibility. Everything is single-threaded and seed-deterministic;
//! rendering, input, and map generation live in outer layers that feed this
//! core through the [`env::MapOracle`] and [`engine::CommandExecutor`]
//! seams.

pub mod action;
pub mod ai;
pub mod config;
pub mod effects;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod scheduler;
pub mod state;
pub mod stats;
pub mod vision;

pub use action::{Command, CommandSink, Direction};
pub use ai::{AiContext, AiProfile, AwakeStyle, EnemyView, SleepStyle};
pub use config::GameConfig;
pub use effects::{ActiveEffects, EffectContext, EffectEntry, EffectKind, TickBehavior};
pub use engine::{CommandExecutor, CycleOutcome, DiscardCommands, TurnCycle};
pub use env::{GameRng, GridMap, MapDimensions, MapOracle, TileProperties};
pub use error::{ErrorSeverity, GameError};
pub use events::{EventCategory, LogMessage, MessageLog};
pub use scheduler::{TurnError, TurnQueue};
pub use state::{
    ActorState, CorpseState, EntityId, GameState, Mood, Position, ResourceMeter, SpeciesKind,
};
pub use stats::{ModifierLedger, StatKind, StatModifier};
pub use vision::{ObserverView, line_of_sight, line_of_sight_raycast};
