//! NPC behavior profiles and per-turn dispatch.
//!
//! Each actor carries an [`AiProfile`] resolved once at creation from its
//! species. A profile pairs an optional sleep handler with an awake movement
//! strategy; dispatch selects between them from the actor's current mood.
//! Behaviors never mutate other actors directly: they emit [`Command`]
//! intents into a sink, and the external command layer executes them after
//! dispatch returns.

mod behaviors;

use crate::action::CommandSink;
use crate::config::GameConfig;
use crate::effects::EffectKind;
use crate::env::{GameRng, MapOracle};
use crate::state::{ActorState, EntityId, Mood, Position, SpeciesKind};

/// Read-only snapshot of the enemy an actor reacts to (for NPCs, the
/// player). Copied out of the actor table so dispatch can hold a mutable
/// borrow of the acting actor alone.
#[derive(Clone, Copy, Debug)]
pub struct EnemyView {
    pub id: EntityId,
    pub position: Position,
}

impl EnemyView {
    pub fn of(actor: &ActorState) -> Self {
        Self {
            id: actor.id,
            position: actor.position,
        }
    }
}

/// Shared surroundings handed to behaviors for one turn.
pub struct AiContext<'a> {
    pub rng: &'a mut GameRng,
    pub map: &'a dyn MapOracle,
    pub config: &'a GameConfig,
    pub sink: &'a mut dyn CommandSink,
}

/// How an asleep actor decides whether to wake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SleepStyle {
    /// Wake rolls gated on proximity alone.
    Simple,
    /// Wake rolls additionally require line of sight to the enemy.
    VisibilityAware,
}

/// Movement strategy used while awake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AwakeStyle {
    /// Steps toward the enemy, with an occasional idle turn.
    Chaser,
    /// Steps in a uniformly random direction every turn.
    Wanderer,
    /// Mixes targeted and random steps, `speed` sub-steps per turn.
    Prowler { speed: u32 },
    /// Prowler movement plus a chance to cast an effect when the enemy is in
    /// line of sight.
    Caster {
        speed: u32,
        cast_chance: u32,
        payload: EffectKind,
        payload_duration: u32,
    },
    /// Prowler movement plus ranged shots along aligned lines, with a
    /// fallback spell attempt when no shot lines up.
    Shooter {
        speed: u32,
        cast_chance: u32,
        payload: EffectKind,
        payload_duration: u32,
    },
}

/// Complete behavior profile for one actor.
///
/// `sleep: None` means the species ignores the mood machinery entirely and
/// always runs its awake strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiProfile {
    pub sleep: Option<SleepStyle>,
    pub awake: AwakeStyle,
}

impl AiProfile {
    /// Moody prowler: the stock profile for species without a bespoke one.
    pub const fn stock() -> Self {
        Self {
            sleep: Some(SleepStyle::VisibilityAware),
            awake: AwakeStyle::Prowler { speed: 1 },
        }
    }

    pub const fn always_awake(awake: AwakeStyle) -> Self {
        Self { sleep: None, awake }
    }

    pub const fn moody(sleep: SleepStyle, awake: AwakeStyle) -> Self {
        Self {
            sleep: Some(sleep),
            awake,
        }
    }

    /// Resolves the profile for a species. Species without a bespoke
    /// behavior fall back to the stock profile.
    pub fn for_species(species: SpeciesKind) -> Self {
        match species {
            SpeciesKind::Player => Self::stock(),
            SpeciesKind::Ant => Self::always_awake(AwakeStyle::Wanderer),
            SpeciesKind::Cat => Self::always_awake(AwakeStyle::Chaser),
            SpeciesKind::Bat => {
                Self::moody(SleepStyle::VisibilityAware, AwakeStyle::Prowler { speed: 2 })
            }
            SpeciesKind::Druid => Self::always_awake(AwakeStyle::Caster {
                speed: 1,
                cast_chance: 5,
                payload: EffectKind::Bleed,
                payload_duration: 5,
            }),
            SpeciesKind::Mage => Self::moody(
                SleepStyle::Simple,
                AwakeStyle::Caster {
                    speed: 1,
                    cast_chance: 8,
                    payload: EffectKind::Confuse,
                    payload_duration: 8,
                },
            ),
            SpeciesKind::Archer => Self::moody(
                SleepStyle::Simple,
                AwakeStyle::Shooter {
                    speed: 1,
                    cast_chance: 5,
                    payload: EffectKind::Confuse,
                    payload_duration: 8,
                },
            ),
            SpeciesKind::Rat | SpeciesKind::Slime => {
                tracing::warn!(%species, "no bespoke profile, using stock");
                Self::stock()
            }
        }
    }
}

impl Default for AiProfile {
    fn default() -> Self {
        Self::stock()
    }
}

/// Runs one turn for `me` against `enemy`.
///
/// Returns true when the actor committed at least one action intent this
/// turn; false means it slept or idled. Either way the turn is complete,
/// the return value is informational only.
pub fn take_turn(me: &mut ActorState, enemy: EnemyView, ctx: &mut AiContext<'_>) -> bool {
    match (me.profile.sleep, me.mood) {
        (Some(style), Mood::Asleep) => behaviors::sleep_turn(style, me, enemy, ctx),
        _ => behaviors::awake_turn(me, enemy, ctx),
    }
}
