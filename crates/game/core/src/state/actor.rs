use crate::ai::AiProfile;
use crate::effects::{ActiveEffects, EffectContext, EffectEntry, EffectKind};
use crate::events::{EventCategory, LogMessage};
use crate::vision;

use super::{EntityId, Position, ResourceMeter};

/// Coarse behavioral state gating which movement strategy runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mood {
    #[default]
    Asleep,
    Awake,
}

/// Species tag deciding which AI behavior an actor is created with.
///
/// Map generation may place species without a bespoke behavior yet; those
/// resolve to the default profile rather than erroring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpeciesKind {
    Player,
    Ant,
    Cat,
    Bat,
    Mage,
    Archer,
    Druid,
    Rat,
    Slime,
}

/// A mobile entity participating in the turn cycle: the player or an NPC.
#[derive(Debug)]
pub struct ActorState {
    pub id: EntityId,
    pub position: Position,
    pub species: SpeciesKind,
    pub mood: Mood,
    /// Turns elapsed since this actor last changed position. Movement
    /// execution lives in the command layer, which resets this counter.
    pub turns_since_move: u32,
    pub health: ResourceMeter,
    pub effects: ActiveEffects,
    pub is_player: bool,
    /// Behavior profile resolved once at creation from the species tag.
    pub profile: AiProfile,
}

impl ActorState {
    /// Default hit points when a spawn does not specify any.
    pub const DEFAULT_HP: u32 = 3;

    pub fn new(id: EntityId, species: SpeciesKind, position: Position) -> Self {
        Self {
            id,
            position,
            species,
            mood: Mood::Asleep,
            turns_since_move: 0,
            health: ResourceMeter::full(Self::DEFAULT_HP),
            effects: ActiveEffects::default(),
            is_player: matches!(species, SpeciesKind::Player),
            profile: AiProfile::for_species(species),
        }
    }

    /// Sets maximum (and current) hit points.
    pub fn with_hp(mut self, maximum: u32) -> Self {
        self.health = ResourceMeter::full(maximum);
        self
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_depleted()
    }

    pub fn has_effect(&self, kind: EffectKind) -> bool {
        self.effects.has(kind)
    }

    /// Installs or refreshes an effect on this actor.
    ///
    /// A fresh application is announced when the actor is the player, or is
    /// currently visible to the player. Re-applying a held effect refreshes
    /// its timer without announcing again. A fresh effect arriving at a full
    /// collection is dropped without any announcement.
    pub fn apply_effect(&mut self, entry: EffectEntry, ctx: &mut EffectContext<'_>) {
        let kind = entry.kind;
        let fresh = !self.effects.has(kind);
        if !self.effects.insert(entry) {
            return;
        }

        if fresh && self.announceable(ctx) {
            let text = if self.is_player {
                format!("You are {}!", kind.adjective())
            } else {
                format!("The {} is {}!", self.species, kind.adjective())
            };
            ctx.log.push(LogMessage::new(text, EventCategory::Buff));
        }
    }

    /// Deletes an effect entry. Announced only for the player.
    pub fn remove_effect(&mut self, kind: EffectKind, ctx: &mut EffectContext<'_>) {
        if self.effects.remove_kind(kind).is_some() && self.is_player {
            ctx.log.push(LogMessage::new(
                format!("You are no longer {}!", kind.adjective()),
                EventCategory::Buff,
            ));
        }
    }

    /// Explicit cleanse: identical to removal, kept as the name the
    /// buff-cleansing command layer calls.
    pub fn cleanse_effect(&mut self, kind: EffectKind, ctx: &mut EffectContext<'_>) {
        self.remove_effect(kind, ctx);
    }

    /// Advances all active effects by one turn.
    ///
    /// `turn` is the per-turn generation token: a second call carrying the
    /// same token is a no-op, so two code paths both believing they finished
    /// this actor's turn cannot double-decrement durations.
    ///
    /// Each entry's remaining time drops by one, its tick behavior (if any)
    /// fires with `(duration, time_left)`, and entries that reached zero are
    /// removed after their final tick.
    pub fn advance_effects(&mut self, turn: u64, ctx: &mut EffectContext<'_>) {
        if !self.effects.begin_advance(turn) {
            return;
        }

        let mut entries = self.effects.take_entries();
        for entry in entries.iter_mut() {
            entry.time_left = entry.time_left.saturating_sub(1);
            let (duration, time_left) = (entry.duration, entry.time_left);
            if let Some(behavior) = entry.behavior.as_mut() {
                behavior.tick(duration, time_left, self, ctx);
            }
        }

        for entry in entries {
            if entry.time_left == 0 {
                if self.is_player {
                    ctx.log.push(LogMessage::new(
                        format!("You are no longer {}!", entry.kind.adjective()),
                        EventCategory::Buff,
                    ));
                }
            } else {
                self.effects.reinstate(entry);
            }
        }
    }

    fn announceable(&self, ctx: &EffectContext<'_>) -> bool {
        self.is_player || vision::occupant_visible(&ctx.player, self.position, ctx.map, ctx.config)
    }
}

/// Passive record left behind when an actor dies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorpseState {
    pub species: SpeciesKind,
    pub position: Position,
}
