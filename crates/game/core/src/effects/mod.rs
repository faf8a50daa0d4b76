//! Active status effects ("buffs") and their per-turn resolution.
//!
//! Every actor carries a bounded collection of timed effects. Once per
//! actor-turn the engine advances them: remaining time drops by one, the
//! attached tick behavior (if any) fires with `(duration, time_left)`, and
//! entries whose remaining time reached zero are removed after their final
//! tick. An actor holds at most one entry per effect kind; re-applying
//! refreshes the timer instead of stacking.

mod ticks;

pub use ticks::{
    BleedTick, BurnTick, FreezeTick, PetrifyTick, PoisonTick, StatChangeTick, default_tick,
};

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::env::{GameRng, MapOracle};
use crate::events::MessageLog;
use crate::state::ActorState;
use crate::stats::ModifierLedger;
use crate::vision::ObserverView;

/// Tagged effect kinds an actor can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    // Damage over time
    Poison,
    Bleed,
    Burn,
    Freeze,
    Petrify,
    // Behavior / perception alteration
    Confuse,
    Blind,
    // Stat modifiers
    AttackUp,
    DefenseUp,
}

impl EffectKind {
    /// Adjective used in narrative messages ("You are poisoned!").
    pub const fn adjective(self) -> &'static str {
        match self {
            Self::Poison => "poisoned",
            Self::Bleed => "bleeding",
            Self::Burn => "burning",
            Self::Freeze => "freezing",
            Self::Petrify => "petrified",
            Self::Confuse => "confused",
            Self::Blind => "blind",
            Self::AttackUp => "strengthened",
            Self::DefenseUp => "shielded",
        }
    }
}

/// Per-tick strategy attached to an effect entry.
///
/// Invoked once per advance with the entry's total duration and remaining
/// time; may damage the actor, emit narrative events, or issue modifier
/// commands. A missing behavior is valid: silent effects (pure movement or
/// perception restriction flags) are checked elsewhere.
pub trait TickBehavior: core::fmt::Debug + Send + Sync {
    fn tick(&mut self, duration: u32, time_left: u32, actor: &mut ActorState, ctx: &mut EffectContext<'_>);
}

/// One timed modifier applied to an actor.
///
/// Invariant: `time_left <= duration` at all times.
#[derive(Debug)]
pub struct EffectEntry {
    pub kind: EffectKind,
    pub duration: u32,
    pub time_left: u32,
    pub behavior: Option<Box<dyn TickBehavior>>,
}

impl EffectEntry {
    /// A silent entry with no tick behavior.
    pub fn new(kind: EffectKind, duration: u32) -> Self {
        Self {
            kind,
            duration,
            time_left: duration,
            behavior: None,
        }
    }

    pub fn with_behavior(mut self, behavior: Box<dyn TickBehavior>) -> Self {
        self.behavior = Some(behavior);
        self
    }

    /// Entry wired to the stock tick behavior for its kind, if one exists.
    pub fn with_default_behavior(kind: EffectKind, duration: u32) -> Self {
        let mut entry = Self::new(kind, duration);
        entry.behavior = default_tick(kind);
        entry
    }
}

/// Shared mutable surroundings handed to effect operations.
pub struct EffectContext<'a> {
    pub rng: &'a mut GameRng,
    pub log: &'a mut MessageLog,
    pub ledger: &'a mut ModifierLedger,
    pub map: &'a dyn MapOracle,
    pub config: &'a GameConfig,
    /// Player-side snapshot for "visible to the player" announce checks.
    pub player: ObserverView,
}

/// The collection of active timed effects on one actor.
#[derive(Debug, Default)]
pub struct ActiveEffects {
    entries: ArrayVec<EffectEntry, { GameConfig::MAX_STATUS_EFFECTS }>,
    /// Turn token of the last advance; rejects double-advancing within the
    /// same game turn.
    last_advance: Option<u64>,
}

impl ActiveEffects {
    pub fn has(&self, kind: EffectKind) -> bool {
        self.entries.iter().any(|entry| entry.kind == kind)
    }

    pub fn get(&self, kind: EffectKind) -> Option<&EffectEntry> {
        self.entries.iter().find(|entry| entry.kind == kind)
    }

    /// Installs or refreshes an entry. At most one entry per kind is kept;
    /// an existing entry of the same kind is replaced wholesale.
    ///
    /// Returns whether the entry is now held. A fresh kind arriving at a
    /// full collection is dropped and reported as `false`, so callers never
    /// announce an effect the actor did not receive.
    pub fn insert(&mut self, entry: EffectEntry) -> bool {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|existing| existing.kind == entry.kind)
        {
            *existing = entry;
            return true;
        }
        if self.entries.is_full() {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn remove_kind(&mut self, kind: EffectKind) -> Option<EffectEntry> {
        let index = self.entries.iter().position(|entry| entry.kind == kind)?;
        Some(self.entries.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &EffectEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Claims the advance for `turn`. Returns false when this turn's advance
    /// already happened, in which case the caller must not tick anything.
    pub(crate) fn begin_advance(&mut self, turn: u64) -> bool {
        if self.last_advance == Some(turn) {
            return false;
        }
        self.last_advance = Some(turn);
        true
    }

    /// Moves all entries out for ticking, leaving the collection empty.
    pub(crate) fn take_entries(
        &mut self,
    ) -> ArrayVec<EffectEntry, { GameConfig::MAX_STATUS_EFFECTS }> {
        std::mem::take(&mut self.entries)
    }

    /// Puts a surviving entry back after an advance pass.
    pub(crate) fn reinstate(&mut self, entry: EffectEntry) {
        if !self.entries.is_full() {
            self.entries.push(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::env::GridMap;
    use crate::state::{ActorState, EntityId, Position, SpeciesKind};
    use crate::stats::ModifierLedger;

    fn filled_to_capacity() -> (ActiveEffects, EffectKind) {
        let mut effects = ActiveEffects::default();
        let mut kinds = EffectKind::iter();
        for kind in kinds.by_ref().take(GameConfig::MAX_STATUS_EFFECTS) {
            assert!(effects.insert(EffectEntry::new(kind, 10)));
        }
        // One more kind exists than the collection can hold.
        let overflow = kinds.next().unwrap();
        (effects, overflow)
    }

    #[test]
    fn insert_reports_drop_at_capacity() {
        let (mut effects, overflow) = filled_to_capacity();

        assert!(!effects.insert(EffectEntry::new(overflow, 10)));
        assert!(!effects.has(overflow));

        // Refreshing a held kind still succeeds at capacity.
        assert!(effects.insert(EffectEntry::new(EffectKind::Poison, 3)));
        assert_eq!(effects.get(EffectKind::Poison).map(|e| e.time_left), Some(3));
    }

    #[test]
    fn dropped_effect_is_never_announced() {
        let mut rng = GameRng::new(2);
        let mut log = MessageLog::default();
        let mut ledger = ModifierLedger::default();
        let map = GridMap::open(5, 5);
        let config = GameConfig::default();

        let mut player =
            ActorState::new(EntityId::PLAYER, SpeciesKind::Player, Position::new(2, 2));
        let (effects, overflow) = filled_to_capacity();
        player.effects = effects;

        let mut ctx = EffectContext {
            rng: &mut rng,
            log: &mut log,
            ledger: &mut ledger,
            map: &map,
            config: &config,
            player: ObserverView {
                position: Position::new(2, 2),
                blinded: false,
                base_radius: config.base_perception,
            },
        };
        player.apply_effect(EffectEntry::new(overflow, 10), &mut ctx);

        assert!(!player.has_effect(overflow));
        assert!(log.is_empty(), "log claims an effect that was never held");
    }
}
