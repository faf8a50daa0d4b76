//! Stock per-turn tick behaviors for the damage-over-time and stat effects.

use super::{EffectContext, EffectKind, TickBehavior};
use crate::events::{EventCategory, LogMessage};
use crate::state::ActorState;
use crate::stats::StatModifier;

/// Applies tick damage and, for the player, narrates it.
fn deal_tick_damage(actor: &mut ActorState, ctx: &mut EffectContext<'_>, amount: u32, cause: &str) {
    if amount == 0 {
        return;
    }
    actor.health.damage(amount);
    if actor.is_player {
        ctx.log.push(LogMessage::new(
            format!("You take {amount} damage because {cause}"),
            EventCategory::PlayerDamage,
        ));
    }
}

/// Fires on even remaining-time values, skipping the very first advance so a
/// freshly applied effect never damages on the turn it lands.
fn dot_fires(duration: u32, time_left: u32) -> bool {
    time_left != duration && time_left % 2 == 0
}

/// Steady 1-damage drip.
#[derive(Debug, Default)]
pub struct PoisonTick;

impl TickBehavior for PoisonTick {
    fn tick(&mut self, duration: u32, time_left: u32, actor: &mut ActorState, ctx: &mut EffectContext<'_>) {
        if dot_fires(duration, time_left) {
            deal_tick_damage(actor, ctx, 1, "of the poison!");
        }
    }
}

/// Heavy variable damage, softened to a trickle while the actor rests.
#[derive(Debug, Default)]
pub struct BleedTick;

impl BleedTick {
    const MIN_DAMAGE: u32 = 2;
    const MAX_DAMAGE: u32 = 5;
    const RESTING_DAMAGE: u32 = 1;
    const RESTING_TURNS_THRESHOLD: u32 = 2;
}

impl TickBehavior for BleedTick {
    fn tick(&mut self, duration: u32, time_left: u32, actor: &mut ActorState, ctx: &mut EffectContext<'_>) {
        if !dot_fires(duration, time_left) {
            return;
        }
        let amount = if actor.turns_since_move > Self::RESTING_TURNS_THRESHOLD {
            Self::RESTING_DAMAGE
        } else {
            ctx.rng.range_inclusive(Self::MIN_DAMAGE, Self::MAX_DAMAGE)
        };
        deal_tick_damage(actor, ctx, amount, "of the bleeding!");
    }
}

/// Variable fire damage with no resting relief.
#[derive(Debug, Default)]
pub struct BurnTick;

impl TickBehavior for BurnTick {
    fn tick(&mut self, duration: u32, time_left: u32, actor: &mut ActorState, ctx: &mut EffectContext<'_>) {
        if dot_fires(duration, time_left) {
            let amount = ctx.rng.range_inclusive(2, 4);
            deal_tick_damage(actor, ctx, amount, "of the burn!");
        }
    }
}

/// Cold damage that only bites once the actor has stood still a while.
#[derive(Debug, Default)]
pub struct FreezeTick;

impl TickBehavior for FreezeTick {
    fn tick(&mut self, duration: u32, time_left: u32, actor: &mut ActorState, ctx: &mut EffectContext<'_>) {
        if actor.turns_since_move < 2 || !dot_fires(duration, time_left) {
            return;
        }
        let amount = ctx.rng.range_inclusive(0, 2);
        deal_tick_damage(actor, ctx, amount, "you are freezing!");
    }
}

/// Escalating damage scaling with how long the actor has been stationary.
/// Movement resets the count, so staying put under petrification is lethal.
#[derive(Debug, Default)]
pub struct PetrifyTick;

impl TickBehavior for PetrifyTick {
    fn tick(&mut self, duration: u32, time_left: u32, actor: &mut ActorState, ctx: &mut EffectContext<'_>) {
        if actor.turns_since_move < 2 || !dot_fires(duration, time_left) {
            return;
        }
        let since = actor.turns_since_move;
        let amount = ctx.rng.range_inclusive(since, since * 2);
        if amount == 0 {
            return;
        }
        actor.health.damage(amount);
        if actor.is_player {
            ctx.log.push(LogMessage::new(
                format!("You are being petrified and take {amount} damage!"),
                EventCategory::PlayerDamage,
            ));
        }
    }
}

/// Holds a stat modifier for the effect's lifetime and reverts it on expiry.
///
/// The apply half is issued at creation time by whoever grants the effect;
/// this behavior only owns the revert.
#[derive(Debug)]
pub struct StatChangeTick {
    modifier: StatModifier,
}

impl StatChangeTick {
    pub fn new(modifier: StatModifier) -> Self {
        Self { modifier }
    }
}

impl TickBehavior for StatChangeTick {
    fn tick(&mut self, _duration: u32, time_left: u32, _actor: &mut ActorState, ctx: &mut EffectContext<'_>) {
        if time_left == 0 {
            ctx.ledger.revert(self.modifier);
        }
    }
}

/// Stock behavior for a kind, if it has one. Kinds without a tick behavior
/// (movement and perception flags) act through checks elsewhere.
pub fn default_tick(kind: EffectKind) -> Option<Box<dyn TickBehavior>> {
    match kind {
        EffectKind::Poison => Some(Box::new(PoisonTick)),
        EffectKind::Bleed => Some(Box::new(BleedTick)),
        EffectKind::Burn => Some(Box::new(BurnTick)),
        EffectKind::Freeze => Some(Box::new(FreezeTick)),
        EffectKind::Petrify => Some(Box::new(PetrifyTick)),
        EffectKind::Confuse | EffectKind::Blind | EffectKind::AttackUp | EffectKind::DefenseUp => {
            None
        }
    }
}
