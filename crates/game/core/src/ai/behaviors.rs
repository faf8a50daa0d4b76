//! Concrete behavior implementations behind [`AiProfile`] dispatch.

use super::{AiContext, AwakeStyle, EnemyView, SleepStyle};
use crate::action::{Command, Direction};
use crate::config::GameConfig;
use crate::effects::EffectKind;
use crate::env::GameRng;
use crate::state::{ActorState, Mood, Position};
use crate::vision;

/// Shared mood transition used by every moody behavior.
///
/// Asleep and near the enemy: roll to wake. Awake and no longer near: roll
/// to fall back asleep. Both directions use the same "1 in N" chance.
/// Nearness is a strict squared-distance comparison, never a square root.
pub(super) fn shift_mood(
    me: &mut ActorState,
    enemy_position: Position,
    rng: &mut GameRng,
    config: &GameConfig,
) {
    let near = me.position.squared_distance(enemy_position) < config.wake_proximity_squared();
    match me.mood {
        Mood::Asleep if near => {
            if rng.one_in(config.mood_shift_chance) {
                me.mood = Mood::Awake;
            }
        }
        Mood::Awake if !near => {
            if rng.one_in(config.mood_shift_chance) {
                me.mood = Mood::Asleep;
            }
        }
        _ => {}
    }
}

/// One turn of an asleep actor: decide whether to wake, do nothing else.
pub(super) fn sleep_turn(
    style: SleepStyle,
    me: &mut ActorState,
    enemy: EnemyView,
    ctx: &mut AiContext<'_>,
) -> bool {
    match style {
        SleepStyle::Simple => shift_mood(me, enemy.position, ctx.rng, ctx.config),
        SleepStyle::VisibilityAware => {
            let near =
                me.position.squared_distance(enemy.position) < ctx.config.wake_proximity_squared();
            if near && vision::line_of_sight(me.position, enemy.position, ctx.map, false) {
                shift_mood(me, enemy.position, ctx.rng, ctx.config);
            }
        }
    }
    false
}

pub(super) fn awake_turn(me: &mut ActorState, enemy: EnemyView, ctx: &mut AiContext<'_>) -> bool {
    match me.profile.awake {
        AwakeStyle::Chaser => chaser_turn(me, enemy, ctx),
        AwakeStyle::Wanderer => wanderer_turn(me, ctx),
        AwakeStyle::Prowler { speed } => {
            let acted = movement_substeps(me, enemy, speed, ctx);
            shift_mood(me, enemy.position, ctx.rng, ctx.config);
            acted
        }
        AwakeStyle::Caster {
            speed,
            cast_chance,
            payload,
            payload_duration,
        } => caster_turn(me, enemy, speed, cast_chance, payload, payload_duration, ctx),
        AwakeStyle::Shooter {
            speed,
            cast_chance,
            payload,
            payload_duration,
        } => shooter_turn(me, enemy, speed, cast_chance, payload, payload_duration, ctx),
    }
}

/// Steps toward the enemy, idling on an occasional roll.
fn chaser_turn(me: &mut ActorState, enemy: EnemyView, ctx: &mut AiContext<'_>) -> bool {
    if ctx.rng.one_in(ctx.config.chaser_idle_chance) {
        return false;
    }
    let Some(direction) = Direction::toward(me.position, enemy.position) else {
        return false;
    };
    ctx.sink.submit(Command::MoveOrAttack {
        actor: me.id,
        direction,
    });
    true
}

/// Steps in a uniformly random direction.
fn wanderer_turn(me: &mut ActorState, ctx: &mut AiContext<'_>) -> bool {
    let direction = ctx.rng.direction();
    ctx.sink.submit(Command::MoveOrAttack {
        actor: me.id,
        direction,
    });
    true
}

/// Runs `speed` movement sub-steps, each independently choosing targeted or
/// random movement. Faster species simply take more sub-steps per turn.
fn movement_substeps(
    me: &mut ActorState,
    enemy: EnemyView,
    speed: u32,
    ctx: &mut AiContext<'_>,
) -> bool {
    let mut acted = false;
    for _ in 0..speed.max(1) {
        let stepped = if ctx.rng.one_in(ctx.config.movement_mix_chance) {
            chaser_turn(me, enemy, ctx)
        } else {
            wanderer_turn(me, ctx)
        };
        acted |= stepped;
    }
    acted
}

/// Rolls to cast `payload` on the enemy when line of sight holds.
fn maybe_cast(
    me: &ActorState,
    enemy: EnemyView,
    cast_chance: u32,
    payload: EffectKind,
    payload_duration: u32,
    ctx: &mut AiContext<'_>,
) -> bool {
    if !vision::line_of_sight(me.position, enemy.position, ctx.map, false) {
        return false;
    }
    if !ctx.rng.one_in(cast_chance) {
        return false;
    }
    ctx.sink.submit(Command::CastEffect {
        actor: me.id,
        target: enemy.id,
        effect: payload,
        duration: payload_duration,
    });
    true
}

/// Casting takes the whole turn; otherwise the caster moves like a prowler.
fn caster_turn(
    me: &mut ActorState,
    enemy: EnemyView,
    speed: u32,
    cast_chance: u32,
    payload: EffectKind,
    payload_duration: u32,
    ctx: &mut AiContext<'_>,
) -> bool {
    if maybe_cast(me, enemy, cast_chance, payload, payload_duration, ctx) {
        return true;
    }
    let acted = movement_substeps(me, enemy, speed, ctx);
    shift_mood(me, enemy.position, ctx.rng, ctx.config);
    acted
}

/// Whether a straight bolt can be aimed: same row, same column, or an exact
/// diagonal.
fn shot_aligned(me: &ActorState, enemy: EnemyView) -> bool {
    let dx = (enemy.position.x - me.position.x).abs();
    let dy = (enemy.position.y - me.position.y).abs();
    dx == 0 || dy == 0 || dx == dy
}

/// Shooters resolve their mood first and may drop back asleep mid-fight.
/// A successful shot consumes the turn; with no shot lined up they fall
/// back to a spell attempt, and only then to prowler movement.
fn shooter_turn(
    me: &mut ActorState,
    enemy: EnemyView,
    speed: u32,
    cast_chance: u32,
    payload: EffectKind,
    payload_duration: u32,
    ctx: &mut AiContext<'_>,
) -> bool {
    shift_mood(me, enemy.position, ctx.rng, ctx.config);
    if me.mood == Mood::Asleep {
        return false;
    }
    if shot_aligned(me, enemy)
        && ctx.rng.one_in(cast_chance)
        && vision::line_of_sight(me.position, enemy.position, ctx.map, false)
    {
        ctx.sink.submit(Command::Shoot {
            actor: me.id,
            target: enemy.id,
        });
        return true;
    }
    if maybe_cast(me, enemy, cast_chance, payload, payload_duration, ctx) {
        return true;
    }
    movement_substeps(me, enemy, speed, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{self, AiProfile};
    use crate::env::GridMap;
    use crate::state::{EntityId, Position, SpeciesKind};

    fn npc(species: SpeciesKind, position: Position) -> ActorState {
        ActorState::new(EntityId(1), species, position)
    }

    fn enemy_at(position: Position) -> EnemyView {
        EnemyView {
            id: EntityId::PLAYER,
            position,
        }
    }

    struct Harness {
        rng: GameRng,
        map: GridMap,
        config: GameConfig,
        commands: Vec<Command>,
    }

    impl Harness {
        fn new(seed: u64) -> Self {
            Self {
                rng: GameRng::new(seed),
                map: GridMap::open(20, 20),
                config: GameConfig::default(),
                commands: Vec::new(),
            }
        }

        fn ctx(&mut self) -> AiContext<'_> {
            AiContext {
                rng: &mut self.rng,
                map: &self.map,
                config: &self.config,
                sink: &mut self.commands,
            }
        }
    }

    #[test]
    fn chaser_steps_toward_the_enemy() {
        let mut harness = Harness::new(3);
        let mut cat = npc(SpeciesKind::Cat, Position::new(5, 5));
        let enemy = enemy_at(Position::new(8, 2));

        // Retry through idle rolls until the chaser commits a step.
        for _ in 0..32 {
            let mut ctx = harness.ctx();
            if chaser_turn(&mut cat, enemy, &mut ctx) {
                break;
            }
        }
        assert_eq!(
            harness.commands.last(),
            Some(&Command::MoveOrAttack {
                actor: EntityId(1),
                direction: Direction::NorthEast,
            })
        );
    }

    #[test]
    fn chaser_sharing_the_enemy_cell_stays_put() {
        let mut harness = Harness::new(4);
        let position = Position::new(5, 5);
        let mut cat = npc(SpeciesKind::Cat, position);
        for _ in 0..32 {
            let mut ctx = harness.ctx();
            chaser_turn(&mut cat, enemy_at(position), &mut ctx);
        }
        assert!(harness.commands.is_empty());
    }

    #[test]
    fn mood_shifts_only_across_the_proximity_line() {
        let mut harness = Harness::new(9);
        let mut bat = npc(SpeciesKind::Bat, Position::new(5, 5));
        let far = Position::new(19, 19);

        // Far away: an asleep actor never wakes regardless of rolls.
        for _ in 0..64 {
            shift_mood(&mut bat, far, &mut harness.rng, &harness.config);
        }
        assert_eq!(bat.mood, Mood::Asleep);

        // Adjacent: some roll eventually wakes it.
        let near = Position::new(5, 6);
        for _ in 0..64 {
            shift_mood(&mut bat, near, &mut harness.rng, &harness.config);
        }
        assert_eq!(bat.mood, Mood::Awake);

        // Near again: an awake actor never dozes while the enemy is close.
        for _ in 0..64 {
            shift_mood(&mut bat, near, &mut harness.rng, &harness.config);
        }
        assert_eq!(bat.mood, Mood::Awake);
    }

    #[test]
    fn exact_proximity_distance_is_not_near() {
        let mut harness = Harness::new(11);
        let mut bat = npc(SpeciesKind::Bat, Position::new(5, 5));
        // Squared distance exactly equals the squared threshold (6^2).
        let boundary = Position::new(11, 5);
        for _ in 0..64 {
            shift_mood(&mut bat, boundary, &mut harness.rng, &harness.config);
        }
        assert_eq!(bat.mood, Mood::Asleep);
    }

    #[test]
    fn visibility_aware_sleeper_ignores_enemies_behind_walls() {
        let mut harness = Harness::new(5);
        for y in 0..20 {
            harness
                .map
                .set(Position::new(7, y), crate::env::TileProperties::WALL);
        }
        let mut bat = npc(SpeciesKind::Bat, Position::new(5, 5));
        let enemy = enemy_at(Position::new(9, 5));

        for _ in 0..64 {
            let mut ctx = harness.ctx();
            sleep_turn(SleepStyle::VisibilityAware, &mut bat, enemy, &mut ctx);
        }
        assert_eq!(bat.mood, Mood::Asleep);
    }

    #[test]
    fn shot_alignment_covers_rows_columns_and_diagonals() {
        let archer = npc(SpeciesKind::Archer, Position::new(5, 5));
        assert!(shot_aligned(&archer, enemy_at(Position::new(5, 1))));
        assert!(shot_aligned(&archer, enemy_at(Position::new(9, 5))));
        assert!(shot_aligned(&archer, enemy_at(Position::new(8, 2))));
        assert!(!shot_aligned(&archer, enemy_at(Position::new(8, 4))));
    }

    #[test]
    fn shooter_without_a_firing_line_falls_back_to_spells() {
        let mut harness = Harness::new(13);
        let mut archer = npc(SpeciesKind::Archer, Position::new(5, 5));
        archer.mood = Mood::Awake;
        // Near and in line of sight, but on no row, column or diagonal.
        let enemy = enemy_at(Position::new(8, 4));

        for _ in 0..256 {
            let mut ctx = harness.ctx();
            ai::take_turn(&mut archer, enemy, &mut ctx);
        }
        assert!(
            !harness
                .commands
                .iter()
                .any(|command| matches!(command, Command::Shoot { .. })),
            "no firing line exists, nothing should have shot",
        );
        assert!(harness.commands.iter().any(|command| matches!(
            command,
            Command::CastEffect {
                effect: EffectKind::Confuse,
                duration: 8,
                ..
            }
        )));
    }

    #[test]
    fn caster_eventually_casts_its_payload() {
        let mut harness = Harness::new(21);
        let mut druid = npc(SpeciesKind::Druid, Position::new(5, 5));
        let enemy = enemy_at(Position::new(8, 5));

        for _ in 0..128 {
            let mut ctx = harness.ctx();
            ai::take_turn(&mut druid, enemy, &mut ctx);
        }
        assert!(harness.commands.iter().any(|command| matches!(
            command,
            Command::CastEffect {
                effect: EffectKind::Bleed,
                duration: 5,
                ..
            }
        )));
    }

    #[test]
    fn stock_profile_backs_unmapped_species() {
        assert_eq!(AiProfile::for_species(SpeciesKind::Rat), AiProfile::stock());
        assert_eq!(
            AiProfile::for_species(SpeciesKind::Slime),
            AiProfile::stock()
        );
    }
}
