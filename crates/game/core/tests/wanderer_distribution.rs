//! Statistical sanity check on random-walk direction picks.

use std::collections::HashMap;

use crawl_core::ai::{self, AiContext, EnemyView};
use crawl_core::{
    ActorState, Command, Direction, EntityId, GameConfig, GameRng, GridMap, Position, SpeciesKind,
};

/// 1000 wanderer turns on an open grid: every one of the 8 directions must
/// come up, each within a loose band around the uniform expectation of 125.
/// Deterministic for the fixed seed, so no flakiness.
#[test]
fn wanderer_directions_are_roughly_uniform() {
    let mut rng = GameRng::new(2024);
    let map = GridMap::open(10, 10);
    let config = GameConfig::default();
    let mut ant = ActorState::new(EntityId(1), SpeciesKind::Ant, Position::new(5, 5));
    let enemy = EnemyView {
        id: EntityId::PLAYER,
        position: Position::new(99, 99),
    };

    let mut commands: Vec<Command> = Vec::new();
    for _ in 0..1000 {
        let mut ctx = AiContext {
            rng: &mut rng,
            map: &map,
            config: &config,
            sink: &mut commands,
        };
        ai::take_turn(&mut ant, enemy, &mut ctx);
    }
    assert_eq!(commands.len(), 1000);

    let mut counts: HashMap<Direction, u32> = HashMap::new();
    for command in &commands {
        let Command::MoveOrAttack { direction, .. } = command else {
            panic!("wanderer emitted a non-movement intent: {command:?}");
        };
        *counts.entry(*direction).or_default() += 1;
    }

    for direction in Direction::ALL {
        let count = counts.get(&direction).copied().unwrap_or(0);
        assert!(
            (75..=175).contains(&count),
            "direction {direction} picked {count} times in 1000",
        );
    }
}
