//! Action intents emitted by AI dispatch.
//!
//! Behaviors decide *what* an actor wants to do; the combat/command layer
//! that owns movement rules, bump attacks, and spell resolution executes the
//! intent. The turn queue advances regardless of whether execution succeeds.

use crate::effects::EffectKind;
use crate::state::{EntityId, Position};

/// The 8 compass directions, clockwise from north.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Grid offset of one step in this direction (y grows southward).
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Unit direction from `from` toward `to`, or `None` when the points
    /// coincide.
    pub fn toward(from: Position, to: Position) -> Option<Self> {
        Self::from_offset((to.x - from.x).signum(), (to.y - from.y).signum())
    }

    const fn from_offset(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (1, -1) => Some(Direction::NorthEast),
            (1, 0) => Some(Direction::East),
            (1, 1) => Some(Direction::SouthEast),
            (0, 1) => Some(Direction::South),
            (-1, 1) => Some(Direction::SouthWest),
            (-1, 0) => Some(Direction::West),
            (-1, -1) => Some(Direction::NorthWest),
            _ => None,
        }
    }

    /// Applies one step of this direction to a position.
    pub const fn step(self, from: Position) -> Position {
        let (dx, dy) = self.offset();
        from.offset(dx, dy)
    }
}

/// One action intent, handed to the external command layer for execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Step in a direction; bump-attacks whatever occupies the target cell.
    MoveOrAttack {
        actor: EntityId,
        direction: Direction,
    },
    /// Ranged bolt along an orthogonal or diagonal line.
    Shoot { actor: EntityId, target: EntityId },
    /// Cast a status effect onto the target.
    CastEffect {
        actor: EntityId,
        target: EntityId,
        effect: EffectKind,
        duration: u32,
    },
}

/// Receiver for command intents produced during one actor's turn.
pub trait CommandSink {
    fn submit(&mut self, command: Command);
}

impl CommandSink for Vec<Command> {
    fn submit(&mut self, command: Command) {
        self.push(command);
    }
}
