//! Line-of-sight and perception-radius queries.
//!
//! Two orthogonal questions are kept separate on purpose: "how far can this
//! observer perceive" is a cheap scalar computed once per decision or draw,
//! while "is this exact cell unobstructed" is an O(distance) line walk.
//! Callers check the radius first and short-circuit the walk for anything
//! already out of range.
//!
//! All queries are read-only over the [`MapOracle`]; nothing here mutates.

use crate::config::GameConfig;
use crate::effects::EffectKind;
use crate::env::MapOracle;
use crate::state::{ActorState, Position};

/// Integer line iterator between two grid points (Bresenham stepping).
///
/// Yields every cell on the discrete line, both endpoints included.
#[derive(Clone, Debug)]
pub struct BresenhamIter {
    x: i32,
    y: i32,
    dx1: i32,
    dy1: i32,
    dx2: i32,
    dy2: i32,
    longest: i32,
    shortest: i32,
    numerator: i32,
    i: i32,
}

impl BresenhamIter {
    pub fn between(from: Position, to: Position) -> Self {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let dx1 = dx.signum();
        let dy1 = dy.signum();

        let abs_dx = dx.abs();
        let abs_dy = dy.abs();
        let (longest, shortest) = if abs_dy > abs_dx {
            (abs_dy, abs_dx)
        } else {
            (abs_dx, abs_dy)
        };

        // When y is the driving axis, the secondary step moves along y only.
        let (dx2, dy2) = if longest == abs_dy && abs_dy > abs_dx {
            (0, dy1)
        } else {
            (dx1, 0)
        };

        Self {
            x: from.x,
            y: from.y,
            dx1,
            dy1,
            dx2,
            dy2,
            longest,
            shortest,
            numerator: longest / 2,
            i: 0,
        }
    }
}

impl Iterator for BresenhamIter {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.i > self.longest {
            return None;
        }
        let current = Position::new(self.x, self.y);

        self.numerator += self.shortest;
        if self.numerator >= self.longest && self.longest > 0 {
            self.numerator -= self.longest;
            self.x += self.dx1;
            self.y += self.dy1;
        } else {
            self.x += self.dx2;
            self.y += self.dy2;
        }
        self.i += 1;

        Some(current)
    }
}

/// Walks the discrete line between two points and reports whether it is
/// unobstructed.
///
/// Returns false as soon as any cell on the line (endpoints included) is
/// opaque or out of bounds. The walk runs in a canonical endpoint order, so
/// the result is symmetric: `line_of_sight(a, b, ..) == line_of_sight(b, a, ..)`
/// regardless of which cells a directional Bresenham would tie-break onto.
///
/// `env_only` is part of the caller contract for occupant-sensitive
/// occlusion; the map oracle currently only exposes environmental opacity,
/// so both values behave identically.
pub fn line_of_sight(
    from: Position,
    to: Position,
    map: &dyn MapOracle,
    env_only: bool,
) -> bool {
    let _ = env_only;
    let (from, to) = if from <= to { (from, to) } else { (to, from) };
    for point in BresenhamIter::between(from, to) {
        match map.tile(point) {
            Some(tile) if !tile.opaque => {}
            // Out-of-bounds probes are "blocked", never an error.
            _ => return false,
        }
    }
    true
}

/// Ray-casting variant of [`line_of_sight`] using incremental error-term
/// stepping. Equivalent opacity semantics for interior cells; the target
/// cell itself is not tested.
pub fn line_of_sight_raycast(from: Position, to: Position, map: &dyn MapOracle) -> bool {
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };

    let mut err = dx - dy;
    let mut x = from.x;
    let mut y = from.y;

    while x != to.x || y != to.y {
        match map.tile(Position::new(x, y)) {
            Some(tile) if !tile.opaque => {}
            _ => return false,
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }

    true
}

/// Squared-distance comparison against a caller-supplied squared threshold.
/// No square root is ever taken.
pub fn within_radius(a: Position, b: Position, radius_squared: u64) -> bool {
    a.squared_distance(b) <= radius_squared
}

/// Maximum distance at which an observer at `origin` can perceive occupants.
///
/// Starts from `base` (already reduced by any blindness-type effect the
/// caller accounts for), adds a fixed bonus per glowing cell within the
/// configured scan radius, and caps at the absolute maximum.
pub fn effective_radius(
    origin: Position,
    map: &dyn MapOracle,
    base: u32,
    config: &GameConfig,
) -> u32 {
    let glowing = count_light_sources(origin, map, config.glow_scan_radius);
    (base + glowing * config.glow_bonus).min(config.max_perception)
}

fn count_light_sources(origin: Position, map: &dyn MapOracle, radius: u32) -> u32 {
    origin
        .neighbors_within(radius)
        .filter(|&point| map.tile(point).is_some_and(|tile| tile.glows))
        .count() as u32
}

/// Snapshot of the observer-side inputs to an occupant visibility check.
///
/// Copied out of an actor so visibility can be evaluated while other actors
/// are being mutated.
#[derive(Clone, Copy, Debug)]
pub struct ObserverView {
    pub position: Position,
    pub blinded: bool,
    pub base_radius: u32,
}

impl ObserverView {
    pub fn of(actor: &ActorState, config: &GameConfig) -> Self {
        Self {
            position: actor.position,
            blinded: actor.has_effect(EffectKind::Blind),
            base_radius: config.base_perception,
        }
    }
}

/// Whether an occupant at `occupant` is visible to the observer: inside the
/// effective perception radius, observer not blinded, and line of sight
/// holds between the two positions.
pub fn occupant_visible(
    observer: &ObserverView,
    occupant: Position,
    map: &dyn MapOracle,
    config: &GameConfig,
) -> bool {
    let radius = u64::from(effective_radius(
        observer.position,
        map,
        observer.base_radius,
        config,
    ));
    if !within_radius(observer.position, occupant, radius * radius) {
        return false;
    }
    if observer.blinded {
        return false;
    }
    line_of_sight(occupant, observer.position, map, true)
}

/// Full occupant-visibility rule between two actors, including the player's
/// self-observation exemption (a blinded player still perceives itself).
pub fn actor_visible(
    observer: &ActorState,
    occupant: &ActorState,
    map: &dyn MapOracle,
    config: &GameConfig,
) -> bool {
    if observer.id == occupant.id && observer.is_player {
        return true;
    }
    occupant_visible(
        &ObserverView::of(observer, config),
        occupant.position,
        map,
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{GridMap, TileProperties};

    #[test]
    fn bresenham_covers_both_endpoints() {
        let points: Vec<_> =
            BresenhamIter::between(Position::new(0, 0), Position::new(3, 1)).collect();
        assert_eq!(points.first(), Some(&Position::new(0, 0)));
        assert_eq!(points.last(), Some(&Position::new(3, 1)));
        assert_eq!(points.len(), 4);
    }

    #[test]
    fn wall_blocks_sight() {
        let mut map = GridMap::open(10, 10);
        map.set(Position::new(5, 5), TileProperties::WALL);

        assert!(line_of_sight(
            Position::new(2, 5),
            Position::new(4, 5),
            &map,
            true
        ));
        assert!(!line_of_sight(
            Position::new(2, 5),
            Position::new(8, 5),
            &map,
            true
        ));
    }

    #[test]
    fn out_of_bounds_is_blocked_not_an_error() {
        let map = GridMap::open(4, 4);
        assert!(!line_of_sight(
            Position::new(1, 1),
            Position::new(9, 9),
            &map,
            true
        ));
        assert!(!line_of_sight_raycast(
            Position::new(1, 1),
            Position::new(9, 9),
            &map
        ));
    }

    #[test]
    fn radius_grows_with_glowing_cells_and_caps() {
        let config = GameConfig::default();
        let mut map = GridMap::open(20, 20);
        let origin = Position::new(10, 10);

        let bare = effective_radius(origin, &map, config.base_perception, &config);
        assert_eq!(bare, config.base_perception);

        map.set(Position::new(11, 10), TileProperties::GLOWING_ROCK);
        let one = effective_radius(origin, &map, config.base_perception, &config);
        assert_eq!(one, config.base_perception + config.glow_bonus);

        for x in 6..15 {
            map.set(Position::new(x, 12), TileProperties::GLOWING_ROCK);
        }
        let many = effective_radius(origin, &map, config.base_perception, &config);
        assert!(many >= one);
        assert_eq!(many, config.max_perception);
    }

    #[test]
    fn blinded_observer_sees_no_occupants() {
        let config = GameConfig::default();
        let map = GridMap::open(10, 10);
        let observer = ObserverView {
            position: Position::new(1, 1),
            blinded: true,
            base_radius: config.base_perception,
        };
        assert!(!occupant_visible(
            &observer,
            Position::new(2, 2),
            &map,
            &config
        ));
    }
}
