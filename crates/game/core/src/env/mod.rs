//! External collaborator surfaces.
//!
//! The simulation core reads its surroundings through narrow capabilities:
//! the map oracle (per-cell opacity, movement blocking, light emission) and
//! the seeded random source. Neither is ever mutated by visibility queries.

mod map;
mod rng;

pub use map::{GridMap, MapDimensions, MapOracle, TileProperties};
pub use rng::GameRng;
