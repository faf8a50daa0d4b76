use crate::state::Position;

/// Static map oracle exposing per-cell properties to the simulation core.
///
/// The core never mutates map cells; dungeon generation and cell state live
/// in the owning map layer.
pub trait MapOracle {
    fn dimensions(&self) -> MapDimensions;

    /// Properties of the cell at `position`, or `None` when out of bounds.
    fn tile(&self, position: Position) -> Option<TileProperties>;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }
}

/// Immutable per-cell properties the simulation consumes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileProperties {
    /// Blocks line of sight.
    pub opaque: bool,
    /// Blocks movement into the cell.
    pub blocks_movement: bool,
    /// Emits light, extending nearby observers' perception radius.
    pub glows: bool,
}

impl TileProperties {
    pub const FLOOR: Self = Self {
        opaque: false,
        blocks_movement: false,
        glows: false,
    };

    pub const WALL: Self = Self {
        opaque: true,
        blocks_movement: true,
        glows: false,
    };

    pub const GLOWING_ROCK: Self = Self {
        opaque: false,
        blocks_movement: true,
        glows: true,
    };
}

/// Dense grid-backed [`MapOracle`] implementation.
///
/// Handy for scenario setup and tests; production maps may implement the
/// oracle over whatever storage the generator produces.
#[derive(Clone, Debug)]
pub struct GridMap {
    dimensions: MapDimensions,
    tiles: Vec<TileProperties>,
}

impl GridMap {
    /// Creates an all-floor map of the given size.
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            dimensions: MapDimensions::new(width, height),
            tiles: vec![TileProperties::FLOOR; (width * height) as usize],
        }
    }

    pub fn set(&mut self, position: Position, tile: TileProperties) {
        if let Some(index) = self.index(position) {
            self.tiles[index] = tile;
        }
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.dimensions
            .contains(position)
            .then(|| (position.y as u32 * self.dimensions.width + position.x as u32) as usize)
    }
}

impl MapOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: Position) -> Option<TileProperties> {
        self.index(position).map(|index| self.tiles[index])
    }
}
