//! Road tile classification from a cell's connection list.
//!
//! Orientation is baked into five pre-authored tile variants, so `rotation`
//! is always 0. Intersections (3+ connections) have no authored tile yet and
//! fall back to `Straight`.

use serde::{Deserialize, Serialize};

use crate::axial::HexDirection;

/// Highest connection count with a dedicated classification.
pub const MAX_SUPPORTED_DEGREE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileShape {
    Straight,
    Turn60Left,
    Turn60Right,
    Turn120Left,
    Turn120Right,
}

impl TileShape {
    pub fn label(self) -> &'static str {
        match self {
            TileShape::Straight => "straight",
            TileShape::Turn60Left => "turn60_left",
            TileShape::Turn60Right => "turn60_right",
            TileShape::Turn120Left => "turn120_left",
            TileShape::Turn120Right => "turn120_right",
        }
    }
}

/// Road tile descriptor handed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoadTile {
    shape: TileShape,
    rotation: u16,
}

impl RoadTile {
    const fn new(shape: TileShape) -> Self {
        Self { shape, rotation: 0 }
    }

    pub fn shape(&self) -> TileShape {
        self.shape
    }

    /// Rotation in degrees. Always 0: orientation lives in the shape variant.
    pub fn rotation(&self) -> u16 {
        self.rotation
    }
}

/// Classify a connection list into a tile.
///
/// For two connections the order matters: `[d1, d2]` turns left when `d2` is
/// one (or two) steps after `d1` in direction-index order, right otherwise.
/// 0, 1 and 3+ connections all yield `Straight`.
pub fn classify(connections: &[HexDirection]) -> RoadTile {
    match connections {
        [d1, d2] => RoadTile::new(classify_pair(d1.index(), d2.index())),
        _ => RoadTile::new(TileShape::Straight),
    }
}

fn classify_pair(d1: usize, d2: usize) -> TileShape {
    let forward = (d2 + 6 - d1) % 6;
    let diff = forward.min(6 - forward);
    match diff {
        1 if forward == 1 => TileShape::Turn60Left,
        1 => TileShape::Turn60Right,
        2 if forward == 2 => TileShape::Turn120Left,
        2 => TileShape::Turn120Right,
        // 3 is the opposite pair; 0 only arises from a duplicated direction.
        _ => TileShape::Straight,
    }
}

/// Whether `degree` connections have a dedicated (non-fallback) shape.
pub fn is_supported_degree(degree: usize) -> bool {
    degree <= MAX_SUPPORTED_DEGREE
}
