use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// World units from a hex center to any of its corners.
pub const HEX_SIZE: f32 = 1.0;
/// Default board extent in rings around the origin (cube max-norm).
pub const DEFAULT_BOARD_RADIUS: u32 = 32;
/// Largest accepted board radius. Every neighbor of an on-board cell still
/// fits in `i32`.
pub const MAX_BOARD_RADIUS: u32 = i32::MAX as u32 - 1;

/// Rotation between the grid frame (`atan2(z, x)`) and the frame directional
/// road assets were authored in. Authoring-frame angles are shifted by this
/// amount before they are matched against side angles.
pub const SIDE_ANGLE_OFFSET_DEG: f32 = 30.0;
/// Half-width of the band around authoring-frame west (±180°) inside which the
/// sign of the input angle picks the side instead of the nearest-angle search.
pub const WEST_TIE_BAND_DEG: f32 = 1.0e-3;

/// Board geometry. Inserted as a resource by `HexBoardPlugin`; the board reads
/// it once at construction.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Hex size passed to `to_world` / `from_world`.
    pub hex_size: f32,
    /// Cells with cube max-norm above this are rejected.
    pub board_radius: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            hex_size: HEX_SIZE,
            board_radius: DEFAULT_BOARD_RADIUS,
        }
    }
}

impl BoardConfig {
    /// Default config with `board_radius` clamped to [`MAX_BOARD_RADIUS`].
    pub fn with_radius(board_radius: u32) -> Self {
        Self {
            board_radius: board_radius.min(MAX_BOARD_RADIUS),
            ..Self::default()
        }
    }

    /// Same config with the radius clamped to [`MAX_BOARD_RADIUS`].
    pub fn clamped(self) -> Self {
        Self {
            board_radius: self.board_radius.min(MAX_BOARD_RADIUS),
            ..self
        }
    }

    /// Whether `hex_size` is usable for world conversion.
    pub fn has_valid_hex_size(&self) -> bool {
        self.hex_size.is_finite() && self.hex_size > 0.0
    }
}
