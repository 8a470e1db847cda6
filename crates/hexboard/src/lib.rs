//! Hexagonal board spatial model and road-tile resolver.
//!
//! The board stores buildings, zone membership and road flags on a pointy-top
//! axial hex grid. Road tiles and zone centers are derived data: the board
//! recomputes them on every edit, touching only the edited cell and its
//! immediate neighbors.

pub mod axial;
pub mod board;
pub mod commands;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod plugin;
pub mod sides;
pub mod snapshot;
pub mod tiles;

pub use axial::{AxialCoord, HexDirection};
pub use board::{
    BuildingId, Cell, Occupancy, RoadEdit, SpatialBoard, TileAsset, Zone, ZoneColor, ZoneId,
};
pub use commands::{BoardCommand, BoardWarning, RoadTilesChanged};
pub use config::BoardConfig;
pub use connectivity::ConnectionSet;
pub use error::BoardError;
pub use plugin::HexBoardPlugin;
pub use sides::{AssetKey, Side};
pub use snapshot::BoardSnapshot;
pub use tiles::{RoadTile, TileShape};
