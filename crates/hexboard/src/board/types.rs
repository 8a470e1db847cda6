//! Cell, zone and report types owned by [`super::SpatialBoard`].

use std::collections::BTreeSet;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::axial::AxialCoord;
use crate::error::BoardError;
use crate::sides::AssetKey;
use crate::tiles::RoadTile;

/// Identifier of a building (work item) supplied by the host application.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode,
)]
pub struct BuildingId(pub u64);

/// Identifier of a zone supplied by the host application.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode,
)]
pub struct ZoneId(pub u32);

/// What stands on a cell.
///
/// `ZoneCenter` is written only by the board when it re-derives a zone's
/// center; a building placed on the center cell takes precedence until it is
/// cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupancy {
    #[default]
    Vacant,
    Building(BuildingId),
    ZoneCenter,
}

/// State of one cell. Read-only outside the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub(crate) occupancy: Occupancy,
    pub(crate) zone: Option<ZoneId>,
    pub(crate) has_road: bool,
    pub(crate) road_tile: Option<RoadTile>,
}

impl Cell {
    pub fn occupancy(&self) -> Occupancy {
        self.occupancy
    }

    pub fn building(&self) -> Option<BuildingId> {
        match self.occupancy {
            Occupancy::Building(id) => Some(id),
            _ => None,
        }
    }

    pub fn zone(&self) -> Option<ZoneId> {
        self.zone
    }

    pub fn has_road(&self) -> bool {
        self.has_road
    }

    /// Derived tile; `Some` exactly when the cell has a road.
    pub fn road_tile(&self) -> Option<RoadTile> {
        self.road_tile
    }

    pub(crate) fn is_blank(&self) -> bool {
        *self == Cell::default()
    }
}

/// RGB display color of a zone.
pub type ZoneColor = [u8; 3];

/// A named, colored group of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub(crate) name: String,
    pub(crate) color: ZoneColor,
    pub(crate) members: BTreeSet<AxialCoord>,
}

impl Zone {
    pub(crate) fn new(name: String, color: ZoneColor) -> Self {
        Self {
            name,
            color,
            members: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> ZoneColor {
        self.color
    }

    /// Members in ascending `(q, r)` order.
    pub fn members(&self) -> &BTreeSet<AxialCoord> {
        &self.members
    }
}

/// Outcome of a road edit: every tile that was reclassified, plus soft
/// warnings raised while doing so.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoadEdit {
    /// `(cell, tile)` for the edited cell and each road neighbor. A `None`
    /// tile means the cell no longer carries a road.
    pub tiles: Vec<(AxialCoord, Option<RoadTile>)>,
    pub warnings: Vec<BoardError>,
}

/// Asset selection for a road cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileAsset {
    /// Authored directional asset for the requested entry/exit pair.
    Authored(AssetKey),
    /// No authored asset; render the generic classified tile.
    Generic(RoadTile),
}
