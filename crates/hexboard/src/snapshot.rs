//! Persisted board state.
//!
//! Only authoritative state is stored: buildings, road flags and zone
//! membership. Road tiles and zone centers are re-derived on restore by
//! replaying the records through the normal board operations.

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::axial::AxialCoord;
use crate::board::{BuildingId, SpatialBoard, ZoneColor, ZoneId};
use crate::config::BoardConfig;
use crate::error::BoardError;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct CellRecord {
    pub coord: AxialCoord,
    pub building: Option<BuildingId>,
    pub has_road: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct ZoneRecord {
    pub id: ZoneId,
    pub name: String,
    pub color: ZoneColor,
    /// Ascending `(q, r)`.
    pub members: Vec<AxialCoord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct BoardSnapshot {
    #[serde(default)]
    pub version: u32,
    pub hex_size: f32,
    pub board_radius: u32,
    /// Cells with a building or a road, ascending `(q, r)`.
    pub cells: Vec<CellRecord>,
    /// Ascending zone id.
    pub zones: Vec<ZoneRecord>,
}

impl BoardSnapshot {
    pub fn encode(&self) -> Vec<u8> {
        bitcode::encode(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, BoardError> {
        let snapshot: BoardSnapshot = bitcode::decode(bytes)?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(BoardError::SnapshotDecode(format!(
                "snapshot is v{}, but only up to v{} is supported",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }
        Ok(snapshot)
    }
}

impl SpatialBoard {
    /// Capture the board's authoritative state. Output order is
    /// deterministic, so equal boards produce equal bytes.
    pub fn snapshot(&self) -> BoardSnapshot {
        let mut cells: Vec<CellRecord> = self
            .iter_cells()
            .filter(|(_, cell)| cell.building().is_some() || cell.has_road())
            .map(|(coord, cell)| CellRecord {
                coord,
                building: cell.building(),
                has_road: cell.has_road(),
            })
            .collect();
        cells.sort_unstable_by_key(|record| record.coord);

        let zones = self
            .zones()
            .map(|(id, zone)| ZoneRecord {
                id,
                name: zone.name().to_string(),
                color: zone.color(),
                members: zone.members().iter().copied().collect(),
            })
            .collect();

        BoardSnapshot {
            version: SNAPSHOT_VERSION,
            hex_size: self.config().hex_size,
            board_radius: self.radius(),
            cells,
            zones,
        }
    }

    /// Rebuild a board from a snapshot.
    ///
    /// Fails with `SnapshotDecode` if the hex size is not finite and
    /// positive, and otherwise on the first record the board would reject
    /// (off-board cell, conflicting zone membership).
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Result<Self, BoardError> {
        let config = BoardConfig {
            hex_size: snapshot.hex_size,
            board_radius: snapshot.board_radius,
        };
        if !config.has_valid_hex_size() {
            return Err(BoardError::SnapshotDecode(format!(
                "invalid hex size {}",
                snapshot.hex_size
            )));
        }
        let mut board = SpatialBoard::new(config);

        for zone in &snapshot.zones {
            board.define_zone(zone.id, zone.name.clone(), zone.color);
            board.assign_zone(zone.members.iter().copied(), zone.id)?;
        }
        for record in &snapshot.cells {
            if let Some(building) = record.building {
                board.place_building(record.coord, building)?;
            }
            if record.has_road {
                board.set_road(record.coord, true)?;
            }
        }

        info!(
            "Board restored: {} cells, {} zones, {} roads",
            board.len(),
            snapshot.zones.len(),
            board.road_cells().len()
        );
        Ok(board)
    }
}
