use bevy::prelude::*;

use crate::axial::AxialCoord;
use crate::board::{BuildingId, RoadEdit, SpatialBoard, ZoneColor, ZoneId};
use crate::error::BoardError;
use crate::tiles::RoadTile;

// =============================================================================
// Events
// =============================================================================

/// Edit request for the board resource, applied in order by
/// [`apply_board_commands`].
#[derive(Event, Debug, Clone, PartialEq)]
pub enum BoardCommand {
    PlaceBuilding {
        coord: AxialCoord,
        building: BuildingId,
    },
    ClearBuilding {
        coord: AxialCoord,
    },
    DefineZone {
        zone: ZoneId,
        name: String,
        color: ZoneColor,
    },
    AssignZone {
        cells: Vec<AxialCoord>,
        zone: ZoneId,
    },
    UnassignZone {
        cells: Vec<AxialCoord>,
    },
    RemoveZone {
        zone: ZoneId,
    },
    SetRoad {
        coord: AxialCoord,
        present: bool,
    },
}

/// Tiles reclassified by one road edit. Renderers swap assets for exactly
/// these cells; a `None` tile means the road was removed.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct RoadTilesChanged {
    pub tiles: Vec<(AxialCoord, Option<RoadTile>)>,
}

/// A rejected command or a soft fallback raised while applying one.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct BoardWarning {
    pub error: BoardError,
}

// =============================================================================
// Systems
// =============================================================================

/// Apply queued [`BoardCommand`]s to the board.
///
/// Rejected commands leave the board unchanged and are reported as
/// [`BoardWarning`]s; they never stop later commands in the same frame.
pub fn apply_board_commands(
    mut requests: EventReader<BoardCommand>,
    mut board: ResMut<SpatialBoard>,
    mut tiles_changed: EventWriter<RoadTilesChanged>,
    mut warnings: EventWriter<BoardWarning>,
) {
    for request in requests.read() {
        match apply_command(&mut board, request) {
            Ok(Some(edit)) => {
                for error in edit.warnings {
                    warnings.send(BoardWarning { error });
                }
                if !edit.tiles.is_empty() {
                    tiles_changed.send(RoadTilesChanged { tiles: edit.tiles });
                }
            }
            Ok(None) => {}
            Err(error) => {
                warn!("Board command rejected: {}", error);
                warnings.send(BoardWarning { error });
            }
        }
    }
}

fn apply_command(
    board: &mut SpatialBoard,
    command: &BoardCommand,
) -> Result<Option<RoadEdit>, BoardError> {
    match command {
        BoardCommand::PlaceBuilding { coord, building } => {
            board.place_building(*coord, *building)?;
        }
        BoardCommand::ClearBuilding { coord } => board.clear_building(*coord)?,
        BoardCommand::DefineZone { zone, name, color } => {
            board.define_zone(*zone, name.clone(), *color);
        }
        BoardCommand::AssignZone { cells, zone } => {
            board.assign_zone(cells.iter().copied(), *zone)?;
        }
        BoardCommand::UnassignZone { cells } => board.unassign_zone(cells.iter().copied())?,
        BoardCommand::RemoveZone { zone } => board.remove_zone(*zone)?,
        BoardCommand::SetRoad { coord, present } => {
            return board.set_road(*coord, *present).map(Some);
        }
    }
    Ok(None)
}
