// ---------------------------------------------------------------------------
// BoardError: typed failures for board edits and asset resolution
// ---------------------------------------------------------------------------

use std::fmt;

use crate::axial::AxialCoord;
use crate::board::{BuildingId, ZoneId};

/// Errors produced by board operations.
///
/// `UnsupportedConnectivityDegree` and `AssetKeyUnavailable` are soft: the
/// board reports them alongside a fallback result instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate lies outside the configured board radius.
    InvalidCoordinate { coord: AxialCoord, radius: u32 },
    /// Cell already holds a different building.
    CellAlreadyOccupied {
        coord: AxialCoord,
        existing: BuildingId,
    },
    /// Cell already belongs to a different zone.
    CellAlreadyZoned { coord: AxialCoord, zone: ZoneId },
    /// Zone was never defined on this board.
    UnknownZone(ZoneId),
    /// Road cell has 3 or more road neighbors; classified as `Straight`.
    UnsupportedConnectivityDegree { coord: AxialCoord, degree: usize },
    /// Entry/exit key is not authored or is blocklisted.
    AssetKeyUnavailable { key: String },
    /// Snapshot bytes could not be decoded.
    SnapshotDecode(String),
}

impl BoardError {
    /// Soft errors degrade to a documented fallback and never abort an edit.
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            BoardError::UnsupportedConnectivityDegree { .. } | BoardError::AssetKeyUnavailable { .. }
        )
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidCoordinate { coord, radius } => {
                write!(f, "Invalid coordinate {coord}: outside board radius {radius}")
            }
            BoardError::CellAlreadyOccupied { coord, existing } => write!(
                f,
                "Cell {coord} is already occupied by building {}",
                existing.0
            ),
            BoardError::CellAlreadyZoned { coord, zone } => {
                write!(f, "Cell {coord} already belongs to zone {}", zone.0)
            }
            BoardError::UnknownZone(zone) => write!(f, "Unknown zone {}", zone.0),
            BoardError::UnsupportedConnectivityDegree { coord, degree } => write!(
                f,
                "Road cell {coord} has {degree} connections; using straight fallback"
            ),
            BoardError::AssetKeyUnavailable { key } => {
                write!(f, "Asset key unavailable: {key}")
            }
            BoardError::SnapshotDecode(msg) => write!(f, "Snapshot decoding error: {msg}"),
        }
    }
}

impl std::error::Error for BoardError {}

impl From<bitcode::Error> for BoardError {
    fn from(e: bitcode::Error) -> Self {
        BoardError::SnapshotDecode(e.to_string())
    }
}
