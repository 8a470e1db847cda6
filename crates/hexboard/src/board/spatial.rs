//! The board registry and its edit operations.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use bevy::prelude::*;

use crate::axial::AxialCoord;
use crate::config::BoardConfig;
use crate::connectivity::{self, ConnectionSet};
use crate::error::BoardError;
use crate::sides::{resolve_asset, Side};
use crate::tiles::{classify, is_supported_degree, RoadTile};

use super::types::{BuildingId, Cell, Occupancy, RoadEdit, TileAsset, Zone, ZoneColor, ZoneId};

/// Cell and zone registry for one project's board.
///
/// Cells are stored sparsely: a coordinate with no building, zone or road has
/// no entry. All mutation goes through the methods below so that zone
/// membership, center markers and road tiles stay consistent.
#[derive(Resource, Debug, Clone)]
pub struct SpatialBoard {
    config: BoardConfig,
    cells: HashMap<AxialCoord, Cell>,
    zones: BTreeMap<ZoneId, Zone>,
}

impl FromWorld for SpatialBoard {
    fn from_world(world: &mut World) -> Self {
        let config = world
            .get_resource::<BoardConfig>()
            .copied()
            .unwrap_or_default();
        SpatialBoard::new(config)
    }
}

impl SpatialBoard {
    /// Board for `config`, with the radius clamped to
    /// [`crate::config::MAX_BOARD_RADIUS`].
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config: config.clamped(),
            cells: HashMap::new(),
            zones: BTreeMap::new(),
        }
    }

    pub fn with_radius(board_radius: u32) -> Self {
        Self::new(BoardConfig::with_radius(board_radius))
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn radius(&self) -> u32 {
        self.config.board_radius
    }

    /// Number of cells carrying any state.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: AxialCoord) -> bool {
        coord.is_valid(self.config.board_radius)
    }

    fn check(&self, coord: AxialCoord) -> Result<(), BoardError> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(BoardError::InvalidCoordinate {
                coord,
                radius: self.config.board_radius,
            })
        }
    }

    pub fn cell(&self, coord: AxialCoord) -> Option<&Cell> {
        self.cells.get(&coord)
    }

    fn cell_mut(&mut self, coord: AxialCoord) -> &mut Cell {
        self.cells.entry(coord).or_default()
    }

    /// Drop the entry for `coord` if it no longer carries state.
    fn prune(&mut self, coord: AxialCoord) {
        if self.cells.get(&coord).is_some_and(Cell::is_blank) {
            self.cells.remove(&coord);
        }
    }

    pub fn world_position(&self, coord: AxialCoord) -> Vec3 {
        coord.to_world(self.config.hex_size)
    }

    /// Board cell under a world-space point, if it lies on the board.
    pub fn cell_at_world(&self, pos: Vec3) -> Option<AxialCoord> {
        let coord = AxialCoord::from_world(pos, self.config.hex_size);
        self.contains(coord).then_some(coord)
    }

    // -----------------------------------------------------------------------
    // Buildings
    // -----------------------------------------------------------------------

    pub fn building_at(&self, coord: AxialCoord) -> Option<BuildingId> {
        self.cell(coord).and_then(Cell::building)
    }

    /// Place `building` on `coord`. Placing the same building again is a
    /// no-op; a different building already there is a conflict.
    pub fn place_building(
        &mut self,
        coord: AxialCoord,
        building: BuildingId,
    ) -> Result<(), BoardError> {
        self.check(coord)?;
        if let Some(existing) = self.building_at(coord) {
            if existing == building {
                return Ok(());
            }
            return Err(BoardError::CellAlreadyOccupied { coord, existing });
        }
        self.cell_mut(coord).occupancy = Occupancy::Building(building);
        debug!("Board: placed building {} at {}", building.0, coord);
        Ok(())
    }

    /// Remove any building from `coord`. Idempotent.
    pub fn clear_building(&mut self, coord: AxialCoord) -> Result<(), BoardError> {
        self.check(coord)?;
        if self.building_at(coord).is_none() {
            return Ok(());
        }
        let restores_center = self
            .cell(coord)
            .and_then(Cell::zone)
            .is_some_and(|zone| self.zone_center(zone) == Some(coord));
        self.cell_mut(coord).occupancy = if restores_center {
            Occupancy::ZoneCenter
        } else {
            Occupancy::Vacant
        };
        self.prune(coord);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Zones
    // -----------------------------------------------------------------------

    /// Register a zone, or update the name and color of an existing one.
    /// Membership is left untouched.
    pub fn define_zone(&mut self, zone: ZoneId, name: impl Into<String>, color: ZoneColor) {
        let name = name.into();
        match self.zones.get_mut(&zone) {
            Some(existing) => {
                existing.name = name;
                existing.color = color;
            }
            None => {
                self.zones.insert(zone, Zone::new(name, color));
            }
        }
    }

    pub fn zone(&self, zone: ZoneId) -> Option<&Zone> {
        self.zones.get(&zone)
    }

    /// All zones in ascending id order.
    pub fn zones(&self) -> impl Iterator<Item = (ZoneId, &Zone)> {
        self.zones.iter().map(|(id, zone)| (*id, zone))
    }

    /// Add `cells` to `zone`.
    ///
    /// Fails without modifying anything if any cell is off the board or
    /// belongs to a different zone. Cells already in `zone` are skipped.
    pub fn assign_zone(
        &mut self,
        cells: impl IntoIterator<Item = AxialCoord>,
        zone: ZoneId,
    ) -> Result<(), BoardError> {
        if !self.zones.contains_key(&zone) {
            return Err(BoardError::UnknownZone(zone));
        }
        let cells: BTreeSet<AxialCoord> = cells.into_iter().collect();
        for &coord in &cells {
            self.check(coord)?;
            if let Some(current) = self.cell(coord).and_then(Cell::zone) {
                if current != zone {
                    return Err(BoardError::CellAlreadyZoned {
                        coord,
                        zone: current,
                    });
                }
            }
        }

        let mut added = 0usize;
        for &coord in &cells {
            let cell = self.cell_mut(coord);
            if cell.zone.is_none() {
                cell.zone = Some(zone);
                added += 1;
            }
        }
        if added == 0 {
            return Ok(());
        }
        if let Some(entry) = self.zones.get_mut(&zone) {
            entry.members.extend(cells.iter().copied());
        }
        self.refresh_zone_center(zone);
        debug!("Board: assigned {} cells to zone {}", added, zone.0);
        Ok(())
    }

    /// Remove `cells` from whichever zone holds them. Unzoned cells are
    /// skipped; off-board cells fail the whole call before any change.
    pub fn unassign_zone(
        &mut self,
        cells: impl IntoIterator<Item = AxialCoord>,
    ) -> Result<(), BoardError> {
        let cells: BTreeSet<AxialCoord> = cells.into_iter().collect();
        for &coord in &cells {
            self.check(coord)?;
        }

        let mut touched = BTreeSet::new();
        for &coord in &cells {
            let Some(zone) = self.cell(coord).and_then(Cell::zone) else {
                continue;
            };
            let cell = self.cell_mut(coord);
            cell.zone = None;
            if cell.occupancy == Occupancy::ZoneCenter {
                cell.occupancy = Occupancy::Vacant;
            }
            if let Some(entry) = self.zones.get_mut(&zone) {
                entry.members.remove(&coord);
            }
            touched.insert(zone);
            self.prune(coord);
        }
        for zone in touched {
            self.refresh_zone_center(zone);
        }
        Ok(())
    }

    /// Unassign every member of `zone` and forget the zone.
    pub fn remove_zone(&mut self, zone: ZoneId) -> Result<(), BoardError> {
        let members: Vec<AxialCoord> = match self.zones.get(&zone) {
            Some(entry) => entry.members.iter().copied().collect(),
            None => return Err(BoardError::UnknownZone(zone)),
        };
        self.unassign_zone(members)?;
        self.zones.remove(&zone);
        info!("Board: removed zone {}", zone.0);
        Ok(())
    }

    /// Member cell nearest the zone's axial centroid.
    ///
    /// Distances are compared in axial `(q, r)` space; equal distances go to
    /// the lexicographically smallest `(q, r)`. `None` for unknown or empty
    /// zones.
    pub fn zone_center(&self, zone: ZoneId) -> Option<AxialCoord> {
        self.zones
            .get(&zone)
            .and_then(|entry| centroid_nearest(&entry.members))
    }

    /// Move the `ZoneCenter` marker to the zone's current center.
    fn refresh_zone_center(&mut self, zone: ZoneId) {
        let Some(entry) = self.zones.get(&zone) else {
            return;
        };
        let center = centroid_nearest(&entry.members);
        let members: Vec<AxialCoord> = entry.members.iter().copied().collect();
        for coord in members {
            if Some(coord) == center {
                continue;
            }
            if let Some(cell) = self.cells.get_mut(&coord) {
                if cell.occupancy == Occupancy::ZoneCenter {
                    cell.occupancy = Occupancy::Vacant;
                }
            }
        }
        if let Some(center) = center {
            let cell = self.cell_mut(center);
            if cell.occupancy == Occupancy::Vacant {
                cell.occupancy = Occupancy::ZoneCenter;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Roads
    // -----------------------------------------------------------------------

    pub fn has_road(&self, coord: AxialCoord) -> bool {
        self.cell(coord).is_some_and(Cell::has_road)
    }

    pub fn road_tile(&self, coord: AxialCoord) -> Option<RoadTile> {
        self.cell(coord).and_then(Cell::road_tile)
    }

    /// Road cells in ascending `(q, r)` order.
    pub fn road_cells(&self) -> Vec<AxialCoord> {
        let mut roads: Vec<AxialCoord> = self
            .cells
            .iter()
            .filter(|(_, cell)| cell.has_road)
            .map(|(coord, _)| *coord)
            .collect();
        roads.sort_unstable();
        roads
    }

    /// Directions around `coord` whose neighbor carries a road.
    pub fn connections(&self, coord: AxialCoord) -> ConnectionSet {
        connectivity::connections(coord, |neighbor| self.has_road(neighbor))
    }

    /// Set or clear the road flag on `coord` and reclassify the cell and its
    /// road neighbors. Nothing beyond distance 1 is touched.
    pub fn set_road(&mut self, coord: AxialCoord, present: bool) -> Result<RoadEdit, BoardError> {
        self.check(coord)?;
        self.cell_mut(coord).has_road = present;

        let mut edit = RoadEdit::default();
        if !present {
            self.cell_mut(coord).road_tile = None;
            self.prune(coord);
            edit.tiles.push((coord, None));
        } else {
            self.reclassify(coord, &mut edit);
        }
        for neighbor in coord.neighbors() {
            if self.has_road(neighbor) {
                self.reclassify(neighbor, &mut edit);
            }
        }
        debug!(
            "Board: road {} at {}, {} tiles reclassified",
            if present { "set" } else { "cleared" },
            coord,
            edit.tiles.len()
        );
        Ok(edit)
    }

    fn reclassify(&mut self, coord: AxialCoord, edit: &mut RoadEdit) {
        let connections = self.connections(coord);
        let degree = connections.degree();
        let tile = classify(&connections.to_vec());
        if !is_supported_degree(degree) {
            debug!(
                "Board: intersection at {} ({} connections), using straight tile",
                coord, degree
            );
            edit.warnings
                .push(BoardError::UnsupportedConnectivityDegree { coord, degree });
        }
        self.cell_mut(coord).road_tile = Some(tile);
        edit.tiles.push((coord, Some(tile)));
    }

    /// Asset for a road cell traversed from `entry` to `exit`.
    ///
    /// Falls back to the generic classified tile when the pair has no usable
    /// authored asset. `None` if `coord` carries no road.
    pub fn tile_asset(&self, coord: AxialCoord, entry: Side, exit: Side) -> Option<TileAsset> {
        let tile = self.road_tile(coord)?;
        match resolve_asset(entry, exit) {
            Ok(key) => Some(TileAsset::Authored(key)),
            Err(err) => {
                debug!("Board: {} at {}, using generic tile", err, coord);
                Some(TileAsset::Generic(tile))
            }
        }
    }

    /// Asset for a road cell using its own connections as entry and exit.
    ///
    /// Only two-connection cells have an entry/exit pair; every other road
    /// cell gets its generic tile.
    pub fn road_asset(&self, coord: AxialCoord) -> Option<TileAsset> {
        let tile = self.road_tile(coord)?;
        match self.connections(coord).to_vec().as_slice() {
            [entry, exit] => self.tile_asset(coord, Side::from(*entry), Side::from(*exit)),
            _ => Some(TileAsset::Generic(tile)),
        }
    }

    /// Iterate over every stored cell. Order is unspecified.
    pub(crate) fn iter_cells(&self) -> impl Iterator<Item = (AxialCoord, &Cell)> {
        self.cells.iter().map(|(coord, cell)| (*coord, cell))
    }
}

/// Member nearest the centroid, with exact integer arithmetic.
///
/// Comparing `n * p - sum` instead of `p - sum / n` scales every distance by
/// the same `n`, so the ordering (and every tie) is preserved without
/// rounding.
fn centroid_nearest(members: &BTreeSet<AxialCoord>) -> Option<AxialCoord> {
    let n = members.len() as i128;
    if n == 0 {
        return None;
    }
    let sum_q: i128 = members.iter().map(|c| c.q as i128).sum();
    let sum_r: i128 = members.iter().map(|c| c.r as i128).sum();

    let mut best: Option<(i128, AxialCoord)> = None;
    // BTreeSet iterates in ascending (q, r), so a strict comparison keeps the
    // lexicographically smallest cell on ties.
    for &coord in members {
        let dq = n * coord.q as i128 - sum_q;
        let dr = n * coord.r as i128 - sum_r;
        let dist = dq * dq + dr * dr;
        match best {
            Some((best_dist, _)) if dist >= best_dist => {}
            _ => best = Some((dist, coord)),
        }
    }
    best.map(|(_, coord)| coord)
}
