//! Road connectivity around a single cell.

use crate::axial::{AxialCoord, HexDirection};

/// Set of neighbor directions that carry a road, stored as a 6-bit mask.
///
/// Iteration is always in ascending direction index, so two sets with equal
/// membership classify identically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ConnectionSet(u8);

impl ConnectionSet {
    pub const EMPTY: ConnectionSet = ConnectionSet(0);

    pub fn insert(&mut self, dir: HexDirection) {
        self.0 |= 1 << dir.index();
    }

    pub fn contains(self, dir: HexDirection) -> bool {
        self.0 & (1 << dir.index()) != 0
    }

    /// Number of connected directions (0..=6).
    pub fn degree(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn iter(self) -> impl Iterator<Item = HexDirection> {
        HexDirection::ALL.into_iter().filter(move |dir| self.contains(*dir))
    }

    pub fn to_vec(self) -> Vec<HexDirection> {
        self.iter().collect()
    }
}

impl FromIterator<HexDirection> for ConnectionSet {
    fn from_iter<I: IntoIterator<Item = HexDirection>>(iter: I) -> Self {
        let mut set = ConnectionSet::EMPTY;
        for dir in iter {
            set.insert(dir);
        }
        set
    }
}

/// Directions around `coord` whose neighbor satisfies `is_road`.
///
/// Only the six neighbors are inspected; the target cell's own road flag is
/// not consulted. Neighbors past the `i32` range count as non-road.
pub fn connections(coord: AxialCoord, is_road: impl Fn(AxialCoord) -> bool) -> ConnectionSet {
    HexDirection::ALL
        .into_iter()
        .filter(|dir| coord.checked_neighbor(*dir).is_some_and(&is_road))
        .collect()
}
