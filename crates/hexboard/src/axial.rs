//! Axial hex coordinates and the shared direction table.
//!
//! Cells are pointy-top hexes addressed by `(q, r)`. World space is the XZ
//! plane (y = 0). Direction index `i` in [`HexDirection::ALL`] is the same
//! physical direction as side index `i` in [`crate::sides`]; both tables are
//! derived from [`HexDirection::delta`].

use std::f32::consts::PI;
use std::ops::{Add, Sub};

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::config::MAX_BOARD_RADIUS;

const SQRT_3: f32 = 1.732_050_8;

/// Axial hex coordinate. Ordering is lexicographic on `(q, r)`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
pub struct AxialCoord {
    pub q: i32,
    pub r: i32,
}

/// The six neighbor directions, in direction-index order.
///
/// In world space (`atan2(z, x)`) direction `i` points at `-60° * i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HexDirection {
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

impl HexDirection {
    pub const ALL: [HexDirection; 6] = [
        HexDirection::East,
        HexDirection::NorthEast,
        HexDirection::NorthWest,
        HexDirection::West,
        HexDirection::SouthWest,
        HexDirection::SouthEast,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Axial offset to the neighbor in this direction.
    pub fn delta(self) -> AxialCoord {
        match self {
            HexDirection::East => AxialCoord::new(1, 0),
            HexDirection::NorthEast => AxialCoord::new(1, -1),
            HexDirection::NorthWest => AxialCoord::new(0, -1),
            HexDirection::West => AxialCoord::new(-1, 0),
            HexDirection::SouthWest => AxialCoord::new(-1, 1),
            HexDirection::SouthEast => AxialCoord::new(0, 1),
        }
    }

    /// Inverse of [`HexDirection::delta`]; `None` for non-adjacent offsets.
    pub fn from_delta(dq: i32, dr: i32) -> Option<Self> {
        match (dq, dr) {
            (1, 0) => Some(HexDirection::East),
            (1, -1) => Some(HexDirection::NorthEast),
            (0, -1) => Some(HexDirection::NorthWest),
            (-1, 0) => Some(HexDirection::West),
            (-1, 1) => Some(HexDirection::SouthWest),
            (0, 1) => Some(HexDirection::SouthEast),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 3) % 6]
    }

    /// Grid-frame angle in radians, normalized to (-PI, PI].
    pub fn world_angle(self) -> f32 {
        let deg = -60.0 * self.index() as f32;
        normalize_angle_deg(deg).to_radians()
    }
}

/// Wrap degrees into (-180, 180].
pub(crate) fn normalize_angle_deg(deg: f32) -> f32 {
    let mut wrapped = deg % 360.0;
    if wrapped <= -180.0 {
        wrapped += 360.0;
    } else if wrapped > 180.0 {
        wrapped -= 360.0;
    }
    wrapped
}

impl AxialCoord {
    pub const ORIGIN: AxialCoord = AxialCoord { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Third cube component, widened so `-q - r` cannot overflow.
    #[inline]
    pub fn s(self) -> i64 {
        -(self.q as i64) - self.r as i64
    }

    pub fn cube(self) -> [i64; 3] {
        [self.q as i64, self.r as i64, self.s()]
    }

    /// Center of this cell in world space.
    pub fn to_world(self, size: f32) -> Vec3 {
        let q = self.q as f32;
        let r = self.r as f32;
        Vec3::new(
            size * (SQRT_3 * q + SQRT_3 / 2.0 * r),
            0.0,
            size * 1.5 * r,
        )
    }

    /// Cell containing the world-space point. The y component is ignored.
    pub fn from_world(pos: Vec3, size: f32) -> Self {
        let q = (SQRT_3 / 3.0 * pos.x - pos.z / 3.0) / size;
        let r = (2.0 / 3.0 * pos.z) / size;
        Self::round(q, r)
    }

    /// Round fractional axial coordinates to the nearest cell.
    fn round(q: f32, r: f32) -> Self {
        let s = -q - r;
        let mut rq = q.round();
        let mut rr = r.round();
        let rs = s.round();

        let q_diff = (rq - q).abs();
        let r_diff = (rr - r).abs();
        let s_diff = (rs - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            rq = -rr - rs;
        } else if r_diff > s_diff {
            rr = -rq - rs;
        }

        Self::new(rq as i32, rr as i32)
    }

    #[inline]
    pub fn neighbor(self, dir: HexDirection) -> Self {
        self + dir.delta()
    }

    /// Adjacent cell, or `None` if it falls outside the `i32` coordinate range.
    pub fn checked_neighbor(self, dir: HexDirection) -> Option<Self> {
        let delta = dir.delta();
        Some(Self::new(
            self.q.checked_add(delta.q)?,
            self.r.checked_add(delta.r)?,
        ))
    }

    /// The six adjacent cells, indexed by direction index.
    pub fn neighbors(self) -> [AxialCoord; 6] {
        HexDirection::ALL.map(|dir| self.neighbor(dir))
    }

    /// Direction from `self` to an adjacent `other`.
    pub fn direction_to(self, other: AxialCoord) -> Option<HexDirection> {
        let delta = other - self;
        HexDirection::from_delta(delta.q, delta.r)
    }

    /// Hex (cube) distance. Total over every pair of `i32` coordinates.
    pub fn distance(self, other: AxialCoord) -> u64 {
        let [q1, r1, s1] = self.cube();
        let [q2, r2, s2] = other.cube();
        ((q1 - q2).unsigned_abs() + (r1 - r2).unsigned_abs() + (s1 - s2).unsigned_abs()) / 2
    }

    /// Whether this cell lies on a hexagonal board of the given radius.
    pub fn is_valid(self, board_radius: u32) -> bool {
        let [q, r, s] = self.cube();
        let norm = q.abs().max(r.abs()).max(s.abs());
        norm <= board_radius as i64
    }

    /// Every cell within `radius` of the origin, in ascending `(q, r)` order.
    ///
    /// `radius` is clamped to [`MAX_BOARD_RADIUS`].
    pub fn within_radius(radius: u32) -> impl Iterator<Item = AxialCoord> {
        let radius = radius.min(MAX_BOARD_RADIUS) as i64;
        (-radius..=radius).flat_map(move |q| {
            let from_r = (-radius).max(-q - radius);
            let to_r = radius.min(-q + radius);
            // Both bounds lie in [-radius, radius], which fits in i32.
            (from_r..=to_r).map(move |r| AxialCoord::new(q as i32, r as i32))
        })
    }
}

impl Add for AxialCoord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl Sub for AxialCoord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.q - rhs.q, self.r - rhs.r)
    }
}

impl std::fmt::Display for AxialCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Grid-frame angle (`atan2(z, x)`) of the vector between two world points.
pub fn world_angle_between(from: Vec3, to: Vec3) -> f32 {
    let delta = to - from;
    let angle = delta.z.atan2(delta.x);
    if angle <= -PI {
        PI
    } else {
        angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_world_roundtrip() {
        for size in [1.0_f32, 16.0, 0.5] {
            for q in -40..=40 {
                for r in -40..=40 {
                    let coord = AxialCoord::new(q, r);
                    let world = coord.to_world(size);
                    assert_eq!(world.y, 0.0);
                    assert_eq!(
                        AxialCoord::from_world(world, size),
                        coord,
                        "roundtrip failed for {coord} at size {size}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_to_world_known_points() {
        let origin = AxialCoord::ORIGIN.to_world(2.0);
        assert_eq!(origin, Vec3::ZERO);

        let east = AxialCoord::new(1, 0).to_world(1.0);
        assert!((east.x - SQRT_3).abs() < 1e-5);
        assert_eq!(east.z, 0.0);

        let south_east = AxialCoord::new(0, 1).to_world(1.0);
        assert!((south_east.x - SQRT_3 / 2.0).abs() < 1e-5);
        assert!((south_east.z - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_from_world_snaps_nearby_points() {
        let center = AxialCoord::new(3, -2).to_world(10.0);
        let nudged = center + Vec3::new(2.0, 5.0, -2.0);
        assert_eq!(AxialCoord::from_world(nudged, 10.0), AxialCoord::new(3, -2));
    }

    #[test]
    fn test_neighbors_are_distinct_and_adjacent() {
        let coord = AxialCoord::new(4, -7);
        let neighbors = coord.neighbors();
        assert_eq!(neighbors.len(), 6);

        let unique: HashSet<_> = neighbors.iter().copied().collect();
        assert_eq!(unique.len(), 6);

        for (index, neighbor) in neighbors.iter().enumerate() {
            assert_eq!(coord.distance(*neighbor), 1);
            let dir = coord.direction_to(*neighbor).expect("neighbor is adjacent");
            assert_eq!(dir.index(), index);
        }
    }

    #[test]
    fn test_direction_table_matches_world_angles() {
        for dir in HexDirection::ALL {
            let from = AxialCoord::ORIGIN.to_world(1.0);
            let to = dir.delta().to_world(1.0);
            let angle = world_angle_between(from, to);
            assert!(
                (angle - dir.world_angle()).abs() < 1e-4,
                "{dir:?}: {angle} vs {}",
                dir.world_angle()
            );
        }
    }

    #[test]
    fn test_opposite_is_involution() {
        for dir in HexDirection::ALL {
            assert_ne!(dir, dir.opposite());
            assert_eq!(dir.opposite().opposite(), dir);
            let sum = dir.delta() + dir.opposite().delta();
            assert_eq!(sum, AxialCoord::ORIGIN);
        }
    }

    #[test]
    fn test_from_delta_rejects_non_adjacent() {
        assert_eq!(HexDirection::from_delta(0, 0), None);
        assert_eq!(HexDirection::from_delta(1, 1), None);
        assert_eq!(HexDirection::from_delta(-1, -1), None);
        assert_eq!(HexDirection::from_delta(2, 0), None);
        assert_eq!(HexDirection::from_index(6), None);
    }

    #[test]
    fn test_distance_metric_properties() {
        let a = AxialCoord::new(2, -5);
        assert_eq!(a.distance(a), 0);
        assert_eq!(AxialCoord::ORIGIN.distance(AxialCoord::new(3, -3)), 3);
        assert_eq!(AxialCoord::ORIGIN.distance(AxialCoord::new(2, 1)), 3);

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..500 {
            let mut sample = || AxialCoord::new(rng.gen_range(-50..=50), rng.gen_range(-50..=50));
            let (a, b, c) = (sample(), sample(), sample());
            assert_eq!(a.distance(b), b.distance(a));
            assert_eq!(a.distance(b) == 0, a == b);
            assert!(
                a.distance(c) <= a.distance(b) + b.distance(c),
                "triangle inequality violated for {a} {b} {c}"
            );
        }
    }

    #[test]
    fn test_is_valid_uses_cube_norm() {
        assert!(AxialCoord::ORIGIN.is_valid(0));
        assert!(AxialCoord::new(2, -2).is_valid(2));
        assert!(!AxialCoord::new(2, 1).is_valid(2)); // s = -3
        assert!(!AxialCoord::new(-3, 0).is_valid(2));
        assert!(!AxialCoord::new(i32::MIN, i32::MIN).is_valid(u32::MAX));
    }

    #[test]
    fn test_distance_at_coordinate_extremes() {
        let low = AxialCoord::new(i32::MIN, i32::MIN);
        let high = AxialCoord::new(i32::MAX, i32::MAX);
        // |dq| = |dr| = 2^32 - 1, |ds| = 2^33 - 2.
        assert_eq!(low.distance(high), (1u64 << 33) - 2);
        assert_eq!(high.distance(low), low.distance(high));
        assert_eq!(low.s(), 1i64 << 32);
        assert_eq!(high.cube(), [i32::MAX as i64, i32::MAX as i64, -(i32::MAX as i64) * 2]);

        let edge = AxialCoord::new(i32::MAX, 0);
        assert_eq!(edge.distance(AxialCoord::new(i32::MIN, 0)), u32::MAX as u64);
    }

    #[test]
    fn test_checked_neighbor_at_range_limits() {
        let edge = AxialCoord::new(i32::MAX, 0);
        assert_eq!(edge.checked_neighbor(HexDirection::East), None);
        assert_eq!(
            edge.checked_neighbor(HexDirection::West),
            Some(AxialCoord::new(i32::MAX - 1, 0))
        );
        assert_eq!(
            AxialCoord::ORIGIN.checked_neighbor(HexDirection::SouthWest),
            Some(AxialCoord::ORIGIN.neighbor(HexDirection::SouthWest))
        );
    }

    #[test]
    fn test_within_radius_clamps_huge_radius() {
        let max = MAX_BOARD_RADIUS as i32;
        let mut cells = AxialCoord::within_radius(u32::MAX);
        assert_eq!(cells.next(), Some(AxialCoord::new(-max, 0)));
        assert_eq!(cells.next(), Some(AxialCoord::new(-max, 1)));
    }

    #[test]
    fn test_within_radius_counts_and_order() {
        for radius in 0..5u32 {
            let cells: Vec<_> = AxialCoord::within_radius(radius).collect();
            let expected = 3 * radius * (radius + 1) + 1;
            assert_eq!(cells.len() as u32, expected);
            assert!(cells.windows(2).all(|w| w[0] < w[1]), "not sorted");
            assert!(cells.iter().all(|c| c.is_valid(radius)));
        }
    }

    #[test]
    fn test_normalize_angle_deg() {
        assert_eq!(normalize_angle_deg(180.0), 180.0);
        assert_eq!(normalize_angle_deg(-180.0), 180.0);
        assert_eq!(normalize_angle_deg(210.0), -150.0);
        assert_eq!(normalize_angle_deg(-300.0), 60.0);
        assert_eq!(normalize_angle_deg(720.0), 0.0);
    }
}
