//! Lettered sides (`a`..`f`) and directional asset keys.
//!
//! Side index `i` is the same physical direction as [`HexDirection`] index
//! `i`. Free angles arrive in the asset authoring frame, which is rotated
//! [`SIDE_ANGLE_OFFSET_DEG`] from the grid frame; authoring-frame west falls on
//! the corner between sides `c` and `d`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::axial::{normalize_angle_deg, world_angle_between, HexDirection};
use crate::config::{SIDE_ANGLE_OFFSET_DEG, WEST_TIE_BAND_DEG};
use crate::error::BoardError;

/// Grid-frame angle of each side, in degrees, by side index.
const SIDE_ANGLES_DEG: [f32; 6] = [0.0, -60.0, -120.0, 180.0, 120.0, 60.0];

/// Side picked for authoring-frame west when the input angle is positive.
const WEST_POSITIVE_SIDE: usize = 3;
/// Side picked for authoring-frame west when the input angle is negative.
const WEST_NEGATIVE_SIDE: usize = 2;

/// Entry/exit keys with an authored asset: every entry paired with its
/// opposite side and both 120° exits.
pub const AUTHORED_ASSET_KEYS: [&str; 18] = [
    "entry_a_exit_c",
    "entry_a_exit_d",
    "entry_a_exit_e",
    "entry_b_exit_d",
    "entry_b_exit_e",
    "entry_b_exit_f",
    "entry_c_exit_a",
    "entry_c_exit_e",
    "entry_c_exit_f",
    "entry_d_exit_a",
    "entry_d_exit_b",
    "entry_d_exit_f",
    "entry_e_exit_a",
    "entry_e_exit_b",
    "entry_e_exit_c",
    "entry_f_exit_b",
    "entry_f_exit_c",
    "entry_f_exit_d",
];

/// Authored keys whose assets are known to be broken.
pub const BLOCKED_ASSET_KEYS: [&str; 2] = ["entry_c_exit_e", "entry_f_exit_b"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Side {
    pub const ALL: [Side; 6] = [Side::A, Side::B, Side::C, Side::D, Side::E, Side::F];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn letter(self) -> char {
        match self {
            Side::A => 'a',
            Side::B => 'b',
            Side::C => 'c',
            Side::D => 'd',
            Side::E => 'e',
            Side::F => 'f',
        }
    }
}

impl From<HexDirection> for Side {
    fn from(dir: HexDirection) -> Self {
        Side::ALL[dir.index()]
    }
}

/// A whitelisted, non-blocked directional asset key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetKey(&'static str);

impl AssetKey {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for AssetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Side index for an axial neighbor delta; `None` unless the delta is one of
/// the six neighbor offsets.
pub fn neighbor_delta_to_side_index(dq: i32, dr: i32) -> Option<usize> {
    HexDirection::from_delta(dq, dr).map(HexDirection::index)
}

/// Side index nearest to an authoring-frame angle (radians).
///
/// Inside the west tie band the sign of `angle` decides between `d` and `c`,
/// so `+PI` and `-PI` map to fixed, different sides.
pub fn angle_to_side_index(angle: f32) -> usize {
    let folded = angle.to_degrees() % 360.0;
    if (folded.abs() - 180.0).abs() <= WEST_TIE_BAND_DEG {
        return if folded.is_sign_negative() {
            WEST_NEGATIVE_SIDE
        } else {
            WEST_POSITIVE_SIDE
        };
    }

    let grid_deg = normalize_angle_deg(folded + SIDE_ANGLE_OFFSET_DEG);
    let mut best = 0;
    let mut best_dist = f32::MAX;
    for (index, side_deg) in SIDE_ANGLES_DEG.iter().enumerate() {
        let dist = normalize_angle_deg(grid_deg - side_deg).abs();
        // Strict comparison: exact ties keep the lower index.
        if dist < best_dist {
            best = index;
            best_dist = dist;
        }
    }
    best
}

/// Authoring-frame angle (radians) of the vector between two world points.
pub fn authoring_angle_between(from: Vec3, to: Vec3) -> f32 {
    let grid_deg = world_angle_between(from, to).to_degrees();
    normalize_angle_deg(grid_deg - SIDE_ANGLE_OFFSET_DEG).to_radians()
}

/// Canonical key naming the asset that enters on `entry` and leaves on `exit`.
pub fn compose_asset_key(entry: Side, exit: Side) -> String {
    format!("entry_{}_exit_{}", entry.letter(), exit.letter())
}

/// Look up the authored asset for an entry/exit pair.
///
/// Returns `AssetKeyUnavailable` when the key is not authored or is
/// blocklisted; callers fall back to the generic tile classification.
pub fn resolve_asset(entry: Side, exit: Side) -> Result<AssetKey, BoardError> {
    let key = compose_asset_key(entry, exit);
    if BLOCKED_ASSET_KEYS.iter().any(|blocked| *blocked == key) {
        return Err(BoardError::AssetKeyUnavailable { key });
    }
    match AUTHORED_ASSET_KEYS.iter().copied().find(|authored| *authored == key) {
        Some(authored) => Ok(AssetKey(authored)),
        None => Err(BoardError::AssetKeyUnavailable { key }),
    }
}
