//! Spatial board: cell occupancy, zone membership and road flags.
//!
//! `SpatialBoard` is the only writer of cell state. Road tiles and zone-center
//! markers are derived here on every edit and never accepted from callers.

pub mod spatial;
pub mod types;


pub use spatial::*;
pub use types::*;
