use bevy::prelude::*;

use crate::board::SpatialBoard;
use crate::commands::{apply_board_commands, BoardCommand, BoardWarning, RoadTilesChanged};
use crate::config::BoardConfig;

/// Registers the board resource, its config and the command/notification
/// events.
///
/// Insert a custom [`BoardConfig`] before adding the plugin to change the
/// board radius or hex size; the board is built from whatever config is
/// present when the plugin initializes it.
pub struct HexBoardPlugin;

impl Plugin for HexBoardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BoardConfig>()
            .init_resource::<SpatialBoard>()
            .add_event::<BoardCommand>()
            .add_event::<RoadTilesChanged>()
            .add_event::<BoardWarning>()
            .add_systems(Update, apply_board_commands);
    }
}
