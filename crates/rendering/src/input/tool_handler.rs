//! Main tool input dispatch system.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use simulation::grid::CityGrid;
use simulation::sim_rng::SimRng;

use crate::camera::LeftClickDrag;
use crate::egui_guard::egui_wants_pointer;
use crate::picking::CursorTile;

use super::types::ActiveTool;

/// On left click, apply the armed tool to the picked tile.
///
/// Skips when egui owns the pointer, when the press turned into a camera
/// drag, when no tile is under the cursor, or when no tool is armed; in
/// all of those cases the click is inert.
pub fn handle_tool_input(
    buttons: Res<ButtonInput<MouseButton>>,
    mut contexts: EguiContexts,
    left_drag: Res<LeftClickDrag>,
    cursor: Res<CursorTile>,
    tool: Res<ActiveTool>,
    mut grid: ResMut<CityGrid>,
    mut rng: ResMut<SimRng>,
) {
    if egui_wants_pointer(&mut contexts) {
        return;
    }
    if left_drag.is_dragging {
        return;
    }
    if !buttons.just_pressed(MouseButton::Left) || !cursor.valid {
        return;
    }
    let Some(tool) = tool.tool() else {
        return;
    };

    if grid.apply_tool(cursor.x, cursor.y, tool, &mut rng.0) {
        debug!("{:?} applied at ({}, {})", tool, cursor.x, cursor.y);
    }
}
