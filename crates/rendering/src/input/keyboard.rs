use bevy::prelude::*;

use super::types::ActiveTool;

/// Quick-access tool shortcuts; Escape always disarms back to Inspect.
pub fn keyboard_tool_switch(keys: Res<ButtonInput<KeyCode>>, mut tool: ResMut<ActiveTool>) {
    let mapping = [
        (KeyCode::Escape, ActiveTool::Inspect),
        (KeyCode::KeyB, ActiveTool::Bulldoze),
        (KeyCode::KeyR, ActiveTool::Residential),
        (KeyCode::KeyC, ActiveTool::Commercial),
        (KeyCode::KeyI, ActiveTool::Industrial),
        (KeyCode::KeyO, ActiveTool::Road),
        (KeyCode::KeyT, ActiveTool::Tree),
    ];
    for (key, target) in mapping {
        if keys.just_pressed(key) {
            *tool = target;
        }
    }
}
