use bevy::prelude::*;

use simulation::grid::Tool;

/// The currently armed tool. `Inspect` is the unarmed state: picks still
/// resolve and highlight, but never edit the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Resource)]
pub enum ActiveTool {
    #[default]
    Inspect,
    Bulldoze,
    Residential,
    Commercial,
    Industrial,
    Road,
    Tree,
}

impl ActiveTool {
    /// Toolbar ordering.
    pub const PALETTE: [ActiveTool; 7] = [
        ActiveTool::Inspect,
        ActiveTool::Bulldoze,
        ActiveTool::Residential,
        ActiveTool::Commercial,
        ActiveTool::Industrial,
        ActiveTool::Road,
        ActiveTool::Tree,
    ];

    /// The grid-level tool this arms, or `None` for `Inspect`.
    pub fn tool(self) -> Option<Tool> {
        match self {
            ActiveTool::Inspect => None,
            ActiveTool::Bulldoze => Some(Tool::Bulldoze),
            ActiveTool::Residential => Some(Tool::Residential),
            ActiveTool::Commercial => Some(Tool::Commercial),
            ActiveTool::Industrial => Some(Tool::Industrial),
            ActiveTool::Road => Some(Tool::Road),
            ActiveTool::Tree => Some(Tool::Tree),
        }
    }

    pub fn label(self) -> &'static str {
        match self.tool() {
            None => "Inspect",
            Some(tool) => tool.label(),
        }
    }
}
