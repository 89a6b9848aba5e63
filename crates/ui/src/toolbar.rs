use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::buildings::TickControl;
use simulation::grid::CityGrid;

use rendering::input::ActiveTool;

use crate::widgets::{census_summary, tool_button};

/// Top toolbar: tool palette, growth pause toggle, and the building census.
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut tool: ResMut<ActiveTool>,
    mut control: ResMut<TickControl>,
    grid: Res<CityGrid>,
) {
    egui::TopBottomPanel::top("toolbar")
        .exact_height(36.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 6.0;

                for entry in ActiveTool::PALETTE {
                    if tool_button(ui, entry.label(), *tool == entry).clicked() {
                        *tool = entry;
                    }
                }

                ui.separator();

                let pause_label = if control.paused { "Resume" } else { "Pause" };
                if tool_button(ui, pause_label, control.paused).clicked() {
                    control.paused = !control.paused;
                }

                ui.separator();

                ui.label(
                    egui::RichText::new(census_summary(&grid.building_census()))
                        .color(egui::Color32::from_gray(200)),
                );
            });
        });
}
