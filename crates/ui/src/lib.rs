use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod toolbar;
mod widgets;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Update, toolbar::toolbar_ui);
    }
}
