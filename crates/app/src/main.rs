use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use simulation::game_params::GrowthParams;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Tinytown".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    });

    // Growth-parameter overrides: TINYTOWN_PARAMS points at a JSON file.
    // Inserted before SimulationPlugin so its init_resource keeps them.
    if let Ok(path) = std::env::var("TINYTOWN_PARAMS") {
        match load_params(&path) {
            Ok(params) => {
                info!("loaded growth params from {}", path);
                app.insert_resource(params);
            }
            Err(err) => warn!("ignoring {}: {}", path, err),
        }
    }

    app.add_plugins((
        simulation::SimulationPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ));

    app.run();
}

fn load_params(path: &str) -> Result<GrowthParams, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(GrowthParams::from_json(&text)?)
}
