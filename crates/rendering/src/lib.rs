use bevy::prelude::*;

pub mod assets;
pub mod camera;
pub mod egui_guard;
pub mod input;
pub mod picking;
pub mod scene_sync;
pub mod selection_highlight;

use camera::{CameraOrbitDrag, LeftClickDrag};
use input::ActiveTool;
use picking::CursorTile;
use scene_sync::SceneCache;
use selection_highlight::HighlightState;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneCache>()
            .init_resource::<CursorTile>()
            .init_resource::<ActiveTool>()
            .init_resource::<HighlightState>()
            .init_resource::<LeftClickDrag>()
            .init_resource::<CameraOrbitDrag>()
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    setup_lighting,
                    assets::load_tile_assets,
                    scene_sync::init_scene,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    camera::camera_pan_keyboard,
                    camera::camera_left_drag,
                    camera::camera_orbit_drag,
                    camera::camera_zoom,
                    camera::apply_orbit_camera,
                ),
            )
            .add_systems(
                Update,
                (
                    picking::update_cursor_tile,
                    input::keyboard_tool_switch,
                    input::handle_tool_input,
                    selection_highlight::apply_pick_highlight,
                    scene_sync::reconcile_scene,
                    scene_sync::teardown_scene,
                )
                    .chain(),
            );
    }
}

fn setup_lighting(mut commands: Commands) {
    // Ambient light for baseline illumination
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.9, 1.0),
        brightness: 300.0,
    });

    // Directional light (sun) angled from above
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_4,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
    ));
}
