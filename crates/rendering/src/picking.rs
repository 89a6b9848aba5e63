//! Pointer picking against the renderable cache.
//!
//! The cursor ray is tested against the axis-aligned bounds of every cached
//! renderable (terrain slabs and building boxes share the cache's `(x, y)`
//! addressing) and the nearest hit resolves back to a tile coordinate. A
//! miss leaves the cursor invalid and everything downstream inert.

use bevy::prelude::*;

use simulation::config::CELL_SIZE;
use simulation::grid::CityGrid;

use crate::scene_sync::SceneCache;

/// The tile currently under the pointer, if any.
#[derive(Resource, Default)]
pub struct CursorTile {
    pub x: usize,
    pub y: usize,
    pub valid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub x: usize,
    pub y: usize,
    pub distance: f32,
}

/// Slab-method ray/AABB test. Returns the entry distance along the ray, or
/// `None` when the ray misses or the box lies behind the origin.
fn ray_aabb(origin: Vec3, dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = dir.recip();
    let a = (min - origin) * inv;
    let b = (max - origin) * inv;
    let t_near = a.min(b).max_element();
    let t_far = a.max(b).min_element();
    if t_far >= t_near.max(0.0) {
        Some(t_near.max(0.0))
    } else {
        None
    }
}

/// Intersect a world-space ray with every cached renderable and return the
/// nearest hit's tile coordinate.
pub fn pick_tile(origin: Vec3, dir: Vec3, cache: &SceneCache) -> Option<PickHit> {
    let half = CELL_SIZE * 0.5;
    let mut best: Option<PickHit> = None;

    let mut consider = |x: usize, y: usize, t: f32| {
        if best.map_or(true, |hit| t < hit.distance) {
            best = Some(PickHit { x, y, distance: t });
        }
    };

    for y in 0..cache.size() {
        for x in 0..cache.size() {
            let (wx, wz) = CityGrid::grid_to_world(x, y);

            if cache.terrain_at(x, y).is_some() {
                let min = Vec3::new(wx - half, -CELL_SIZE, wz - half);
                let max = Vec3::new(wx + half, 0.0, wz + half);
                if let Some(t) = ray_aabb(origin, dir, min, max) {
                    consider(x, y, t);
                }
            }

            if let Some(slot) = cache.building_at(x, y) {
                let min = Vec3::new(wx - half, 0.0, wz - half);
                let max = Vec3::new(wx + half, slot.world_height(), wz + half);
                if let Some(t) = ray_aabb(origin, dir, min, max) {
                    consider(x, y, t);
                }
            }
        }
    }

    best
}

/// Each frame, resolve the cursor position to a tile via the pick ray.
pub fn update_cursor_tile(
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    cache: Res<SceneCache>,
    mut cursor: ResMut<CursorTile>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, cam_transform)) = camera_q.get_single() else {
        return;
    };

    if let Some(screen_pos) = window.cursor_position() {
        if let Ok(ray) = camera.viewport_to_world(cam_transform, screen_pos) {
            if let Some(hit) = pick_tile(ray.origin, *ray.direction, &cache) {
                cursor.x = hit.x;
                cursor.y = hit.y;
                cursor.valid = true;
                return;
            }
        }
    }
    cursor.valid = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TileAssets;
    use crate::scene_sync::{init_scene, reconcile_scene, SceneCache};
    use simulation::grid::Tool;
    use simulation::sim_rng::SimRng;

    /// Headless 3x3 scene with a residential building at (1, 1).
    fn picking_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(CityGrid::new(3).unwrap());
        app.insert_resource(SimRng::from_seed_u64(11));
        app.insert_resource(TileAssets::placeholder());
        app.init_resource::<SceneCache>();
        app.add_systems(Startup, init_scene);
        app.add_systems(Update, reconcile_scene);
        app.update();
        app.world_mut()
            .resource_scope(|world, mut grid: Mut<CityGrid>| {
                let mut rng = world.resource_mut::<SimRng>();
                grid.apply_tool(1, 1, Tool::Residential, &mut rng.0)
            });
        app.update();
        app
    }

    #[test]
    fn test_ray_aabb_hit_and_miss() {
        let min = Vec3::new(-0.5, 0.0, -0.5);
        let max = Vec3::new(0.5, 1.0, 0.5);
        // Straight down onto the box.
        let t = ray_aabb(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y, min, max).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
        // Parallel miss to the side.
        assert!(ray_aabb(Vec3::new(2.0, 5.0, 0.0), Vec3::NEG_Y, min, max).is_none());
        // Box behind the origin.
        assert!(ray_aabb(Vec3::new(0.0, 5.0, 0.0), Vec3::Y, min, max).is_none());
    }

    #[test]
    fn test_pick_hits_building_over_terrain() {
        let app = picking_app();
        let cache = app.world().resource::<SceneCache>();
        let hit = pick_tile(Vec3::new(1.0, 10.0, 1.0), Vec3::NEG_Y, cache).unwrap();
        assert_eq!((hit.x, hit.y), (1, 1));
        // The building top is closer than the terrain below it.
        assert!((hit.distance - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_pick_hits_terrain_on_empty_tile() {
        let app = picking_app();
        let cache = app.world().resource::<SceneCache>();
        let hit = pick_tile(Vec3::new(2.0, 10.0, 0.0), Vec3::NEG_Y, cache).unwrap();
        assert_eq!((hit.x, hit.y), (2, 0));
        assert!((hit.distance - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_pick_prefers_nearest_along_oblique_ray() {
        let app = picking_app();
        let cache = app.world().resource::<SceneCache>();
        // A shallow ray skimming across the grid toward the building at
        // (1, 1) hits the building's side before any terrain behind it.
        let origin = Vec3::new(-3.0, 0.5, 1.0);
        let dir = Vec3::X;
        let hit = pick_tile(origin, dir, cache).unwrap();
        assert_eq!((hit.x, hit.y), (1, 1));
    }

    #[test]
    fn test_pick_miss_off_grid() {
        let app = picking_app();
        let cache = app.world().resource::<SceneCache>();
        assert!(pick_tile(Vec3::new(30.0, 10.0, 30.0), Vec3::NEG_Y, cache).is_none());
        // Upward ray away from the whole scene.
        assert!(pick_tile(Vec3::new(1.0, 10.0, 1.0), Vec3::Y, cache).is_none());
    }
}
