//! Incremental grid-to-scene reconciliation.
//!
//! A coordinate-indexed cache of spawned renderables mirrors the tile grid.
//! Each frame the synchronizer drains the grid's dirty tiles and issues the
//! minimal spawn/despawn set, so reconciliation cost tracks the number of
//! changed tiles, never the grid size. The one full-grid pass happens at
//! startup, when the immutable terrain is built.

use bevy::prelude::*;

use simulation::buildings::BuildingKind;
use simulation::config::CELL_SIZE;
use simulation::grid::{CityGrid, DirtyTile};

use crate::assets::TileAssets;

/// A cached renderable: the spawned entity plus the building state it
/// currently represents, so reconcile can tell stale visuals from current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedRenderable {
    pub entity: Entity,
    pub kind: BuildingKind,
    pub height: u8,
}

impl CachedRenderable {
    /// World-space top of this renderable's bounding box, used by picking.
    pub fn world_height(&self) -> f32 {
        match self.kind {
            BuildingKind::Road => 0.1 * CELL_SIZE,
            BuildingKind::Tree => 0.75 * CELL_SIZE,
            _ => self.height as f32 * CELL_SIZE,
        }
    }
}

/// Parallel grids of renderable handles: terrain (created once, never
/// replaced) and buildings (kept in sync by [`reconcile_scene`]).
#[derive(Resource, Default)]
pub struct SceneCache {
    size: usize,
    terrain: Vec<Option<Entity>>,
    buildings: Vec<Option<CachedRenderable>>,
}

impl SceneCache {
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    pub fn terrain_at(&self, x: usize, y: usize) -> Option<Entity> {
        self.terrain[self.index(x, y)]
    }

    pub fn building_at(&self, x: usize, y: usize) -> Option<&CachedRenderable> {
        self.buildings[self.index(x, y)].as_ref()
    }

    pub fn building_count(&self) -> usize {
        self.buildings.iter().flatten().count()
    }

    fn reset(&mut self, size: usize) {
        self.size = size;
        self.terrain = vec![None; size * size];
        self.buildings = vec![None; size * size];
    }
}

/// Startup system: build the terrain cache from every tile's immutable
/// terrain id. The building cache starts empty: a fresh grid has no
/// buildings, and everything after this goes through the drain.
pub fn init_scene(
    mut commands: Commands,
    grid: Res<CityGrid>,
    assets: Res<TileAssets>,
    mut cache: ResMut<SceneCache>,
) {
    cache.reset(grid.size());
    for y in 0..grid.size() {
        for x in 0..grid.size() {
            let entity = assets.spawn_terrain(&mut commands, x, y, grid.get(x, y).terrain);
            let idx = cache.index(x, y);
            cache.terrain[idx] = Some(entity);
        }
    }
}

/// Update system: drain dirty tiles and apply each as a minimal cache edit.
pub fn reconcile_scene(
    mut commands: Commands,
    mut grid: ResMut<CityGrid>,
    assets: Res<TileAssets>,
    mut cache: ResMut<SceneCache>,
) {
    for entry in grid.drain_dirty() {
        apply_entry(&mut commands, &assets, &mut cache, &entry);
    }
}

fn apply_entry(
    commands: &mut Commands,
    assets: &TileAssets,
    cache: &mut SceneCache,
    entry: &DirtyTile,
) {
    let idx = cache.index(entry.x, entry.y);
    match &entry.building {
        None => {
            // Removal: dispose the cached renderable, if any.
            if let Some(slot) = cache.buildings[idx].take() {
                commands.entity(slot.entity).despawn_recursive();
            }
        }
        Some(building) => {
            if let Some(slot) = &cache.buildings[idx] {
                if slot.kind == building.kind && slot.height == building.height {
                    // Cached visual already matches; nothing to do.
                    return;
                }
                commands.entity(slot.entity).despawn_recursive();
                cache.buildings[idx] = None;
            }
            if let Some(entity) = assets.spawn_building(commands, entry.x, entry.y, building) {
                cache.buildings[idx] = Some(CachedRenderable {
                    entity,
                    kind: building.kind,
                    height: building.height,
                });
            }
        }
    }
}

/// On exit, dispose every cached renderable, terrain included, and empty
/// the cache. Stopping the loop without releasing the scene is a defect.
pub fn teardown_scene(
    mut commands: Commands,
    mut cache: ResMut<SceneCache>,
    mut exit: EventReader<AppExit>,
) {
    if exit.is_empty() {
        return;
    }
    exit.clear();
    for entity in cache.terrain.iter_mut().filter_map(Option::take) {
        commands.entity(entity).despawn_recursive();
    }
    for slot in cache.buildings.iter_mut().filter_map(Option::take) {
        commands.entity(slot.entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{BuildingRenderable, TerrainRenderable};
    use simulation::game_params::GrowthParams;
    use simulation::grid::Tool;
    use simulation::sim_rng::SimRng;
    use std::collections::HashSet;

    fn scene_app(size: usize) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(CityGrid::new(size).unwrap());
        app.insert_resource(SimRng::from_seed_u64(9));
        app.insert_resource(GrowthParams::default());
        app.insert_resource(TileAssets::placeholder());
        app.init_resource::<SceneCache>();
        app.add_systems(Startup, init_scene);
        app.add_systems(Update, (reconcile_scene, teardown_scene).chain());
        app.update();
        app
    }

    fn apply_tool(app: &mut App, x: usize, y: usize, tool: Tool) -> bool {
        app.world_mut()
            .resource_scope(|world, mut grid: Mut<CityGrid>| {
                let mut rng = world.resource_mut::<SimRng>();
                grid.apply_tool(x, y, tool, &mut rng.0)
            })
    }

    fn building_entities(app: &mut App) -> HashSet<Entity> {
        let mut query = app
            .world_mut()
            .query_filtered::<Entity, With<BuildingRenderable>>();
        query.iter(app.world()).collect()
    }

    fn terrain_entities(app: &mut App) -> HashSet<Entity> {
        let mut query = app
            .world_mut()
            .query_filtered::<Entity, With<TerrainRenderable>>();
        query.iter(app.world()).collect()
    }

    #[test]
    fn test_init_builds_terrain_once_and_no_buildings() {
        let mut app = scene_app(3);
        assert_eq!(terrain_entities(&mut app).len(), 9);
        assert!(building_entities(&mut app).is_empty());
        let cache = app.world().resource::<SceneCache>();
        assert_eq!(cache.size(), 3);
        assert_eq!(cache.building_count(), 0);
        assert!(cache.terrain_at(2, 2).is_some());
    }

    #[test]
    fn test_place_then_bulldoze_round_trip() {
        let mut app = scene_app(3);

        apply_tool(&mut app, 1, 1, Tool::Road);
        app.update();
        {
            let cache = app.world().resource::<SceneCache>();
            let slot = cache.building_at(1, 1).expect("cache slot filled");
            assert_eq!(slot.kind, BuildingKind::Road);
            assert_eq!(cache.building_count(), 1);
        }
        let spawned = building_entities(&mut app);
        assert_eq!(spawned.len(), 1);

        apply_tool(&mut app, 1, 1, Tool::Bulldoze);
        app.update();
        let cache = app.world().resource::<SceneCache>();
        assert!(cache.building_at(1, 1).is_none());
        assert_eq!(cache.building_count(), 0);
        assert!(building_entities(&mut app).is_empty());
        // Terrain is untouched by building reconciliation.
        assert_eq!(terrain_entities(&mut app).len(), 9);
    }

    #[test]
    fn test_growth_replaces_exactly_one_renderable() {
        let mut app = scene_app(50);
        for x in 0..5 {
            apply_tool(&mut app, x, 0, Tool::Residential);
        }
        app.update();
        let before = building_entities(&mut app);
        assert_eq!(before.len(), 5);
        let terrain_before = terrain_entities(&mut app);

        // Grow one building the way the automaton would, then let the normal
        // drain/reconcile path pick it up.
        {
            let mut grid = app.world_mut().resource_mut::<CityGrid>();
            let building = grid.get_mut(2, 0).building.as_mut().unwrap();
            building.height += 1;
            building.dirty = true;
        }
        app.update();

        let after = building_entities(&mut app);
        assert_eq!(after.len(), 5);
        // Exactly one dispose and one create: four entities survive.
        assert_eq!(before.intersection(&after).count(), 4);
        let cache = app.world().resource::<SceneCache>();
        assert_eq!(cache.building_at(2, 0).unwrap().height, 2);
        // Terrain entities are identical: a 2500-tile grid saw one pair.
        assert_eq!(terrain_entities(&mut app), terrain_before);
    }

    #[test]
    fn test_teardown_disposes_everything() {
        let mut app = scene_app(3);
        apply_tool(&mut app, 0, 2, Tool::Commercial);
        app.update();
        assert_eq!(building_entities(&mut app).len(), 1);

        app.world_mut().send_event(AppExit::Success);
        app.update();

        assert!(terrain_entities(&mut app).is_empty());
        assert!(building_entities(&mut app).is_empty());
        let cache = app.world().resource::<SceneCache>();
        assert_eq!(cache.building_count(), 0);
        assert!((0..3).all(|x| (0..3).all(|y| cache.terrain_at(x, y).is_none())));
    }
}
