//! Tile asset factory: maps a terrain id or building record to a spawned
//! renderable. The synchronizer is agnostic to the shapes produced here;
//! it only relies on `spawn_*` being deterministic for given inputs and on
//! despawning fully releasing the visual.

use bevy::prelude::*;

use simulation::buildings::{Building, BuildingKind};
use simulation::config::{CELL_SIZE, STYLE_COUNT};
use simulation::grid::{CityGrid, TerrainId};

/// Marker for a terrain renderable, tagged with the tile it represents.
#[derive(Component)]
pub struct TerrainRenderable {
    pub x: usize,
    pub y: usize,
}

/// Marker for a building renderable, tagged with the tile it represents.
#[derive(Component)]
pub struct BuildingRenderable {
    pub x: usize,
    pub y: usize,
}

/// Shared mesh and material handles, created once at startup. Building
/// materials are indexed by the style drawn at placement.
#[derive(Resource)]
pub struct TileAssets {
    unit_box: Handle<Mesh>,
    trunk: Handle<Mesh>,
    canopy: Handle<Mesh>,
    grass: Handle<StandardMaterial>,
    road: Handle<StandardMaterial>,
    residential: Vec<Handle<StandardMaterial>>,
    commercial: Vec<Handle<StandardMaterial>>,
    industrial: Vec<Handle<StandardMaterial>>,
    trunk_material: Handle<StandardMaterial>,
    canopy_material: Handle<StandardMaterial>,
    /// Swapped in for the picked renderable; originals are restored by the
    /// highlight system.
    pub highlight: Handle<StandardMaterial>,
}

/// Startup system: build the shared handles and insert the factory resource.
pub fn load_tile_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(TileAssets::load(&mut meshes, &mut materials));
}

/// One matte material per style: the base color lightened a step per style
/// index so neighboring buildings of the same kind read as distinct.
fn styled_materials(
    materials: &mut Assets<StandardMaterial>,
    base: Color,
) -> Vec<Handle<StandardMaterial>> {
    (0..STYLE_COUNT)
        .map(|style| {
            let lighten = 0.9 + style as f32 * 0.08;
            let rgba = base.to_srgba();
            materials.add(StandardMaterial {
                base_color: Color::srgb(
                    (rgba.red * lighten).min(1.0),
                    (rgba.green * lighten).min(1.0),
                    (rgba.blue * lighten).min(1.0),
                ),
                perceptual_roughness: 0.8,
                ..default()
            })
        })
        .collect()
}

impl TileAssets {
    pub fn load(meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) -> Self {
        let matte = |materials: &mut Assets<StandardMaterial>, color: Color| {
            materials.add(StandardMaterial {
                base_color: color,
                perceptual_roughness: 0.9,
                ..default()
            })
        };

        Self {
            unit_box: meshes.add(Cuboid::new(CELL_SIZE, CELL_SIZE, CELL_SIZE)),
            trunk: meshes.add(Cylinder::new(0.06 * CELL_SIZE, 0.5 * CELL_SIZE)),
            canopy: meshes.add(Sphere::new(0.28 * CELL_SIZE)),
            grass: matte(materials, Color::srgb(0.15, 0.68, 0.38)),
            road: matte(materials, Color::srgb(0.27, 0.27, 0.25)),
            residential: styled_materials(materials, Color::srgb(0.30, 0.75, 0.35)),
            commercial: styled_materials(materials, Color::srgb(0.25, 0.45, 0.85)),
            industrial: styled_materials(materials, Color::srgb(0.85, 0.75, 0.25)),
            trunk_material: matte(materials, Color::srgb(0.45, 0.28, 0.12)),
            canopy_material: matte(materials, Color::srgb(0.15, 0.55, 0.15)),
            highlight: materials.add(StandardMaterial {
                base_color: Color::srgb(0.25, 0.75, 1.0),
                emissive: LinearRgba::rgb(0.05, 0.25, 0.4),
                unlit: true,
                ..default()
            }),
        }
    }

    /// Default (weak) handles only, enough for headless synchronizer tests
    /// where no asset store exists.
    pub fn placeholder() -> Self {
        Self {
            unit_box: Handle::default(),
            trunk: Handle::default(),
            canopy: Handle::default(),
            grass: Handle::default(),
            road: Handle::default(),
            residential: vec![Handle::default(); STYLE_COUNT as usize],
            commercial: vec![Handle::default(); STYLE_COUNT as usize],
            industrial: vec![Handle::default(); STYLE_COUNT as usize],
            trunk_material: Handle::default(),
            canopy_material: Handle::default(),
            highlight: Handle::default(),
        }
    }

    fn growable_material(&self, kind: BuildingKind, style: u8) -> Option<Handle<StandardMaterial>> {
        let palette = match kind {
            BuildingKind::Residential => &self.residential,
            BuildingKind::Commercial => &self.commercial,
            BuildingKind::Industrial => &self.industrial,
            BuildingKind::Road | BuildingKind::Tree => return None,
        };
        palette.get(style as usize).cloned()
    }

    /// Spawn the terrain renderable for one tile: a grass slab filling the
    /// cell below y = 0.
    pub fn spawn_terrain(
        &self,
        commands: &mut Commands,
        x: usize,
        y: usize,
        terrain: TerrainId,
    ) -> Entity {
        let (wx, wz) = CityGrid::grid_to_world(x, y);
        let material = match terrain {
            TerrainId::Grass => self.grass.clone(),
        };
        commands
            .spawn((
                TerrainRenderable { x, y },
                Mesh3d(self.unit_box.clone()),
                MeshMaterial3d(material),
                Transform::from_xyz(wx, -0.5 * CELL_SIZE, wz),
                Visibility::default(),
            ))
            .id()
    }

    /// Spawn the renderable for a building. Returns `None` (after a warning)
    /// when the building's data maps to no known visual; a missing visual
    /// must never take the simulation down.
    pub fn spawn_building(
        &self,
        commands: &mut Commands,
        x: usize,
        y: usize,
        building: &Building,
    ) -> Option<Entity> {
        let (wx, wz) = CityGrid::grid_to_world(x, y);
        match building.kind {
            BuildingKind::Road => Some(
                commands
                    .spawn((
                        BuildingRenderable { x, y },
                        Mesh3d(self.unit_box.clone()),
                        MeshMaterial3d(self.road.clone()),
                        Transform::from_xyz(wx, 0.05 * CELL_SIZE, wz)
                            .with_scale(Vec3::new(1.0, 0.1, 1.0)),
                        Visibility::default(),
                    ))
                    .id(),
            ),
            BuildingKind::Tree => {
                let trunk = commands
                    .spawn((
                        BuildingRenderable { x, y },
                        Mesh3d(self.trunk.clone()),
                        MeshMaterial3d(self.trunk_material.clone()),
                        Transform::from_xyz(wx, 0.25 * CELL_SIZE, wz),
                        Visibility::default(),
                    ))
                    .id();
                commands
                    .spawn((
                        Mesh3d(self.canopy.clone()),
                        MeshMaterial3d(self.canopy_material.clone()),
                        Transform::from_xyz(0.0, 0.45 * CELL_SIZE, 0.0),
                        Visibility::default(),
                    ))
                    .set_parent(trunk);
                Some(trunk)
            }
            kind => {
                let Some(material) = self.growable_material(kind, building.style) else {
                    warn!(
                        "no visual for {:?} style {}, skipping renderable at ({}, {})",
                        kind, building.style, x, y
                    );
                    return None;
                };
                let height = building.height as f32 * CELL_SIZE;
                Some(
                    commands
                        .spawn((
                            BuildingRenderable { x, y },
                            Mesh3d(self.unit_box.clone()),
                            MeshMaterial3d(material),
                            Transform::from_xyz(wx, height * 0.5, wz).with_scale(Vec3::new(
                                1.0,
                                building.height as f32,
                                1.0,
                            )),
                            Visibility::default(),
                        ))
                        .id(),
                )
            }
        }
    }
}
