use bevy::prelude::*;
use rand::Rng;
use thiserror::Error;

use crate::buildings::{advance, Building, BuildingKind};
use crate::config::CELL_SIZE;
use crate::game_params::GrowthParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TerrainId {
    #[default]
    Grass,
}

impl TerrainId {
    pub fn label(self) -> &'static str {
        match self {
            TerrainId::Grass => "Grass",
        }
    }
}

/// Grid construction with a non-positive size is fatal; everything else in
/// the grid API degrades to a no-op instead of erroring.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("grid size must be a positive integer, got {0}")]
pub struct InvalidSizeError(pub usize);

/// An armed edit action, applied to one tile on pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Bulldoze,
    Residential,
    Commercial,
    Industrial,
    Road,
    Tree,
}

impl Tool {
    pub const ALL: [Tool; 6] = [
        Tool::Bulldoze,
        Tool::Residential,
        Tool::Commercial,
        Tool::Industrial,
        Tool::Road,
        Tool::Tree,
    ];

    /// The building kind a placement tool creates; `None` for bulldoze.
    pub fn building_kind(self) -> Option<BuildingKind> {
        match self {
            Tool::Bulldoze => None,
            Tool::Residential => Some(BuildingKind::Residential),
            Tool::Commercial => Some(BuildingKind::Commercial),
            Tool::Industrial => Some(BuildingKind::Industrial),
            Tool::Road => Some(BuildingKind::Road),
            Tool::Tree => Some(BuildingKind::Tree),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Bulldoze => "Bulldoze",
            Tool::Residential => "Residential",
            Tool::Commercial => "Commercial",
            Tool::Industrial => "Industrial",
            Tool::Road => "Road",
            Tool::Tree => "Tree",
        }
    }
}

/// One grid cell: immutable terrain plus an optional owned building.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tile {
    pub terrain: TerrainId,
    pub building: Option<Building>,
    /// Set when a building was bulldozed since the last drain, so the drain
    /// can emit exactly one removal entry for the slot.
    removed: bool,
}

/// One drained change: the tile coordinate plus a snapshot of its building,
/// or `None` when the building was removed.
#[derive(Debug, Clone, PartialEq)]
pub struct DirtyTile {
    pub x: usize,
    pub y: usize,
    pub building: Option<Building>,
}

/// Building counts per kind, in `BuildingKind::ALL` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildingCensus {
    counts: [u32; BuildingKind::ALL.len()],
}

impl BuildingCensus {
    pub fn count(&self, kind: BuildingKind) -> u32 {
        self.counts[kind as usize]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    fn bump(&mut self, kind: BuildingKind) {
        self.counts[kind as usize] += 1;
    }
}

/// The city: a fixed-size square grid of tiles. Tiles are allocated once at
/// construction and never move; there is no resize operation.
#[derive(Debug, Resource)]
pub struct CityGrid {
    tiles: Vec<Tile>,
    size: usize,
}

impl Default for CityGrid {
    fn default() -> Self {
        Self {
            tiles: vec![Tile::default(); crate::config::GRID_SIZE * crate::config::GRID_SIZE],
            size: crate::config::GRID_SIZE,
        }
    }
}

impl CityGrid {
    pub fn new(size: usize) -> Result<Self, InvalidSizeError> {
        if size == 0 {
            return Err(InvalidSizeError(size));
        }
        Ok(Self {
            tiles: vec![Tile::default(); size * size],
            size,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &Tile {
        &self.tiles[self.index(x, y)]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut Tile {
        let idx = self.index(x, y);
        &mut self.tiles[idx]
    }

    /// World-space center of a tile. Tiles sit one `CELL_SIZE` apart with
    /// tile (0, 0) at the world origin; grid y maps to world z.
    pub fn grid_to_world(x: usize, y: usize) -> (f32, f32) {
        (x as f32 * CELL_SIZE, y as f32 * CELL_SIZE)
    }

    pub fn world_to_grid(wx: f32, wz: f32) -> (i32, i32) {
        (
            (wx / CELL_SIZE).round() as i32,
            (wz / CELL_SIZE).round() as i32,
        )
    }

    /// Advance every occupied tile by one automaton step. Tile updates are
    /// independent, so iteration order carries no semantics; some buildings
    /// come out of this with `dirty` set.
    pub fn tick(&mut self, params: &GrowthParams, rng: &mut impl Rng) {
        for tile in &mut self.tiles {
            if let Some(building) = &mut tile.building {
                advance(building, params, rng);
            }
        }
    }

    /// Apply the armed tool to one tile. Out-of-range coordinates are a
    /// silent no-op (ray misses and off-grid clicks are normal operation).
    /// Placement never overwrites an occupied tile. Returns whether the
    /// grid was mutated.
    pub fn apply_tool(&mut self, x: usize, y: usize, tool: Tool, rng: &mut impl Rng) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        let tile = &mut self.tiles[idx];

        match tool.building_kind() {
            None => {
                if tile.building.take().is_some() {
                    tile.removed = true;
                    true
                } else {
                    false
                }
            }
            Some(kind) => {
                if tile.building.is_some() {
                    return false;
                }
                tile.building = Some(Building::new(kind, rng));
                true
            }
        }
    }

    /// Drain every change since the previous drain, in row-major order:
    /// one entry per tile whose building was created, mutated, or removed.
    /// Dirty flags and removal marks are consumed by this call. This is
    /// the renderer's sole channel; it never rescans the grid.
    pub fn drain_dirty(&mut self) -> Vec<DirtyTile> {
        let mut drained = Vec::new();
        for (idx, tile) in self.tiles.iter_mut().enumerate() {
            let (x, y) = (idx % self.size, idx / self.size);
            match &mut tile.building {
                Some(building) if building.dirty => {
                    building.dirty = false;
                    tile.removed = false;
                    drained.push(DirtyTile {
                        x,
                        y,
                        building: Some(building.clone()),
                    });
                }
                None if tile.removed => {
                    tile.removed = false;
                    drained.push(DirtyTile {
                        x,
                        y,
                        building: None,
                    });
                }
                _ => {}
            }
        }
        drained
    }

    /// Count buildings per kind across the whole grid.
    pub fn building_census(&self) -> BuildingCensus {
        let mut census = BuildingCensus::default();
        for tile in &self.tiles {
            if let Some(building) = &tile.building {
                census.bump(building.kind);
            }
        }
        census
    }
}
