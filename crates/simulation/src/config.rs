/// Default edge length of the city grid (tiles per side).
pub const GRID_SIZE: usize = 10;

/// World-space size of one tile. Meshes and picking both assume this.
pub const CELL_SIZE: f32 = 1.0;

/// Number of visual styles a building can be created with. The style is
/// drawn once at placement and maps to a material tint in the renderer.
pub const STYLE_COUNT: u8 = 4;

pub const WORLD_SIZE: f32 = GRID_SIZE as f32 * CELL_SIZE;
