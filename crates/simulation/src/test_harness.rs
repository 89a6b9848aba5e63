//! Headless integration test harness.
//!
//! Wraps `bevy::app::App` + [`SimulationPlugin`] for driving the simulation
//! without a window or renderer. The fixed-timestep schedule is run directly
//! so tests advance the automaton one tick at a time, independent of wall
//! clock.

use bevy::prelude::*;

use crate::game_params::GrowthParams;
use crate::grid::{CityGrid, Tool};
use crate::sim_rng::SimRng;
use crate::SimulationPlugin;

pub struct TestTown {
    pub app: App,
}

impl TestTown {
    /// A headless town with the given grid size and a fixed RNG seed.
    pub fn new(size: usize) -> Self {
        Self::with_params(size, GrowthParams::default())
    }

    pub fn with_params(size: usize, params: GrowthParams) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        // Inserted before the plugin so init_resource keeps them.
        app.insert_resource(CityGrid::new(size).expect("test grid size must be positive"));
        app.insert_resource(SimRng::from_seed_u64(1234));
        app.insert_resource(params);
        app.add_plugins(SimulationPlugin);
        // Run Startup so the tick interval is configured.
        app.update();
        Self { app }
    }

    /// Advance the simulation by exactly one automaton tick.
    pub fn tick(&mut self) {
        self.app.world_mut().run_schedule(FixedUpdate);
    }

    pub fn grid(&self) -> &CityGrid {
        self.app.world().resource::<CityGrid>()
    }

    pub fn grid_mut(&mut self) -> Mut<'_, CityGrid> {
        self.app.world_mut().resource_mut::<CityGrid>()
    }

    /// Apply a tool the way the pick controller does, using the town's RNG.
    pub fn apply_tool(&mut self, x: usize, y: usize, tool: Tool) -> bool {
        self.app
            .world_mut()
            .resource_scope(|world, mut grid: Mut<CityGrid>| {
                let mut rng = world.resource_mut::<SimRng>();
                grid.apply_tool(x, y, tool, &mut rng.0)
            })
    }
}
