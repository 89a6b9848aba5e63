use bevy::prelude::*;

pub mod buildings;
pub mod config;
pub mod game_params;
pub mod grid;
pub mod sim_rng;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
pub mod test_harness;

use buildings::{grow_buildings, log_census_changes, LastCensus, TickControl};
use game_params::GrowthParams;
use grid::CityGrid;
use sim_rng::SimRng;

/// Registers the grid, the growth automaton tick, and the census log.
///
/// The grid, RNG and params resources are only initialized when the app has
/// not inserted its own (seeded RNG, custom size, overridden params), so
/// callers configure by inserting resources before adding the plugin.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GrowthParams>()
            .init_resource::<CityGrid>()
            .init_resource::<SimRng>()
            .init_resource::<TickControl>()
            .init_resource::<LastCensus>()
            .add_systems(Startup, configure_tick_interval)
            .add_systems(FixedUpdate, grow_buildings)
            .add_systems(Update, log_census_changes);
    }
}

/// Apply the configured tick interval to Bevy's fixed-timestep clock.
fn configure_tick_interval(params: Res<GrowthParams>, mut time: ResMut<Time<Fixed>>) {
    time.set_timestep_seconds(params.tick_seconds);
}
