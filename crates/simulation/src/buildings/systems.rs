use bevy::prelude::*;

use crate::game_params::GrowthParams;
use crate::grid::{BuildingCensus, CityGrid};
use crate::sim_rng::SimRng;

use super::types::BuildingKind;

/// Pause switch for the growth ticker. Editing keeps working while paused;
/// only the automaton stops.
#[derive(Resource, Default)]
pub struct TickControl {
    pub paused: bool,
}

/// Census snapshot from the previous frame, used to log only on change.
#[derive(Resource, Default)]
pub struct LastCensus(pub BuildingCensus);

/// FixedUpdate system: one automaton step over every occupied tile.
pub fn grow_buildings(
    mut grid: ResMut<CityGrid>,
    params: Res<GrowthParams>,
    control: Res<TickControl>,
    mut rng: ResMut<SimRng>,
) {
    if control.paused {
        return;
    }
    grid.tick(&params, &mut rng.0);
}

/// Log the per-kind building census whenever it changes.
pub fn log_census_changes(grid: Res<CityGrid>, mut last: ResMut<LastCensus>) {
    let census = grid.building_census();
    if census == last.0 {
        return;
    }
    last.0 = census;

    let summary: Vec<String> = BuildingKind::ALL
        .iter()
        .filter(|kind| census.count(**kind) > 0)
        .map(|kind| format!("{}: {}", kind.label(), census.count(*kind)))
        .collect();
    info!("buildings: {}", summary.join(", "));
}
