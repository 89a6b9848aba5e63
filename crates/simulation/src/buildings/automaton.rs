use rand::Rng;

use crate::game_params::GrowthParams;

use super::types::Building;

/// Advance one building by one tick.
///
/// Growable kinds draw a single uniform sample per tick and gain one floor
/// with `growth_probability`, up to the kind's height cap. Roads and trees
/// never grow; their only transition is clearing the dirty flag left by
/// placement.
pub fn advance(building: &mut Building, params: &GrowthParams, rng: &mut impl Rng) {
    if !building.kind.grows() {
        building.dirty = false;
        return;
    }

    if rng.gen::<f32>() < params.growth_probability
        && building.height < params.max_height(building.kind)
    {
        building.height += 1;
        building.dirty = true;
    }
}
