//! Data-driven growth parameters.
//!
//! Extracts the automaton's tunables into a single [`GrowthParams`] resource
//! so they can be overridden without recompilation (the app accepts a JSON
//! file via the `TINYTOWN_PARAMS` environment variable). Systems read from
//! `Res<GrowthParams>` instead of module-level constants.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::buildings::BuildingKind;

/// Tunables for the stochastic building-growth automaton.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthParams {
    /// Per-tick probability that a growable building gains one floor.
    pub growth_probability: f32,
    /// Height cap per growable kind.
    pub residential_max_height: u8,
    pub commercial_max_height: u8,
    pub industrial_max_height: u8,
    /// Simulation tick interval in seconds.
    pub tick_seconds: f64,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            growth_probability: 0.05,
            residential_max_height: 5,
            commercial_max_height: 5,
            industrial_max_height: 5,
            tick_seconds: 1.0,
        }
    }
}

impl GrowthParams {
    /// Height cap for a building kind. Non-growable kinds cap at their
    /// placement height of 1.
    pub fn max_height(&self, kind: BuildingKind) -> u8 {
        match kind {
            BuildingKind::Residential => self.residential_max_height,
            BuildingKind::Commercial => self.commercial_max_height,
            BuildingKind::Industrial => self.industrial_max_height,
            BuildingKind::Road | BuildingKind::Tree => 1,
        }
    }

    /// Parse parameter overrides from a JSON document. Missing fields keep
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
