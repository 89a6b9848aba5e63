use rand::Rng;

use crate::config::STYLE_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildingKind {
    Residential,
    Commercial,
    Industrial,
    Road,
    Tree,
}

impl BuildingKind {
    pub const ALL: [BuildingKind; 5] = [
        BuildingKind::Residential,
        BuildingKind::Commercial,
        BuildingKind::Industrial,
        BuildingKind::Road,
        BuildingKind::Tree,
    ];

    /// Whether the automaton can raise this kind's height.
    pub fn grows(self) -> bool {
        matches!(
            self,
            BuildingKind::Residential | BuildingKind::Commercial | BuildingKind::Industrial
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            BuildingKind::Residential => "Residential",
            BuildingKind::Commercial => "Commercial",
            BuildingKind::Industrial => "Industrial",
            BuildingKind::Road => "Road",
            BuildingKind::Tree => "Tree",
        }
    }
}

/// A placed structure. Owned by exactly one tile; the automaton only ever
/// mutates `height` and `dirty`. Creation and destruction go through the
/// tool-apply path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Building {
    pub kind: BuildingKind,
    /// Floors. Always >= 1; capped by `GrowthParams::max_height`.
    pub height: u8,
    /// Visual style, drawn once at creation, uniform over `STYLE_COUNT`.
    pub style: u8,
    /// True when created or when a visible attribute changed since the
    /// last drain; cleared by `CityGrid::drain_dirty`.
    pub dirty: bool,
}

impl Building {
    pub fn new(kind: BuildingKind, rng: &mut impl Rng) -> Self {
        Self {
            kind,
            height: 1,
            style: rng.gen_range(0..STYLE_COUNT),
            dirty: true,
        }
    }
}
