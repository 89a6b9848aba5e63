//! Building records and the stochastic growth automaton.
//!
//! Buildings are data-only records; all growth behavior lives in
//! [`automaton::advance`], a stateless transition function keyed by kind.

mod automaton;
mod systems;
mod types;


pub use automaton::advance;
pub use systems::{grow_buildings, log_census_changes, LastCensus, TickControl};
pub use types::{Building, BuildingKind};
