//! World state: regions, the territory interface and armies
//!
//! The planner and orchestrator only see the [`Territory`] trait;
//! [`WorldMap`] is the in-memory reference implementation used by the
//! demo binary and the test suites.

pub mod army;
pub mod map;
pub mod region;

pub use army::{Army, Muster, StrengthMuster};
pub use map::WorldMap;
pub use region::Region;

use crate::core::types::{PlayerId, RegionId};

/// Read/write access to the strategic map
///
/// All game-logic conditions are expressed as sentinels (the
/// impassable enter cost, `None` owners), never as errors.
pub trait Territory {
    /// Number of regions; ids are dense in `0..region_count()`
    fn region_count(&self) -> usize;

    /// Region attributes for scoring, `None` for an unknown id
    fn region(&self, id: RegionId) -> Option<&Region>;

    /// Adjacent regions; empty for an unknown id
    fn neighbor_regions(&self, id: RegionId) -> &[RegionId];

    fn region_owner(&self, id: RegionId) -> Option<PlayerId>;

    fn set_region_owner(&mut self, id: RegionId, owner: Option<PlayerId>);

    /// Regions adjacent to the player's territory but not held by them
    fn frontier_regions(&self, player: PlayerId) -> Vec<RegionId>;

    /// Movement-point price for the player to enter the region
    ///
    /// Terrain base cost with the ownership discount applied; the
    /// `IMPASSABLE` sentinel prunes the edge entirely.
    fn enter_cost(&self, id: RegionId, player: PlayerId) -> u32;

    /// Closest player-owned fortified region by hop count
    fn nearest_owned_stronghold(&self, from: RegionId, player: PlayerId) -> Option<RegionId>;

    /// Size of the defending garrison stationed in the region
    fn garrison_strength(&self, id: RegionId) -> u32;

    fn set_garrison_strength(&mut self, id: RegionId, strength: u32);
}
