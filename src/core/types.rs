//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for regions
///
/// Region ids are small dense integers assigned at map construction,
/// so planner state can live in flat arrays indexed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub u32);

impl RegionId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Index into dense per-region arrays
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Unique identifier for players (human or AI)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Unique identifier for armies
///
/// Stable for the lifetime of the army; doubles as the seed for
/// per-army score jitter, so replays stay reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArmyId(pub u32);

impl ArmyId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Movement points available to an army within one turn
pub type MovementBudget = u32;

/// Enter-cost sentinel marking a region that cannot be entered at all
pub const IMPASSABLE: u32 = u32::MAX;

/// Terrain archetype of a region, fixing its base enter cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Plains,
    Forest,
    Hills,
    Marsh,
    Mountains,
    Peaks,
    Sea,
}

impl Terrain {
    /// Base movement-point cost to enter a region of this terrain
    ///
    /// `IMPASSABLE` prunes the graph edge entirely.
    pub fn enter_cost(&self) -> u32 {
        match self {
            Self::Plains => 3,
            Self::Forest => 5,
            Self::Hills => 5,
            Self::Marsh => 6,
            Self::Mountains => 8,
            Self::Peaks => IMPASSABLE,
            Self::Sea => IMPASSABLE,
        }
    }

    pub fn is_passable(&self) -> bool {
        self.enter_cost() != IMPASSABLE
    }
}

impl Default for Terrain {
    fn default() -> Self {
        Self::Plains
    }
}

/// Administrative tier of a region (political rank)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RegionTier {
    Barony = 1,
    County = 2,
    Duchy = 3,
    Kingdom = 4,
    Empire = 5,
}

impl RegionTier {
    /// Ordinal rank 1..=5
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Returns true if this tier outranks the other
    pub fn outranks(&self, other: &RegionTier) -> bool {
        (*self as u8) > (*other as u8)
    }
}

impl Default for RegionTier {
    fn default() -> Self {
        Self::Barony
    }
}

/// Resource amounts held by a region
///
/// Gold doubles as the treasury term of the desirability score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stockpile {
    pub gold: u32,
    pub food: u32,
    pub wood: u32,
    pub iron: u32,
}

impl Stockpile {
    pub fn new(gold: u32, food: u32, wood: u32, iron: u32) -> Self {
        Self { gold, food, wood, iron }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_id_index() {
        assert_eq!(RegionId(7).index(), 7);
    }

    #[test]
    fn test_terrain_passability() {
        assert!(Terrain::Plains.is_passable());
        assert!(Terrain::Mountains.is_passable());
        assert!(!Terrain::Peaks.is_passable());
        assert!(!Terrain::Sea.is_passable());
    }

    #[test]
    fn test_tier_ordering() {
        assert!(RegionTier::Empire.outranks(&RegionTier::Kingdom));
        assert!(RegionTier::County.outranks(&RegionTier::Barony));
        assert!(!RegionTier::Barony.outranks(&RegionTier::Barony));
        assert_eq!(RegionTier::Duchy.ordinal(), 3);
    }

    #[test]
    fn test_player_id_equality() {
        let a = PlayerId(1);
        let b = PlayerId(1);
        let c = PlayerId(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
