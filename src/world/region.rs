//! Region - atomic unit of ownership and terrain

use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, RegionId, RegionTier, Stockpile, Terrain};

/// A node of the strategic graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub terrain: Terrain,
    pub tier: RegionTier,
    pub population: u32,
    pub stockpile: Stockpile,
    /// Fortified regions can host reinforcement
    pub fortified: bool,
    pub owner: Option<PlayerId>,
    pub neighbors: Vec<RegionId>,
    /// Defenders stationed here, independent of any visiting army
    pub garrison: u32,
}

impl Region {
    pub fn new(id: RegionId, name: &str, terrain: Terrain) -> Self {
        Self {
            id,
            name: name.to_string(),
            terrain,
            tier: RegionTier::Barony,
            population: 0,
            stockpile: Stockpile::default(),
            fortified: false,
            owner: None,
            neighbors: Vec::new(),
            garrison: 0,
        }
    }

    pub fn with_tier(mut self, tier: RegionTier) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_population(mut self, population: u32) -> Self {
        self.population = population;
        self
    }

    pub fn with_stockpile(mut self, stockpile: Stockpile) -> Self {
        self.stockpile = stockpile;
        self
    }

    pub fn with_owner(mut self, owner: Option<PlayerId>) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_fortified(mut self, fortified: bool) -> Self {
        self.fortified = fortified;
        self
    }

    pub fn with_garrison(mut self, garrison: u32) -> Self {
        self.garrison = garrison;
        self
    }

    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let region = Region::new(RegionId(4), "ravenmoor", Terrain::Marsh)
            .with_tier(RegionTier::County)
            .with_population(640)
            .with_fortified(true)
            .with_garrison(35)
            .with_owner(Some(PlayerId(2)));
        assert_eq!(region.tier, RegionTier::County);
        assert!(region.fortified);
        assert!(region.is_owned_by(PlayerId(2)));
        assert!(!region.is_owned_by(PlayerId(1)));
    }
}
