//! In-memory strategic map implementing [`Territory`]

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, RegionId, RegionTier, Stockpile, Terrain, IMPASSABLE};
use crate::world::region::Region;
use crate::world::Territory;

const NO_NEIGHBORS: &[RegionId] = &[];

/// Dense region storage; region ids index straight into the vec
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldMap {
    regions: Vec<Region>,
}

impl WorldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a region; ids must arrive in dense order
    pub fn add_region(&mut self, region: Region) -> RegionId {
        debug_assert_eq!(region.id.index(), self.regions.len());
        let id = region.id;
        self.regions.push(region);
        id
    }

    /// Connect two regions bidirectionally
    pub fn connect(&mut self, a: RegionId, b: RegionId) {
        if a == b {
            return;
        }
        if let Some(region) = self.regions.get_mut(a.index()) {
            if !region.neighbors.contains(&b) {
                region.neighbors.push(b);
            }
        }
        if let Some(region) = self.regions.get_mut(b.index()) {
            if !region.neighbors.contains(&a) {
                region.neighbors.push(a);
            }
        }
    }

    pub fn region_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.regions.get_mut(id.index())
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Generate a small ring-and-chords demo map
    ///
    /// Each player gets one fortified home region spaced around the
    /// ring; the rest is neutral with varied terrain, population and
    /// garrisons. Deterministic for a given seed.
    pub fn generate_demo(region_count: usize, player_count: u32, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut map = Self::new();

        for idx in 0..region_count {
            let terrain = match rng.gen_range(0..10) {
                0..=3 => Terrain::Plains,
                4..=5 => Terrain::Forest,
                6..=7 => Terrain::Hills,
                8 => Terrain::Marsh,
                _ => Terrain::Mountains,
            };
            let tier = match rng.gen_range(0..10) {
                0..=5 => RegionTier::Barony,
                6..=8 => RegionTier::County,
                _ => RegionTier::Duchy,
            };
            let stockpile = Stockpile::new(
                rng.gen_range(0..800),
                rng.gen_range(0..350),
                rng.gen_range(0..220),
                rng.gen_range(0..100),
            );
            let region = Region::new(RegionId(idx as u32), &format!("region-{idx}"), terrain)
                .with_tier(tier)
                .with_population(rng.gen_range(200..3000))
                .with_stockpile(stockpile)
                .with_fortified(tier.outranks(&RegionTier::County) || rng.gen_range(0..10) == 0)
                .with_garrison(rng.gen_range(20..120));
            map.add_region(region);
        }

        // Ring backbone plus a few chords for alternate routes
        for idx in 0..region_count {
            let next = (idx + 1) % region_count;
            map.connect(RegionId(idx as u32), RegionId(next as u32));
        }
        for _ in 0..region_count / 3 {
            let a = rng.gen_range(0..region_count) as u32;
            let b = rng.gen_range(0..region_count) as u32;
            map.connect(RegionId(a), RegionId(b));
        }

        // Evenly spaced fortified homes, one per player
        if player_count > 0 {
            let spacing = region_count.max(1) / player_count as usize;
            for player in 0..player_count {
                let home = RegionId((player as usize * spacing.max(1)) as u32 % region_count as u32);
                if let Some(region) = map.region_mut(home) {
                    region.owner = Some(PlayerId(player + 1));
                    region.terrain = Terrain::Plains;
                    region.fortified = true;
                    region.garrison = 0;
                }
            }
        }

        map
    }
}

impl Territory for WorldMap {
    fn region_count(&self) -> usize {
        self.regions.len()
    }

    fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.index())
    }

    fn neighbor_regions(&self, id: RegionId) -> &[RegionId] {
        self.regions
            .get(id.index())
            .map(|region| region.neighbors.as_slice())
            .unwrap_or(NO_NEIGHBORS)
    }

    fn region_owner(&self, id: RegionId) -> Option<PlayerId> {
        self.regions.get(id.index()).and_then(|region| region.owner)
    }

    fn set_region_owner(&mut self, id: RegionId, owner: Option<PlayerId>) {
        if let Some(region) = self.regions.get_mut(id.index()) {
            region.owner = owner;
        }
    }

    fn frontier_regions(&self, player: PlayerId) -> Vec<RegionId> {
        let mut frontier: Vec<RegionId> = self
            .regions
            .iter()
            .filter(|region| region.is_owned_by(player))
            .flat_map(|region| region.neighbors.iter().copied())
            .filter(|&id| {
                self.region(id)
                    .map(|region| !region.is_owned_by(player) && region.terrain.is_passable())
                    .unwrap_or(false)
            })
            .collect();
        frontier.sort_unstable();
        frontier.dedup();
        frontier
    }

    fn enter_cost(&self, id: RegionId, player: PlayerId) -> u32 {
        let Some(region) = self.regions.get(id.index()) else {
            return IMPASSABLE;
        };
        let base = region.terrain.enter_cost();
        if base == IMPASSABLE {
            return IMPASSABLE;
        }
        // Moving through friendly territory is cheaper, floor 1
        if region.is_owned_by(player) {
            base.saturating_sub(1).max(1)
        } else {
            base
        }
    }

    fn nearest_owned_stronghold(&self, from: RegionId, player: PlayerId) -> Option<RegionId> {
        if from.index() >= self.regions.len() {
            return None;
        }
        let mut visited = vec![false; self.regions.len()];
        let mut queue = VecDeque::new();
        visited[from.index()] = true;
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            let region = &self.regions[current.index()];
            if region.fortified && region.is_owned_by(player) {
                return Some(current);
            }
            for &neighbor in &region.neighbors {
                if neighbor.index() >= self.regions.len() || visited[neighbor.index()] {
                    continue;
                }
                if !self.regions[neighbor.index()].terrain.is_passable() {
                    continue;
                }
                visited[neighbor.index()] = true;
                queue.push_back(neighbor);
            }
        }
        None
    }

    fn garrison_strength(&self, id: RegionId) -> u32 {
        self.regions
            .get(id.index())
            .map(|region| region.garrison)
            .unwrap_or(0)
    }

    fn set_garrison_strength(&mut self, id: RegionId, strength: u32) {
        if let Some(region) = self.regions.get_mut(id.index()) {
            region.garrison = strength;
        }
    }
}
