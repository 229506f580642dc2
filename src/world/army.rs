//! Armies and the reinforcement collaborator

use serde::{Deserialize, Serialize};

use crate::battle::units::{roster_size, Roster, UnitKind};
use crate::core::types::{ArmyId, MovementBudget, PlayerId, RegionId};

/// Movement points an army holds before its first turn grants a budget
pub const DEFAULT_SPEED: u32 = 10;

/// A player-controlled army on the strategic map
///
/// The orchestrator is the only writer of position and movement
/// points during a turn; unit counts change through battles and
/// reinforcement. The per-turn budget comes from configuration unless
/// the army carries its own speed override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Army {
    pub id: ArmyId,
    pub name: String,
    player: PlayerId,
    position: RegionId,
    speed: Option<u32>,
    movement_points: MovementBudget,
    pub units: Roster,
}

impl Army {
    pub fn new(id: ArmyId, name: &str, player: PlayerId, position: RegionId) -> Self {
        Self {
            id,
            name: name.to_string(),
            player,
            position,
            speed: None,
            movement_points: DEFAULT_SPEED,
            units: Roster::new(),
        }
    }

    /// Fix this army's per-turn budget, overriding the configured one
    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = Some(speed);
        self.movement_points = speed;
        self
    }

    pub fn with_units(mut self, units: Roster) -> Self {
        self.units = units;
        self
    }

    pub fn with_unit(mut self, kind: UnitKind, count: u32) -> Self {
        if count > 0 {
            *self.units.entry(kind).or_insert(0) += count;
        }
        self
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn position(&self) -> RegionId {
        self.position
    }

    pub fn movement_points(&self) -> MovementBudget {
        self.movement_points
    }

    /// Per-turn budget allocation: the configured base budget, unless
    /// this army carries a speed override
    pub fn begin_turn(&mut self, base_budget: u32) {
        self.movement_points = self.speed.unwrap_or(base_budget);
    }

    pub fn spend_movement_points(&mut self, cost: u32) {
        self.movement_points = self.movement_points.saturating_sub(cost);
    }

    pub fn relocate_to(&mut self, region: RegionId) {
        self.position = region;
    }

    /// Total soldiers across all unit types
    pub fn strength(&self) -> u32 {
        roster_size(&self.units)
    }
}

/// Reinforcement collaborator: decides who needs troops and refills
/// them at a stronghold
///
/// Which units a refill buys is recruitment allocation and lives
/// outside this crate; implementors only restore counts.
pub trait Muster {
    fn needs_reinforcement(&self, army: &Army) -> bool;

    fn refill(&self, army: &mut Army);
}

/// Reference muster: an army below a strength floor refills back up to
/// a baseline roster
#[derive(Debug, Clone)]
pub struct StrengthMuster {
    pub min_strength: u32,
    pub baseline: Roster,
}

impl StrengthMuster {
    pub fn new(min_strength: u32, baseline: Roster) -> Self {
        Self {
            min_strength,
            baseline,
        }
    }
}

impl Muster for StrengthMuster {
    fn needs_reinforcement(&self, army: &Army) -> bool {
        army.strength() < self.min_strength
    }

    fn refill(&self, army: &mut Army) {
        for (&kind, &count) in &self.baseline {
            let current = army.units.entry(kind).or_insert(0);
            *current = (*current).max(count);
        }
        tracing::debug!(army = army.id.0, strength = army.strength(), "army refilled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(pairs: &[(UnitKind, u32)]) -> Roster {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_movement_point_bookkeeping() {
        let mut army = Army::new(ArmyId(1), "vanguard", PlayerId(1), RegionId(0)).with_speed(8);
        assert_eq!(army.movement_points(), 8);
        army.spend_movement_points(5);
        assert_eq!(army.movement_points(), 3);
        army.spend_movement_points(99);
        assert_eq!(army.movement_points(), 0);
        // The override sticks across turns, whatever the base budget
        army.begin_turn(12);
        assert_eq!(army.movement_points(), 8);
    }

    #[test]
    fn test_budget_comes_from_base_without_override() {
        let mut army = Army::new(ArmyId(1), "vanguard", PlayerId(1), RegionId(0));
        army.begin_turn(6);
        assert_eq!(army.movement_points(), 6);
        army.spend_movement_points(6);
        army.begin_turn(14);
        assert_eq!(army.movement_points(), 14);
    }

    #[test]
    fn test_strength_sums_roster() {
        let army = Army::new(ArmyId(1), "vanguard", PlayerId(1), RegionId(0))
            .with_unit(UnitKind::Peasants, 80)
            .with_unit(UnitKind::Swordsmen, 15);
        assert_eq!(army.strength(), 95);
    }

    #[test]
    fn test_strength_muster_threshold_and_refill() {
        let muster = StrengthMuster::new(50, roster(&[(UnitKind::Peasants, 60)]));
        let mut weak = Army::new(ArmyId(1), "remnant", PlayerId(1), RegionId(0))
            .with_unit(UnitKind::Peasants, 10)
            .with_unit(UnitKind::Swordsmen, 5);
        assert!(muster.needs_reinforcement(&weak));

        muster.refill(&mut weak);
        assert_eq!(weak.units[&UnitKind::Peasants], 60);
        // Units above baseline are left alone
        assert_eq!(weak.units[&UnitKind::Swordsmen], 5);
        assert!(!muster.needs_reinforcement(&weak));
    }
}
