//! Battle interface and the reference field-battle resolver
//!
//! The orchestrator only sees [`BattleHost`]: it asks whether moving
//! into a region triggers combat, and if so awaits exactly one verdict
//! through a oneshot channel before continuing the turn.

pub mod sim;
pub mod units;

use tokio::sync::oneshot;

use crate::battle::sim::{simulate_battle, BattleOutcome};
use crate::battle::units::{make_roster, Roster, UnitKind};
use crate::core::types::RegionId;
use crate::world::{Army, Territory};

/// Battle result from the moving army's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleVerdict {
    /// Attacker took the region
    Victory,
    /// Attacker was repelled
    Defeat,
    /// Neither side prevailed; ownership is unchanged
    Draw,
}

/// Combat collaborator consumed by the turn orchestrator
pub trait BattleHost {
    /// Whether an army arriving in `target` must fight:
    /// rival-held regions always, neutral regions only when defended
    fn should_trigger_battle<T: Territory>(
        &self,
        army: &Army,
        target: RegionId,
        territory: &T,
    ) -> bool;

    /// Start the battle and hand back the verdict channel
    ///
    /// Implementors apply casualties to the army and the garrison as
    /// part of resolution; the orchestrator applies ownership changes.
    fn start_battle<T: Territory>(
        &self,
        army: &mut Army,
        target: RegionId,
        territory: &mut T,
    ) -> oneshot::Receiver<BattleVerdict>;
}

/// Reference battle host backed by the probabilistic field resolver
#[derive(Debug, Clone)]
pub struct FieldBattleHost {
    seed: u64,
    max_rounds: u32,
}

impl FieldBattleHost {
    pub fn new(seed: u64, max_rounds: u32) -> Self {
        Self { seed, max_rounds }
    }

    /// Garrison roster for a defended region
    ///
    /// Plain garrison troops, stiffened with swordsmen behind
    /// fortifications.
    fn defender_roster<T: Territory>(&self, target: RegionId, territory: &T) -> Roster {
        let garrison = territory.garrison_strength(target);
        let fortified = territory
            .region(target)
            .map(|region| region.fortified)
            .unwrap_or(false);
        if fortified {
            make_roster(&[
                (UnitKind::Peasants, garrison),
                (UnitKind::Swordsmen, garrison / 10),
            ])
        } else {
            make_roster(&[(UnitKind::Peasants, garrison)])
        }
    }

    /// Per-battle seed, stable for a given pairing
    fn battle_seed(&self, army: &Army, target: RegionId) -> u64 {
        self.seed ^ ((army.id.0 as u64) << 32) ^ target.0 as u64
    }
}

impl BattleHost for FieldBattleHost {
    fn should_trigger_battle<T: Territory>(
        &self,
        army: &Army,
        target: RegionId,
        territory: &T,
    ) -> bool {
        match territory.region_owner(target) {
            Some(owner) => owner != army.player(),
            None => territory.garrison_strength(target) > 0,
        }
    }

    fn start_battle<T: Territory>(
        &self,
        army: &mut Army,
        target: RegionId,
        territory: &mut T,
    ) -> oneshot::Receiver<BattleVerdict> {
        let defenders = self.defender_roster(target, territory);
        let report = simulate_battle(
            &army.units,
            &defenders,
            self.battle_seed(army, target),
            self.max_rounds,
        );
        tracing::info!(
            army = army.id.0,
            region = target.0,
            rounds = report.rounds_fought,
            outcome = ?report.outcome,
            "battle resolved"
        );

        army.units = report.attacker_survivors.clone();
        territory.set_garrison_strength(
            target,
            crate::battle::units::roster_size(&report.defender_survivors),
        );

        let verdict = match report.outcome {
            BattleOutcome::AttackerVictory => BattleVerdict::Victory,
            BattleOutcome::DefenderVictory => BattleVerdict::Defeat,
            BattleOutcome::Draw => BattleVerdict::Draw,
        };
        let (sender, receiver) = oneshot::channel();
        // Resolution is synchronous here; a networked host would send
        // from its own task instead.
        let _ = sender.send(verdict);
        receiver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ArmyId, PlayerId, Terrain};
    use crate::world::{Region, WorldMap};

    fn map_with(owner: Option<PlayerId>, garrison: u32) -> WorldMap {
        let mut map = WorldMap::new();
        map.add_region(
            Region::new(RegionId(0), "field", Terrain::Plains)
                .with_owner(owner)
                .with_garrison(garrison),
        );
        map
    }

    fn attacker() -> Army {
        Army::new(ArmyId(1), "vanguard", PlayerId(1), RegionId(0))
            .with_unit(UnitKind::Knights, 120)
    }

    #[test]
    fn test_trigger_rules() {
        let host = FieldBattleHost::new(0, 100);
        let army = attacker();

        // Rival region: always contested, even undefended
        let rival = map_with(Some(PlayerId(2)), 0);
        assert!(host.should_trigger_battle(&army, RegionId(0), &rival));

        // Own region: never
        let own = map_with(Some(PlayerId(1)), 50);
        assert!(!host.should_trigger_battle(&army, RegionId(0), &own));

        // Neutral: only with defenders
        let defended = map_with(None, 30);
        assert!(host.should_trigger_battle(&army, RegionId(0), &defended));
        let empty = map_with(None, 0);
        assert!(!host.should_trigger_battle(&army, RegionId(0), &empty));
    }

    #[tokio::test]
    async fn test_start_battle_applies_casualties_and_sends_verdict() {
        let host = FieldBattleHost::new(11, 1000);
        let mut map = map_with(Some(PlayerId(2)), 15);
        let mut army = attacker();

        let receiver = host.start_battle(&mut army, RegionId(0), &mut map);
        let verdict = receiver.await.expect("host sent a verdict");

        // 120 knights against 15 peasants
        assert_eq!(verdict, BattleVerdict::Victory);
        assert_eq!(map.garrison_strength(RegionId(0)), 0);
        assert!(army.strength() > 0);
    }
}
