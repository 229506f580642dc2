//! Per-turn transient state and move candidates

use ahash::AHashSet;
use serde::Serialize;

use crate::core::types::{ArmyId, PlayerId, RegionId};

/// Why a candidate move was proposed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GoalTag {
    /// Frontier expansion chosen by score
    Normal,
    /// Forced detour to a stronghold for reinforcement
    Reinforce,
}

/// One proposed move of one army, recomputed every loop pass
#[derive(Debug, Clone)]
pub struct MoveCandidate {
    pub army: ArmyId,
    pub target: RegionId,
    /// Full path, army position -> target inclusive
    pub path: Vec<RegionId>,
    /// Cost of the full path, before any budget trim
    pub mp_cost: u32,
    /// Base score + jitter - path cost; infinite for forced detours
    pub final_score: f64,
    /// Whether the full path fits the army's current movement points
    pub can_reach_now: bool,
    pub goal: GoalTag,
}

/// Transient state of one player turn
///
/// Lives for exactly one `run_turn` call; passing it through the loop
/// explicitly keeps the orchestrator resumable and testable.
#[derive(Debug, Default)]
pub struct TurnState {
    pub player: PlayerId,
    /// Armies that already consumed their slot this turn
    pub moved: AHashSet<ArmyId>,
    /// Snapshot of reinforcement need taken at turn start
    pub needs_reinforcement: AHashSet<ArmyId>,
    /// Frontier of the current loop pass
    pub frontier: Vec<RegionId>,
}

impl TurnState {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            ..Self::default()
        }
    }

    pub fn mark_moved(&mut self, army: ArmyId) {
        self.moved.insert(army);
    }

    pub fn has_moved(&self, army: ArmyId) -> bool {
        self.moved.contains(&army)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moved_set() {
        let mut state = TurnState::new(PlayerId(1));
        assert!(!state.has_moved(ArmyId(3)));
        state.mark_moved(ArmyId(3));
        assert!(state.has_moved(ArmyId(3)));
        // Marking twice is harmless
        state.mark_moved(ArmyId(3));
        assert_eq!(state.moved.len(), 1);
    }
}
