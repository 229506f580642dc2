//! Events emitted while a turn runs
//!
//! Returned as a vec from `run_turn` and optionally forwarded live
//! over a channel for hosts that render steps as they happen.

use serde::Serialize;

use crate::campaign::state::GoalTag;
use crate::core::types::{ArmyId, PlayerId, RegionId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TurnEvent {
    TurnStarted {
        player: PlayerId,
    },
    /// The globally best candidate was chosen for execution
    MovePrepared {
        army: ArmyId,
        target: RegionId,
        score: f64,
        goal: GoalTag,
    },
    /// The army relocated along the (possibly trimmed) path
    MoveStarted {
        army: ArmyId,
        path: Vec<RegionId>,
        mp_spent: u32,
    },
    /// An army refilled in place on a friendly stronghold
    ArmyReinforced {
        army: ArmyId,
        region: RegionId,
    },
    BattleStarted {
        army: ArmyId,
        region: RegionId,
    },
    RegionConquered {
        region: RegionId,
        by: PlayerId,
    },
    TurnFinished {
        player: PlayerId,
        moves_executed: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_serialize_to_json() {
        let events = vec![
            TurnEvent::TurnStarted { player: PlayerId(1) },
            TurnEvent::MoveStarted {
                army: ArmyId(3),
                path: vec![RegionId(0), RegionId(1)],
                mp_spent: 3,
            },
        ];
        let json = serde_json::to_string(&events).unwrap();
        assert!(json.contains("\"TurnStarted\""));
        assert!(json.contains("\"mp_spent\":3"));
    }
}
