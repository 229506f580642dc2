//! The per-turn control loop
//!
//! Each pass recomputes the frontier, builds the best candidate move
//! per army, executes the single globally best one, and starts over.
//! The loop exits when the frontier is empty or a full pass produced
//! no candidate. Every executed move is followed by an optional step
//! gate await so hosts can single-step the AI.

use std::sync::Arc;

use ordered_float::OrderedFloat;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Notify;

use crate::battle::{BattleHost, BattleVerdict};
use crate::campaign::events::TurnEvent;
use crate::campaign::state::{GoalTag, MoveCandidate, TurnState};
use crate::core::config::AiConfig;
use crate::core::error::{CampaignError, Result};
use crate::core::types::{PlayerId, RegionId};
use crate::planning::{PathPlanner, TargetScorer};
use crate::world::{Army, Muster, Territory};

/// Drives one player's armies through a turn
pub struct TurnOrchestrator {
    planner: PathPlanner,
    scorer: TargetScorer,
    /// Cost bound for the reachability sweep behind candidate moves;
    /// regions beyond it are never considered, not even as fallbacks
    horizon: u32,
    /// Movement points granted at turn start to armies without a
    /// speed override
    base_budget: u32,
    step_gate: Option<Arc<Notify>>,
    events_tx: Option<UnboundedSender<TurnEvent>>,
}

impl TurnOrchestrator {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            planner: PathPlanner::new(config),
            scorer: TargetScorer::new(config),
            horizon: config.default_horizon,
            base_budget: config.base_movement_points,
            step_gate: None,
            events_tx: None,
        }
    }

    /// Suspend after every executed move until the gate is notified
    pub fn with_step_gate(mut self, gate: Arc<Notify>) -> Self {
        self.step_gate = Some(gate);
        self
    }

    /// Forward events live as they are emitted
    pub fn with_event_channel(mut self, sender: UnboundedSender<TurnEvent>) -> Self {
        self.events_tx = Some(sender);
        self
    }

    /// Run one full turn for `player`
    ///
    /// Returns every event the turn produced. Armies of other players
    /// are ignored. Errors only surface for broken collaborator
    /// contracts; game-logic dead ends (no path, no candidate) are
    /// normal loop exits.
    pub async fn run_turn<T, B, M>(
        &self,
        territory: &mut T,
        armies: &mut [Army],
        battle: &B,
        muster: &M,
        player: PlayerId,
    ) -> Result<Vec<TurnEvent>>
    where
        T: Territory,
        B: BattleHost,
        M: Muster,
    {
        let mut events = Vec::new();
        let mut state = TurnState::new(player);

        // Turn start: refresh budgets and snapshot reinforcement need
        for army in armies.iter_mut().filter(|army| army.player() == player) {
            army.begin_turn(self.base_budget);
            if muster.needs_reinforcement(army) {
                state.needs_reinforcement.insert(army.id);
            }
        }
        self.emit(&mut events, TurnEvent::TurnStarted { player });

        let mut moves_executed = 0u32;
        loop {
            state.frontier = territory.frontier_regions(player);
            if state.frontier.is_empty() {
                tracing::debug!(player = player.0, "frontier empty, ending turn");
                break;
            }

            let mut best: Option<MoveCandidate> = None;
            for idx in 0..armies.len() {
                let (army_id, position, budget) = {
                    let army = &armies[idx];
                    if army.player() != player
                        || state.has_moved(army.id)
                        || army.movement_points() == 0
                    {
                        continue;
                    }
                    (army.id, army.position(), army.movement_points())
                };

                if state.needs_reinforcement.contains(&army_id) {
                    let on_stronghold = territory
                        .region(position)
                        .map(|region| region.fortified && region.is_owned_by(player))
                        .unwrap_or(false);
                    if on_stronghold {
                        // Refill in place; this consumes the turn slot
                        muster.refill(&mut armies[idx]);
                        state.needs_reinforcement.remove(&army_id);
                        state.mark_moved(army_id);
                        self.emit(
                            &mut events,
                            TurnEvent::ArmyReinforced {
                                army: army_id,
                                region: position,
                            },
                        );
                        continue;
                    }
                    // Forced detour: an infinite score always wins
                    if let Some(stronghold) =
                        territory.nearest_owned_stronghold(position, player)
                    {
                        let route =
                            self.planner.shortest_path(territory, position, stronghold, player);
                        if route.found {
                            let candidate = MoveCandidate {
                                army: army_id,
                                target: stronghold,
                                can_reach_now: route.cost <= budget,
                                mp_cost: route.cost,
                                path: route.path,
                                final_score: f64::INFINITY,
                                goal: GoalTag::Reinforce,
                            };
                            best = Some(pick_global(best, candidate));
                        }
                    }
                    continue;
                }

                let reach =
                    self.planner
                        .reachable_regions(territory, position, player, self.horizon);
                let mut army_best: Option<MoveCandidate> = None;
                for &target in &state.frontier {
                    let Some(cost) = reach.cost(target) else {
                        continue;
                    };
                    let Some(region) = territory.region(target) else {
                        continue;
                    };
                    let path = reach.path_to(target);
                    if path.is_empty() {
                        continue;
                    }
                    let can_reach_now = cost <= budget;
                    if !can_reach_now && !first_step_affordable(territory, &path, player, budget) {
                        // No progress possible toward it this turn
                        continue;
                    }
                    let final_score = self.scorer.adjusted_score(region, army_id, cost);
                    army_best = Some(pick_for_army(
                        army_best,
                        MoveCandidate {
                            army: army_id,
                            target,
                            path,
                            mp_cost: cost,
                            final_score,
                            can_reach_now,
                            goal: GoalTag::Normal,
                        },
                    ));
                }
                if let Some(candidate) = army_best {
                    best = Some(pick_global(best, candidate));
                }
            }

            let Some(chosen) = best else {
                tracing::debug!(player = player.0, "no candidate this pass, ending turn");
                break;
            };

            self.emit(
                &mut events,
                TurnEvent::MovePrepared {
                    army: chosen.army,
                    target: chosen.target,
                    score: chosen.final_score,
                    goal: chosen.goal,
                },
            );

            let idx = armies
                .iter()
                .position(|army| army.id == chosen.army)
                .ok_or(CampaignError::ArmyNotFound(chosen.army))?;
            let budget = armies[idx].movement_points();
            let full_cost_affordable = chosen.mp_cost <= budget;

            // Trim against current state; ownership may have shifted
            // since the path was planned earlier this pass.
            let trimmed =
                self.planner
                    .trim_path_to_budget(territory, &chosen.path, player, budget);
            let destination = trimmed.last().copied();

            if trimmed.len() > 1 {
                let spent = self.planner.path_cost(territory, &trimmed, player);
                let army = &mut armies[idx];
                army.relocate_to(trimmed[trimmed.len() - 1]);
                army.spend_movement_points(spent);
                moves_executed += 1;
                self.emit(
                    &mut events,
                    TurnEvent::MoveStarted {
                        army: chosen.army,
                        path: trimmed.clone(),
                        mp_spent: spent,
                    },
                );
            }

            // Combat only on full arrival; a partial leg never fights,
            // even if the tile it stopped on happens to be contested.
            let arrived = full_cost_affordable && destination == Some(chosen.target);
            if arrived && battle.should_trigger_battle(&armies[idx], chosen.target, territory) {
                self.emit(
                    &mut events,
                    TurnEvent::BattleStarted {
                        army: chosen.army,
                        region: chosen.target,
                    },
                );
                let receiver = battle.start_battle(&mut armies[idx], chosen.target, territory);
                let verdict = receiver
                    .await
                    .map_err(|_| CampaignError::BattleChannelClosed)?;
                if verdict == BattleVerdict::Victory {
                    territory.set_region_owner(chosen.target, Some(player));
                    self.emit(
                        &mut events,
                        TurnEvent::RegionConquered {
                            region: chosen.target,
                            by: player,
                        },
                    );
                }
            }

            state.mark_moved(chosen.army);

            if let Some(gate) = &self.step_gate {
                gate.notified().await;
            }
        }

        self.emit(
            &mut events,
            TurnEvent::TurnFinished {
                player,
                moves_executed,
            },
        );
        Ok(events)
    }

    fn emit(&self, events: &mut Vec<TurnEvent>, event: TurnEvent) {
        tracing::debug!(?event, "turn event");
        if let Some(sender) = &self.events_tx {
            let _ = sender.send(event.clone());
        }
        events.push(event);
    }
}

/// Is the first step of the path affordable with the current budget?
fn first_step_affordable<T: Territory>(
    territory: &T,
    path: &[RegionId],
    player: PlayerId,
    budget: u32,
) -> bool {
    path.get(1)
        .map(|&step| territory.enter_cost(step, player) <= budget)
        .unwrap_or(false)
}

/// Keep the better of two candidates for the same army
///
/// Two-tier filter: a candidate reachable with current MP always beats
/// one that is not; within a tier the higher final score wins, ties
/// resolving to the lower target id for reproducibility.
fn pick_for_army(incumbent: Option<MoveCandidate>, next: MoveCandidate) -> MoveCandidate {
    let Some(current) = incumbent else {
        return next;
    };
    if next.can_reach_now != current.can_reach_now {
        return if next.can_reach_now { next } else { current };
    }
    match OrderedFloat(next.final_score).cmp(&OrderedFloat(current.final_score)) {
        std::cmp::Ordering::Greater => next,
        std::cmp::Ordering::Less => current,
        std::cmp::Ordering::Equal => {
            if next.target < current.target {
                next
            } else {
                current
            }
        }
    }
}

/// Keep the globally better candidate, purely by final score
///
/// Infinite scores (forced detours) always beat finite ones. Ties
/// resolve by reachability, then army id, then target id.
fn pick_global(incumbent: Option<MoveCandidate>, next: MoveCandidate) -> MoveCandidate {
    let Some(current) = incumbent else {
        return next;
    };
    match OrderedFloat(next.final_score).cmp(&OrderedFloat(current.final_score)) {
        std::cmp::Ordering::Greater => next,
        std::cmp::Ordering::Less => current,
        std::cmp::Ordering::Equal => {
            if next.can_reach_now != current.can_reach_now {
                if next.can_reach_now {
                    next
                } else {
                    current
                }
            } else if (next.army, next.target) < (current.army, current.target) {
                next
            } else {
                current
            }
        }
    }
}
