//! Field battle resolver
//!
//! Probabilistic round-based resolution: every soldier rolls to hit,
//! hits spread proportionally across defender unit types, defense rolls
//! deflect some, and both sides' casualties apply simultaneously so
//! neither order of attack matters.

use rand::distributions::{Bernoulli, Distribution, WeightedIndex};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::battle::units::{roster_size, Roster, UnitKind};

/// How a resolved battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BattleOutcome {
    AttackerVictory,
    DefenderVictory,
    /// Mutual destruction or the round cutoff
    Draw,
}

/// One round of combat, for after-action reports
#[derive(Debug, Clone, Serialize)]
pub struct RoundReport {
    pub round: u32,
    pub attacker_hits: u32,
    pub defender_hits: u32,
    pub attacker_losses: Roster,
    pub defender_losses: Roster,
    pub attacker_size_end: u32,
    pub defender_size_end: u32,
}

/// Full resolution of one battle
#[derive(Debug, Clone, Serialize)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub rounds_fought: u32,
    pub rounds: Vec<RoundReport>,
    pub attacker_survivors: Roster,
    pub defender_survivors: Roster,
}

/// Simulate until one side is wiped out or `max_rounds` is reached
///
/// Deterministic for a given seed and input rosters.
pub fn simulate_battle(
    attacker: &Roster,
    defender: &Roster,
    seed: u64,
    max_rounds: u32,
) -> BattleReport {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut side_a = attacker.clone();
    let mut side_b = defender.clone();

    let mut rounds = Vec::new();
    let mut round = 0u32;

    while roster_size(&side_a) > 0 && roster_size(&side_b) > 0 && round < max_rounds {
        round += 1;

        // Both attack phases roll against the same starting state;
        // kills are applied only after both are known.
        let a_hits = attacks_to_hits(&side_a, &mut rng);
        let a_kills = defense_resolution(&distribute_hits(&side_b, a_hits, &mut rng), &mut rng);

        let b_hits = attacks_to_hits(&side_b, &mut rng);
        let b_kills = defense_resolution(&distribute_hits(&side_a, b_hits, &mut rng), &mut rng);

        let defender_losses = apply_kills(&mut side_b, &a_kills);
        let attacker_losses = apply_kills(&mut side_a, &b_kills);

        rounds.push(RoundReport {
            round,
            attacker_hits: a_hits,
            defender_hits: b_hits,
            attacker_losses,
            defender_losses,
            attacker_size_end: roster_size(&side_a),
            defender_size_end: roster_size(&side_b),
        });
    }

    let a_alive = roster_size(&side_a) > 0;
    let b_alive = roster_size(&side_b) > 0;
    let outcome = match (a_alive, b_alive) {
        (true, false) => BattleOutcome::AttackerVictory,
        (false, true) => BattleOutcome::DefenderVictory,
        _ => BattleOutcome::Draw,
    };

    BattleReport {
        outcome,
        rounds_fought: round,
        rounds,
        attacker_survivors: side_a,
        defender_survivors: side_b,
    }
}

/// Binomial sample: successes out of `n` trials at probability `p`
fn binomial(rng: &mut ChaCha8Rng, n: u32, p: f64) -> u32 {
    if n == 0 || p <= 0.0 {
        return 0;
    }
    if p >= 1.0 {
        return n;
    }
    let coin = Bernoulli::new(p).expect("probability already clamped");
    (0..n).filter(|_| coin.sample(rng)).count() as u32
}

/// Total hits an army produces: per type, each soldier rolls its
/// attack percentage
fn attacks_to_hits(roster: &Roster, rng: &mut ChaCha8Rng) -> u32 {
    roster
        .iter()
        .map(|(kind, &count)| binomial(rng, count, kind.stats().attack as f64 / 100.0))
        .sum()
}

/// Spread hits across defender types proportionally to head count
/// (multinomial draw)
fn distribute_hits(defender: &Roster, total_hits: u32, rng: &mut ChaCha8Rng) -> Roster {
    let alive: Vec<(UnitKind, u32)> = defender
        .iter()
        .filter(|(_, &count)| count > 0)
        .map(|(&kind, &count)| (kind, count))
        .collect();
    if alive.is_empty() || total_hits == 0 {
        return Roster::new();
    }

    let weights: Vec<u32> = alive.iter().map(|(_, count)| *count).collect();
    let index = WeightedIndex::new(&weights).expect("non-empty positive weights");
    let mut assigned = Roster::new();
    for _ in 0..total_hits {
        let (kind, _) = alive[index.sample(rng)];
        *assigned.entry(kind).or_insert(0) += 1;
    }
    assigned
}

/// Per defender type, deflect assigned hits by its defense percentage;
/// what remains kills
fn defense_resolution(assigned: &Roster, rng: &mut ChaCha8Rng) -> Roster {
    let mut kills = Roster::new();
    for (&kind, &hits) in assigned {
        if hits == 0 {
            continue;
        }
        let penetration = 1.0 - kind.stats().defense as f64 / 100.0;
        let killed = binomial(rng, hits, penetration.max(0.0));
        if killed > 0 {
            kills.insert(kind, killed);
        }
    }
    kills
}

/// Remove casualties from a roster; a hit that lands is a death
///
/// Returns actual losses per type, capped at what was available.
fn apply_kills(roster: &mut Roster, kills: &Roster) -> Roster {
    let mut losses = Roster::new();
    for (&kind, &kill_count) in kills {
        if kill_count == 0 {
            continue;
        }
        let Some(available) = roster.get(&kind).copied() else {
            continue;
        };
        let actual = kill_count.min(available);
        if available > actual {
            roster.insert(kind, available - actual);
        } else {
            roster.remove(&kind);
        }
        if actual > 0 {
            losses.insert(kind, actual);
        }
    }
    losses
}
