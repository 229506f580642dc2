//! Unit roster and base stats

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Unit types fieldable in a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitKind {
    Peasants,
    Spearmen,
    Swordsmen,
    Archers,
    Crossbowmen,
    Horsemen,
    Knights,
    MountedKnights,
    RoyalGuard,
}

/// Base stats for a unit type
///
/// Attack is the percent chance per soldier to produce a hit before
/// defense; defense is the percent chance per assigned hit to be
/// deflected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    pub gold: u32,
    pub food: f32,
    pub wood: u32,
    pub iron: u32,
    pub attack: u32,
    pub defense: u32,
}

impl UnitKind {
    pub const ALL: [UnitKind; 9] = [
        UnitKind::Peasants,
        UnitKind::Spearmen,
        UnitKind::Swordsmen,
        UnitKind::Archers,
        UnitKind::Crossbowmen,
        UnitKind::Horsemen,
        UnitKind::Knights,
        UnitKind::MountedKnights,
        UnitKind::RoyalGuard,
    ];

    pub fn stats(&self) -> UnitStats {
        match self {
            Self::Peasants => UnitStats { gold: 0, food: 0.1, wood: 0, iron: 0, attack: 5, defense: 10 },
            Self::Spearmen => UnitStats { gold: 1, food: 0.1, wood: 0, iron: 0, attack: 10, defense: 25 },
            Self::Swordsmen => UnitStats { gold: 2, food: 0.1, wood: 0, iron: 0, attack: 30, defense: 40 },
            Self::Archers => UnitStats { gold: 3, food: 0.1, wood: 1, iron: 0, attack: 25, defense: 15 },
            Self::Crossbowmen => UnitStats { gold: 2, food: 0.1, wood: 1, iron: 0, attack: 20, defense: 15 },
            Self::Horsemen => UnitStats { gold: 5, food: 0.2, wood: 0, iron: 0, attack: 30, defense: 30 },
            Self::Knights => UnitStats { gold: 10, food: 0.2, wood: 0, iron: 1, attack: 60, defense: 60 },
            Self::MountedKnights => UnitStats { gold: 15, food: 0.4, wood: 0, iron: 1, attack: 65, defense: 60 },
            Self::RoyalGuard => UnitStats { gold: 20, food: 0.3, wood: 0, iron: 1, attack: 80, defense: 80 },
        }
    }
}

/// An army's composition: soldiers per unit type
///
/// Ordered map so iteration order is stable, which keeps seeded battle
/// resolution reproducible.
pub type Roster = BTreeMap<UnitKind, u32>;

/// Build a roster, dropping zero counts
pub fn make_roster(pairs: &[(UnitKind, u32)]) -> Roster {
    pairs.iter()
        .filter(|(_, count)| *count > 0)
        .copied()
        .collect()
}

/// Total soldiers in the roster
pub fn roster_size(roster: &Roster) -> u32 {
    roster.values().sum()
}
