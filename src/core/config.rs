//! AI configuration with documented constants
//!
//! All balance numbers the planner, scorer and orchestrator consume are
//! collected here. The engine never decides these values itself; hosts
//! load them from TOML or take the defaults.

use serde::{Deserialize, Serialize};

use crate::core::error::{CampaignError, Result};

/// Configuration for the campaign AI
///
/// These values have been tuned against the default terrain costs and
/// the nine-unit roster. Changing them shifts how aggressively the AI
/// expands and which regions it prefers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    // === SCORING ===
    /// Weight of the population sub-score in the overall score
    pub weight_population: f64,

    /// Weight of the resource sub-score in the overall score
    pub weight_resources: f64,

    /// Weight of the administrative-tier sub-score in the overall score
    pub weight_level: f64,

    /// Weight of the ownership sub-score in the overall score
    ///
    /// The four weights must sum to 1.0 so sub-scores in [0,1]
    /// always produce an overall score in [0,1].
    pub weight_ownership: f64,

    /// Population reference band, lower bound
    ///
    /// Fixed lookup for the lowest tier (a Barony), not derived from
    /// live data, so scores stay comparable across a session.
    pub population_band_min: f64,

    /// Population reference band, upper bound
    pub population_band_max: f64,

    /// Maximum attainable food stock across all terrain archetypes
    pub resource_max_food: f64,

    /// Maximum attainable wood stock across all terrain archetypes
    pub resource_max_wood: f64,

    /// Maximum attainable iron stock across all terrain archetypes
    pub resource_max_iron: f64,

    /// Maximum attainable gold (treasury) across all terrain archetypes
    pub resource_max_gold: f64,

    /// Importance of food within the primary-resource blend
    pub resource_weight_food: f64,

    /// Importance of wood within the primary-resource blend
    pub resource_weight_wood: f64,

    /// Importance of iron within the primary-resource blend
    ///
    /// The three importance weights must sum to 1.0.
    pub resource_weight_iron: f64,

    /// Amplitude of the per-army score jitter
    ///
    /// Applied on the 0-100 base-score scale. Large enough to break
    /// ties between near-equal targets, small enough never to outweigh
    /// a real score difference of a few points.
    pub jitter_amplitude: f64,

    // === PATHFINDING ===
    /// Default horizon (max MP) when enumerating reachable regions
    pub default_horizon: u32,

    /// Iteration cap for horizon-bounded reachability sweeps
    ///
    /// Exceeding it degrades softly: the best-known partial set is
    /// returned and a warning is logged.
    pub search_iteration_cap: usize,

    /// Iteration cap for point-to-point routes
    ///
    /// Larger than the sweep cap because a single route across a big
    /// map legitimately expands many nodes before the target pops.
    pub route_iteration_cap: usize,

    // === TURN LOOP ===
    /// Movement points granted to an army at turn start
    pub base_movement_points: u32,

    // === BATTLE (reference resolver) ===
    /// Round cutoff after which an unresolved field battle is a draw
    pub battle_max_rounds: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            weight_population: 0.30,
            weight_resources: 0.40,
            weight_level: 0.20,
            weight_ownership: 0.10,

            population_band_min: 250.0,
            population_band_max: 2500.0,

            resource_max_food: 400.0,
            resource_max_wood: 250.0,
            resource_max_iron: 120.0,
            resource_max_gold: 1000.0,

            resource_weight_food: 0.5,
            resource_weight_wood: 0.3,
            resource_weight_iron: 0.2,

            jitter_amplitude: 2.5,

            default_horizon: 20,
            search_iteration_cap: 10_000,
            route_iteration_cap: 50_000,

            base_movement_points: 10,

            battle_max_rounds: 1000,
        }
    }
}

impl AiConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let weight_sum = self.weight_population
            + self.weight_resources
            + self.weight_level
            + self.weight_ownership;
        if (weight_sum - 1.0).abs() > 1e-9 {
            return Err(CampaignError::InvalidConfig(format!(
                "score weights must sum to 1.0, got {weight_sum}"
            )));
        }

        let resource_weight_sum =
            self.resource_weight_food + self.resource_weight_wood + self.resource_weight_iron;
        if (resource_weight_sum - 1.0).abs() > 1e-9 {
            return Err(CampaignError::InvalidConfig(format!(
                "resource importance weights must sum to 1.0, got {resource_weight_sum}"
            )));
        }

        if self.population_band_min >= self.population_band_max {
            return Err(CampaignError::InvalidConfig(format!(
                "population band is empty: [{}, {}]",
                self.population_band_min, self.population_band_max
            )));
        }

        for (name, max) in [
            ("resource_max_food", self.resource_max_food),
            ("resource_max_wood", self.resource_max_wood),
            ("resource_max_iron", self.resource_max_iron),
            ("resource_max_gold", self.resource_max_gold),
        ] {
            if max <= 0.0 {
                return Err(CampaignError::InvalidConfig(format!(
                    "{name} must be positive, got {max}"
                )));
            }
        }

        if self.jitter_amplitude < 0.0 {
            return Err(CampaignError::InvalidConfig(format!(
                "jitter_amplitude must be non-negative, got {}",
                self.jitter_amplitude
            )));
        }

        if self.search_iteration_cap == 0 || self.route_iteration_cap == 0 {
            return Err(CampaignError::InvalidConfig(
                "iteration caps must be positive".into(),
            ));
        }

        Ok(())
    }
}
