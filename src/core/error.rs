use thiserror::Error;

use crate::core::types::{ArmyId, RegionId};

#[derive(Error, Debug)]
pub enum CampaignError {
    #[error("Region not found: {0:?}")]
    RegionNotFound(RegionId),

    #[error("Army not found: {0:?}")]
    ArmyNotFound(ArmyId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Battle host dropped its verdict channel")]
    BattleChannelClosed,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CampaignError>;
