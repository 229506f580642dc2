//! Turn orchestration: the per-turn control loop over armies

pub mod events;
pub mod orchestrator;
pub mod state;

pub use events::TurnEvent;
pub use orchestrator::TurnOrchestrator;
pub use state::{GoalTag, MoveCandidate, TurnState};
