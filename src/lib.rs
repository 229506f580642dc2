//! Warmarch - campaign AI core for a turn-based conquest game
//!
//! Movement-point-bounded pathfinding over the region graph, region
//! desirability scoring and the per-turn army orchestration loop.
//! Map generation, rendering, recruitment allocation and persistence
//! live outside this crate behind the traits in [`world`] and [`battle`].

pub mod battle;
pub mod campaign;
pub mod core;
pub mod planning;
pub mod world;
