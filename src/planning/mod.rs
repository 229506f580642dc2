//! Movement planning: priority queue, pathfinding and target scoring

pub mod pathfind;
pub mod queue;
pub mod scoring;

pub use pathfind::{PathPlanner, PathResult, ReachabilitySet, NO_HORIZON};
pub use queue::MinHeap;
pub use scoring::{ScoreRecord, TargetScorer};
