//! Training infrastructure for the BPE simulator.
//!
//! This module provides pair counting, the merge engine and the trajectory
//! it produces, plus statistics derived from a trajectory.

pub mod counter;
pub mod engine;
pub mod stats;
pub mod trajectory;

pub use counter::{PairCounter, PairStats};
pub use engine::{EngineConfig, MergeEngine, MAX_MERGES, MIN_FREQUENCY};
pub use stats::{StepStats, TrajectoryStats};
pub use trajectory::{Step, StopReason, Trajectory};
