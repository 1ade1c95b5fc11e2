//! Row-banded distributed cellular-automaton engine.
//!
//! A 2-D grid is partitioned into contiguous row bands across a fixed
//! set of workers. Each step, every worker applies a pluggable local
//! update rule to its band, swaps boundary rows with its row-neighbors
//! (the halo exchange), and reconciles its edge rows against the
//! received halos. After the final step the workers reduce their local
//! extrema to a single global result at rank 0.
//!
//! The engine is agnostic to the domain semantics: the two rules in
//! [`rules`] (agent combat, hive colonies) are just sample callbacks.

pub mod cell;
pub mod config;
pub mod engine;
pub mod error;
pub mod exchange;
pub mod grid;
pub mod init;
pub mod partition;
pub mod rules;
pub mod sim;
pub mod topology;
pub mod transport;

pub use cell::{Cell, CellKind, Extremum};
pub use config::SimConfig;
pub use error::{SimError, TransportError};
pub use grid::Grid;
pub use partition::Band;
pub use rules::{ColonyRule, CombatRule, UpdateRule};
pub use sim::{local_extremum, run_steps, run_worker, WorkerReport};
pub use topology::Topology;
pub use transport::Transport;
