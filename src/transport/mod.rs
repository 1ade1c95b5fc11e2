//! Message-passing boundary of the engine.
//!
//! The core needs exactly two primitives from its transport: a paired
//! boundary-row swap with a row-neighbor, and a reduction of per-worker
//! extrema to rank 0 under a caller-supplied combiner. Delivery between
//! any two ranks must be reliable and in order.

mod local;
#[cfg(feature = "mpi")]
mod mpi;

pub use local::{mesh, LocalTransport};
#[cfg(feature = "mpi")]
pub use mpi::MpiTransport;

use crate::cell::{Cell, Extremum};
use crate::error::TransportError;
use crate::topology::Topology;

pub trait Transport {
    /// Rank and worker count, immutable for the run.
    fn topology(&self) -> Topology;

    /// Swaps one boundary row with the worker `with`.
    ///
    /// Implementations must post the outgoing row without blocking
    /// before waiting on the incoming one; two neighbors calling
    /// `exchange` against each other must never deadlock.
    fn exchange(&mut self, with: usize, row: &[Cell]) -> Result<Vec<Cell>, TransportError>;

    /// Folds every worker's local extremum with `combine`, which must
    /// be pure, commutative, and associative: the grouping and order of
    /// application are implementation-defined.
    ///
    /// Returns `Some(global)` at rank 0 and `None` everywhere else.
    fn reduce(
        &mut self,
        local: Extremum,
        combine: fn(Extremum, Extremum) -> Extremum,
    ) -> Result<Option<Extremum>, TransportError>;
}
