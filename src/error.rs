//! Error types.
//!
//! Transport failures are fatal to the whole run: a fixed-step lock-step
//! simulation has no meaningful partial-progress recovery, so errors are
//! propagated up and the run aborts. Topology degeneracies (empty bands)
//! and edge-of-grid neighbor access are not errors at all.

use thiserror::Error;

/// Failure in the point-to-point or collective layer.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("peer {peer} disconnected")]
    Disconnected { peer: usize },

    #[error("protocol mismatch: expected {expected} from peer {peer}")]
    Protocol { peer: usize, expected: &'static str },

    #[error("malformed wire payload from peer {peer}")]
    Payload { peer: usize },
}

/// Top-level simulation failure.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("grid dimensions {rows}x{cols} are invalid")]
    BadDimensions { rows: usize, cols: usize },
}
