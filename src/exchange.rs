//! Halo exchange: the once-per-step boundary-row swap.

use crate::cell::Cell;
use crate::error::TransportError;
use crate::grid::Grid;
use crate::partition::Band;
use crate::topology::Topology;
use crate::transport::Transport;

/// Which neighbors this worker actually swaps rows with.
///
/// Rank 0 never exchanges upward and the last rank never exchanges
/// downward; a neighbor whose band is empty owns no boundary row, so it
/// is skipped as well (an empty band is a no-op, not an error).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangePlan {
    up: Option<usize>,
    down: Option<usize>,
}

impl ExchangePlan {
    pub fn new(topology: Topology, total_rows: usize) -> ExchangePlan {
        let band = Band::partition(topology.rank(), topology.size(), total_rows);
        if band.is_empty() {
            return ExchangePlan {
                up: None,
                down: None,
            };
        }
        let occupied =
            |rank: usize| !Band::partition(rank, topology.size(), total_rows).is_empty();
        ExchangePlan {
            up: topology.up().filter(|&rank| occupied(rank)),
            down: topology.down().filter(|&rank| occupied(rank)),
        }
    }

    pub fn up(&self) -> Option<usize> {
        self.up
    }

    pub fn down(&self) -> Option<usize> {
        self.down
    }
}

/// Halo rows received from the row-neighbors; transient, dropped after
/// the edge-aware pass of the same step.
#[derive(Debug)]
pub struct HaloPair {
    pub top: Option<Vec<Cell>>,
    pub bottom: Option<Vec<Cell>>,
}

/// Swaps boundary rows per the plan: the top edge row goes up and the
/// bottom edge row goes down, one row per direction per step.
///
/// Every worker orders its swaps up-first-then-down, and the transport
/// posts each send before blocking on the matching receive, so the
/// chain of swaps resolves from rank 0 outward without deadlock.
pub fn exchange_halo<T: Transport>(
    grid: &Grid,
    band: Band,
    plan: &ExchangePlan,
    transport: &mut T,
) -> Result<HaloPair, TransportError> {
    let top = match plan.up() {
        Some(peer) => Some(transport.exchange(peer, grid.row(band.start_row()))?),
        None => None,
    };
    let bottom = match plan.down() {
        Some(peer) => Some(transport.exchange(peer, grid.row(band.end_row()))?),
        None => None,
    };
    Ok(HaloPair { top, bottom })
}
