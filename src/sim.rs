//! Step loop and distributed reduction.

use tracing::{debug, trace};

use crate::cell::{Cell, Extremum};
use crate::engine::{update_band, update_edge};
use crate::error::SimError;
use crate::exchange::{exchange_halo, ExchangePlan};
use crate::grid::Grid;
use crate::partition::Band;
use crate::rules::UpdateRule;
use crate::topology::Topology;
use crate::transport::Transport;

/// What one worker produced: its band, its local extremum, and at rank 0
/// the globally combined extremum.
#[derive(Debug)]
pub struct WorkerReport {
    pub band: Band,
    pub local: Extremum,
    pub global: Option<Extremum>,
}

/// Drives exactly `steps` iterations of local update → halo exchange →
/// edge-aware update. There is no early termination: the horizon is
/// fixed, and a step never starts before the previous step's exchange
/// has completed on this worker.
pub fn run_steps<T: Transport, R: UpdateRule>(
    grid: &mut Grid,
    band: Band,
    topology: Topology,
    rule: &R,
    steps: u32,
    transport: &mut T,
) -> Result<(), SimError> {
    let plan = ExchangePlan::new(topology, grid.rows());
    for step in 0..steps {
        let mut pendings = update_band(
            grid,
            band,
            rule,
            plan.up().is_some(),
            plan.down().is_some(),
        );
        let halos = exchange_halo(grid, band, &plan, transport)?;
        if let Some(top) = halos.top {
            if let Some(pending) = pendings.iter_mut().find(|p| p.row() == band.start_row()) {
                update_edge(grid, pending, &top, rule);
            }
        }
        if let Some(bottom) = halos.bottom {
            if let Some(pending) = pendings.iter_mut().find(|p| p.row() == band.end_row()) {
                update_edge(grid, pending, &bottom, rule);
            }
        }
        trace!(step, rank = topology.rank(), "step complete");
    }
    Ok(())
}

/// Strongest cell in the band that matches `predicate`, or
/// [`Extremum::NONE`]. Ties keep the first cell found in row-major
/// order; only the maximal vitality is meaningful downstream.
pub fn local_extremum<P>(grid: &Grid, band: Band, predicate: P) -> Extremum
where
    P: Fn(&Cell) -> bool,
{
    let mut best = Extremum::NONE;
    for row in band.rows() {
        for col in 0..grid.cols() {
            if let Some(cell) = grid.get(row, col) {
                if predicate(&cell) && cell.vitality > best.vitality {
                    best = Extremum::from_cell(cell);
                }
            }
        }
    }
    best
}

/// Full worker lifecycle: partition, step loop, local scan, reduction.
///
/// Every worker starts from an identical full grid (seed-synchronized
/// initialization) and only ever mutates its own band.
pub fn run_worker<T: Transport, R: UpdateRule>(
    grid: &mut Grid,
    rule: &R,
    steps: u32,
    predicate: fn(&Cell) -> bool,
    transport: &mut T,
) -> Result<WorkerReport, SimError> {
    let topology = transport.topology();
    let band = Band::partition(topology.rank(), topology.size(), grid.rows());
    run_steps(grid, band, topology, rule, steps, transport)?;
    let local = local_extremum(grid, band, predicate);
    debug!(rank = topology.rank(), local = %local, "band finished");
    let global = transport.reduce(local, Extremum::combine)?;
    Ok(WorkerReport {
        band,
        local,
        global,
    })
}
