//! MPI transport (rsmpi), one worker per OS process.
//!
//! Cells travel as flat `i32` buffers (kind tag, vitality, repeated) so
//! no custom MPI datatype is needed. The row swap posts a non-blocking
//! send and completes it only after the matching receive, which is the
//! ordering discipline that keeps mutual boundary swaps deadlock-free.

use mpi::topology::{Communicator, SystemCommunicator};
use mpi::traits::*;

use crate::cell::{Cell, CellKind, Extremum};
use crate::error::TransportError;
use crate::topology::Topology;
use crate::transport::Transport;

const TAG_REDUCE: i32 = 7;

pub struct MpiTransport {
    world: SystemCommunicator,
    topology: Topology,
}

impl MpiTransport {
    pub fn new(world: SystemCommunicator) -> MpiTransport {
        let topology = Topology::new(world.rank() as usize, world.size() as usize);
        MpiTransport { world, topology }
    }
}

fn encode(cells: &[Cell]) -> Vec<i32> {
    let mut buf = Vec::with_capacity(cells.len() * 2);
    for cell in cells {
        buf.push(cell.kind as i32);
        buf.push(cell.vitality);
    }
    buf
}

fn decode(buf: &[i32], peer: usize) -> Result<Vec<Cell>, TransportError> {
    if buf.len() % 2 != 0 {
        return Err(TransportError::Payload { peer });
    }
    buf.chunks_exact(2)
        .map(|pair| match CellKind::from_i32(pair[0]) {
            Some(kind) => Ok(Cell::new(kind, pair[1])),
            None => Err(TransportError::Payload { peer }),
        })
        .collect()
}

impl Transport for MpiTransport {
    fn topology(&self) -> Topology {
        self.topology
    }

    fn exchange(&mut self, with: usize, row: &[Cell]) -> Result<Vec<Cell>, TransportError> {
        let outgoing = encode(row);
        let peer = self.world.process_at_rank(with as i32);
        let mut incoming: Vec<i32> = Vec::new();
        mpi::request::scope(|scope| {
            let request = peer.immediate_send(scope, &outgoing[..]);
            incoming = peer.receive_vec::<i32>().0;
            request.wait_without_status();
        });
        decode(&incoming, with)
    }

    fn reduce(
        &mut self,
        local: Extremum,
        combine: fn(Extremum, Extremum) -> Extremum,
    ) -> Result<Option<Extremum>, TransportError> {
        let payload = [local.kind as i32, local.vitality];
        if self.topology.is_root() {
            let mut global = local;
            for peer in 1..self.topology.size() {
                let (buf, _) = self
                    .world
                    .process_at_rank(peer as i32)
                    .receive_vec_with_tag::<i32>(TAG_REDUCE);
                if buf.len() != 2 {
                    return Err(TransportError::Payload { peer });
                }
                let kind = match CellKind::from_i32(buf[0]) {
                    Some(kind) => kind,
                    None => return Err(TransportError::Payload { peer }),
                };
                global = combine(
                    global,
                    Extremum {
                        kind,
                        vitality: buf[1],
                    },
                );
            }
            Ok(Some(global))
        } else {
            self.world
                .process_at_rank(0)
                .send_with_tag(&payload[..], TAG_REDUCE);
            Ok(None)
        }
    }
}
