//! In-process transport: one thread per worker, a pair of unbounded
//! channels per directed rank pair. Unbounded sends never block, which
//! satisfies the deadlock-avoidance contract of [`Transport::exchange`]
//! by construction. Used by the test suite and the default binary.

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::cell::{Cell, Extremum};
use crate::error::TransportError;
use crate::topology::Topology;
use crate::transport::Transport;

enum Message {
    Row(Vec<Cell>),
    Extremum(Extremum),
}

pub struct LocalTransport {
    topology: Topology,
    senders: Vec<Option<Sender<Message>>>,
    receivers: Vec<Option<Receiver<Message>>>,
}

/// Builds a fully-connected mesh of `size` workers; element `i` is the
/// transport for rank `i`.
pub fn mesh(size: usize) -> Vec<LocalTransport> {
    let mut transports: Vec<LocalTransport> = (0..size)
        .map(|rank| LocalTransport {
            topology: Topology::new(rank, size),
            senders: (0..size).map(|_| None).collect(),
            receivers: (0..size).map(|_| None).collect(),
        })
        .collect();
    for from in 0..size {
        for to in 0..size {
            if from == to {
                continue;
            }
            let (tx, rx) = unbounded();
            transports[from].senders[to] = Some(tx);
            transports[to].receivers[from] = Some(rx);
        }
    }
    transports
}

impl LocalTransport {
    fn send(&self, to: usize, message: Message) -> Result<(), TransportError> {
        let sender = self.senders.get(to).and_then(Option::as_ref);
        match sender {
            Some(sender) => sender
                .send(message)
                .map_err(|_| TransportError::Disconnected { peer: to }),
            None => Err(TransportError::Disconnected { peer: to }),
        }
    }

    fn recv(&self, from: usize) -> Result<Message, TransportError> {
        let receiver = self.receivers.get(from).and_then(Option::as_ref);
        match receiver {
            Some(receiver) => receiver
                .recv()
                .map_err(|_| TransportError::Disconnected { peer: from }),
            None => Err(TransportError::Disconnected { peer: from }),
        }
    }
}

impl Transport for LocalTransport {
    fn topology(&self) -> Topology {
        self.topology
    }

    fn exchange(&mut self, with: usize, row: &[Cell]) -> Result<Vec<Cell>, TransportError> {
        self.send(with, Message::Row(row.to_vec()))?;
        match self.recv(with)? {
            Message::Row(cells) => Ok(cells),
            Message::Extremum(_) => Err(TransportError::Protocol {
                peer: with,
                expected: "halo row",
            }),
        }
    }

    fn reduce(
        &mut self,
        local: Extremum,
        combine: fn(Extremum, Extremum) -> Extremum,
    ) -> Result<Option<Extremum>, TransportError> {
        if self.topology.is_root() {
            let mut global = local;
            for peer in 1..self.topology.size() {
                match self.recv(peer)? {
                    Message::Extremum(remote) => global = combine(global, remote),
                    Message::Row(_) => {
                        return Err(TransportError::Protocol {
                            peer,
                            expected: "local extremum",
                        })
                    }
                }
            }
            Ok(Some(global))
        } else {
            self.send(0, Message::Extremum(local))?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellKind;
    use std::thread;

    #[test]
    fn paired_exchange_swaps_rows() {
        let mut transports = mesh(2);
        let mut upper = transports.remove(0);
        let mut lower = transports.remove(0);
        let row_a = vec![Cell::new(CellKind::Aggressor, 1); 3];
        let row_b = vec![Cell::new(CellKind::Defender, 2); 3];

        let (from_lower, from_upper) = thread::scope(|scope| {
            let a = scope.spawn(|| upper.exchange(1, &row_a));
            let b = scope.spawn(|| lower.exchange(0, &row_b));
            (a.join().unwrap(), b.join().unwrap())
        });
        assert_eq!(from_lower.unwrap(), row_b);
        assert_eq!(from_upper.unwrap(), row_a);
    }

    #[test]
    fn reduce_folds_all_locals_at_root() {
        let transports = mesh(3);
        let locals = [
            Extremum {
                kind: CellKind::Aggressor,
                vitality: 10,
            },
            Extremum {
                kind: CellKind::Aggressor,
                vitality: 55,
            },
            Extremum::NONE,
        ];
        let results = thread::scope(|scope| {
            let handles: Vec<_> = transports
                .into_iter()
                .zip(locals)
                .map(|(mut transport, local)| {
                    scope.spawn(move || transport.reduce(local, Extremum::combine))
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap().unwrap())
                .collect::<Vec<_>>()
        });
        assert_eq!(
            results[0],
            Some(Extremum {
                kind: CellKind::Aggressor,
                vitality: 55,
            })
        );
        assert_eq!(results[1], None);
        assert_eq!(results[2], None);
    }

    #[test]
    fn exchange_with_dropped_peer_fails() {
        let mut transports = mesh(2);
        let _ = transports.remove(1); // drop rank 1 entirely
        let mut only = transports.remove(0);
        let row = vec![Cell::background(); 2];
        assert!(matches!(
            only.exchange(1, &row),
            Err(TransportError::Disconnected { peer: 1 })
        ));
    }
}
