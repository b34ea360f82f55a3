use std::collections::VecDeque;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};

use super::stats::NetworkStats;
use super::transport::Transport;

/// One end of an in-memory duplex link. Receives block until the other end
/// sends; a dropped peer reads as end of stream.
#[derive(Debug)]
pub struct MemoryTransport {
    outgoing: Sender<Vec<u8>>,
    incoming: Receiver<Vec<u8>>,
    pending: VecDeque<u8>,
    stats: NetworkStats,
}

pub fn duplex() -> (MemoryTransport, MemoryTransport) {
    let (a_tx, b_rx) = mpsc::channel();
    let (b_tx, a_rx) = mpsc::channel();
    (MemoryTransport::new(a_tx, a_rx), MemoryTransport::new(b_tx, b_rx))
}

impl MemoryTransport {
    fn new(outgoing: Sender<Vec<u8>>, incoming: Receiver<Vec<u8>>) -> Self {
        Self {
            outgoing,
            incoming,
            pending: VecDeque::new(),
            stats: NetworkStats::default(),
        }
    }

    fn push(&mut self, bytes: Vec<u8>) -> io::Result<()> {
        self.outgoing
            .send(bytes)
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "peer end dropped"))
    }

    fn fill(&mut self, len: usize) -> io::Result<()> {
        while self.pending.len() < len {
            let chunk = self.incoming.recv().map_err(|_| {
                io::Error::new(io::ErrorKind::UnexpectedEof, "peer end dropped")
            })?;
            self.pending.extend(chunk);
        }
        Ok(())
    }
}

impl Transport for MemoryTransport {
    fn send_byte(&mut self, byte: u8) -> io::Result<()> {
        self.push(vec![byte])?;
        self.stats.record_command_sent();
        Ok(())
    }

    fn receive_byte(&mut self) -> io::Result<u8> {
        self.fill(1)?;
        self.stats.record_command_received();
        Ok(self.pending.pop_front().unwrap_or_default())
    }

    fn send_block(&mut self, block: &[u8]) -> io::Result<()> {
        self.push(block.to_vec())?;
        self.stats.record_sent(block.len());
        Ok(())
    }

    fn receive_block(&mut self, len: usize) -> io::Result<Vec<u8>> {
        self.fill(len)?;
        self.stats.record_received(len);
        Ok(self.pending.drain(..len).collect())
    }

    fn stats(&self) -> NetworkStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn bytes_cross_in_both_directions() {
        let (mut a, mut b) = duplex();
        a.send_byte(3).unwrap();
        b.send_block(&[1, 2, 3, 4]).unwrap();

        assert_eq!(b.receive_byte().unwrap(), 3);
        assert_eq!(a.receive_block(2).unwrap(), vec![1, 2]);
        assert_eq!(a.receive_byte().unwrap(), 3);
        assert_eq!(a.receive_byte().unwrap(), 4);
    }

    #[test]
    fn receive_blocks_until_peer_sends() {
        let (mut a, mut b) = duplex();
        let handle = thread::spawn(move || {
            let byte = b.receive_byte().unwrap();
            b.send_byte(byte + 1).unwrap();
        });

        a.send_byte(41).unwrap();
        assert_eq!(a.receive_byte().unwrap(), 42);
        handle.join().unwrap();
    }

    #[test]
    fn dropped_peer_is_end_of_stream() {
        let (mut a, b) = duplex();
        drop(b);
        assert_eq!(
            a.receive_byte().unwrap_err().kind(),
            io::ErrorKind::UnexpectedEof
        );
        assert_eq!(
            a.send_byte(0).unwrap_err().kind(),
            io::ErrorKind::BrokenPipe
        );
    }

    #[test]
    fn block_spanning_chunks() {
        let (mut a, mut b) = duplex();
        a.send_byte(1).unwrap();
        a.send_block(&[2, 3]).unwrap();
        a.send_byte(4).unwrap();
        assert_eq!(b.receive_block(4).unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(b.stats().bytes_received, 4);
    }
}
