use std::io::{self, Read, Write};
use std::net::TcpStream;

use super::stats::NetworkStats;

/// Byte-level duplex link between the two peers.
///
/// Every operation blocks until it completes; there is no timeout.
pub trait Transport {
    fn send_byte(&mut self, byte: u8) -> io::Result<()>;

    fn receive_byte(&mut self) -> io::Result<u8>;

    fn send_block(&mut self, block: &[u8]) -> io::Result<()>;

    /// Reads exactly `len` bytes.
    fn receive_block(&mut self, len: usize) -> io::Result<Vec<u8>>;

    fn stats(&self) -> NetworkStats;

    fn shutdown(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send_byte(&mut self, byte: u8) -> io::Result<()> {
        (**self).send_byte(byte)
    }

    fn receive_byte(&mut self) -> io::Result<u8> {
        (**self).receive_byte()
    }

    fn send_block(&mut self, block: &[u8]) -> io::Result<()> {
        (**self).send_block(block)
    }

    fn receive_block(&mut self, len: usize) -> io::Result<Vec<u8>> {
        (**self).receive_block(len)
    }

    fn stats(&self) -> NetworkStats {
        (**self).stats()
    }

    fn shutdown(&mut self) -> io::Result<()> {
        (**self).shutdown()
    }
}

/// [`Transport`] over any blocking byte stream.
#[derive(Debug)]
pub struct StreamTransport<S> {
    stream: S,
    stats: NetworkStats,
}

impl<S: Read + Write> StreamTransport<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            stats: NetworkStats::default(),
        }
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl StreamTransport<TcpStream> {
    pub fn tcp(stream: TcpStream) -> io::Result<Self> {
        stream.set_nodelay(true)?;
        Ok(Self::new(stream))
    }
}

impl<S: Read + Write> Transport for StreamTransport<S> {
    fn send_byte(&mut self, byte: u8) -> io::Result<()> {
        self.stream.write_all(&[byte])?;
        self.stream.flush()?;
        self.stats.record_command_sent();
        Ok(())
    }

    fn receive_byte(&mut self) -> io::Result<u8> {
        let mut buf = [0u8; 1];
        self.stream.read_exact(&mut buf)?;
        self.stats.record_command_received();
        Ok(buf[0])
    }

    fn send_block(&mut self, block: &[u8]) -> io::Result<()> {
        self.stream.write_all(block)?;
        self.stream.flush()?;
        self.stats.record_sent(block.len());
        Ok(())
    }

    fn receive_block(&mut self, len: usize) -> io::Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.stream.read_exact(&mut buf)?;
        self.stats.record_received(len);
        Ok(buf)
    }

    fn stats(&self) -> NetworkStats {
        self.stats
    }

    fn shutdown(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}
