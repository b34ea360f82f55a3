use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};

use super::transport::StreamTransport;

/// Listening side of a session. Accepts exactly one peer.
#[derive(Debug)]
pub struct Listener {
    inner: TcpListener,
    local_addr: SocketAddr,
}

impl Listener {
    pub fn bind<A: ToSocketAddrs>(addr: A) -> io::Result<Self> {
        let inner = TcpListener::bind(addr)?;
        let local_addr = inner.local_addr()?;
        log::info!("Listening on {}", local_addr);
        Ok(Self { inner, local_addr })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Blocks for the first connection, then stops listening.
    pub fn accept(self) -> io::Result<(StreamTransport<TcpStream>, SocketAddr)> {
        let (stream, peer) = self.inner.accept()?;
        log::info!("Accepted connection from {}", peer);
        Ok((StreamTransport::tcp(stream)?, peer))
    }
}

pub fn connect<A: ToSocketAddrs>(addr: A) -> io::Result<StreamTransport<TcpStream>> {
    let stream = TcpStream::connect(addr)?;
    log::info!("Connected to {}", stream.peer_addr()?);
    StreamTransport::tcp(stream)
}
