mod command;
mod endpoint;
pub mod handshake;
pub mod memory;
mod protocol;
mod stats;
mod transport;

pub use command::{Command, CommandError};
pub use endpoint::{Listener, connect};
pub use handshake::HandshakeError;
pub use memory::{MemoryTransport, duplex};
pub use protocol::{
    DEFAULT_CONNECT_ADDRESS, DEFAULT_PORT, HandshakeRecord, MAX_HANDSHAKE_PAYLOAD, PlayerRecord,
};
pub use stats::NetworkStats;
pub use transport::{StreamTransport, Transport};
