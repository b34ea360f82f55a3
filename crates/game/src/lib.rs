pub mod config;
pub mod grid;
pub mod net;
pub mod player;
pub mod session;

pub use config::{ConfigError, GameConfig};
pub use grid::{Extent, Grid};
pub use net::{
    Command, CommandError, DEFAULT_CONNECT_ADDRESS, DEFAULT_PORT, HandshakeError, Listener,
    MemoryTransport, NetworkStats, StreamTransport, Transport, connect, duplex,
};
pub use player::{Color, Direction, Player, Roster};
pub use session::{
    FrameInput, Frontend, Outcome, Phase, Session, SessionError, StepSnapshot, Termination,
};
