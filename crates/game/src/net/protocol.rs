use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 15150;
pub const DEFAULT_CONNECT_ADDRESS: &str = "127.0.0.1";

/// The handshake length prefix is a single byte.
pub const MAX_HANDSHAKE_PAYLOAD: usize = u8::MAX as usize;

/// One player's starting state as it travels in the handshake record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub x: i32,
    pub y: i32,
    pub c: u32,
    pub d: u8,
}

/// Handshake record. Labels are from the listener's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandshakeRecord {
    pub local: PlayerRecord,
    pub remote: PlayerRecord,
}
