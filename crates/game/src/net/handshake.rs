//! One-shot exchange of the starting roster.
//!
//! Wire format: one length byte `N`, then `N` bytes of a MessagePack map
//! `{ local: {x, y, c, d}, remote: {x, y, c, d} }`. The listener is the
//! authority; its "local" is the connector's "remote".

use std::io;

use rand::Rng;

use super::protocol::{HandshakeRecord, MAX_HANDSHAKE_PAYLOAD, PlayerRecord};
use super::transport::Transport;
use crate::config::GameConfig;
use crate::player::{Color, Direction, Player, Roster};

#[derive(Debug, thiserror::Error)]
pub enum HandshakeError {
    #[error("handshake i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode handshake record: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
    #[error("failed to decode handshake record: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
    #[error("handshake payload is {0} bytes (max {MAX_HANDSHAKE_PAYLOAD})")]
    PayloadTooLarge(usize),
    #[error("invalid direction index {0} in handshake record")]
    InvalidDirection(u8),
}

impl From<&Player> for PlayerRecord {
    fn from(player: &Player) -> Self {
        Self {
            x: player.x,
            y: player.y,
            c: player.color.0,
            d: player.facing.index(),
        }
    }
}

impl TryFrom<PlayerRecord> for Player {
    type Error = HandshakeError;

    fn try_from(record: PlayerRecord) -> Result<Self, Self::Error> {
        let facing =
            Direction::from_index(record.d).ok_or(HandshakeError::InvalidDirection(record.d))?;
        Ok(Player::new(record.x, record.y, Color(record.c), facing))
    }
}

/// Picks both starting players on the listener side. The remote coordinate is
/// re-rolled per axis until it is strictly more than `min_separation` away.
pub fn generate_roster<R: Rng>(config: &GameConfig, rng: &mut R) -> Roster {
    let (local_x, remote_x) = spawn_pair(rng, config.width, config);
    let (local_y, remote_y) = spawn_pair(rng, config.height, config);

    Roster::new(
        Player::new(local_x, local_y, config.local_color, Direction::Down),
        Player::new(remote_x, remote_y, config.remote_color, Direction::Up),
    )
}

fn spawn_pair<R: Rng>(rng: &mut R, extent: u32, config: &GameConfig) -> (i32, i32) {
    let low = config.spawn_margin as i32;
    let high = extent as i32 - config.spawn_margin as i32;
    let separation = config.min_separation as i32;

    let local = rng.random_range(low..high);
    let mut remote = rng.random_range(low..high);
    while (remote - local).abs() <= separation {
        remote = rng.random_range(low..high);
    }
    (local, remote)
}

pub fn encode_roster(roster: &Roster) -> Result<Vec<u8>, HandshakeError> {
    let record = HandshakeRecord {
        local: (&roster.local).into(),
        remote: (&roster.remote).into(),
    };
    let payload = rmp_serde::to_vec_named(&record)?;
    if payload.len() > MAX_HANDSHAKE_PAYLOAD {
        return Err(HandshakeError::PayloadTooLarge(payload.len()));
    }

    let mut message = Vec::with_capacity(payload.len() + 1);
    message.push(payload.len() as u8);
    message.extend_from_slice(&payload);
    Ok(message)
}

/// Decodes a payload (without its length byte). Labels are kept as sent.
pub fn decode_roster(payload: &[u8]) -> Result<Roster, HandshakeError> {
    if payload.is_empty() {
        return Ok(Roster::default());
    }
    let record: HandshakeRecord = rmp_serde::from_slice(payload)?;
    Ok(Roster::new(
        record.local.try_into()?,
        record.remote.try_into()?,
    ))
}

/// Listener side: write the roster as generated.
pub fn send_roster<T: Transport + ?Sized>(
    transport: &mut T,
    roster: &Roster,
) -> Result<(), HandshakeError> {
    let message = encode_roster(roster)?;
    transport.send_block(&message)?;
    log::info!("Sent handshake ({} bytes)", message.len());
    Ok(())
}

/// Connector side: read the listener's roster and swap it into this peer's
/// point of view.
pub fn receive_roster<T: Transport + ?Sized>(transport: &mut T) -> Result<Roster, HandshakeError> {
    let len = usize::from(transport.receive_block(1)?[0]);
    let payload = if len > 0 {
        transport.receive_block(len)?
    } else {
        log::warn!("Received empty handshake payload");
        Vec::new()
    };
    let roster = decode_roster(&payload)?.swapped();
    log::info!("Received handshake ({} bytes)", len + 1);
    Ok(roster)
}
