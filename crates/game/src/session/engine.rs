use std::io;

use rand::Rng;

use super::frontend::Frontend;
use super::state::{Outcome, Phase, StepSnapshot, Termination};
use crate::config::{ConfigError, GameConfig};
use crate::grid::Grid;
use crate::net::handshake::{self, HandshakeError};
use crate::net::{Command, CommandError, NetworkStats, Transport};
use crate::player::{Direction, Player, Roster};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),
    #[error("protocol violation: {0}")]
    Protocol(#[from] CommandError),
    #[error(transparent)]
    Handshake(#[from] HandshakeError),
    #[error("frontend error: {0}")]
    Frontend(#[source] io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("session is in phase {actual:?}, expected {expected:?}")]
    WrongPhase { expected: Phase, actual: Phase },
}

impl SessionError {
    /// Process exit code: the OS error code of an underlying I/O failure, or 1.
    pub fn exit_code(&self) -> i32 {
        let io_error = match self {
            SessionError::Transport(e) | SessionError::Frontend(e) => Some(e),
            SessionError::Handshake(HandshakeError::Io(e)) => Some(e),
            _ => None,
        };
        io_error
            .and_then(io::Error::raw_os_error)
            .filter(|&code| code != 0)
            .unwrap_or(1)
    }
}

/// One peer's view of a match: both players, the shared occupancy grid and
/// the link to the other peer.
///
/// Both peers apply the same command sequence in the same order, so their
/// grids stay identical without any shared state. Each frame sends the local
/// command before blocking on the remote one.
///
/// Known gap: collision checks test the local player first. When both players
/// crash in the same sub-step each peer declares itself the loser, and the
/// two sides may disagree on the verdict. No tie-break message exists.
#[derive(Debug)]
pub struct Session<T> {
    config: GameConfig,
    transport: T,
    grid: Grid,
    local: Player,
    remote: Player,
    phase: Phase,
    local_is_winner: bool,
    exit_flag: bool,
    termination: Option<Termination>,
    frame: u64,
}

impl<T: Transport> Session<T> {
    pub fn new(config: GameConfig, transport: T, roster: Roster) -> Result<Self, SessionError> {
        config.validate()?;
        let grid = Grid::new(config.extent());
        Ok(Self::assemble(config, transport, roster, grid))
    }

    /// Starts from a pre-populated grid. The grid's extent wins over the
    /// config's.
    pub fn with_grid(
        mut config: GameConfig,
        transport: T,
        roster: Roster,
        grid: Grid,
    ) -> Result<Self, SessionError> {
        config.width = grid.width();
        config.height = grid.height();
        config.validate()?;
        Ok(Self::assemble(config, transport, roster, grid))
    }

    /// Listener side: pick the starting roster and send it to the peer.
    pub fn host<R: Rng>(
        config: GameConfig,
        mut transport: T,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        config.validate_spawns()?;
        let roster = handshake::generate_roster(&config, rng);
        handshake::send_roster(&mut transport, &roster)?;
        Self::new(config, transport, roster)
    }

    /// Connector side: receive the listener's roster, seen from this side.
    pub fn join(config: GameConfig, mut transport: T) -> Result<Self, SessionError> {
        config.validate()?;
        let roster = handshake::receive_roster(&mut transport)?;
        Self::new(config, transport, roster)
    }

    fn assemble(config: GameConfig, transport: T, mut roster: Roster, grid: Grid) -> Self {
        let extent = grid.extent();
        for player in [&mut roster.local, &mut roster.remote] {
            (player.x, player.y) = extent.wrap(player.x, player.y);
        }
        log::info!(
            "Session ready: local at ({}, {}) facing {:?}, remote at ({}, {}) facing {:?}",
            roster.local.x,
            roster.local.y,
            roster.local.facing,
            roster.remote.x,
            roster.remote.y,
            roster.remote.facing,
        );
        Self {
            config,
            transport,
            grid,
            local: roster.local,
            remote: roster.remote,
            phase: Phase::AwaitReady,
            local_is_winner: false,
            exit_flag: false,
            termination: None,
            frame: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn local(&self) -> &Player {
        &self.local
    }

    pub fn remote(&self) -> &Player {
        &self.remote
    }

    pub fn roster(&self) -> Roster {
        Roster::new(self.local, self.remote)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn local_is_winner(&self) -> bool {
        self.local_is_winner
    }

    pub fn exit_flag(&self) -> bool {
        self.exit_flag
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn stats(&self) -> NetworkStats {
        self.transport.stats()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.termination.map(|termination| Outcome {
            local_is_winner: self.local_is_winner,
            termination,
        })
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), SessionError> {
        if self.phase != expected {
            return Err(SessionError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    fn send(&mut self, command: Command) -> io::Result<()> {
        log::debug!("frame {}: sending {:?}", self.frame, command);
        self.transport.send_byte(command.encode())
    }

    fn receive(&mut self) -> Result<Command, SessionError> {
        let command = Command::decode(self.transport.receive_byte()?)?;
        log::debug!("frame {}: received {:?}", self.frame, command);
        Ok(command)
    }

    fn send_exit(&mut self) {
        if let Err(e) = self.send(Command::Exit) {
            log::warn!("Failed to notify peer of exit: {}", e);
        }
    }

    /// First writer wins; later calls are ignored.
    fn terminate(&mut self, termination: Termination, local_is_winner: bool) {
        if self.exit_flag {
            return;
        }
        self.exit_flag = true;
        self.local_is_winner = local_is_winner;
        self.termination = Some(termination);
        self.phase = Phase::Finished;
        log::info!(
            "Session finished after {} frames: {:?} (local wins: {})",
            self.frame,
            termination,
            local_is_winner
        );
    }

    /// The local ready trigger fired. Sends `skip` as the ready signal.
    pub fn signal_ready(&mut self) -> Result<(), SessionError> {
        self.expect_phase(Phase::AwaitReady)?;
        self.send(Command::Skip)?;
        self.phase = Phase::AwaitOpponentReady;
        Ok(())
    }

    /// Blocks until the peer's ready `skip` arrives. An `exit` here ends the
    /// session; turn commands are discarded.
    pub fn await_opponent_ready(&mut self) -> Result<(), SessionError> {
        self.expect_phase(Phase::AwaitOpponentReady)?;
        loop {
            match self.receive()? {
                Command::Skip => break,
                Command::Exit => {
                    self.terminate(Termination::PeerExit, false);
                    return Ok(());
                }
                other => log::debug!("Ignoring {:?} before opponent is ready", other),
            }
        }
        self.phase = Phase::Playing;
        log::info!("Opponent ready, starting play");
        Ok(())
    }

    /// Runs one frame: command exchange, then up to `sub_steps` moves.
    /// Returns the players after each executed sub-step.
    pub fn play_frame(
        &mut self,
        requested: Option<Direction>,
    ) -> Result<Vec<StepSnapshot>, SessionError> {
        self.expect_phase(Phase::Playing)?;
        self.exchange_commands(requested)?;

        let mut steps = Vec::with_capacity(self.config.sub_steps as usize);
        if !self.exit_flag {
            for _ in 0..self.config.sub_steps {
                self.sub_step();
                steps.push(StepSnapshot {
                    local: self.local,
                    remote: self.remote,
                });
                if self.exit_flag {
                    self.send_exit();
                    break;
                }
            }
        }
        self.frame += 1;
        Ok(steps)
    }

    fn exchange_commands(&mut self, requested: Option<Direction>) -> Result<(), SessionError> {
        let command = match requested {
            Some(direction) if self.local.set_facing(direction) => Command::turn(direction),
            _ => Command::Skip,
        };
        self.send(command)?;

        match self.receive()? {
            Command::Exit => self.terminate(Termination::PeerExit, false),
            Command::Skip => {}
            turn @ (Command::Left | Command::Right | Command::Up | Command::Down) => {
                if let Some(direction) = turn.direction() {
                    self.remote.set_facing(direction);
                }
            }
        }
        Ok(())
    }

    fn sub_step(&mut self) {
        let extent = self.grid.extent();
        self.local.advance(extent);
        self.remote.advance(extent);

        let (lx, ly) = self.local.position();
        let (rx, ry) = self.remote.position();
        if self.grid.is_occupied(lx, ly) {
            self.terminate(Termination::LocalCollision, false);
            return;
        }
        if self.grid.is_occupied(rx, ry) {
            self.terminate(Termination::RemoteCollision, true);
            return;
        }

        // Marked after both checks: two heads landing on the same empty cell
        // both survive this sub-step.
        self.grid.mark(lx, ly);
        self.grid.mark(rx, ry);
    }

    /// Local close signal. Notifies the peer best-effort.
    pub fn close(&mut self) {
        if self.exit_flag {
            return;
        }
        self.terminate(Termination::LocalClose, false);
        self.send_exit();
    }

    /// Drives the whole state machine against `frontend` until the outcome is
    /// acknowledged.
    pub fn run<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> Result<Outcome, SessionError> {
        frontend
            .show_phase(Phase::AwaitReady)
            .map_err(SessionError::Frontend)?;
        if frontend.wait_for_ready().map_err(SessionError::Frontend)? {
            self.signal_ready()?;
            frontend
                .show_phase(Phase::AwaitOpponentReady)
                .map_err(SessionError::Frontend)?;
            self.await_opponent_ready()?;
        } else {
            self.close();
        }

        if !self.exit_flag {
            frontend
                .show_phase(Phase::Playing)
                .map_err(SessionError::Frontend)?;
        }
        while !self.exit_flag {
            let input = frontend.poll_input().map_err(SessionError::Frontend)?;
            if input.close {
                self.close();
                break;
            }
            let steps = self.play_frame(input.facing)?;
            for step in &steps {
                frontend.draw_step(step).map_err(SessionError::Frontend)?;
            }
            let stats = self.transport.stats();
            frontend
                .present_frame(&stats)
                .map_err(SessionError::Frontend)?;
        }

        let outcome = Outcome {
            local_is_winner: self.local_is_winner,
            termination: self.termination.unwrap_or(Termination::LocalClose),
        };
        frontend
            .show_phase(Phase::Finished)
            .map_err(SessionError::Frontend)?;
        frontend
            .wait_for_acknowledge(&outcome)
            .map_err(SessionError::Frontend)?;

        if let Err(e) = self.transport.shutdown() {
            log::warn!("Transport shutdown failed: {}", e);
        }
        Ok(outcome)
    }
}
