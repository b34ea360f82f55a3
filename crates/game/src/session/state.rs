use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitReady,
    AwaitOpponentReady,
    Playing,
    Finished,
}

/// What set the terminal flag first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Our own head entered an occupied cell.
    LocalCollision,
    /// The opponent's head entered an occupied cell.
    RemoteCollision,
    /// The peer sent `exit`.
    PeerExit,
    /// Closed on this side.
    LocalClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub local_is_winner: bool,
    pub termination: Termination,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        if self.local_is_winner {
            "Victory!!!"
        } else {
            "Lose..."
        }
    }
}

/// Both players right after one movement sub-step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSnapshot {
    pub local: Player,
    pub remote: Player,
}
