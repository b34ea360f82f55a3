use std::io;

use super::state::{Outcome, Phase, StepSnapshot};
use crate::net::NetworkStats;
use crate::player::Direction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub facing: Option<Direction>,
    pub close: bool,
}

impl FrameInput {
    pub fn facing(direction: Direction) -> Self {
        Self {
            facing: Some(direction),
            close: false,
        }
    }

    pub fn close() -> Self {
        Self {
            facing: None,
            close: true,
        }
    }
}

/// Rendering and input collaborator driven by [`Session::run`].
///
/// [`Session::run`]: super::Session::run
pub trait Frontend {
    fn show_phase(&mut self, phase: Phase) -> io::Result<()>;

    /// Blocks until the player is ready. `false` means the player closed
    /// instead.
    fn wait_for_ready(&mut self) -> io::Result<bool>;

    /// Sampled once per frame.
    fn poll_input(&mut self) -> io::Result<FrameInput>;

    fn draw_step(&mut self, step: &StepSnapshot) -> io::Result<()>;

    /// Called once per frame after all sub-steps are drawn. Frame pacing
    /// belongs here.
    fn present_frame(&mut self, stats: &NetworkStats) -> io::Result<()>;

    fn wait_for_acknowledge(&mut self, outcome: &Outcome) -> io::Result<()>;
}
