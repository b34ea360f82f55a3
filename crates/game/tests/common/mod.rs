#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;

use lightcycle::{FrameInput, Frontend, NetworkStats, Outcome, Phase, StepSnapshot};

/// Replays a fixed input script and records everything the session shows.
#[derive(Debug, Default)]
pub struct ScriptedFrontend {
    pub ready: bool,
    pub inputs: VecDeque<FrameInput>,
    pub phases: Vec<Phase>,
    pub steps: Vec<StepSnapshot>,
    pub frames: usize,
    pub outcome: Option<Outcome>,
}

impl ScriptedFrontend {
    pub fn new(inputs: impl IntoIterator<Item = FrameInput>) -> Self {
        Self {
            ready: true,
            inputs: inputs.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn declining() -> Self {
        Self::default()
    }
}

impl Frontend for ScriptedFrontend {
    fn show_phase(&mut self, phase: Phase) -> io::Result<()> {
        self.phases.push(phase);
        Ok(())
    }

    fn wait_for_ready(&mut self) -> io::Result<bool> {
        Ok(self.ready)
    }

    fn poll_input(&mut self) -> io::Result<FrameInput> {
        Ok(self.inputs.pop_front().unwrap_or_default())
    }

    fn draw_step(&mut self, step: &StepSnapshot) -> io::Result<()> {
        self.steps.push(*step);
        Ok(())
    }

    fn present_frame(&mut self, _stats: &NetworkStats) -> io::Result<()> {
        self.frames += 1;
        Ok(())
    }

    fn wait_for_acknowledge(&mut self, outcome: &Outcome) -> io::Result<()> {
        self.outcome = Some(*outcome);
        Ok(())
    }
}
