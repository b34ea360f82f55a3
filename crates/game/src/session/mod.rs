mod engine;
mod frontend;
mod state;

pub use engine::{Session, SessionError};
pub use frontend::{FrameInput, Frontend};
pub use state::{Outcome, Phase, StepSnapshot, Termination};
