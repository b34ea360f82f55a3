mod direction;
mod state;

pub use direction::Direction;
pub use state::{Color, Player, Roster};
