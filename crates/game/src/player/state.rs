use crate::grid::Extent;

use super::Direction;

/// Packed RGBA color (`0xRRGGBBAA`). Carried through the handshake and handed
/// to the frontend; never inspected by game rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const RED: Color = Color(0xFF00_00FF);
    pub const GREEN: Color = Color(0x00FF_00FF);

    pub fn rgba(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        let [r, g, b, _] = self.rgba();
        (r, g, b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub color: Color,
    pub facing: Direction,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(0, 0, Color::WHITE, Direction::Down)
    }
}

impl Player {
    pub fn new(x: i32, y: i32, color: Color, facing: Direction) -> Self {
        Self {
            x,
            y,
            color,
            facing,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Moves one cell along `facing`, wrapping around both axes.
    pub fn advance(&mut self, extent: Extent) {
        let (dx, dy) = self.facing.delta();
        let (x, y) = extent.wrap(self.x, self.y);
        (self.x, self.y) = extent.wrap(x + dx, y + dy);
    }

    /// Returns whether `facing` changed. A direct reversal is ignored.
    pub fn set_facing(&mut self, direction: Direction) -> bool {
        if direction == self.facing || direction.is_reverse_of(self.facing) {
            return false;
        }
        self.facing = direction;
        true
    }
}

/// Both players of a session, from one peer's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Roster {
    pub local: Player,
    pub remote: Player,
}

impl Roster {
    pub fn new(local: Player, remote: Player) -> Self {
        Self { local, remote }
    }

    /// The same roster as seen from the opposite peer.
    pub fn swapped(self) -> Self {
        Self {
            local: self.remote,
            remote: self.local,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXTENT: Extent = Extent {
        width: 600,
        height: 480,
    };

    fn player_at(x: i32, y: i32, facing: Direction) -> Player {
        Player::new(x, y, Color::RED, facing)
    }

    #[test]
    fn off_grid_start_folds_back_before_moving() {
        let mut p = player_at(i32::MAX, 0, Direction::Right);
        p.advance(EXTENT);
        // i32::MAX mod 600 == 247
        assert_eq!(p.position(), (248, 0));

        let mut p = player_at(-1, i32::MIN, Direction::Up);
        p.advance(EXTENT);
        // i32::MIN mod 480 == 352
        assert_eq!(p.position(), (599, 351));
    }

    #[test]
    fn wraps_at_left_and_bottom_edges() {
        let mut p = player_at(0, 17, Direction::Left);
        p.advance(EXTENT);
        assert_eq!(p.position(), (599, 17));

        let mut p = player_at(42, 479, Direction::Down);
        p.advance(EXTENT);
        assert_eq!(p.position(), (42, 0));
    }

    #[test]
    fn wraps_at_right_and_top_edges() {
        let mut p = player_at(599, 17, Direction::Right);
        p.advance(EXTENT);
        assert_eq!(p.position(), (0, 17));

        let mut p = player_at(42, 0, Direction::Up);
        p.advance(EXTENT);
        assert_eq!(p.position(), (42, 479));
    }

    #[test]
    fn advance_moves_one_cell() {
        let mut p = player_at(10, 10, Direction::Right);
        p.advance(EXTENT);
        p.advance(EXTENT);
        assert_eq!(p.position(), (12, 10));
        assert_eq!(p.facing, Direction::Right);
    }

    #[test]
    fn reverse_facing_is_ignored() {
        let mut p = player_at(5, 5, Direction::Left);
        assert!(!p.set_facing(Direction::Right));
        assert_eq!(p.facing, Direction::Left);

        let mut p = player_at(5, 5, Direction::Up);
        assert!(!p.set_facing(Direction::Down));
        assert_eq!(p.facing, Direction::Up);
    }

    #[test]
    fn perpendicular_facing_is_applied() {
        let mut p = player_at(5, 5, Direction::Left);
        assert!(p.set_facing(Direction::Up));
        assert_eq!(p.facing, Direction::Up);
        assert!(!p.set_facing(Direction::Up));
        assert!(p.set_facing(Direction::Right));
        assert_eq!(p.facing, Direction::Right);
    }

    #[test]
    fn color_unpacks_rgba() {
        assert_eq!(Color::RED.rgb(), (255, 0, 0));
        assert_eq!(Color(0x1020_30FF).rgba(), [0x10, 0x20, 0x30, 0xFF]);
    }

    #[test]
    fn roster_swap() {
        let a = player_at(1, 2, Direction::Down);
        let b = player_at(3, 4, Direction::Up);
        let swapped = Roster::new(a, b).swapped();
        assert_eq!(swapped.local, b);
        assert_eq!(swapped.remote, a);
    }
}
