#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Wire index used by the handshake record: 0=left, 1=right, 2=up, 3=down.
    pub fn index(self) -> u8 {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Direction::Left),
            1 => Some(Direction::Right),
            2 => Some(Direction::Up),
            3 => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn is_reverse_of(self, other: Direction) -> bool {
        self.reverse() == other
    }

    /// Unit step in grid coordinates; y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_mapping_is_stable() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_index(dir.index()), Some(dir));
        }
        assert_eq!(Direction::from_index(4), None);
        assert_eq!(Direction::Down.index(), 3);
    }

    #[test]
    fn reverse_pairs() {
        assert!(Direction::Left.is_reverse_of(Direction::Right));
        assert!(Direction::Up.is_reverse_of(Direction::Down));
        assert!(!Direction::Up.is_reverse_of(Direction::Left));
        assert!(!Direction::Up.is_reverse_of(Direction::Up));
    }
}
