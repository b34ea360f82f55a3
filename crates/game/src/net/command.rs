use crate::player::Direction;

/// Per-tick message, exactly one byte on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Skip,
    Left,
    Right,
    Up,
    Down,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("invalid command byte {0:#04x}")]
    InvalidCommand(u8),
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::Skip,
        Command::Left,
        Command::Right,
        Command::Up,
        Command::Down,
        Command::Exit,
    ];

    pub fn encode(self) -> u8 {
        match self {
            Command::Skip => 0,
            Command::Left => 1,
            Command::Right => 2,
            Command::Up => 3,
            Command::Down => 4,
            Command::Exit => 5,
        }
    }

    pub fn decode(byte: u8) -> Result<Self, CommandError> {
        match byte {
            0 => Ok(Command::Skip),
            1 => Ok(Command::Left),
            2 => Ok(Command::Right),
            3 => Ok(Command::Up),
            4 => Ok(Command::Down),
            5 => Ok(Command::Exit),
            other => Err(CommandError::InvalidCommand(other)),
        }
    }

    pub fn turn(direction: Direction) -> Self {
        match direction {
            Direction::Left => Command::Left,
            Direction::Right => Command::Right,
            Direction::Up => Command::Up,
            Direction::Down => Command::Down,
        }
    }

    /// The facing a turn command requests; `None` for skip and exit.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Command::Left => Some(Direction::Left),
            Command::Right => Some(Direction::Right),
            Command::Up => Some(Direction::Up),
            Command::Down => Some(Direction::Down),
            Command::Skip | Command::Exit => None,
        }
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> Self {
        command.encode()
    }
}

impl TryFrom<u8> for Command {
    type Error = CommandError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Command::decode(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_decodes_to_itself() {
        for command in Command::ALL {
            assert_eq!(Command::decode(command.encode()), Ok(command));
        }
    }

    #[test]
    fn wire_values_are_fixed() {
        let bytes: Vec<u8> = Command::ALL.iter().map(|c| c.encode()).collect();
        assert_eq!(bytes, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn out_of_range_bytes_are_rejected() {
        for byte in 6..=u8::MAX {
            assert_eq!(
                Command::decode(byte),
                Err(CommandError::InvalidCommand(byte))
            );
        }
        assert!(Command::try_from(0xFFu8).is_err());
    }

    #[test]
    fn turn_commands_carry_their_direction() {
        for dir in Direction::ALL {
            assert_eq!(Command::turn(dir).direction(), Some(dir));
        }
        assert_eq!(Command::Skip.direction(), None);
        assert_eq!(Command::Exit.direction(), None);
    }
}
