use crate::grid::Extent;
use crate::player::Color;

pub const DEFAULT_WIDTH: u32 = 600;
pub const DEFAULT_HEIGHT: u32 = 480;
pub const DEFAULT_SUB_STEPS: u32 = 4;
pub const DEFAULT_FRAME_RATE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    pub spawn_margin: u32,
    pub min_separation: u32,
    pub sub_steps: u32,
    pub frame_rate: u32,
    pub local_color: Color,
    pub remote_color: Color,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            spawn_margin: 50,
            min_separation: 100,
            sub_steps: DEFAULT_SUB_STEPS,
            frame_rate: DEFAULT_FRAME_RATE,
            local_color: Color::RED,
            remote_color: Color::GREEN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid extents must be positive and fit in i32 (got {width}x{height})")]
    InvalidExtent { width: u32, height: u32 },
    #[error("sub-steps per frame must be at least 1")]
    NoSubSteps,
    #[error("frame rate must be at least 1")]
    NoFrameRate,
    #[error("players must have distinct colors")]
    SameColors,
    #[error(
        "{axis} extent {extent} leaves no room for a margin of {margin} and a separation of {separation}"
    )]
    UnplaceableSpawns {
        axis: &'static str,
        extent: u32,
        margin: u32,
        separation: u32,
    },
}

impl GameConfig {
    pub fn extent(&self) -> Extent {
        Extent::new(self.width, self.height)
    }

    /// Checks the settings both peers share. Start positions are covered
    /// separately by [`GameConfig::validate_spawns`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let max = i32::MAX as u32;
        if self.width == 0 || self.height == 0 || self.width > max || self.height > max {
            return Err(ConfigError::InvalidExtent {
                width: self.width,
                height: self.height,
            });
        }
        if self.sub_steps == 0 {
            return Err(ConfigError::NoSubSteps);
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::NoFrameRate);
        }
        if self.local_color == self.remote_color {
            return Err(ConfigError::SameColors);
        }
        Ok(())
    }

    /// Checks that start positions can be rolled. Only the listener picks
    /// them, so only the listener needs `spawn_margin` and `min_separation`.
    pub fn validate_spawns(&self) -> Result<(), ConfigError> {
        self.check_spawn_axis("horizontal", self.width)?;
        self.check_spawn_axis("vertical", self.height)
    }

    // Every start coordinate needs a partner further than `min_separation`
    // away inside the spawn range, or the re-roll never terminates.
    fn check_spawn_axis(&self, axis: &'static str, extent: u32) -> Result<(), ConfigError> {
        let span = u64::from(extent).saturating_sub(2 * u64::from(self.spawn_margin));
        if span <= 2 * (u64::from(self.min_separation) + 1) {
            return Err(ConfigError::UnplaceableSpawns {
                axis,
                extent,
                margin: self.spawn_margin,
                separation: self.min_separation,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
        assert_eq!(GameConfig::default().validate_spawns(), Ok(()));
    }

    #[test]
    fn rejects_degenerate_values() {
        let config = GameConfig {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidExtent { .. })
        ));

        let config = GameConfig {
            sub_steps: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoSubSteps));

        let config = GameConfig {
            remote_color: Color::RED,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::SameColors));
    }

    #[test]
    fn rejects_unplaceable_spawns() {
        let config = GameConfig {
            height: 300,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
        assert!(matches!(
            config.validate_spawns(),
            Err(ConfigError::UnplaceableSpawns {
                axis: "vertical",
                ..
            })
        ));

        let small = GameConfig {
            width: 40,
            height: 30,
            spawn_margin: 2,
            min_separation: 5,
            ..Default::default()
        };
        assert_eq!(small.validate_spawns(), Ok(()));
    }
}
