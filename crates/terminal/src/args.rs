use clap::Args;
use lightcycle::GameConfig;
use lightcycle::config::{DEFAULT_FRAME_RATE, DEFAULT_HEIGHT, DEFAULT_SUB_STEPS, DEFAULT_WIDTH};

/// Settings both peers must agree on.
#[derive(Debug, Clone, Args)]
pub struct GameArgs {
    #[arg(long, default_value_t = DEFAULT_WIDTH, help = "Grid width (must match the peer)")]
    pub width: u32,

    #[arg(long, default_value_t = DEFAULT_HEIGHT, help = "Grid height (must match the peer)")]
    pub height: u32,

    #[arg(long, default_value_t = DEFAULT_SUB_STEPS, help = "Movement sub-steps per frame (must match the peer)")]
    pub sub_steps: u32,

    #[arg(long, default_value_t = DEFAULT_FRAME_RATE, help = "Frames per second")]
    pub fps: u32,
}

impl GameArgs {
    pub fn to_config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            sub_steps: self.sub_steps,
            frame_rate: self.fps,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        game: GameArgs,
    }

    #[test]
    fn defaults_build_a_valid_config() {
        let cli = Cli::parse_from(["lightcycle"]);
        let config = cli.game.to_config();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from(["lightcycle", "--width", "800", "--sub-steps", "2", "--fps", "30"]);
        let config = cli.game.to_config();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.sub_steps, 2);
        assert_eq!(config.frame_rate, 30);
    }
}
