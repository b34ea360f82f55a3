use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use lightcycle::{DEFAULT_PORT, Listener, Outcome, Session};
use lightcycle_terminal::{GameArgs, TerminalFrontend, exit_code, init_logging};

#[derive(Parser)]
#[command(name = "lightcycle-server")]
#[command(about = "Light-cycle game, listening side")]
struct Args {
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: String,

    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    #[arg(long, default_value_t = 50, help = "Minimum distance of start positions from the edges")]
    margin: u32,

    #[arg(long, default_value_t = 100, help = "Per-axis distance the players must start apart")]
    min_separation: u32,

    #[arg(long, default_value = "lightcycle-server.log")]
    log_file: PathBuf,

    #[command(flatten)]
    game: GameArgs,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(&args.log_file) {
        eprintln!("Failed to open log file {}: {:#}", args.log_file.display(), e);
        std::process::exit(1);
    }

    println!("Server is launching...");
    match run(&args) {
        Ok(outcome) => println!("{}", outcome.as_str()),
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error occurred! {:#}", e);
            std::process::exit(exit_code(&e));
        }
    }
}

fn run(args: &Args) -> Result<Outcome> {
    let mut config = args.game.to_config();
    config.spawn_margin = args.margin;
    config.min_separation = args.min_separation;
    config.validate()?;
    config.validate_spawns()?;

    let listener = Listener::bind((args.bind.as_str(), args.port))?;
    println!("Waiting for an opponent on {}", listener.local_addr());
    let (transport, peer) = listener.accept()?;
    println!("Opponent connected from {}", peer);

    let mut session = Session::host(config.clone(), transport, &mut rand::rng())?;
    let mut frontend = TerminalFrontend::new(&config, "server")?;
    let outcome = session.run(&mut frontend)?;
    log::info!("Game over: {:?}", outcome);
    Ok(outcome)
}
