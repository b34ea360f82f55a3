use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lightcycle::{DEFAULT_CONNECT_ADDRESS, DEFAULT_PORT, Outcome, Session, connect};
use lightcycle_terminal::{GameArgs, TerminalFrontend, exit_code, init_logging};

#[derive(Parser)]
#[command(name = "lightcycle-client")]
#[command(about = "Light-cycle game, connecting side")]
struct Args {
    #[arg(default_value = DEFAULT_CONNECT_ADDRESS, help = "Server address to connect to")]
    address: String,

    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    #[arg(long, default_value = "lightcycle-client.log")]
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

    println!("Client launched");
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
    let config = args.game.to_config();
    config.validate()?;

    let transport = connect((args.address.as_str(), args.port))
        .with_context(|| format!("connecting to {}:{}", args.address, args.port))?;

    let mut session = Session::join(config.clone(), transport)?;
    let mut frontend = TerminalFrontend::new(&config, "client")?;
    let outcome = session.run(&mut frontend)?;
    log::info!("Game over: {:?}", outcome);
    Ok(outcome)
}
