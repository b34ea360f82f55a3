mod args;
mod frontend;
mod screens;

use std::fs::File;
use std::io;
use std::path::Path;

use lightcycle::SessionError;

pub use args::GameArgs;
pub use frontend::TerminalFrontend;

/// Routes `log` output to `path`; the terminal itself is busy with the game.
pub fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Transport failures exit with their OS error code, everything else with 1.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| {
            if let Some(session_error) = cause.downcast_ref::<SessionError>() {
                return Some(session_error.exit_code());
            }
            cause
                .downcast_ref::<io::Error>()
                .and_then(io::Error::raw_os_error)
        })
        .filter(|&code| code != 0)
        .unwrap_or(1)
}
