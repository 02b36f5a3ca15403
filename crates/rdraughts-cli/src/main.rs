use std::io::Write;

use anyhow::Result;
use clap::Parser;
use rdraughts_cli::Console;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play English draughts in the terminal", long_about = None)]
struct Args {
    /// Enable debug logging (stderr)
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level))
        .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
        .target(env_logger::Target::Stderr)
        .init();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    let end = console.run()?;
    log::debug!("session ended: {end:?}");
    Ok(())
}
