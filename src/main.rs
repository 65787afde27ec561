use std::io;
use std::time::Duration;

use clap::Parser;

use minimax_tictactoe::cli::{self, Cli};
use minimax_tictactoe::Session;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let delay = Duration::from_millis(cli.delay_ms);
    let mut session = Session::new(cli.mode, cli.computer.into());

    cli::play(&mut session, delay, io::stdin().lock(), &mut io::stdout())
}
