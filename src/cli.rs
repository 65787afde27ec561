use std::io::{BufRead, Write};
use std::str::FromStr;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, bail};
use clap::{Parser, ValueEnum};
use log::warn;

use crate::session::{Mode, Session};
use crate::tic_tac_toe::Player;

/// Tic-tac-toe in the terminal, against a friend or an unbeatable computer.
#[derive(Parser, Debug)]
#[command(name = "minimax-tictactoe")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, value_enum, default_value = "vs-computer")]
    pub mode: Mode,

    /// Pause before the computer answers, in milliseconds
    #[arg(long, default_value = "300")]
    pub delay_ms: u64,

    /// Side the computer plays in vs-computer mode
    #[arg(long, value_enum, default_value = "o")]
    pub computer: Side,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Side {
    X,
    O,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Player::X,
            Side::O => Player::O,
        }
    }
}

/// A line typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(usize),
    NewGame,
    SwitchMode(Mode),
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let mut parts = s.split_whitespace();
        let command = match parts.next() {
            Some("q" | "quit") => Command::Quit,
            Some("n" | "new" | "reset") => Command::NewGame,
            Some("mode") => {
                let name = parts.next().ok_or_else(|| anyhow!("mode needs a name"))?;
                let mode =
                    <Mode as ValueEnum>::from_str(name, true).map_err(|err| anyhow!(err))?;
                Command::SwitchMode(mode)
            }
            Some(index) => Command::Play(index.parse()?),
            None => bail!("empty input"),
        };
        if parts.next().is_some() {
            bail!("unexpected trailing input");
        }
        Ok(command)
    }
}

/// Prints the board and status, then, if the computer is to move, waits
/// `delay`, lets it play and prints the result.
fn show<W: Write>(
    session: &mut Session,
    delay: Duration,
    output: &mut W,
) -> anyhow::Result<()> {
    writeln!(output, "{}", session.game())?;
    writeln!(output, "{}", session.status_text())?;
    output.flush()?;

    if session.computer_pending() {
        thread::sleep(delay);
        session.run_pending()?;
        writeln!(output, "{}", session.game())?;
        writeln!(output, "{}", session.status_text())?;
    }
    Ok(())
}

/// Reads commands line by line until `quit` or end of input.
pub fn play<R: BufRead, W: Write>(
    session: &mut Session,
    delay: Duration,
    input: R,
    output: &mut W,
) -> anyhow::Result<()> {
    writeln!(
        output,
        "Enter a cell 0-8, `new`, `mode <two-player|vs-computer>` or `quit`."
    )?;
    show(session, delay, output)?;

    for line in input.lines() {
        let line = line?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                warn!("bad input {:?}: {}", line.trim(), err);
                writeln!(output, "Couldn't read that: {}", err)?;
                continue;
            }
        };

        match command {
            Command::Play(index) => {
                if let Err(err) = session.play(index) {
                    writeln!(output, "{}", err)?;
                }
            }
            Command::NewGame => session.reset(),
            Command::SwitchMode(mode) => session.set_mode(mode),
            Command::Quit => break,
        }
        show(session, delay, output)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(session: &mut Session, input: &str) -> String {
        let mut output = Vec::new();
        play(session, Duration::ZERO, input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["minimax-tictactoe"]);
        assert_eq!(cli.mode, Mode::VsComputer);
        assert_eq!(cli.delay_ms, 300);
        assert_eq!(Player::from(cli.computer), Player::O);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "minimax-tictactoe",
            "--mode",
            "two-player",
            "--delay-ms",
            "0",
            "--computer",
            "x",
        ]);
        assert_eq!(cli.mode, Mode::TwoPlayer);
        assert_eq!(cli.delay_ms, 0);
        assert_eq!(cli.computer, Side::X);
    }

    #[test]
    fn test_commands() {
        assert_eq!("4".parse::<Command>().unwrap(), Command::Play(4));
        assert_eq!(" new ".parse::<Command>().unwrap(), Command::NewGame);
        assert_eq!("quit".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!(
            "mode two-player".parse::<Command>().unwrap(),
            Command::SwitchMode(Mode::TwoPlayer)
        );
        assert!("mode".parse::<Command>().is_err());
        assert!("mode chess".parse::<Command>().is_err());
        assert!("1 2".parse::<Command>().is_err());
        assert!("".parse::<Command>().is_err());
        assert!("x".parse::<Command>().is_err());
    }

    #[test]
    fn test_human_move_is_shown_before_the_reply() {
        let mut session = Session::new(Mode::VsComputer, Player::O);
        let out = transcript(&mut session, "4\nquit\n");

        let waiting = out
            .find("0 1 2 \n3 X 5 \n6 7 8 \n\nComputer is thinking...")
            .expect("board with only X's move");
        let replied = out
            .find("O 1 2 \n3 X 5 \n6 7 8 \n\nYour turn (X)")
            .expect("board with O's reply");
        assert!(waiting < replied);
    }

    #[test]
    fn test_bad_input_and_rejected_moves_are_reported() {
        let mut session = Session::new(Mode::TwoPlayer, Player::O);
        let out = transcript(&mut session, "chess\n9\n");
        assert!(out.contains("Couldn't read that"));
        assert!(out.contains("invalid move: cell index 9 is outside 0-8"));
        assert_eq!(session.game(), &crate::tic_tac_toe::GameState::new());
    }

    #[test]
    fn test_computer_opening_after_new_game() {
        let mut session = Session::new(Mode::TwoPlayer, Player::X);
        let out = transcript(&mut session, "mode vs-computer\n");
        assert!(out.contains("Computer is thinking..."));
        assert!(out.contains("X 1 2 \n3 4 5 \n6 7 8 \n\nYour turn (O)"));
    }
}
