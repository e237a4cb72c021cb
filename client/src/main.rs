mod config;
mod terminal;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tictactoe_common::games::tictactoe::{
    DifficultyLevel, FirstPlayerMode, MatchStatus, PlaceError, Position, TicTacToeSession,
};
use tictactoe_common::logger::{self, LogOutput};
use tictactoe_common::log;

use config::get_config_manager;
use terminal::{Command, HELP, describe_winning_line, parse_command, render_board};

/// The board and prompts own stdout.
const LOG_OUTPUT: LogOutput = LogOutput::Stderr;

#[derive(Parser)]
#[command(name = "tictactoe_client", about = "Play tic-tac-toe against the computer")]
struct Args {
    /// easy, medium or hard
    #[arg(long)]
    difficulty: Option<DifficultyLevel>,
    /// human, bot or random
    #[arg(long)]
    first_player: Option<FirstPlayerMode>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = get_config_manager(args.config).get_config()?;

    let prefix = if args.use_log_prefix || config.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, LOG_OUTPUT);

    let mut settings = config.game;
    if let Some(difficulty) = args.difficulty {
        settings.difficulty = difficulty;
        settings.difficulty_override = None;
    }
    if let Some(first_player) = args.first_player {
        settings.first_player_mode = first_player;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    let mut session = TicTacToeSession::start(settings);
    log!(
        "Match started: difficulty {} (gate {}), seed {}, human plays {}",
        session.settings().difficulty,
        session.difficulty().value(),
        session.seed(),
        session.human_mark()
    );

    run(&mut session, io::stdin().lock(), io::stdout())?;

    log!("Client shut down");
    Ok(())
}

fn run(
    session: &mut TicTacToeSession,
    input: impl BufRead,
    mut out: impl Write,
) -> io::Result<()> {
    writeln!(out, "{}", HELP)?;
    bot_turn(session, &mut out)?;
    show(session, &mut out)?;

    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(out, "{}", HELP)?,
            Ok(Command::Restart) => {
                session.restart();
                log!("Match restarted, human plays {}", session.human_mark());
                bot_turn(session, &mut out)?;
                show(session, &mut out)?;
            }
            Ok(Command::Place(index)) => match session.play_human(index) {
                Ok(_) => {
                    let position = Position::from_index(index);
                    log!("Human played cell {} ({}, {})", index, position.x, position.y);
                    bot_turn(session, &mut out)?;
                    show(session, &mut out)?;
                }
                Err(e) => writeln!(out, "{}", describe_place_error(e))?,
            },
            Err(e) => writeln!(out, "{}", e)?,
        }
    }

    Ok(())
}

fn bot_turn(session: &mut TicTacToeSession, out: &mut impl Write) -> io::Result<()> {
    if session.status() != MatchStatus::AwaitingOpponent {
        return Ok(());
    }
    match session.play_bot() {
        Ok(Some(index)) => {
            log!("Bot played cell {}", index);
            writeln!(out, "I play {}.", index + 1)
        }
        Ok(None) => Ok(()),
        Err(e) => {
            log!("Bot could not move: {}", e);
            Ok(())
        }
    }
}

fn describe_place_error(error: PlaceError) -> String {
    match error {
        PlaceError::CellOccupied(index) => format!("Cell {} is already taken.", index + 1),
        PlaceError::InvalidPosition(index) => format!("There is no cell {}.", index + 1),
        PlaceError::NotYourTurn => "Wait for my move.".to_string(),
        PlaceError::GameOver => "The match is over, type 'restart' to play again.".to_string(),
        PlaceError::EmptyMark => error.to_string(),
    }
}

fn show(session: &TicTacToeSession, out: &mut impl Write) -> io::Result<()> {
    let status = session.status();
    let winning_line = session.winning_line();
    writeln!(out, "{}", render_board(session.state().board(), winning_line))?;
    if let Some(line) = winning_line {
        writeln!(out, "{}", describe_winning_line(&line))?;
    }
    writeln!(out, "{}", status.message())?;
    if status.is_over() {
        log!("Match over: {:?}", status);
        writeln!(out, "Type 'restart' for another match or 'quit' to leave.")?;
    }
    out.flush()
}
