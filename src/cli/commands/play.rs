//! Play command - Interactive games against the engine
//!
//! Reads menu choices from any `BufRead` and writes to any `Write`, so the
//! whole loop can be driven from tests as well as from a terminal.

use std::{
    io::{self, BufRead, Write},
    thread,
    time::Duration,
};

use anyhow::{Result, anyhow};
use clap::Parser;
use tracing::info;

use crate::{
    Algorithm, GameStatus, Session, SessionConfig, TieBreak,
    cli::prompt::prompt_choice,
    session::COMPUTER,
    tictactoe::{Player, Symbols, render},
};

#[derive(Parser, Debug, Clone)]
#[command(about = "Play tic-tac-toe against the engine")]
pub struct PlayArgs {
    /// How the computer plays (random, minimax, most-wins, least-losses, most-draws)
    #[arg(long, short = 'a')]
    pub algorithm: Option<String>,

    /// Which symbol you play (`x` moves first, `o` moves second)
    #[arg(long, short = 's')]
    pub symbol: Option<String>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// How equal-best moves are resolved (first, uniform)
    #[arg(long, default_value = "first")]
    pub tie_break: String,

    /// Pause after each computer move, in milliseconds
    #[arg(long, default_value_t = 0)]
    pub delay_ms: u64,
}

/// Running totals over one invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayRecord {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl PlayRecord {
    fn record(&mut self, status: GameStatus) {
        self.games += 1;
        match status {
            GameStatus::Win => self.wins += 1,
            GameStatus::Loss => self.losses += 1,
            GameStatus::Draw => self.draws += 1,
            GameStatus::Ongoing => {}
        }
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    run(&args, &mut input, &mut output)?;
    Ok(())
}

/// Map a symbol choice to the player who moves first.
///
/// X always opens, so a human playing X means player two starts.
pub(crate) fn parse_symbol_token(value: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" => Ok(Player::Two),
        "o" | "second" => Ok(Player::One),
        other => Err(anyhow!(
            "Invalid value '{other}' for --symbol (expected 'x' or 'o')"
        )),
    }
}

/// Symbols as seen on screen: whoever moves first is drawn as X.
fn symbols_for(starting_player: Player) -> Symbols {
    match starting_player {
        Player::One => Symbols::new('X', 'O'),
        Player::Two => Symbols::new('O', 'X'),
    }
}

/// Play games until the user quits and return the totals.
pub fn run<R: BufRead, W: Write>(
    args: &PlayArgs,
    input: &mut R,
    output: &mut W,
) -> Result<PlayRecord> {
    let algorithm = match &args.algorithm {
        Some(name) => name.parse::<Algorithm>()?,
        None => {
            let labels: Vec<&str> = Algorithm::ALL.iter().map(|a| a.label()).collect();
            let choice = prompt_choice(input, output, "How should the computer play?", &labels)?;
            Algorithm::ALL[choice]
        }
    };

    let starting_player = match &args.symbol {
        Some(token) => parse_symbol_token(token)?,
        None => {
            let choice = prompt_choice(
                input,
                output,
                "Would you like to play as X's or O's?",
                &["X", "O"],
            )?;
            if choice == 0 { Player::Two } else { Player::One }
        }
    };

    let tie_break: TieBreak = args.tie_break.parse()?;
    let symbols = symbols_for(starting_player);
    let delay = Duration::from_millis(args.delay_ms);

    let mut record = PlayRecord::default();
    loop {
        let mut config = SessionConfig::new(starting_player).with_tie_break(tie_break);
        if let Some(seed) = args.seed {
            config = config.with_seed(seed.wrapping_add(record.games as u64));
        }

        let status = play_game(Session::new(config), algorithm, symbols, delay, input, output)?;
        record.record(status);
        info!(%status, games = record.games, %algorithm, "game finished");

        let summary = format!(
            "You have played {} games against the \"{}\" bot with {} wins and {} draws.",
            record.games,
            algorithm.label(),
            record.wins,
            record.draws
        );
        let again = prompt_choice(
            input,
            output,
            &format!("{summary}\nDo you want to play another game?"),
            &["Play again", "Quit"],
        )?;
        if again != 0 {
            return Ok(record);
        }
    }
}

fn play_game<R: BufRead, W: Write>(
    mut session: Session,
    algorithm: Algorithm,
    symbols: Symbols,
    delay: Duration,
    input: &mut R,
    output: &mut W,
) -> Result<GameStatus> {
    while !session.is_over() {
        if session.current_player() == COMPUTER {
            let position = session.apply_computer_move(algorithm)?;
            writeln!(output, "Computer Move: {position}")?;
            write!(output, "{}", render(session.current_board(), symbols))?;
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        } else {
            writeln!(output, "Your Move:")?;
            write!(output, "{}", render(session.current_board(), symbols))?;

            let moves = session.legal_moves();
            let labels: Vec<String> = moves.iter().map(|p| p.to_string()).collect();
            let choice = prompt_choice(
                input,
                output,
                "Choose a move from the following. (row, column)",
                &labels,
            )?;
            session.apply_human_move(moves[choice])?;
        }
    }

    let message = match session.status() {
        GameStatus::Win => "You Win!",
        GameStatus::Loss => "You Lost.",
        GameStatus::Draw => "It's a draw.",
        GameStatus::Ongoing => return Err(anyhow!("game loop exited while still ongoing")),
    };
    writeln!(output, "{message}")?;
    write!(output, "{}", render(session.current_board(), symbols))?;
    Ok(session.status())
}
