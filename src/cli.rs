//! Interactive text-mode session.
//!
//! One command per line on stdin:
//! - `x,y` places a stone for the player to move (e.g. `3,4`)
//! - `quit` ends the session early
//!
//! The board is printed after every accepted move; rejected moves and
//! unparseable input re-prompt without changing the game. With a bot
//! configured, the engine answers for Cross after each human move.

use std::io::{self, BufRead, Write};

use crate::board::{Coord, Player};
use crate::game::Game;
use crate::mcts::Uct;

/// A running interactive session: one game plus an optional engine.
pub struct Session {
    game: Game,
    bot: Option<Uct>,
}

impl Session {
    /// Create a session over `game`. With `bot` set, the engine plays the
    /// Cross side (the human always opens as Circle).
    pub fn new(game: Game, bot: Option<Uct>) -> Self {
        Self { game, bot }
    }

    /// Run until the game finishes, `quit` is entered, or stdin closes.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut stdout = io::stdout();

        writeln!(stdout, "{}", self.game.board())?;

        while !self.game.is_finished() {
            if self.bot.is_some() && self.game.to_move() == Player::Cross {
                self.engine_turn(&mut stdout)?;
                continue;
            }

            write!(
                stdout,
                "Type a move for player {} (x,y): ",
                self.game.to_move()
            )?;
            stdout.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(()); // stdin closed
            }
            let line = line.trim();
            if line == "quit" {
                return Ok(());
            }

            let Some((x, y)) = parse_move(line) else {
                writeln!(stdout, "Expected a move as x,y - e.g. 3,4")?;
                continue;
            };
            match self.game.play(x, y) {
                Ok(()) => writeln!(stdout, "{}", self.game.board())?,
                Err(err) => writeln!(stdout, "Oops: {err}. Try again.")?,
            }
        }

        self.report_result(&mut stdout)
    }

    fn engine_turn(&mut self, stdout: &mut impl Write) -> io::Result<()> {
        let engine = self.bot.as_mut().expect("engine_turn requires a bot");
        let (x, y) = engine.search(&self.game);
        writeln!(stdout, "Computer plays {x},{y}")?;
        self.game
            .play(x, y)
            .expect("the engine only proposes legal moves");
        writeln!(stdout, "{}", self.game.board())
    }

    fn report_result(&self, stdout: &mut impl Write) -> io::Result<()> {
        match self.game.winner() {
            Some(player) => writeln!(stdout, "Player {player} won."),
            None => writeln!(stdout, "Draw."),
        }
    }
}

/// Parse a `x,y` move, tolerating whitespace around both numbers.
fn parse_move(input: &str) -> Option<Coord> {
    let (x, y) = input.split_once(',')?;
    let x = x.trim().parse().ok()?;
    let y = y.trim().parse().ok()?;
    Some((x, y))
}
