//! Interactive match loop between a human and the search engine.
//!
//! The loop is generic over its input and output streams so tests can
//! drive whole games with scripted input.

use std::io::{BufRead, Write};

use anyhow::Result;
use games_connect4::{Board, Connect4Rules, Disc, COLS};
use mcts::{SearchConfig, SearchTree};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};

/// Evaluations at or beyond this magnitude are reported as a verdict
/// instead of a number.
const VERDICT_THRESHOLD: f64 = 30.0;

/// Settings for a sequence of games.
#[derive(Debug, Clone)]
pub struct MatchSettings {
    pub search: SearchConfig,
    /// Disc the human plays in the first game
    pub human: Disc,
    /// Disc that opens every game
    pub first: Disc,
    pub swap_colors: bool,
    /// None plays until input ends
    pub max_games: Option<u32>,
}

/// How a single game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Won(Disc),
    Draw,
    /// Input ended before the game finished
    Abandoned,
}

/// Results of a finished match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub games: u32,
    pub human_wins: u32,
    pub engine_wins: u32,
    pub draws: u32,
}

/// Message printed after an engine move.
pub fn evaluation_message(score: f64) -> String {
    if score.abs() < VERDICT_THRESHOLD {
        format!("Evaluation: {:.1}", score)
    } else if score < 0.0 {
        "Uh oh... I think I'm going to lose :(".to_string()
    } else {
        "GG. Just concede now.".to_string()
    }
}

/// A human-versus-engine match over arbitrary input/output streams.
pub struct Match<I, O> {
    settings: MatchSettings,
    input: I,
    output: O,
    rng: ChaCha20Rng,
    rules: Connect4Rules,
}

impl<I: BufRead, O: Write> Match<I, O> {
    pub fn new(settings: MatchSettings, input: I, output: O, rng: ChaCha20Rng) -> Self {
        Self {
            settings,
            input,
            output,
            rng,
            rules: Connect4Rules,
        }
    }

    /// Play games until the game limit is reached or input ends.
    pub fn run(&mut self) -> Result<MatchSummary> {
        let mut summary = MatchSummary::default();
        let mut human = self.settings.human;

        loop {
            let outcome = self.play_game(human)?;
            match outcome {
                GameOutcome::Abandoned => break,
                GameOutcome::Draw => summary.draws += 1,
                GameOutcome::Won(disc) if disc == human => summary.human_wins += 1,
                GameOutcome::Won(_) => summary.engine_wins += 1,
            }
            summary.games += 1;
            info!(
                games = summary.games,
                human_wins = summary.human_wins,
                engine_wins = summary.engine_wins,
                draws = summary.draws,
                "Game finished"
            );

            if let Some(limit) = self.settings.max_games {
                if summary.games >= limit {
                    break;
                }
            }

            if self.settings.swap_colors {
                human = human.other();
                writeln!(self.output, "\nNew game! Switching colors.\n")?;
            } else {
                writeln!(self.output, "\nNew game!\n")?;
            }
        }

        Ok(summary)
    }

    /// Play one game with the human holding `human`.
    pub fn play_game(&mut self, human: Disc) -> Result<GameOutcome> {
        let mut board = Board::new();
        let mut turn = self.settings.first;

        writeln!(
            self.output,
            "You are {} {}. {} moves first.",
            human,
            human.symbol(),
            self.settings.first
        )?;
        write!(self.output, "{}", board)?;

        while !board.is_full() {
            board = if turn == human {
                match self.human_move(&board, turn)? {
                    Some(next) => next,
                    None => return Ok(GameOutcome::Abandoned),
                }
            } else {
                self.engine_move(&board, turn)?
            };

            writeln!(self.output)?;
            write!(self.output, "{}", board)?;

            if board.has_connect_four(turn) {
                writeln!(self.output, "Player {} has won!", turn)?;
                return Ok(GameOutcome::Won(turn));
            }

            turn = turn.other();
        }

        writeln!(self.output, "The board is full. It's a draw!")?;
        Ok(GameOutcome::Draw)
    }

    /// Read columns until one can take a disc. None when input ends.
    fn human_move(&mut self, board: &Board, disc: Disc) -> Result<Option<Board>> {
        loop {
            write!(self.output, "\ncolumn? ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(None);
            }

            let column = match line.trim().parse::<usize>() {
                Ok(column) => column,
                Err(_) => {
                    writeln!(
                        self.output,
                        "Please enter a column number between 0 and {}.",
                        COLS - 1
                    )?;
                    continue;
                }
            };

            match board.drop_disc(column, disc) {
                Ok(next) => return Ok(Some(next)),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    /// Run a fresh search for `disc` and report the chosen move.
    fn engine_move(&mut self, board: &Board, disc: Disc) -> Result<Board> {
        let config = self.settings.search.clone();
        let iterations = config.iterations;
        let mut tree = SearchTree::from_position(&self.rules, *board, disc, config);
        let decision = tree.decide(iterations, &mut self.rng);

        let stats = tree.stats();
        debug!(
            nodes = stats.total_nodes,
            max_depth = stats.max_depth,
            score = decision.score,
            "Engine search complete"
        );

        if let Some(column) = decision.board.changed_column(board) {
            writeln!(self.output, "Engine ({}) plays column {}", disc, column)?;
        }
        writeln!(self.output, "{}", evaluation_message(decision.score))?;

        Ok(decision.board)
    }
}
