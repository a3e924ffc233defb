use std::io::{self, BufRead, Write};

use checkmate_core::engines::chess_ai::ChessAI;
use checkmate_core::engines::difficulty::Difficulty;
use checkmate_core::engines::engine_trait::{Engine, GoParams};
use checkmate_core::errors::ChessResult;
use checkmate_core::game_state::chess_rules::STARTING_POSITION_FEN;
use checkmate_core::game_state::game_state::GameState;
use checkmate_core::move_generation::legal_move_generator::LegalMoveGenerator;
use checkmate_core::move_generation::perft::perft;
use checkmate_core::utils::long_algebraic::long_algebraic_to_move;
use checkmate_core::utils::san::move_to_san;

const HELP: &str = "commands:
  move <lan>        play a move, e.g. move e2e4 or move e7e8q
  go [depth N]      let the engine move
  hint              suggest a move without playing it
  undo              take back the last move
  moves             list legal moves
  fen | pgn | show  print the position
  load <fen>        start from a FEN position
  new               start a fresh game
  difficulty <lvl>  easy, medium, hard, or master
  perft <depth>     count leaf nodes
  quit";

struct Options {
    fen: String,
    difficulty: Difficulty,
}

fn parse_args() -> ChessResult<Options> {
    let mut options = Options {
        fen: STARTING_POSITION_FEN.to_owned(),
        difficulty: Difficulty::default(),
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--fen" => {
                if let Some(fen) = args.next() {
                    options.fen = fen;
                }
            }
            "--difficulty" => {
                if let Some(level) = args.next() {
                    options.difficulty = level.parse()?;
                }
            }
            other => log::warn!("ignoring unknown argument {other}"),
        }
    }
    Ok(options)
}

struct Session {
    game: GameState,
    engine: Box<dyn Engine>,
    ai: ChessAI,
}

impl Session {
    fn handle(&mut self, line: &str) -> bool {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return true;
        };
        let rest: Vec<&str> = parts.collect();

        match command {
            "quit" | "exit" => return false,
            "help" => println!("{HELP}"),
            "new" => {
                self.game = GameState::new_game();
                self.engine.new_game();
                println!("{}", self.game);
            }
            "load" => match GameState::from_fen(&rest.join(" ")) {
                Ok(game) => {
                    self.game = game;
                    self.engine.new_game();
                    println!("{}", self.game);
                }
                Err(err) => println!("error: {err}"),
            },
            "move" => match rest.first() {
                Some(lan) => self.play_lan(lan),
                None => println!("usage: move <lan>"),
            },
            "go" => {
                let depth = match rest.as_slice() {
                    ["depth", n] => n.parse().ok(),
                    _ => None,
                };
                self.engine_move(GoParams {
                    depth,
                    ..GoParams::default()
                });
            }
            "hint" => match self.ai.get_hint(&self.game) {
                Some(mv) => println!("hint: {}", move_to_san(&self.game, &mv)),
                None => println!("no legal moves"),
            },
            "undo" => match self.game.undo_move() {
                Some(mv) => println!("took back {mv}"),
                None => println!("nothing to undo"),
            },
            "moves" => {
                let moves: Vec<String> = self
                    .game
                    .get_all_current_legal_moves()
                    .iter()
                    .map(|mv| move_to_san(&self.game, mv))
                    .collect();
                println!("{}", moves.join(" "));
            }
            "fen" => println!("{}", self.game.to_fen()),
            "pgn" => print!("{}", self.game.to_pgn()),
            "show" => println!("{}", self.game),
            "difficulty" => match rest.first().map(|level| level.parse::<Difficulty>()) {
                Some(Ok(level)) => {
                    self.ai.set_difficulty(level);
                    match self.engine.set_option("Difficulty", level.as_str()) {
                        Ok(()) => println!("difficulty {level}"),
                        Err(err) => println!("error: {err}"),
                    }
                }
                Some(Err(err)) => println!("error: {err}"),
                None => println!("difficulty {}", self.ai.difficulty()),
            },
            "perft" => {
                let depth = rest.first().and_then(|d| d.parse().ok()).unwrap_or(1);
                let counts = perft(&LegalMoveGenerator, &self.game, depth);
                println!("{counts:?}");
            }
            other => println!("unknown command {other}, try help"),
        }
        true
    }

    fn play_lan(&mut self, lan: &str) {
        let mv = match long_algebraic_to_move(lan, &self.game) {
            Ok(mv) => mv,
            Err(err) => {
                println!("error: {err}");
                return;
            }
        };
        let san = move_to_san(&self.game, &mv);
        if !self.game.make_move(&mv) {
            println!("move rejected, game status {:?}", self.game.status());
            return;
        }
        println!("played {san}");
        self.report_status();
    }

    fn engine_move(&mut self, params: GoParams) {
        if self.game.is_game_over() {
            self.report_status();
            return;
        }

        let output = self.engine.choose_move(&self.game, &params);
        for line in &output.info_lines {
            println!("{line}");
        }
        match output.best_move {
            Some(mv) => {
                let san = move_to_san(&self.game, &mv);
                if self.game.make_move(&mv) {
                    println!("bestmove {mv} ({san})");
                    self.report_status();
                }
            }
            None => println!("bestmove (none)"),
        }
    }

    fn report_status(&self) {
        if self.game.is_game_over() {
            println!("game over: {:?} {}", self.game.status(), self.game.result_string());
        } else if self.game.is_check() {
            println!("check");
        }
    }
}

fn main() {
    env_logger::init();

    let options = match parse_args() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    let game = match GameState::from_fen(&options.fen) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    let mut session = Session {
        game,
        engine: Box::new(ChessAI::new(options.difficulty)),
        ai: ChessAI::new(options.difficulty),
    };
    log::info!("starting at difficulty {}", options.difficulty);
    println!("{}", session.game);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        if !session.handle(line.trim()) {
            break;
        }
        io::stdout().flush().ok();
    }
}
