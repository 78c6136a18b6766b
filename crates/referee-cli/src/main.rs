//! Referee - inspect a chess position.
//!
//! Loads a setup (the standard array by default), plays the given coordinate
//! moves through the legality filter, and prints the board, both factions'
//! status, and the legal moves of the side to move.

use anyhow::Context;
use clap::Parser;
use referee::{Board, Cell, Faction, Move, Setup, Status};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Referee - play moves and report the resulting position.
#[derive(Parser)]
#[command(name = "referee")]
#[command(about = "Plays coordinate moves and reports the resulting position")]
struct Args {
    /// TOML setup file (defaults to the standard initial array)
    #[arg(long)]
    setup: Option<PathBuf>,

    /// Moves to play in order, e.g. e2e4 or e7e8n
    #[arg(value_name = "MOVES")]
    moves: Vec<String>,

    /// Draw the board from Black's side
    #[arg(long)]
    flip: bool,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    to_move: Faction,
    white: Status,
    black: Status,
    moves: BTreeMap<Cell, Vec<Cell>>,
    captured_by_white: Vec<char>,
    captured_by_black: Vec<char>,
}

impl Report {
    fn new(board: &Board) -> Self {
        let to_move = side_to_move(board);
        let moves = board
            .available_moves(to_move)
            .into_iter()
            .map(|(from, targets)| (from, targets.into_iter().collect()))
            .collect();
        let glyphs = |faction: Faction| -> Vec<char> {
            board.captures(faction).iter().map(|p| p.glyph()).collect()
        };
        Report {
            to_move,
            white: board.status(Faction::White),
            black: board.status(Faction::Black),
            moves,
            captured_by_white: glyphs(Faction::White),
            captured_by_black: glyphs(Faction::Black),
        }
    }
}

fn side_to_move(board: &Board) -> Faction {
    board
        .previous_turn()
        .map_or(Faction::White, Faction::opposite)
}

fn load_board(setup: Option<&PathBuf>) -> anyhow::Result<Board> {
    let setup = match setup {
        Some(path) => Setup::load(path)
            .with_context(|| format!("loading setup from {}", path.display()))?,
        None => Setup::standard(),
    };
    Ok(setup.build()?)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut board = load_board(args.setup.as_ref())?;
    for text in &args.moves {
        let mv: Move = text.parse()?;
        board
            .play(mv)
            .with_context(|| format!("playing {}", text))?;
        tracing::debug!(%mv, "played");
    }

    let report = Report::new(&board);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let perspective = if args.flip {
        Faction::Black
    } else {
        Faction::White
    };
    print!("{}", board.render(perspective));
    println!();
    println!("White: {}", report.white);
    println!("Black: {}", report.black);
    println!("{} to move:", report.to_move);
    for (from, targets) in &report.moves {
        let listed: Vec<String> = targets.iter().map(Cell::to_string).collect();
        println!("  {}: {}", from, listed.join(" "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse() {
        let args = Args::parse_from(["referee", "--flip", "e2e4", "e7e5"]);
        assert!(args.flip);
        assert!(!args.json);
        assert!(args.setup.is_none());
        assert_eq!(args.moves, vec!["e2e4", "e7e5"]);
    }

    #[test]
    fn side_to_move_follows_previous_turn() {
        let mut board = Board::standard();
        assert_eq!(side_to_move(&board), Faction::White);
        board.play("e2e4".parse().unwrap()).unwrap();
        assert_eq!(side_to_move(&board), Faction::Black);
    }

    #[test]
    fn report_serializes_moves_by_cell() {
        let board = Board::standard();
        let json = serde_json::to_value(Report::new(&board)).unwrap();
        assert_eq!(json["to_move"], "white");
        assert_eq!(json["white"], "ongoing");
        assert_eq!(json["moves"]["g1"], serde_json::json!(["f3", "h3"]));
        assert_eq!(json["moves"].as_object().unwrap().len(), 10);
    }
}
