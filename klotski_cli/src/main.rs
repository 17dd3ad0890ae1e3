// src/main.rs
#![forbid(unsafe_code)]

mod report;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use klotski_engine::{scramble, Board, Goal, GoalDistance, SearchConfig, SolveOutcome, Solver};

/// Classic Klotski arrangement: slide the 2x2 block 'b' to the bottom centre.
const CLASSIC: &str = "\
OOOOOO
OabbcO
OabbcO
OdeefO
OdghfO
Oi00jO
OOOOOO";

const CLASSIC_GOAL: (char, i32, i32) = ('b', 2, 4);

#[derive(Parser, Debug)]
#[command(name = "klotski_cli")]
struct Args {
    // ---------------- board ----------------
    /// Load the layout from a file instead of the built-in classic board.
    /// Symbols: 'O' wall, '0' empty, lowercase piece labels.
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Goal piece label. Defaults to the classic board's 'b'.
    #[arg(long)]
    goal_piece: Option<char>,

    /// Goal anchor x (required with --layout).
    #[arg(long)]
    goal_x: Option<i32>,

    /// Goal anchor y (required with --layout).
    #[arg(long)]
    goal_y: Option<i32>,

    // ---------------- scramble ----------------
    /// Apply N random legal slides before solving (0 disables).
    #[arg(long, default_value_t = 0)]
    scramble: u32,

    /// RNG seed for --scramble. If omitted, a fixed default is used.
    #[arg(long)]
    seed: Option<u64>,

    // ---------------- search policy ----------------
    /// Depth coefficient of the ordering penalty (depth_weight * depth + distance).
    #[arg(long, default_value_t = 0.5)]
    depth_weight: f64,

    /// Penalty per distinct piece standing in the goal piece's sweep.
    #[arg(long, default_value_t = 0.5)]
    block_penalty: f64,

    /// Use Euclidean goal distance instead of weighted Manhattan.
    #[arg(long)]
    euclidean: bool,

    // ---------------- output / reporting ----------------
    /// Verbosity: 0=final summary only, 1=progress line, 2=progress line + periodic stats rows.
    #[arg(long, default_value_t = 1)]
    verbosity: u8,

    /// Print a stats row every N expansions (only used with --verbosity 2).
    #[arg(long, default_value_t = 25_000)]
    report_every: u64,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let (text, default_goal) = match &args.layout {
        Some(path) => match fs::read_to_string(path) {
            Ok(text) => (text, None),
            Err(err) => {
                eprintln!("cannot read {}: {err}", path.display());
                return ExitCode::from(2);
            }
        },
        None => (CLASSIC.to_string(), Some(CLASSIC_GOAL)),
    };

    let goal = match resolve_goal(&args, default_goal) {
        Ok(goal) => goal,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    let mut board = match Board::parse(&text, goal) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("bad layout: {err}");
            return ExitCode::from(2);
        }
    };

    if args.scramble > 0 {
        let seed = args.seed.unwrap_or(12345);
        let applied = scramble(&mut board, seed, args.scramble);
        log::debug!("scramble walk: {applied:?}");
        if args.verbosity >= 1 {
            println!("scrambled with {} slides (seed {seed})", applied.len());
        }
    }

    if args.verbosity >= 1 {
        println!("{board}");
        println!();
    }

    let config = SearchConfig {
        depth_weight: args.depth_weight,
    };

    // Monomorphized per scorer variant; the scorer seam stays a plain generic.
    let (outcome, stats, elapsed) = if args.euclidean {
        let solver = Solver::new(
            board.clone(),
            GoalDistance::euclidean(args.block_penalty),
            config,
        );
        report::drive(solver, args.verbosity, args.report_every)
    } else {
        let solver = Solver::new(
            board.clone(),
            GoalDistance::new(1.0, 1.0, args.block_penalty),
            config,
        );
        report::drive(solver, args.verbosity, args.report_every)
    };

    match outcome {
        SolveOutcome::Solved(solution) => {
            println!("solved in {} moves:", solution.len());
            for (i, mv) in solution.moves().iter().enumerate() {
                let cells = if mv.distance == 1 { "cell" } else { "cells" };
                println!(
                    "  step {:>3}: piece '{}' slides {} {} {}",
                    i + 1,
                    mv.piece as char,
                    mv.dir,
                    mv.distance,
                    cells
                );
            }
            match solution.replay_on(board) {
                Ok(final_board) => {
                    if args.verbosity >= 1 {
                        println!();
                        println!("{final_board}");
                    }
                }
                Err(err) => {
                    // A solution that fails replay is an engine defect.
                    eprintln!("solution failed to replay: {err}");
                    return ExitCode::FAILURE;
                }
            }
            report::print_stats(&stats, elapsed);
            ExitCode::SUCCESS
        }
        SolveOutcome::Exhausted => {
            println!("no solution from this configuration");
            report::print_stats(&stats, elapsed);
            ExitCode::FAILURE
        }
    }
}

fn resolve_goal(args: &Args, default_goal: Option<(char, i32, i32)>) -> Result<Goal, String> {
    match default_goal {
        Some((piece, x, y)) => Ok(Goal::new(
            args.goal_piece.unwrap_or(piece),
            args.goal_x.unwrap_or(x),
            args.goal_y.unwrap_or(y),
        )),
        None => match (args.goal_piece, args.goal_x, args.goal_y) {
            (Some(piece), Some(x), Some(y)) => Ok(Goal::new(piece, x, y)),
            _ => Err("--layout requires --goal-piece, --goal-x and --goal-y".to_string()),
        },
    }
}
