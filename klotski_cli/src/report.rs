// src/report.rs
#![forbid(unsafe_code)]

use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

use klotski_engine::{Scorer, SearchStats, SearchStep, SolveOutcome, Solver};

/// Fixed internal cadence for progress-line updates.
/// (No CLI knob on purpose.)
const LIVE_EVERY: u64 = 1_000;

/// Drive a solver to its terminal state, reporting progress along the way.
///
/// The progress line is UI only; the search does not depend on it.
pub fn drive<S: Scorer>(
    mut solver: Solver<S>,
    verbosity: u8,
    report_every: u64,
) -> (SolveOutcome, SearchStats, Duration) {
    let started = Instant::now();

    let pb = if verbosity >= 1 {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner} {elapsed_precise}  {msg}")
                .unwrap(),
        );
        Some(pb)
    } else {
        None
    };

    let outcome = loop {
        match solver.step() {
            SearchStep::Expanded => {
                let stats = solver.stats();
                if let Some(pb) = &pb {
                    if stats.expanded % LIVE_EVERY == 0 {
                        pb.set_message(format!(
                            "expanded {} | visited {} | frontier {} | depth {}",
                            stats.expanded, stats.visited, stats.frontier, stats.max_depth
                        ));
                        pb.tick();
                    }
                }
                if verbosity >= 2 && report_every > 0 && stats.expanded % report_every == 0 {
                    let row = format!(
                        "{:>12} expanded {:>12} visited {:>10} frontier {:>6} depth",
                        stats.expanded, stats.visited, stats.frontier, stats.max_depth
                    );
                    match &pb {
                        Some(pb) => pb.println(row),
                        None => println!("{row}"),
                    }
                }
            }
            SearchStep::Solved(solution) => break SolveOutcome::Solved(solution),
            SearchStep::Exhausted => break SolveOutcome::Exhausted,
        }
    };

    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }

    (outcome, solver.stats(), started.elapsed())
}

pub fn print_stats(stats: &SearchStats, elapsed: Duration) {
    println!();
    println!(
        "expanded {} nodes, {} states visited ({} duplicate hits), frontier peak {}, max depth {}, {:.2?} elapsed",
        stats.expanded,
        stats.visited,
        stats.duplicates,
        stats.frontier_peak,
        stats.max_depth,
        elapsed
    );
}
