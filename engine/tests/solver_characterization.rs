// engine/tests/solver_characterization.rs
#![forbid(unsafe_code)]

/**
 * Search-engine characterization tests.
 *
 * Purpose:
 * - Lock observable solver behavior on deterministic fixtures.
 *
 * What is tested:
 * - A small solvable board terminates with a short, replayable solution.
 * - A boxed-in goal piece terminates as `Exhausted` (normal outcome).
 * - State hashing: interchangeable same-shape pieces hash identically,
 *   different anchors hash differently, and different move orders reaching
 *   the same configuration converge on one hash.
 * - No hash collisions across the full enumerated reachable space of a
 *   small board.
 * - The visited count grows monotonically and never exceeds the number of
 *   distinct reachable configurations.
 * - The classic board solves end to end and the solution replays to goal.
 */
use std::collections::{HashMap, VecDeque};

use klotski_engine::{
    Board, Direction, Goal, GoalDistance, Move, SearchConfig, SearchStep, SolveOutcome, Solver,
};

const TOY: &str = "\
OOOOOO
Oaa00O
O0bc0O
O0000O
OOOOOO";

const CLASSIC: &str = "\
OOOOOO
OabbcO
OabbcO
OdeefO
OdghfO
Oi00jO
OOOOOO";

/// Goal piece walled off from the only empty cell: no legal move ever exists.
const BOXED: &str = "\
OOOOO
ObO0O
OOOOO";

fn toy() -> Board {
    Board::parse(TOY, Goal::new('a', 3, 3)).expect("toy layout parses")
}

fn classic() -> Board {
    Board::parse(CLASSIC, Goal::new('b', 2, 4)).expect("classic layout parses")
}

fn solver_for(board: Board) -> Solver<GoalDistance> {
    Solver::new(board, GoalDistance::default(), SearchConfig::default())
}

/// Configuration identity computed independently of the engine's hashing:
/// the sorted multiset of (canonical shape, bounding-box corner) pairs.
#[allow(clippy::type_complexity)]
fn canonical_key(board: &Board) -> Vec<(Vec<(i32, i32)>, (i32, i32))> {
    let mut entries: Vec<(Vec<(i32, i32)>, (i32, i32))> = board
        .piece_labels()
        .map(|label| {
            let cells = board.piece_cells(label).expect("label came from the board");
            let min_x = cells.iter().map(|c| c.0).min().expect("pieces are nonempty");
            let min_y = cells.iter().map(|c| c.1).min().expect("pieces are nonempty");
            let mut shape: Vec<(i32, i32)> =
                cells.iter().map(|&(x, y)| (x - min_x, y - min_y)).collect();
            shape.sort_unstable();
            (shape, (min_x, min_y))
        })
        .collect();
    entries.sort();
    entries
}

/// Breadth-first enumeration of every configuration reachable from `board`.
/// Keyed by `canonical_key`, so it is ground truth for the hash scheme.
#[allow(clippy::type_complexity)]
fn enumerate_reachable(board: &Board) -> HashMap<Vec<(Vec<(i32, i32)>, (i32, i32))>, u64> {
    let mut seen: HashMap<Vec<(Vec<(i32, i32)>, (i32, i32))>, u64> = HashMap::new();
    let mut queue: VecDeque<Board> = VecDeque::new();
    seen.insert(canonical_key(board), board.state_hash());
    queue.push_back(board.clone());

    while let Some(current) = queue.pop_front() {
        for mv in current.legal_moves() {
            let mut next = current.clone();
            next.apply(mv);
            let key = canonical_key(&next);
            if !seen.contains_key(&key) {
                seen.insert(key, next.state_hash());
                queue.push_back(next);
            }
        }
    }
    seen
}

#[test]
fn toy_board_solves_in_a_few_moves_and_replays_to_goal() {
    let board = toy();
    let mut solver = solver_for(board.clone());

    let SolveOutcome::Solved(solution) = solver.run() else {
        panic!("toy board is solvable");
    };
    assert!(!solution.is_empty());
    // Minimal is 4 slides; first-found may be slightly longer, never huge.
    assert!(solution.len() <= 8, "toy solution blew up: {}", solution.len());

    let replayed = solution.replay_on(board).expect("solution replays cleanly");
    assert!(replayed.is_goal());
}

#[test]
fn boxed_goal_piece_reports_exhausted() {
    let board = Board::parse(BOXED, Goal::new('b', 3, 1)).expect("boxed layout parses");
    assert!(!board.is_goal());

    let mut solver = solver_for(board);
    let outcome = solver.run();
    assert!(matches!(outcome, SolveOutcome::Exhausted));
    assert!(outcome.solution().is_none());
    // Only the root was ever reachable.
    assert_eq!(solver.stats().visited, 1);

    // Terminal state is sticky.
    assert!(matches!(solver.step(), SearchStep::Exhausted));
}

#[test]
fn already_solved_root_yields_an_empty_solution() {
    let board = Board::parse(TOY, Goal::new('a', 1, 1)).expect("toy layout parses");
    assert!(board.is_goal());

    let mut solver = solver_for(board);
    let SolveOutcome::Solved(solution) = solver.run() else {
        panic!("root is the goal");
    };
    assert!(solution.is_empty());
}

#[test]
fn interchangeable_piece_swap_hashes_identically() {
    // b and c are both 1x1: swapping which label sits where must not change
    // the state identity.
    let swapped = "\
OOOOOO
Oaa00O
O0cb0O
O0000O
OOOOOO";
    let goal = Goal::new('a', 3, 3);
    let original = Board::parse(TOY, goal).expect("toy layout parses");
    let relabelled = Board::parse(swapped, goal).expect("swapped layout parses");

    assert_eq!(original.state_hash(), relabelled.state_hash());
    assert_eq!(canonical_key(&original), canonical_key(&relabelled));
}

#[test]
fn moving_a_single_anchor_changes_the_hash() {
    let board = toy();
    let mut moved = board.clone();
    moved.apply(Move {
        piece: b'b',
        dir: Direction::Down,
        distance: 1,
    });
    assert_ne!(board.state_hash(), moved.state_hash());
}

#[test]
fn different_move_orders_converge_on_one_hash() {
    let board = toy();
    let down = |piece: u8| Move {
        piece,
        dir: Direction::Down,
        distance: 1,
    };

    let mut first = board.clone();
    first.apply(down(b'b'));
    first.apply(down(b'c'));

    let mut second = board;
    second.apply(down(b'c'));
    second.apply(down(b'b'));

    assert_eq!(canonical_key(&first), canonical_key(&second));
    assert_eq!(first.state_hash(), second.state_hash());
}

#[test]
fn no_hash_collisions_across_the_toy_reachable_space() {
    let board = toy();
    let reachable = enumerate_reachable(&board);
    assert!(reachable.len() > 10, "enumeration looks degenerate");

    // Distinct configurations must not share a hash, and equal configurations
    // cannot disagree (each key maps to exactly one hash by construction).
    let mut by_hash: HashMap<u64, Vec<(Vec<(i32, i32)>, (i32, i32))>> = HashMap::new();
    for (key, hash) in &reachable {
        if let Some(existing) = by_hash.insert(*hash, key.clone()) {
            panic!("hash collision between {existing:?} and {key:?}");
        }
    }
    assert_eq!(by_hash.len(), reachable.len());
}

#[test]
fn visited_count_is_monotone_and_bounded_by_the_reachable_space() {
    let board = toy();
    let reachable_count = enumerate_reachable(&board).len() as u64;

    let mut solver = solver_for(board);
    let mut last_visited = 0u64;
    loop {
        let step = solver.step();
        let visited = solver.stats().visited;
        assert!(visited >= last_visited, "visited count shrank");
        assert!(visited <= reachable_count, "visited exceeded reachable space");
        last_visited = visited;
        match step {
            SearchStep::Expanded => continue,
            SearchStep::Solved(_) | SearchStep::Exhausted => break,
        }
    }
}

#[test]
fn classic_board_solves_and_replays_to_goal() {
    let board = classic();
    let mut solver = solver_for(board.clone());

    let SolveOutcome::Solved(solution) = solver.run() else {
        panic!("classic board is solvable");
    };
    assert!(!solution.is_empty());

    let stats = solver.stats();
    assert!(stats.expanded > 0);
    assert!(stats.visited >= solution.len() as u64);

    // Replaying validates every step against the legal run first.
    let replayed = solution
        .replay_on(board)
        .expect("classic solution replays cleanly");
    assert!(replayed.is_goal());
}
