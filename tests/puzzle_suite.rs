use serde::Deserialize;

use proof_game::board::Position;
use proof_game::solver::{solve, SolveOutcome};

#[derive(Deserialize)]
struct PuzzleSet {
    puzzles: Vec<Puzzle>,
}

#[derive(Deserialize)]
struct Puzzle {
    name: String,
    fen: String,
    budget: u16,
    /// Length of the shortest proof game, or null if none fits the budget
    plies: Option<usize>,
}

#[test]
fn proof_game_suite() {
    let data = include_str!("data/puzzles.json");
    let set: PuzzleSet = serde_json::from_str(data).expect("invalid puzzles.json");
    assert!(!set.puzzles.is_empty());

    for puzzle in &set.puzzles {
        let target = Position::try_from_fen(&puzzle.fen)
            .unwrap_or_else(|err| panic!("{}: bad FEN: {err}", puzzle.name));
        let outcome = solve(&target, puzzle.budget)
            .unwrap_or_else(|err| panic!("{}: solve failed: {err}", puzzle.name));

        match (puzzle.plies, outcome) {
            (Some(plies), SolveOutcome::Solved { solution, .. }) => {
                assert_eq!(
                    solution.len(),
                    plies,
                    "{}: found {} ({})",
                    puzzle.name,
                    solution,
                    solution.to_san()
                );
                assert_eq!(
                    solution.replay().unwrap(),
                    target,
                    "{}: replay does not reach the target",
                    puzzle.name
                );
            }
            (None, SolveOutcome::NoSolutionWithinBudget { max_plies, .. }) => {
                assert_eq!(max_plies, puzzle.budget, "{}", puzzle.name);
            }
            (expected, outcome) => panic!(
                "{}: expected {:?} plies, got {:?}",
                puzzle.name, expected, outcome
            ),
        }
    }
}
