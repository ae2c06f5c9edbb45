//! Domain-agnostic tests for the negamax search using a synthetic game tree
//! and Nim.
//!
//! Test coverage:
//! - Pruned search agrees with full-width negamax, quiescence included
//! - Iterative deepening result and root tie handling
//! - Mate scoring and early exit on proven mates (Nim)
//! - Error handling (zero depth, no moves) and the zero time budget
//! - Seeded tie-break reproducibility

use std::fmt;
use std::time::Duration;

use super::*;

/// A uniform tree of height `height`: every node below it has `branching`
/// moves. Move 0 is tactical, so quiescence has something to search.
#[derive(Clone, Debug)]
struct TreeState {
    path: Vec<u8>,
    branching: u8,
    height: usize,
}

impl TreeState {
    fn new(branching: u8, height: usize) -> Self {
        Self {
            path: Vec::new(),
            branching,
            height,
        }
    }
}

impl GameState for TreeState {
    fn position_hash(&self) -> u64 {
        self.path
            .iter()
            .fold(1u64, |hash, &index| hash * 8 + index as u64 + 1)
    }

    fn is_in_check(&self) -> bool {
        false
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct TreeMove(u8);

impl fmt::Display for TreeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "branch {}", self.0)
    }
}

impl GameMove for TreeMove {
    type State = TreeState;
    type Error = &'static str;

    fn apply(&self, state: &mut TreeState) -> Result<(), Self::Error> {
        if self.0 >= state.branching || state.path.len() >= state.height {
            return Err("no such branch");
        }
        state.path.push(self.0);
        Ok(())
    }

    fn undo(&self, state: &mut TreeState) -> Result<(), Self::Error> {
        match state.path.pop() {
            Some(index) if index == self.0 => Ok(()),
            _ => Err("undo does not match the last move"),
        }
    }

    fn is_tactical(&self, _state: &TreeState) -> bool {
        self.0 == 0
    }
}

struct TreeMoveGenerator;

impl MoveGenerator<TreeState> for TreeMoveGenerator {
    type Move = TreeMove;
    type MoveList = Vec<TreeMove>;

    fn generate_moves(&self, state: &TreeState) -> Vec<TreeMove> {
        if state.path.len() >= state.height {
            return vec![];
        }
        (0..state.branching).map(TreeMove).collect()
    }
}

/// Pseudo-random leaf values in `-500..=500`, fixed per node.
struct HashEvaluator {
    salt: u64,
}

fn mix(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

impl Evaluator<TreeState> for HashEvaluator {
    fn evaluate(&self, state: &TreeState) -> Score {
        (mix(state.position_hash() ^ self.salt) % 1001) as Score - 500
    }
}

/// `HashEvaluator` that stalls on nodes only a depth-2 search reaches: the
/// second move of the line is quiet, which quiescence never plays.
struct StallingEvaluator {
    inner: HashEvaluator,
    delay: Duration,
}

impl Evaluator<TreeState> for StallingEvaluator {
    fn evaluate(&self, state: &TreeState) -> Score {
        if state.path.len() == 2 && state.path[1] != 0 {
            std::thread::sleep(self.delay);
        }
        self.inner.evaluate(state)
    }
}

struct FlatEvaluator;

impl Evaluator<TreeState> for FlatEvaluator {
    fn evaluate(&self, _state: &TreeState) -> Score {
        0
    }
}

/// State of a Nim game: players take 1-3 objects, whoever takes the last
/// object wins. A player facing an empty pile has lost, which the search
/// sees as being "in check" with no moves.
#[derive(Clone, Debug)]
struct NimState {
    pile: u8,
}

impl GameState for NimState {
    fn position_hash(&self) -> u64 {
        self.pile as u64
    }

    fn is_in_check(&self) -> bool {
        self.pile == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct NimMove {
    take: u8,
}

impl fmt::Display for NimMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "take {}", self.take)
    }
}

impl GameMove for NimMove {
    type State = NimState;
    type Error = &'static str;

    fn apply(&self, state: &mut NimState) -> Result<(), Self::Error> {
        if self.take > state.pile || self.take == 0 || self.take > 3 {
            return Err("Invalid move");
        }
        state.pile -= self.take;
        Ok(())
    }

    fn undo(&self, state: &mut NimState) -> Result<(), Self::Error> {
        state.pile += self.take;
        Ok(())
    }
}

struct NimMoveGenerator;

impl MoveGenerator<NimState> for NimMoveGenerator {
    type Move = NimMove;
    type MoveList = Vec<NimMove>;

    fn generate_moves(&self, state: &NimState) -> Vec<NimMove> {
        (1..=std::cmp::min(3, state.pile))
            .map(|take| NimMove { take })
            .collect()
    }
}

struct NimEvaluator;

impl Evaluator<NimState> for NimEvaluator {
    fn evaluate(&self, state: &NimState) -> Score {
        // pile % 4 == 0 is a losing position for the player to move
        if state.pile % 4 == 0 {
            -100
        } else {
            100
        }
    }
}

fn config(max_depth: u8) -> SearchConfig {
    SearchConfig {
        max_depth,
        tt_capacity: 1 << 12,
        seed: Some(7),
    }
}

#[test]
fn test_pruned_search_matches_full_width() {
    for salt in 0..6u64 {
        for depth in 1..=4u8 {
            let mut state = TreeState::new(3, 12);
            let evaluator = HashEvaluator { salt };
            let mut context = SearchContext::new(config(depth));

            let pruned = fixed_depth_search(
                &mut context,
                &mut state,
                &TreeMoveGenerator,
                &evaluator,
                &mut NoOpMoveOrderer,
                depth,
            )
            .unwrap();
            let full =
                full_width_negamax(&mut state, &TreeMoveGenerator, &evaluator, depth as i32, 0)
                    .unwrap();

            assert_eq!(pruned, full, "salt {} depth {}", salt, depth);
            assert!(state.path.is_empty());
        }
    }
}

#[test]
fn test_fixed_depth_search_records_stats() {
    let mut state = TreeState::new(4, 12);
    let evaluator = HashEvaluator { salt: 3 };
    let mut context = SearchContext::new(config(4));

    let score = fixed_depth_search(
        &mut context,
        &mut state,
        &TreeMoveGenerator,
        &evaluator,
        &mut NoOpMoveOrderer,
        4,
    )
    .unwrap();

    assert!(score.abs() <= 500);
    assert!(context.stats().nodes > 0);
    assert!(context.stats().beta_cutoffs > 0);
    assert_eq!(context.stats().completed_depth, 4);
    assert!(!context.transposition_table().is_empty());
    assert_eq!(context.state(), SearchState::Idle);
}

#[test]
fn test_iterative_deepening_matches_full_width() {
    for salt in 0..4u64 {
        let mut state = TreeState::new(3, 12);
        let evaluator = HashEvaluator { salt };
        let mut context = SearchContext::new(config(4));

        let report = iterative_deepening(
            &mut context,
            &mut state,
            &TreeMoveGenerator,
            &evaluator,
            &mut NoOpMoveOrderer,
            TimeBudget::unlimited(),
        )
        .unwrap();

        let full = full_width_negamax(&mut state, &TreeMoveGenerator, &evaluator, 4, 0).unwrap();
        assert_eq!(report.score, full, "salt {}", salt);
        assert_eq!(report.depth, 4);
        assert_eq!(report.legal_moves, 3);
        assert!(report.best_moves.contains(&report.best_move));

        for best in report.best_moves.iter() {
            best.apply(&mut state).unwrap();
            let child =
                -full_width_negamax(&mut state, &TreeMoveGenerator, &evaluator, 3, 1).unwrap();
            best.undo(&mut state).unwrap();
            assert_eq!(child, full);
        }
    }
}

#[test]
fn test_ties_are_broken_reproducibly_by_seed() {
    let choose = |seed: u64| {
        let mut context = SearchContext::new(SearchConfig {
            seed: Some(seed),
            ..config(3)
        });
        iterative_deepening(
            &mut context,
            &mut TreeState::new(5, 12),
            &TreeMoveGenerator,
            &FlatEvaluator,
            &mut NoOpMoveOrderer,
            TimeBudget::unlimited(),
        )
        .unwrap()
    };

    let first = choose(11);
    assert_eq!(first.score, 0);
    assert_eq!(first.best_moves.len(), 5);
    assert_eq!(choose(11).best_move, first.best_move);

    let chosen: Vec<TreeMove> = (0..40).map(|seed| choose(seed).best_move).collect();
    assert!(chosen.iter().any(|m| *m != chosen[0]));
}

#[test]
fn test_nim_finds_winning_move_from_5() {
    let mut state = NimState { pile: 5 };
    let mut context = SearchContext::new(config(10));

    let report = iterative_deepening(
        &mut context,
        &mut state,
        &NimMoveGenerator,
        &NimEvaluator,
        &mut NoOpMoveOrderer,
        TimeBudget::unlimited(),
    )
    .unwrap();

    assert_eq!(
        report.best_move.take, 1,
        "From pile of 5, should take 1 to leave opponent with 4"
    );
    // we take the last object on the third ply
    assert_eq!(report.score, MATE_SCORE - 3);
    assert_eq!(report.best_moves, vec![NimMove { take: 1 }]);
    // stops as soon as the mate is proven
    assert_eq!(report.depth, 3);
    assert_eq!(state.pile, 5);
}

#[test]
fn test_nim_takes_the_last_objects() {
    for pile in 1..=3 {
        let mut context = SearchContext::new(config(10));
        let report = iterative_deepening(
            &mut context,
            &mut NimState { pile },
            &NimMoveGenerator,
            &NimEvaluator,
            &mut NoOpMoveOrderer,
            TimeBudget::unlimited(),
        )
        .unwrap();

        assert_eq!(report.best_move.take, pile);
        assert_eq!(report.score, MATE_SCORE - 1);
        assert_eq!(report.depth, 1);
    }
}

#[test]
fn test_nim_losing_position_scores_every_move_as_lost() {
    let mut context = SearchContext::new(config(10));
    let report = iterative_deepening(
        &mut context,
        &mut NimState { pile: 4 },
        &NimMoveGenerator,
        &NimEvaluator,
        &mut NoOpMoveOrderer,
        TimeBudget::unlimited(),
    )
    .unwrap();

    assert_eq!(report.score, mated_in(2));
    assert_eq!(report.best_moves.len(), 3);
}

#[test]
fn test_faster_wins_score_higher() {
    let mut scores = Vec::new();
    for pile in [1u8, 5, 9].iter() {
        let mut context = SearchContext::new(config(12));
        let score = fixed_depth_search(
            &mut context,
            &mut NimState { pile: *pile },
            &NimMoveGenerator,
            &NimEvaluator,
            &mut NoOpMoveOrderer,
            12,
        )
        .unwrap();
        assert!(is_mate_score(score));
        scores.push(score);
    }

    assert_eq!(scores, vec![MATE_SCORE - 1, MATE_SCORE - 3, MATE_SCORE - 5]);
}

#[test]
fn test_zero_budget_completes_depth_one() {
    let mut context = SearchContext::new(config(10));
    let report = iterative_deepening(
        &mut context,
        &mut TreeState::new(3, 12),
        &TreeMoveGenerator,
        &HashEvaluator { salt: 1 },
        &mut NoOpMoveOrderer,
        TimeBudget::new(Duration::from_millis(0)),
    )
    .unwrap();

    assert_eq!(report.depth, 1);
    assert_eq!(context.stats().completed_depth, 1);
    assert_eq!(context.state(), SearchState::Idle);
}

#[test]
fn test_interrupted_iteration_keeps_previous_result() {
    let mut first_iteration = SearchContext::new(config(1));
    let expected = iterative_deepening(
        &mut first_iteration,
        &mut TreeState::new(3, 12),
        &TreeMoveGenerator,
        &HashEvaluator { salt: 5 },
        &mut NoOpMoveOrderer,
        TimeBudget::unlimited(),
    )
    .unwrap();

    let mut state = TreeState::new(3, 12);
    let evaluator = StallingEvaluator {
        inner: HashEvaluator { salt: 5 },
        delay: Duration::from_millis(100),
    };
    let mut context = SearchContext::new(config(6));
    let report = iterative_deepening(
        &mut context,
        &mut state,
        &TreeMoveGenerator,
        &evaluator,
        &mut NoOpMoveOrderer,
        TimeBudget::new(Duration::from_millis(60)),
    )
    .unwrap();

    // depth 2 started in time, then ran past the deadline
    assert_eq!(report.depth, 1);
    assert_eq!(context.stats().completed_depth, 1);
    assert_eq!(report.score, expected.score);
    assert_eq!(report.best_moves, expected.best_moves);
    assert_eq!(report.best_move, expected.best_move);
    assert!(state.path.is_empty());
    assert_eq!(context.state(), SearchState::Idle);
}

#[test]
fn test_zero_depth_is_rejected() {
    let mut context = SearchContext::new(config(0));
    let result = iterative_deepening(
        &mut context,
        &mut NimState { pile: 5 },
        &NimMoveGenerator,
        &NimEvaluator,
        &mut NoOpMoveOrderer,
        TimeBudget::unlimited(),
    );
    assert_eq!(result, Err(SearchError::DepthTooLow));
    assert_eq!(context.state(), SearchState::Idle);
}

#[test]
fn test_no_moves_is_an_error() {
    let mut context = SearchContext::new(config(4));
    let result = iterative_deepening(
        &mut context,
        &mut NimState { pile: 0 },
        &NimMoveGenerator,
        &NimEvaluator,
        &mut NoOpMoveOrderer,
        TimeBudget::unlimited(),
    );
    assert_eq!(result, Err(SearchError::NoAvailableMoves));
}

#[test]
fn test_terminal_node_without_check_is_a_draw() {
    // the tree ends after two plies; nobody is ever "in check"
    let mut state = TreeState::new(2, 2);
    let score = full_width_negamax(&mut state, &TreeMoveGenerator, &FlatEvaluator, 4, 0).unwrap();
    assert_eq!(score, DRAW_SCORE);

    let mut context = SearchContext::new(config(4));
    let pruned = fixed_depth_search(
        &mut context,
        &mut state,
        &TreeMoveGenerator,
        &HashEvaluator { salt: 9 },
        &mut NoOpMoveOrderer,
        4,
    )
    .unwrap();
    assert_eq!(pruned, DRAW_SCORE);
}
