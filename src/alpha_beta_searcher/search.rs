//! Negamax search with alpha-beta pruning.
//!
//! # Core Algorithm
//!
//! Every node is scored from the perspective of its side to move, and a
//! child's score is negated on the way up. Alpha-beta pruning maintains a
//! window `(alpha, beta)` of scores that can still influence the root; once a
//! move reaches `beta` the remaining moves are skipped. The search is
//! fail-soft: a node that prunes returns the bound it proved rather than
//! clamping it to the window.
//!
//! # Node Order
//!
//! 1. No legal moves: mate (`-MATE_SCORE + ply`) when in check, else a draw.
//! 2. Draws by rule score 0 everywhere except the root.
//! 3. Transposition table probe.
//! 4. Remaining depth exhausted: quiescence search.
//! 5. Moves are tried in order: table move, then the move orderer's tactical
//!    moves, then killer moves, then the remaining quiet moves.
//! 6. A cutoff stores a lower bound and feeds the killer and history
//!    heuristics; otherwise the node stores an upper bound or an exact score.
//!
//! # Quiescence Search
//!
//! Extends the search beyond the nominal depth for tactical moves to avoid
//! the horizon effect. The side to move may "stand pat" on the static
//! evaluation. No transposition table is used below the horizon.
//!
//! # Iterative Deepening
//!
//! Searches at increasing depths, re-ordering the root moves by the scores of
//! the previous iteration. The deadline is polled between root moves and
//! every `NODES_PER_DEADLINE_CHECK` nodes. The first iteration always runs to
//! completion, and the result always comes from the last completed
//! iteration.

use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::killer_moves::KillerMoves;
use super::score::{
    is_mate_score, mate_distance, mated_in, Score, DRAW_SCORE, INFINITY, MAX_PLY,
};
use super::time_control::TimeBudget;
use super::transposition_table::{BoundType, TranspositionTable, DEFAULT_TT_CAPACITY};
use super::{Evaluator, GameMove, GameState, MoveCollection, MoveGenerator, MoveOrderer};

pub const MAX_QUIESCENCE_DEPTH: u8 = 8;

pub const DEFAULT_MAX_DEPTH: u8 = 64;

const NODES_PER_DEADLINE_CHECK: u64 = 1024;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("a search is already running")]
    AlreadySearching,
    #[error("depth must be at least 1")]
    DepthTooLow,
    #[error("no available moves")]
    NoAvailableMoves,
    #[error("search deadline reached")]
    Timeout,
    #[error("invalid move during search: {0}")]
    InvalidMove(String),
}

/// Search configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    /// Transposition table slots, rounded up to a power of two.
    pub tt_capacity: usize,
    /// Seed for the root tie-break; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            tt_capacity: DEFAULT_TT_CAPACITY,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Searching,
}

/// Statistics collected during the most recent search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub quiescence_nodes: u64,
    pub beta_cutoffs: u64,
    pub tt_hits: usize,
    pub tt_stores: usize,
    pub tt_collisions: usize,
    pub completed_depth: u8,
    pub elapsed: Duration,
}

impl SearchStats {
    fn reset(&mut self) {
        *self = SearchStats::default();
    }
}

/// The result of the last completed iteration of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport<M> {
    pub best_move: M,
    pub score: Score,
    pub depth: u8,
    pub legal_moves: usize,
    /// Every root move sharing the best score; `best_move` is one of them.
    pub best_moves: Vec<M>,
    pub nodes: u64,
    pub elapsed: Duration,
}

/// State that outlives a single search: the transposition table, killer
/// moves and the tie-break RNG.
pub struct SearchContext<M: Copy + PartialEq> {
    config: SearchConfig,
    stats: SearchStats,
    transposition_table: TranspositionTable<M>,
    killers: KillerMoves<M>,
    rng: StdRng,
    state: SearchState,
}

impl<M: Copy + PartialEq> Default for SearchContext<M> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<M: Copy + PartialEq> SearchContext<M> {
    pub fn new(config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            stats: SearchStats::default(),
            transposition_table: TranspositionTable::new(config.tt_capacity),
            killers: KillerMoves::new(MAX_PLY),
            rng,
            state: SearchState::Idle,
        }
    }

    pub fn max_depth(&self) -> u8 {
        self.config.max_depth
    }

    pub fn set_max_depth(&mut self, max_depth: u8) {
        self.config.max_depth = max_depth;
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn transposition_table(&self) -> &TranspositionTable<M> {
        &self.transposition_table
    }

    pub fn clear_transposition_table(&mut self) {
        self.transposition_table.clear();
    }

    fn begin(&mut self) -> Result<(), SearchError> {
        debug_assert_eq!(
            self.state,
            SearchState::Idle,
            "search started while another search is running"
        );
        if self.state == SearchState::Searching {
            return Err(SearchError::AlreadySearching);
        }

        self.state = SearchState::Searching;
        self.stats.reset();
        self.transposition_table.new_search();
        self.killers.clear();
        Ok(())
    }

    fn finish(&mut self, budget: &TimeBudget) {
        self.stats.elapsed = budget.elapsed();
        self.stats.tt_hits = self.transposition_table.hits();
        self.stats.tt_stores = self.transposition_table.stores();
        self.stats.tt_collisions = self.transposition_table.collisions();
        self.state = SearchState::Idle;
    }
}

/// Borrowed collaborators of one search, threaded through the recursion.
struct Search<'a, S, G, E, O>
where
    S: GameState,
    G: MoveGenerator<S>,
{
    context: &'a mut SearchContext<G::Move>,
    move_generator: &'a G,
    evaluator: &'a E,
    move_orderer: &'a mut O,
    budget: TimeBudget,
    interruptible: bool,
    _state: std::marker::PhantomData<S>,
}

impl<'a, S, G, E, O> Search<'a, S, G, E, O>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    fn new(
        context: &'a mut SearchContext<G::Move>,
        move_generator: &'a G,
        evaluator: &'a E,
        move_orderer: &'a mut O,
        budget: TimeBudget,
    ) -> Self {
        Self {
            context,
            move_generator,
            evaluator,
            move_orderer,
            budget,
            interruptible: false,
            _state: std::marker::PhantomData,
        }
    }

    fn visit_node(&mut self) -> Result<(), SearchError> {
        self.context.stats.nodes += 1;
        if self.interruptible
            && self.context.stats.nodes % NODES_PER_DEADLINE_CHECK == 0
            && self.budget.is_exhausted()
        {
            return Err(SearchError::Timeout);
        }
        Ok(())
    }

    fn check_deadline(&self) -> Result<(), SearchError> {
        if self.interruptible && self.budget.is_exhausted() {
            return Err(SearchError::Timeout);
        }
        Ok(())
    }

    fn negamax(
        &mut self,
        state: &mut S,
        depth: i32,
        mut alpha: Score,
        beta: Score,
        ply: usize,
    ) -> Result<Score, SearchError> {
        debug_assert!(alpha < beta, "empty window ({}, {})", alpha, beta);
        self.visit_node()?;

        let mut moves = self.move_generator.generate_moves(state);
        if moves.is_empty() {
            return Ok(terminal_score(state, ply));
        }

        if ply > 0 && state.is_draw() {
            return Ok(DRAW_SCORE);
        }

        if ply >= MAX_PLY - 1 {
            return Ok(self.evaluator.evaluate(state));
        }

        let hash = state.position_hash();
        if let Some(score) = self
            .context
            .transposition_table
            .probe(hash, depth, alpha, beta, ply)
        {
            return Ok(score);
        }

        if depth <= 0 {
            return self.quiescence(state, alpha, beta, ply, 0);
        }

        let table_move = self.context.transposition_table.best_move(hash);
        let killers = self.context.killers.get(ply);
        self.order_moves(moves.as_mut(), state, table_move, killers);

        let original_alpha = alpha;
        let mut best_score = -INFINITY;
        let mut best_move = None;

        for game_move in moves.as_ref().iter() {
            let score = -with_move_applied(game_move, state, |state| {
                self.negamax(state, depth - 1, -beta, -alpha, ply + 1)
            })?;

            if score > best_score {
                best_score = score;
                best_move = Some(*game_move);
            }
            if score > alpha {
                alpha = score;
            }

            if alpha >= beta {
                self.context.stats.beta_cutoffs += 1;
                self.context.transposition_table.store(
                    hash,
                    depth,
                    best_score,
                    BoundType::LowerBound,
                    best_move,
                    ply,
                );
                if !game_move.is_tactical(state) {
                    self.context.killers.store(ply, *game_move);
                    self.move_orderer.record_cutoff(game_move, state, depth);
                }
                return Ok(best_score);
            }
        }

        let bound = if best_score <= original_alpha {
            BoundType::UpperBound
        } else {
            BoundType::Exact
        };
        self.context
            .transposition_table
            .store(hash, depth, best_score, bound, best_move, ply);

        Ok(best_score)
    }

    fn quiescence(
        &mut self,
        state: &mut S,
        mut alpha: Score,
        beta: Score,
        ply: usize,
        qdepth: u8,
    ) -> Result<Score, SearchError> {
        if qdepth > 0 {
            self.visit_node()?;
        }
        self.context.stats.quiescence_nodes += 1;

        let moves = self.move_generator.generate_moves(state);
        if moves.is_empty() {
            return Ok(terminal_score(state, ply));
        }

        let stand_pat = self.evaluator.evaluate(state);
        if stand_pat >= beta || qdepth >= MAX_QUIESCENCE_DEPTH || ply >= MAX_PLY - 1 {
            return Ok(stand_pat);
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut tactical_moves: Vec<G::Move> = moves
            .as_ref()
            .iter()
            .filter(|game_move| game_move.is_tactical(state))
            .copied()
            .collect();
        self.move_orderer.order_moves(&mut tactical_moves, state);

        let mut best_score = stand_pat;
        for game_move in tactical_moves.iter() {
            let score = -with_move_applied(game_move, state, |state| {
                self.quiescence(state, -beta, -alpha, ply + 1, qdepth + 1)
            })?;

            if score > best_score {
                best_score = score;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        Ok(best_score)
    }

    /// Orderer first, then killers just behind the tactical moves, then the
    /// table move in front of everything.
    fn order_moves(
        &self,
        moves: &mut [G::Move],
        state: &S,
        table_move: Option<G::Move>,
        killers: [Option<G::Move>; 2],
    ) {
        self.move_orderer.order_moves(moves, state);

        let first_quiet = moves
            .iter()
            .position(|game_move| !game_move.is_tactical(state))
            .unwrap_or(moves.len());
        for killer in killers.iter().rev().flatten() {
            if let Some(pos) = moves.iter().position(|m| m == killer) {
                if pos > first_quiet {
                    moves[first_quiet..=pos].rotate_right(1);
                }
            }
        }

        if let Some(table_move) = table_move {
            if let Some(pos) = moves.iter().position(|m| *m == table_move) {
                if pos > 0 {
                    moves[0..=pos].rotate_right(1);
                }
            }
        }
    }

    /// Scores every root move at `depth`. Each move is searched with the
    /// window `(best - 1, INFINITY)`, so moves tying the best get exact
    /// scores and worse moves get an upper bound below the best.
    fn search_root(
        &mut self,
        state: &mut S,
        root_moves: &mut [(G::Move, Score)],
        depth: i32,
    ) -> Result<(), SearchError> {
        self.context.stats.nodes += 1;
        let mut best_score = -INFINITY;

        for (game_move, score) in root_moves.iter_mut() {
            self.check_deadline()?;

            let alpha = if best_score == -INFINITY {
                -INFINITY
            } else {
                best_score - 1
            };
            *score = -with_move_applied(&*game_move, state, |state| {
                self.negamax(state, depth - 1, -INFINITY, -alpha, 1)
            })?;

            if *score > best_score {
                best_score = *score;
            }
        }

        Ok(())
    }
}

fn terminal_score<S: GameState>(state: &S, ply: usize) -> Score {
    if state.is_in_check() {
        mated_in(ply)
    } else {
        DRAW_SCORE
    }
}

/// Applies a move, runs `f` on the resulting state, then undoes the move,
/// even when `f` failed.
fn with_move_applied<S, M, F, R>(game_move: &M, state: &mut S, f: F) -> Result<R, SearchError>
where
    S: GameState,
    M: GameMove<State = S>,
    F: FnOnce(&mut S) -> Result<R, SearchError>,
{
    game_move
        .apply(state)
        .map_err(|err| SearchError::InvalidMove(err.to_string()))?;

    let result = f(state);

    game_move
        .undo(state)
        .map_err(|err| SearchError::InvalidMove(err.to_string()))?;

    result
}

/// Searches for the best move using iterative deepening up to the context's
/// maximum depth, within `budget`.
///
/// # Returns
///
/// - `Ok(report)` - The result of the last completed iteration
/// - `Err(SearchError::DepthTooLow)` - If the maximum depth is 0
/// - `Err(SearchError::NoAvailableMoves)` - If the side to move has no moves
#[must_use = "search returns the best move found"]
pub fn iterative_deepening<S, G, E, O>(
    context: &mut SearchContext<G::Move>,
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &mut O,
    budget: TimeBudget,
) -> Result<SearchReport<G::Move>, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    context.begin()?;
    move_orderer.new_search();

    let result = {
        let mut search = Search::new(context, move_generator, evaluator, move_orderer, budget);
        run_iterations(&mut search, state)
    };

    context.finish(&budget);
    result
}

fn run_iterations<S, G, E, O>(
    search: &mut Search<'_, S, G, E, O>,
    state: &mut S,
) -> Result<SearchReport<G::Move>, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    let max_depth = search.context.max_depth();
    if max_depth < 1 {
        return Err(SearchError::DepthTooLow);
    }

    let mut candidates = search.move_generator.generate_moves(state);
    if candidates.is_empty() {
        return Err(SearchError::NoAvailableMoves);
    }
    search.move_orderer.order_moves(candidates.as_mut(), state);

    let mut root_moves: Vec<(G::Move, Score)> = candidates
        .as_ref()
        .iter()
        .map(|&game_move| (game_move, -INFINITY))
        .collect();
    let mut completed: Option<(u8, Score, Vec<G::Move>)> = None;

    for depth in 1..=max_depth {
        if depth > 1 && search.budget.past_half() {
            debug!("not starting depth {}: over half the budget spent", depth);
            break;
        }
        search.interruptible = depth > 1;

        match search.search_root(state, &mut root_moves, depth as i32) {
            Ok(()) => {}
            Err(SearchError::Timeout) => {
                debug!("depth {} interrupted by the deadline", depth);
                break;
            }
            Err(err) => return Err(err),
        }

        // stable, so equal scores keep the previous iteration's order
        root_moves.sort_by(|(_, a), (_, b)| b.cmp(a));
        let best_score = root_moves[0].1;
        let best_moves: Vec<G::Move> = root_moves
            .iter()
            .take_while(|(_, score)| *score == best_score)
            .map(|(game_move, _)| *game_move)
            .collect();

        search.context.stats.completed_depth = depth;
        info!(
            "depth {} score {} nodes {} time {}ms best {}",
            depth,
            best_score,
            search.context.stats.nodes,
            search.budget.elapsed().as_millis(),
            best_moves[0]
        );
        completed = Some((depth, best_score, best_moves));

        if is_proven_mate(best_score, depth) {
            debug!("forced mate proven at depth {}", depth);
            break;
        }
    }

    // the first iteration cannot be interrupted, so one always completes
    let (depth, score, best_moves) = completed.ok_or(SearchError::Timeout)?;
    let choice = search.context.rng.gen_range(0..best_moves.len());

    Ok(SearchReport {
        best_move: best_moves[choice],
        score,
        depth,
        legal_moves: root_moves.len(),
        best_moves,
        nodes: search.context.stats.nodes,
        elapsed: search.budget.elapsed(),
    })
}

/// A single full-window alpha-beta search of `state` to `depth`, without
/// iterative deepening or a deadline. Returns the root score.
#[must_use = "search returns the score of the position"]
pub fn fixed_depth_search<S, G, E, O>(
    context: &mut SearchContext<G::Move>,
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &mut O,
    depth: u8,
) -> Result<Score, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    if depth < 1 {
        return Err(SearchError::DepthTooLow);
    }

    context.begin()?;
    move_orderer.new_search();
    let budget = TimeBudget::unlimited();

    let result = {
        let mut search = Search::new(context, move_generator, evaluator, move_orderer, budget);
        search.negamax(state, depth as i32, -INFINITY, INFINITY, 0)
    };

    if result.is_ok() {
        context.stats.completed_depth = depth;
    }
    context.finish(&budget);
    result
}

/// Plain negamax over every move with no pruning, no transposition table and
/// no move ordering. Follows the same node rules as the pruned search
/// (terminal and draw scoring, quiescence at the horizon), so both must agree
/// on the score of any position.
pub fn full_width_negamax<S, G, E>(
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    depth: i32,
    ply: usize,
) -> Result<Score, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
{
    let moves = move_generator.generate_moves(state);
    if moves.is_empty() {
        return Ok(terminal_score(state, ply));
    }
    if ply > 0 && state.is_draw() {
        return Ok(DRAW_SCORE);
    }
    if ply >= MAX_PLY - 1 {
        return Ok(evaluator.evaluate(state));
    }
    if depth <= 0 {
        return full_width_quiescence(state, move_generator, evaluator, ply, 0);
    }

    let mut best_score = -INFINITY;
    for game_move in moves.as_ref().iter() {
        let score = -with_move_applied(game_move, state, |state| {
            full_width_negamax(state, move_generator, evaluator, depth - 1, ply + 1)
        })?;
        best_score = best_score.max(score);
    }
    Ok(best_score)
}

fn full_width_quiescence<S, G, E>(
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    ply: usize,
    qdepth: u8,
) -> Result<Score, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
{
    let moves = move_generator.generate_moves(state);
    if moves.is_empty() {
        return Ok(terminal_score(state, ply));
    }

    let stand_pat = evaluator.evaluate(state);
    if qdepth >= MAX_QUIESCENCE_DEPTH || ply >= MAX_PLY - 1 {
        return Ok(stand_pat);
    }

    let mut best_score = stand_pat;
    for game_move in moves.as_ref().iter() {
        if !game_move.is_tactical(state) {
            continue;
        }
        let score = -with_move_applied(game_move, state, |state| {
            full_width_quiescence(state, move_generator, evaluator, ply + 1, qdepth + 1)
        })?;
        best_score = best_score.max(score);
    }
    Ok(best_score)
}

/// True when a score proves a forced result within `depth` plies.
pub fn is_proven_mate(score: Score, depth: u8) -> bool {
    is_mate_score(score) && mate_distance(score).map_or(false, |d| d <= depth as i32)
}
