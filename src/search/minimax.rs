//! Depth-limited minimax with alpha-beta pruning over [`Projection`]s.
//!
//! The searching player maximizes, the rival minimizes. Who moves at a node
//! is read from the projection, so extra turns (skips, wild draws) simply
//! produce consecutive maximizing or minimizing plies.

use tracing::trace;

use crate::action::{Move, PlayerId};
use crate::search::evaluate::{evaluate, terminal_score};
use crate::search::projection::Projection;
use crate::search::{SearchConfig, SearchError};

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes below the root that were scored or expanded.
    pub nodes: usize,
    /// Deepest ply visited.
    pub deepest: usize,
    pub cutoffs: usize,
}

pub struct Search<'a> {
    me: PlayerId,
    config: &'a SearchConfig,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    pub fn new(me: PlayerId, config: &'a SearchConfig) -> Self {
        Self {
            me,
            config,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Best move at `root` with its score. Equal scores keep the earlier move.
    pub fn best_move(&mut self, root: &Projection) -> Result<(Move, i32), SearchError> {
        if root.mover() != self.me {
            return Err(SearchError::NotOnMove {
                mover: root.mover(),
                perspective: self.me,
            });
        }
        let mut alpha = i32::MIN;
        let beta = i32::MAX;
        let mut best: Option<(Move, i32)> = None;
        for mv in root.legal_moves() {
            let mut child = root.clone();
            child.apply(mv)?;
            let score = self.alpha_beta(&child, 1, alpha, beta)?;
            trace!(?mv, score, "root move scored");
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
            alpha = alpha.max(score);
        }
        // Nothing playable and nothing to draw: the engine still accepts a draw,
        // which ends the turn.
        Ok(best.unwrap_or((Move::Draw, evaluate(root, self.me, &self.config.weights))))
    }

    fn alpha_beta(
        &mut self,
        node: &Projection,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<i32, SearchError> {
        self.stats.nodes += 1;
        self.stats.deepest = self.stats.deepest.max(depth);
        if node.is_terminal() {
            let plies_left = self.config.max_depth.saturating_sub(depth);
            return Ok(terminal_score(node, self.me, plies_left));
        }
        if depth >= self.config.max_depth {
            return Ok(evaluate(node, self.me, &self.config.weights));
        }
        let moves = node.legal_moves();
        if moves.is_empty() {
            return Ok(evaluate(node, self.me, &self.config.weights));
        }

        let maximizing = node.mover() == self.me;
        let mut value = if maximizing { i32::MIN } else { i32::MAX };
        for mv in moves {
            let mut child = node.clone();
            child.apply(mv)?;
            let score = self.alpha_beta(&child, depth + 1, alpha, beta)?;
            if maximizing {
                value = value.max(score);
                alpha = alpha.max(value);
            } else {
                value = value.min(score);
                beta = beta.min(value);
            }
            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }
        Ok(value)
    }
}
