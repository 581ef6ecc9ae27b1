use serde::{Deserialize, Serialize};

use crate::game::{evaluate_outcome, GameState, Mark, Outcome, BOARD_CELLS};

/// AI 执子方。O 后行，是搜索中的最大化一方。
pub const AI_MARK: Mark = Mark::O;

/// 一次搜索调用的结果。终局节点只有评分，没有着法。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    pub nodes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AiDecision {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<usize>,
    pub score: i32,
    pub nodes: u64,
}

/// 带 α-β 剪枝的极小极大搜索。评分固定以 O 为视角：+1 为 O 胜，
/// -1 为 X 胜，0 为和棋。空格按下标升序展开，同分时保留先遇到的
/// 着法；每次试探落子都在返回前回退，包括剪枝提前退出的分支。
pub fn find_best_move(
    state: &mut GameState,
    to_move: Mark,
    mut alpha: i32,
    mut beta: i32,
    stats: &mut SearchStats,
) -> SearchResult {
    stats.nodes += 1;

    match evaluate_outcome(state) {
        Outcome::Win { winner: Mark::X } => {
            return SearchResult {
                score: -1,
                cell: None,
            }
        }
        Outcome::Win { winner: Mark::O } => {
            return SearchResult {
                score: 1,
                cell: None,
            }
        }
        Outcome::Draw => {
            return SearchResult {
                score: 0,
                cell: None,
            }
        }
        Outcome::InProgress => {}
    }

    let mut best_cell = None;
    if to_move == AI_MARK {
        let mut best_score = i32::MIN;
        for cell in 0..BOARD_CELLS {
            if !state.is_free(cell) {
                continue;
            }
            state.place(cell, to_move);
            let score = find_best_move(state, to_move.opponent(), alpha, beta, stats).score;
            state.clear(cell);

            if score > best_score {
                best_score = score;
                best_cell = Some(cell);
            }
            alpha = alpha.max(best_score);
            if beta <= alpha {
                break;
            }
        }
        SearchResult {
            score: best_score,
            cell: best_cell,
        }
    } else {
        let mut best_score = i32::MAX;
        for cell in 0..BOARD_CELLS {
            if !state.is_free(cell) {
                continue;
            }
            state.place(cell, to_move);
            let score = find_best_move(state, to_move.opponent(), alpha, beta, stats).score;
            state.clear(cell);

            if score < best_score {
                best_score = score;
                best_cell = Some(cell);
            }
            beta = beta.min(best_score);
            if beta <= alpha {
                break;
            }
        }
        SearchResult {
            score: best_score,
            cell: best_cell,
        }
    }
}

/// 为 O 计算最优决策。不修改传入的状态，搜索在克隆上进行。
pub fn decide(state: &GameState) -> AiDecision {
    let mut stats = SearchStats::default();
    let mut scratch = state.clone();
    let result = find_best_move(&mut scratch, AI_MARK, i32::MIN, i32::MAX, &mut stats);

    AiDecision {
        cell: result.cell,
        score: result.score,
        nodes: stats.nodes,
    }
}

/// 返回 O 的最优落点；棋局已结束时返回 `None`。
pub fn best_cell(state: &GameState) -> Option<usize> {
    decide(state).cell
}
