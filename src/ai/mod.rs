//! AI 对手模块（极小极大搜索与 α-β 剪枝）。

pub mod minimax;

pub use minimax::{best_cell, decide, find_best_move, AiDecision, SearchResult, SearchStats, AI_MARK};
