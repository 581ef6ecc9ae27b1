//! 游戏核心逻辑模块（棋盘状态、规则判定等）。

pub mod rules;
pub mod state;

pub use rules::{
    evaluate_outcome,
    winning_line,
    GameEvent,
    Outcome,
    RuleEngine,
    RuleError,
    RuleResolution,
    WinningLine,
    LINES,
};
pub use state::{GameState, IntegrityError, Mark, BOARD_CELLS};
