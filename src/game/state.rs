use serde::{Deserialize, Serialize};

/// 棋盘格子总数（3×3）。
pub const BOARD_CELLS: usize = 9;

/// 棋子标记。X 先行，O 由 AI 执子。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum IntegrityError {
    MarkCountSkew { x_count: usize, o_count: usize },
}

/// 游戏整体状态。格子按行优先排列，下标 0–8。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameState {
    #[serde(default)]
    pub squares: [Option<Mark>; BOARD_CELLS],
}

impl GameState {
    pub fn new() -> Self {
        Self {
            squares: [None; BOARD_CELLS],
        }
    }

    pub fn from_squares(squares: [Option<Mark>; BOARD_CELLS]) -> Self {
        Self { squares }
    }

    pub fn mark_at(&self, cell: usize) -> Option<Mark> {
        self.squares.get(cell).copied().flatten()
    }

    pub fn is_free(&self, cell: usize) -> bool {
        self.mark_at(cell).is_none()
    }

    /// 直接写入格子，不做合法性检查；规则校验由 `RuleEngine` 负责，
    /// 搜索过程也用它完成落子-回退的原地试探。
    pub fn place(&mut self, cell: usize, mark: Mark) {
        self.squares[cell] = Some(mark);
    }

    pub fn clear(&mut self, cell: usize) {
        self.squares[cell] = None;
    }

    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|cell| cell.is_some())
    }

    pub fn mark_count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|cell| **cell == Some(mark))
            .count()
    }

    /// 轮到落子的一方。X 先行、双方交替，因此直接由双方子数推出，
    /// 不单独存储回合标志。
    pub fn next_mark(&self) -> Mark {
        if self.mark_count(Mark::X) == self.mark_count(Mark::O) {
            Mark::X
        } else {
            Mark::O
        }
    }

    pub fn integrity_check(&self) -> Result<(), IntegrityError> {
        let x_count = self.mark_count(Mark::X);
        let o_count = self.mark_count(Mark::O);
        if x_count != o_count && x_count != o_count + 1 {
            return Err(IntegrityError::MarkCountSkew { x_count, o_count });
        }
        Ok(())
    }

    /// 返回一个中局示例状态，方便前端调试或测试使用。
    pub fn sample() -> Self {
        let mut state = Self::new();
        state.place(0, Mark::X);
        state.place(4, Mark::O);
        state.place(1, Mark::X);
        state
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
