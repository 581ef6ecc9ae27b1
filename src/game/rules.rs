use serde::{Deserialize, Serialize};

use super::state::{GameState, IntegrityError, Mark, BOARD_CELLS};

/// 八条取胜线：三行、三列、两条对角线。
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// 已连成的取胜线，供前端高亮显示。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinningLine {
    pub winner: Mark,
    pub line: [usize; 3],
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Outcome {
    InProgress,
    Win { winner: Mark },
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

pub fn winning_line(state: &GameState) -> Option<WinningLine> {
    LINES.iter().find_map(|&line| {
        let [a, b, c] = line;
        match state.mark_at(a) {
            Some(mark) if state.mark_at(b) == Some(mark) && state.mark_at(c) == Some(mark) => {
                Some(WinningLine { winner: mark, line })
            }
            _ => None,
        }
    })
}

/// 判定当前棋局：有连线即胜，棋盘满则和，否则对局继续。
/// 纯函数，既用于渲染状态文本，也作为搜索的终局判据。
pub fn evaluate_outcome(state: &GameState) -> Outcome {
    if let Some(win) = winning_line(state) {
        return Outcome::Win { winner: win.winner };
    }
    if state.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum RuleError {
    GameFinished,
    CellOutOfRange { cell: usize },
    CellOccupied { cell: usize },
    NotAiTurn,
    IntegrityViolation { error: IntegrityError },
}

/// 落子产生的事件流。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum GameEvent {
    MarkPlaced { mark: Mark, cell: usize },
    GameWon { winner: Mark, line: [usize; 3] },
    GameDrawn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleResolution {
    pub state: GameState,
    pub events: Vec<GameEvent>,
    pub outcome: Outcome,
}

impl RuleResolution {
    pub fn new(state: GameState, mut events: Vec<GameEvent>) -> Self {
        let outcome = evaluate_outcome(&state);
        match outcome {
            Outcome::Win { .. } => {
                let has_event = events
                    .iter()
                    .any(|event| matches!(event, GameEvent::GameWon { .. }));
                if !has_event {
                    if let Some(win) = winning_line(&state) {
                        events.push(GameEvent::GameWon {
                            winner: win.winner,
                            line: win.line,
                        });
                    }
                }
            }
            Outcome::Draw => {
                let has_event = events
                    .iter()
                    .any(|event| matches!(event, GameEvent::GameDrawn));
                if !has_event {
                    events.push(GameEvent::GameDrawn);
                }
            }
            Outcome::InProgress => {}
        }

        Self {
            state,
            events,
            outcome,
        }
    }
}

#[derive(Default)]
pub struct RuleEngine;

impl RuleEngine {
    pub fn new() -> Self {
        Self
    }

    fn ensure_integrity(state: &GameState) -> Result<(), RuleError> {
        state
            .integrity_check()
            .map_err(|error| RuleError::IntegrityViolation { error })
    }

    fn ensure_in_progress(state: &GameState) -> Result<(), RuleError> {
        if evaluate_outcome(state).is_terminal() {
            return Err(RuleError::GameFinished);
        }
        Ok(())
    }

    /// 在 `cell` 落下当前一方的棋子。已结束的对局和已占用的
    /// 格子一律拒绝。
    pub fn place_mark(
        &mut self,
        state: &mut GameState,
        cell: usize,
    ) -> Result<Vec<GameEvent>, RuleError> {
        Self::ensure_integrity(state)?;
        Self::ensure_in_progress(state)?;

        if cell >= BOARD_CELLS {
            return Err(RuleError::CellOutOfRange { cell });
        }
        if !state.is_free(cell) {
            return Err(RuleError::CellOccupied { cell });
        }

        let mark = state.next_mark();
        state.place(cell, mark);

        let mut events = vec![GameEvent::MarkPlaced { mark, cell }];
        match evaluate_outcome(state) {
            Outcome::Win { .. } => {
                if let Some(win) = winning_line(state) {
                    events.push(GameEvent::GameWon {
                        winner: win.winner,
                        line: win.line,
                    });
                }
            }
            Outcome::Draw => events.push(GameEvent::GameDrawn),
            Outcome::InProgress => {}
        }

        Ok(events)
    }
}
