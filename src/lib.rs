pub mod ai;
pub mod game;
pub mod utils;

use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::js_sys::Promise;

pub use ai::{best_cell, decide, find_best_move, AiDecision, SearchResult, SearchStats, AI_MARK};
pub use game::{
    evaluate_outcome, winning_line, GameEvent, GameState, IntegrityError, Mark, Outcome,
    RuleEngine, RuleError, RuleResolution, WinningLine, BOARD_CELLS, LINES,
};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// 原版前端在 AI 行棋前停顿的毫秒数。
const DEFAULT_AI_DELAY_MS: u32 = 700;

#[wasm_bindgen(start)]
pub fn start() {
    utils::set_panic_hook();
}

fn to_js_error(error: RuleError) -> JsValue {
    to_value(&error).unwrap_or_else(|serialize_err| JsValue::from_str(&serialize_err.to_string()))
}

fn serde_to_js_error<E: std::fmt::Display>(error: E) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn make_resolution_json(resolution: RuleResolution) -> Result<String, JsValue> {
    serde_json::to_string(&resolution).map_err(serde_to_js_error)
}

fn resolution_from_events(state: &GameState, events: Vec<GameEvent>) -> RuleResolution {
    RuleResolution::new(state.clone(), events)
}

fn log_decision(decision: &AiDecision) {
    let message = match decision.cell {
        Some(cell) => format!(
            "AI 选择格子 {cell}（评分 {}，访问 {} 个节点）",
            decision.score, decision.nodes
        ),
        None => "AI 无可行着法：对局已结束".to_string(),
    };
    web_sys::console::log_1(&message.into());
}

#[derive(Serialize)]
struct AiMoveResponse {
    decision: AiDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    applied: Option<RuleResolution>,
}

#[wasm_bindgen]
pub struct GameEngine {
    state: GameState,
}

#[wasm_bindgen]
impl GameEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(initial_state_json: Option<String>) -> Result<GameEngine, JsValue> {
        let state = if let Some(json) = initial_state_json {
            serde_json::from_str(&json).map_err(serde_to_js_error)?
        } else {
            GameState::new()
        };
        Ok(GameEngine { state })
    }

    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state).map_err(serde_to_js_error)
    }

    pub fn set_state_json(&mut self, json: &str) -> Result<(), JsValue> {
        let state: GameState = serde_json::from_str(json).map_err(serde_to_js_error)?;
        self.state = state;
        Ok(())
    }

    /// 为当前一方在 `cell` 落子，返回序列化后的结算结果。
    pub fn place_mark(&mut self, cell: usize) -> Result<String, JsValue> {
        let mut engine = RuleEngine::new();
        let events = engine
            .place_mark(&mut self.state, cell)
            .map_err(to_js_error)?;
        make_resolution_json(resolution_from_events(&self.state, events))
    }

    pub fn evaluate(&self) -> Result<JsValue, JsValue> {
        to_value(&evaluate_outcome(&self.state)).map_err(JsValue::from)
    }

    /// 计算并直接落下 AI 的最优一手。
    pub fn apply_ai_move(&mut self) -> Result<String, JsValue> {
        if self.state.next_mark() != AI_MARK {
            return Err(to_js_error(RuleError::NotAiTurn));
        }

        let decision = ai::decide(&self.state);
        log_decision(&decision);

        let applied = if let Some(cell) = decision.cell {
            let mut engine = RuleEngine::new();
            let events = engine
                .place_mark(&mut self.state, cell)
                .map_err(to_js_error)?;
            Some(resolution_from_events(&self.state, events))
        } else {
            None
        };

        let response = AiMoveResponse { decision, applied };
        serde_json::to_string(&response).map_err(serde_to_js_error)
    }

    /// 延迟后计算 AI 决策，但不改动引擎状态；前端拿到落点后再调用
    /// `place_mark`。默认停顿 700 毫秒，模拟人类可感知的思考时间。
    pub fn think_ai(&self, delay_ms: Option<u32>) -> Promise {
        let state = self.state.clone();
        let delay = delay_ms.unwrap_or(DEFAULT_AI_DELAY_MS);

        future_to_promise(async move {
            if delay > 0 {
                TimeoutFuture::new(delay).await;
            }
            let decision = ai::decide(&state);
            log_decision(&decision);
            let json = serde_json::to_string(&decision).map_err(serde_to_js_error)?;
            Ok(JsValue::from_str(&json))
        })
    }
}

/// 返回一个空棋盘状态，方便前端开局或调试。
#[wasm_bindgen(js_name = "createGameState")]
pub fn create_game_state() -> Result<JsValue, JsValue> {
    to_value(&GameState::new()).map_err(JsValue::from)
}

/// 判定传入棋局：进行中、某方获胜或和棋。
#[wasm_bindgen(js_name = "evaluateOutcome")]
pub fn check_outcome(state: JsValue) -> Result<JsValue, JsValue> {
    let state: GameState = from_value(state).map_err(JsValue::from)?;
    to_value(&evaluate_outcome(&state)).map_err(JsValue::from)
}

/// 返回已连成的取胜线（若有），供前端高亮。
#[wasm_bindgen(js_name = "winningLine")]
pub fn find_winning_line(state: JsValue) -> Result<JsValue, JsValue> {
    let state: GameState = from_value(state).map_err(JsValue::from)?;
    to_value(&winning_line(&state)).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "placeMark")]
pub fn place_mark(state: JsValue, cell: usize) -> Result<JsValue, JsValue> {
    let mut state: GameState = from_value(state).map_err(JsValue::from)?;
    let mut engine = RuleEngine::new();
    match engine.place_mark(&mut state, cell) {
        Ok(events) => to_value(&RuleResolution::new(state, events)).map_err(JsValue::from),
        Err(error) => Err(to_js_error(error)),
    }
}

/// 返回 O 的最优落点下标。棋局已结束时报错，调用方应先用
/// `evaluateOutcome` 把关。
#[wasm_bindgen(js_name = "getAiMove")]
pub fn get_ai_move(state: JsValue) -> Result<u32, JsValue> {
    let state: GameState = from_value(state).map_err(JsValue::from)?;
    match ai::best_cell(&state) {
        Some(cell) => Ok(cell as u32),
        None => Err(to_js_error(RuleError::GameFinished)),
    }
}

/// 返回完整的 AI 决策（落点、评分、节点数），供调试面板使用。
#[wasm_bindgen(js_name = "computeAiMove")]
pub fn compute_ai_move(state: JsValue) -> Result<JsValue, JsValue> {
    let state: GameState = from_value(state).map_err(JsValue::from)?;
    let decision = ai::decide(&state);
    to_value(&decision).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "validateState")]
pub fn validate_state(state: JsValue) -> Result<(), JsValue> {
    let state: GameState = from_value(state).map_err(JsValue::from)?;
    state
        .integrity_check()
        .map_err(|error| to_js_error(RuleError::IntegrityViolation { error }))?;
    Ok(())
}
