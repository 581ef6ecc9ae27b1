//! 浏览器环境下的集成测试（通过 wasm-pack test 运行）。

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

use wasm_tictactoe::{
    check_outcome, get_ai_move, AiDecision, GameEngine, GameState, Mark, Outcome, RuleResolution,
};

wasm_bindgen_test_configure!(run_in_browser);

fn state_json(state: &GameState) -> String {
    serde_json::to_string(state).expect("state should serialize")
}

#[wasm_bindgen_test]
fn engine_plays_an_opening_exchange() {
    let mut engine = GameEngine::new(None).expect("engine should construct");

    let resolution = engine.place_mark(0).expect("human move should succeed");
    let resolution: RuleResolution =
        serde_json::from_str(&resolution).expect("resolution should parse");
    assert_eq!(resolution.state.mark_at(0), Some(Mark::X));
    assert_eq!(resolution.outcome, Outcome::InProgress);

    let response = engine.apply_ai_move().expect("AI move should succeed");
    let response: serde_json::Value =
        serde_json::from_str(&response).expect("response should parse");
    let cell = response["decision"]["cell"]
        .as_u64()
        .expect("decision should carry a cell") as usize;

    let state: GameState =
        serde_json::from_str(&engine.state_json().expect("state_json should succeed"))
            .expect("state should parse");
    assert_eq!(state.mark_at(cell), Some(Mark::O));
    assert_eq!(state.mark_count(Mark::X), 1);
    assert_eq!(state.mark_count(Mark::O), 1);
}

#[wasm_bindgen_test]
fn engine_rejects_ai_move_on_human_turn() {
    let mut engine = GameEngine::new(None).expect("engine should construct");
    assert!(engine.apply_ai_move().is_err(), "X is to move, not the AI");
}

#[wasm_bindgen_test]
fn get_ai_move_blocks_the_open_threat() {
    let state = GameState::sample();
    let state = serde_wasm_bindgen::to_value(&state).expect("state should convert");
    let cell = get_ai_move(state).expect("AI should find a move");
    assert_eq!(cell, 2, "X threatens the top row, O must block at 2");
}

#[wasm_bindgen_test]
fn check_outcome_reports_a_finished_board() {
    let mut state = GameState::new();
    for cell in [0, 4, 8] {
        state.place(cell, Mark::X);
    }
    for cell in [1, 2] {
        state.place(cell, Mark::O);
    }

    let state = serde_wasm_bindgen::to_value(&state).expect("state should convert");
    let outcome = check_outcome(state).expect("outcome should evaluate");
    let outcome: Outcome = serde_wasm_bindgen::from_value(outcome).expect("outcome should convert");
    assert_eq!(outcome, Outcome::Win { winner: Mark::X });
}

#[wasm_bindgen_test]
async fn think_ai_resolves_with_a_decision() {
    let engine = GameEngine::new(Some(state_json(&GameState::sample())))
        .expect("engine should construct");

    let promise = engine.think_ai(Some(0));
    let value = JsFuture::from(promise).await.expect("promise should resolve");
    let json = value.as_string().expect("decision should be a JSON string");
    let decision: AiDecision = serde_json::from_str(&json).expect("decision should parse");

    assert_eq!(decision.cell, Some(2));
    assert!(decision.nodes > 0);
}
