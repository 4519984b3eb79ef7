#![cfg(target_arch = "wasm32")]

use js_sys::{Object, Reflect};
use lotka_wasm::{presets, simulate, WasmSession};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn config_object(entries: &[(&str, JsValue)]) -> JsValue {
    let object = Object::new();
    for (key, value) in entries {
        Reflect::set(&object, &JsValue::from_str(key), value).expect("set property");
    }
    object.into()
}

#[wasm_bindgen_test]
fn session_series_have_steps_plus_one_samples() {
    let mut session = WasmSession::new();
    session
        .update(config_object(&[("steps", JsValue::from_f64(100.0))]))
        .expect("partial config uses defaults");

    assert_eq!(session.times().expect("times").length(), 101);
    assert_eq!(session.prey().expect("prey").length(), 101);
    assert_eq!(session.predator().expect("predator").length(), 101);
}

#[wasm_bindgen_test]
fn session_rejects_invalid_update_and_keeps_result() {
    let mut session = WasmSession::new();
    let before = session.prey().expect("prey").to_vec();

    let result = session.update(config_object(&[("growth_rate", JsValue::from_f64(0.0))]));
    assert!(result.is_err(), "zero growth rate must be rejected");

    assert!(session.has_trajectory());
    assert_eq!(session.prey().expect("prey").to_vec(), before);
}

#[wasm_bindgen_test]
fn session_rejects_unknown_option_name() {
    let mut session = WasmSession::new();
    assert!(session.set_option("alpha", 1.0).is_err());
    assert!(session.set_option("growth_rate", 0.5).is_ok());
}

#[wasm_bindgen_test]
fn simulate_reports_invalid_horizon() {
    let result = simulate(config_object(&[("steps", JsValue::from_f64(0.0))]));
    let err = result.expect_err("zero steps");
    let message = err.as_string().expect("string error");
    assert!(message.contains("horizon"), "unexpected message: {message}");
}

#[wasm_bindgen_test]
fn analysis_payloads_serialize() {
    let mut session = WasmSession::new();
    session.load_preset("foxes-vs-hares").expect("known preset");
    assert!(session.graphs().is_ok());
    assert!(session.summary().is_ok());
    assert!(session.equilibria().is_ok());
    assert!(session.nullclines(Vec::new()).is_ok());
    assert!(session.direction_field(vec![0.0, 20.0, 0.0, 20.0], 8, 8).is_ok());
    assert!(session.nullclines(vec![0.0, 1.0]).is_err());
    assert!(presets().is_ok());
}
