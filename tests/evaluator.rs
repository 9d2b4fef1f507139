mod common;

use nnue_blend::eval::score::rule50_scale_cp;
use nnue_blend::{EvalConfig, EvalContext, EvalError, Evaluator, Position};
use pretty_assertions::assert_eq;

fn ready(cfg: EvalConfig, big_bias: i32) -> Evaluator {
    let mut ctx = EvalContext::create(".");
    ctx.install_networks(common::bias_net(4, big_bias), common::bias_net(4, big_bias)).unwrap();
    Evaluator::new(cfg, ctx)
}

#[test]
fn disabled_nnue_uses_material_score() {
    let cfg = EvalConfig { enable_nnue: false, ..EvalConfig::default() };
    // no networks needed on this path
    let mut ev = Evaluator::new(cfg, EvalContext::create("."));
    let w = ev.evaluate_position(&Position::from_fen(common::QUEEN_UP_W, false).unwrap()).unwrap();
    let b = ev.evaluate_position(&Position::from_fen(common::QUEEN_UP_B, false).unwrap()).unwrap();
    assert_eq!((w.cp, w.used_nnue), (900, false));
    assert_eq!((b.cp, b.used_nnue), (-900, false));
    assert!(ev.last_error().is_none());
}

#[test]
fn startpos_through_evaluator() {
    let mut ctx = EvalContext::create(".");
    ctx.install_networks(common::bias_net(8, 40), common::bias_net(4, 500)).unwrap();
    let mut ev = Evaluator::new(EvalConfig::default(), ctx);
    let r = ev.evaluate_position(&Position::startpos()).unwrap();
    assert_eq!((r.value, r.cp, r.used_nnue), (52, 14, true));
}

#[test]
fn unloaded_context_falls_back_and_records_error() {
    let mut ev = Evaluator::new(EvalConfig::default(), EvalContext::create("."));
    let pos = Position::from_fen(common::QUEEN_UP_B, false).unwrap();
    assert!(matches!(ev.evaluate_position(&pos), Err(EvalError::NotReady)));
    assert_eq!(ev.last_error(), Some("networks not loaded"));

    let r = ev.evaluate_or_fallback(&pos);
    assert_eq!((r.cp, r.value, r.used_nnue), (-900, 0, false));
    assert!(ev.last_error().is_some());
}

#[test]
fn success_clears_last_error() {
    let mut ev = ready(EvalConfig::default(), 40);
    let check = Position::from_fen(common::IN_CHECK, false).unwrap();
    let r = ev.evaluate_or_fallback(&check);
    assert!(!r.used_nnue);
    assert_eq!(ev.last_error(), Some("side to move is in check"));
    assert!(ev.evaluate_position(&Position::startpos()).unwrap().used_nnue);
    assert!(ev.last_error().is_none());
}

#[test]
fn rule50_damping_scales_centipawns() {
    let fen = "4k3/pp6/8/8/8/8/PP6/4K3 w - - 50 70";
    let pos = Position::from_fen(fen, false).unwrap();
    let plain = ready(EvalConfig::default(), 300).evaluate_position(&pos).unwrap();
    let damped = ready(EvalConfig { apply_rule50_damping: true, ..EvalConfig::default() }, 300)
        .evaluate_position(&pos)
        .unwrap();
    assert_eq!(damped.value, plain.value);
    assert!(plain.cp > 0);
    assert_eq!(damped.cp, rule50_scale_cp(plain.cp, 50));
    assert!(damped.cp < plain.cp);
}

#[test]
fn optimism_from_config_reaches_the_blend() {
    let cfg = EvalConfig { optimism: 100, ..EvalConfig::default() };
    let r = ready(cfg, 0).evaluate_position(&Position::startpos()).unwrap();
    assert_eq!(r.value, 41);
}

#[test]
fn config_json_fills_defaults() {
    let cfg: EvalConfig = serde_json::from_str(r#"{"optimism": -12}"#).unwrap();
    assert_eq!(cfg, EvalConfig { enable_nnue: true, optimism: -12, apply_rule50_damping: false });
    let cfg: EvalConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, EvalConfig::default());
    let text = serde_json::to_string(&EvalConfig::default()).unwrap();
    assert!(text.contains("\"enable_nnue\":true"));
}

#[test]
fn result_serializes_as_flat_json() {
    let mut ev = ready(EvalConfig::default(), 40);
    let r = ev.evaluate_position(&Position::startpos()).unwrap();
    let v: serde_json::Value = serde_json::to_value(r).unwrap();
    assert_eq!(v["used_nnue"], serde_json::Value::Bool(true));
    assert_eq!(v["cp"].as_i64(), Some(r.cp as i64));
}
