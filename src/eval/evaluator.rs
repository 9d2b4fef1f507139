use log::warn;
use serde::{Deserialize, Serialize};

use crate::board::cozy::Position;
use crate::error::Result;
use crate::eval::context::EvalContext;
use crate::eval::hce::material_cp;
use crate::eval::score::{is_mate_like, rule50_scale_cp, to_cp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// When false every position gets the material-only score.
    pub enable_nnue: bool,
    pub optimism: i32,
    /// Scale the centipawn score toward zero as the fifty-move counter grows.
    pub apply_rule50_damping: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self { enable_nnue: true, optimism: 0, apply_rule50_damping: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EvalResult {
    /// Side-to-move score in centipawns.
    pub cp: i32,
    /// Blended internal value; zero when NNUE did not produce the score.
    pub value: i32,
    pub used_nnue: bool,
}

/// Config-driven front end over an `EvalContext` with a material fallback.
pub struct Evaluator {
    cfg: EvalConfig,
    ctx: EvalContext,
    last_error: Option<String>,
}

impl Evaluator {
    pub fn new(cfg: EvalConfig, ctx: EvalContext) -> Self {
        Self { cfg, ctx, last_error: None }
    }

    pub fn config(&self) -> &EvalConfig { &self.cfg }

    pub fn context(&self) -> &EvalContext { &self.ctx }

    pub fn context_mut(&mut self) -> &mut EvalContext { &mut self.ctx }

    pub fn last_error(&self) -> Option<&str> { self.last_error.as_deref() }

    pub fn evaluate_position(&mut self, pos: &Position) -> Result<EvalResult> {
        if !self.cfg.enable_nnue {
            self.last_error = None;
            return Ok(EvalResult { cp: material_cp(pos), value: 0, used_nnue: false });
        }
        match self.ctx.evaluate(pos, self.cfg.optimism) {
            Ok(b) => {
                let mut cp = to_cp(b.value, pos);
                if self.cfg.apply_rule50_damping && !is_mate_like(cp) {
                    cp = rule50_scale_cp(cp, pos.rule50());
                }
                self.last_error = None;
                Ok(EvalResult { cp, value: b.value, used_nnue: true })
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Like `evaluate_position`, but an NNUE failure yields the material score
    /// (`used_nnue == false`) and leaves the reason in `last_error`.
    pub fn evaluate_or_fallback(&mut self, pos: &Position) -> EvalResult {
        self.evaluate_position(pos).unwrap_or_else(|e| {
            warn!("nnue evaluation failed, using material fallback: {}", e);
            EvalResult { cp: material_cp(pos), value: 0, used_nnue: false }
        })
    }
}
