//! Dual-network blend: picks a network by material imbalance, re-checks
//! borderline small-net results with the big net, then folds in optimism,
//! material, and rule-50 decay.
//!
//! Every `/` truncates toward zero and is applied in exactly this order;
//! regrouping the products changes results at integer boundaries.

use cozy_chess::{Color, Piece};
use log::debug;

use crate::board::cozy::Position;
use crate::error::{EvalError, Result};
use crate::eval::nnue::{AccumulatorCaches, AccumulatorStack, NetSize, Networks};
use crate::eval::score::{MAX_EVAL, MIN_EVAL, PAWN_VALUE};

/// Above this material imbalance the small network is trusted first.
pub const SMALLNET_THRESHOLD: i32 = 962;
/// Small-net results closer to zero than this are recomputed with the big net.
pub const REEVAL_THRESHOLD: i64 = 277;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blended {
    pub value: i32,
    /// Network whose output produced `value`.
    pub net: NetSize,
    /// The small network ran first and was overruled by the big one.
    pub reevaluated: bool,
    pub complexity: i32,
}

/// Pawn and non-pawn material balance from the side to move.
pub fn simple_eval(pos: &Position) -> i32 {
    let us = pos.side_to_move();
    let them = !us;
    PAWN_VALUE * (pos.count(us, Piece::Pawn) - pos.count(them, Piece::Pawn))
        + pos.non_pawn_material(us)
        - pos.non_pawn_material(them)
}

pub fn use_smallnet(pos: &Position) -> bool {
    simple_eval(pos).abs() > SMALLNET_THRESHOLD
}

/// Raw blend of the two network outputs.
#[inline]
pub fn nnue_blend(psqt: i32, positional: i32) -> i64 {
    (125 * psqt as i64 + 131 * positional as i64) / 128
}

/// Material scalar used to weight the blended score and optimism.
pub fn material_scale(pos: &Position) -> i32 {
    534 * pos.count_all(Piece::Pawn) + pos.non_pawn_material_total()
}

/// Steps after the network calls: complexity-scaled optimism and damping,
/// material weighting, rule-50 decay, and the tablebase-range clamp.
pub fn finalize(psqt: i32, positional: i32, optimism: i32, material: i32, rule50: i32) -> i32 {
    // i128 keeps every intermediate exact even for degenerate network outputs.
    let mut nnue = nnue_blend(psqt, positional) as i128;
    let complexity = (psqt as i128 - positional as i128).abs();
    let mut optimism = optimism as i128;
    let material = material as i128;

    optimism += optimism * complexity / 476;
    nnue -= nnue * complexity / 18236;

    let mut v = (nnue * (77871 + material) + optimism * (7191 + material)) / 77871;
    v = rule50_decay(v, rule50);
    v.clamp(MIN_EVAL as i128, MAX_EVAL as i128) as i32
}

#[inline]
pub fn rule50_decay(v: i128, rule50: i32) -> i128 {
    v - v * rule50 as i128 / 199
}

/// Blend both networks into one score for the side to move.
///
/// The caller guarantees both caches were built from `nets` after loading.
pub fn evaluate(
    nets: Networks<'_>,
    pos: &Position,
    stack: &mut AccumulatorStack,
    caches: &mut AccumulatorCaches,
    optimism: i32,
) -> Result<Blended> {
    if pos.in_check() { return Err(EvalError::InCheck); }
    stack.reset();

    let board = pos.board();
    let mut net = if use_smallnet(pos) { NetSize::Small } else { NetSize::Big };
    let (mut psqt, mut positional) = nets.get(net).evaluate(board, stack, caches.get_mut(net))?;
    let mut reevaluated = false;

    if net == NetSize::Small && nnue_blend(psqt, positional).abs() < REEVAL_THRESHOLD {
        (psqt, positional) = nets.big.evaluate(board, stack, &mut caches.big)?;
        net = NetSize::Big;
        reevaluated = true;
    }

    let value = finalize(psqt, positional, optimism, material_scale(pos), pos.rule50());
    let complexity = (psqt as i64 - positional as i64).abs().min(i32::MAX as i64) as i32;
    debug!(
        "blend: net={} reeval={} psqt={} positional={} stm={} value={}",
        net, reevaluated, psqt, positional,
        if pos.side_to_move() == Color::White { "w" } else { "b" }, value
    );
    Ok(Blended { value, net, reevaluated, complexity })
}
