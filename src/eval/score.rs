//! Score units and conversions.
//!
//! Values are engine-internal units where a pawn is worth `PAWN_VALUE`.

use crate::board::cozy::Position;
use cozy_chess::Piece;

pub const PAWN_VALUE: i32 = 208;
pub const KNIGHT_VALUE: i32 = 781;
pub const BISHOP_VALUE: i32 = 825;
pub const ROOK_VALUE: i32 = 1276;
pub const QUEEN_VALUE: i32 = 2538;

pub const MAX_PLY: i32 = 246;
pub const VALUE_MATE: i32 = 32_000;
pub const VALUE_MATE_IN_MAX_PLY: i32 = VALUE_MATE - MAX_PLY;
pub const VALUE_TB: i32 = VALUE_MATE_IN_MAX_PLY - 1;
pub const VALUE_TB_WIN_IN_MAX_PLY: i32 = VALUE_TB - MAX_PLY;
pub const VALUE_TB_LOSS_IN_MAX_PLY: i32 = -VALUE_TB_WIN_IN_MAX_PLY;

/// Lowest and highest score the blend may emit.
pub const MIN_EVAL: i32 = VALUE_TB_LOSS_IN_MAX_PLY + 1;
pub const MAX_EVAL: i32 = VALUE_TB_WIN_IN_MAX_PLY - 1;

/// Centipawn scores at or beyond this magnitude are treated as mate scores.
pub const MATE_LIKE_CP: i32 = 29_000;

// Win-rate model coefficients, fitted against the material count.
const AS: [f64; 4] = [-13.50030198, 40.92780883, -36.82753545, 386.83004070];

/// Value of one pawn advantage (in internal units) at the given material.
fn win_rate_a(pos: &Position) -> f64 {
    let material = pos.count_all(Piece::Pawn)
        + 3 * pos.count_all(Piece::Knight)
        + 3 * pos.count_all(Piece::Bishop)
        + 5 * pos.count_all(Piece::Rook)
        + 9 * pos.count_all(Piece::Queen);
    let m = material.clamp(17, 78) as f64 / 58.0;
    ((AS[0] * m + AS[1]) * m + AS[2]) * m + AS[3]
}

/// Convert an internal value into normalised centipawns.
pub fn to_cp(v: i32, pos: &Position) -> i32 {
    (100.0 * v as f64 / win_rate_a(pos)).round() as i32
}

pub fn is_mate_like(cp: i32) -> bool {
    cp >= MATE_LIKE_CP || cp <= -MATE_LIKE_CP
}

/// Scale a centipawn score toward zero as the fifty-move counter advances.
pub fn rule50_scale_cp(cp: i32, rule50_plies: i32) -> i32 {
    let scale = (100 - rule50_plies.clamp(0, 100)) as i64;
    let mag = (cp.unsigned_abs() as i64 * scale + 50) / 100;
    // mag <= |cp|, so it fits back into i32 for every input
    (if cp >= 0 { mag } else { -mag }) as i32
}
