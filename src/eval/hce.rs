use cozy_chess::{Color, Piece};
use crate::board::cozy::Position;

// Classic centipawn piece values for the material-only fallback.
const PAWN: i32 = 100;
const KNIGHT: i32 = 320;
const BISHOP: i32 = 330;
const ROOK: i32 = 500;
const QUEEN: i32 = 900;

// Side-agnostic material in centipawns: positive means White has more material.
pub fn material_cp_side_agnostic(pos: &Position) -> i32 {
    let diff = |p: Piece| pos.count(Color::White, p) - pos.count(Color::Black, p);
    diff(Piece::Pawn) * PAWN
        + diff(Piece::Knight) * KNIGHT
        + diff(Piece::Bishop) * BISHOP
        + diff(Piece::Rook) * ROOK
        + diff(Piece::Queen) * QUEEN
}

/// Material from side-to-move perspective; used when NNUE is disabled or failed.
pub fn material_cp(pos: &Position) -> i32 {
    let base = material_cp_side_agnostic(pos);
    if pos.side_to_move() == Color::White { base } else { -base }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_is_from_side_to_move() {
        assert_eq!(material_cp(&Position::startpos()), 0);
        let w = Position::from_fen("4k3/8/8/8/8/8/8/3RK3 w - - 0 1", false).unwrap();
        let b = Position::from_fen("4k3/8/8/8/8/8/8/3RK3 b - - 0 1", false).unwrap();
        assert_eq!(material_cp(&w), 500);
        assert_eq!(material_cp(&b), -500);
    }
}
