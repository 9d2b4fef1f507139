use cozy_chess::{BitBoard, Board, Color, Piece, Square};
use crate::init::{tables, FEATURE_PIECES};

pub const HALFKP_PIECE_ORDER: [Piece; FEATURE_PIECES] = [
    Piece::Pawn,
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen,
];

pub const HALFKP_DIM: usize = 64 * 2 * FEATURE_PIECES * 64;

#[inline]
pub fn halfkp_dim() -> usize { HALFKP_DIM }

/// Non-king piece placement, indexed [colour][piece in HALFKP_PIECE_ORDER].
pub type Layout = [[BitBoard; FEATURE_PIECES]; 2];

pub const EMPTY_LAYOUT: Layout = [[BitBoard::EMPTY; FEATURE_PIECES]; 2];

pub fn layout(board: &Board) -> Layout {
    let mut out = EMPTY_LAYOUT;
    for color in Color::ALL {
        for (pi, p) in HALFKP_PIECE_ORDER.iter().enumerate() {
            out[color as usize][pi] = board.colored_pieces(color, *p);
        }
    }
    out
}

/// HalfKP feature for a piece seen from `persp`, whose king stands on `king`.
#[inline]
pub fn feature_index(persp: Color, king: Square, color: Color, piece_idx: usize, sq: Square) -> usize {
    let t = tables();
    let p = persp as usize;
    t.king_base[p][king as usize] + t.piece_square[p][color as usize][piece_idx][sq as usize]
}

/// Feature extractor for king-relative piece-square inputs.
pub struct HalfKp;

impl HalfKp {
    pub fn dim(&self) -> usize { halfkp_dim() }

    pub fn active_indices(&self, board: &Board, persp: Color) -> Vec<usize> {
        let king = board.king(persp);
        let lay = layout(board);
        let mut out = Vec::with_capacity(32);
        for color in Color::ALL {
            for pi in 0..FEATURE_PIECES {
                for sq in lay[color as usize][pi] {
                    out.push(feature_index(persp, king, color, pi, sq));
                }
            }
        }
        out
    }
}
