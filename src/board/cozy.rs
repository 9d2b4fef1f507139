use cozy_chess::{Board as CozyBoard, Color, Piece};
use crate::error::{EvalError, Result};
use crate::eval::score::{BISHOP_VALUE, KNIGHT_VALUE, QUEEN_VALUE, ROOK_VALUE};

/// Read-only view of a position with the material queries the evaluator needs.
#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default() }
    }

    /// Parse a FEN. Chess960 castling rights are read in Shredder notation.
    pub fn from_fen(fen: &str, chess960: bool) -> Result<Self> {
        if fen.trim().is_empty() { return Err(EvalError::BadArg("empty FEN")); }
        CozyBoard::from_fen(fen.trim(), chess960)
            .map(|b| Self { board: b })
            .map_err(|e| EvalError::BadPosition(format!("FEN error: {e:?}")))
    }

    pub fn from_board(board: CozyBoard) -> Self { Self { board } }

    pub fn board(&self) -> &CozyBoard { &self.board }

    pub fn side_to_move(&self) -> Color { self.board.side_to_move() }

    pub fn in_check(&self) -> bool { !self.board.checkers().is_empty() }

    /// Half-move clock in plies (the rule-50 counter).
    pub fn rule50(&self) -> i32 { self.board.halfmove_clock() as i32 }

    pub fn count(&self, color: Color, piece: Piece) -> i32 {
        self.board.colored_pieces(color, piece).len() as i32
    }

    pub fn count_all(&self, piece: Piece) -> i32 {
        self.board.pieces(piece).len() as i32
    }

    pub fn non_pawn_material(&self, color: Color) -> i32 {
        self.count(color, Piece::Knight) * KNIGHT_VALUE
            + self.count(color, Piece::Bishop) * BISHOP_VALUE
            + self.count(color, Piece::Rook) * ROOK_VALUE
            + self.count(color, Piece::Queen) * QUEEN_VALUE
    }

    pub fn non_pawn_material_total(&self) -> i32 {
        self.non_pawn_material(Color::White) + self.non_pawn_material(Color::Black)
    }
}
