pub mod blend;
pub mod context;
pub mod evaluator;
pub mod hce;
pub mod nnue;
pub mod score;
