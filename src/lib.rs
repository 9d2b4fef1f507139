//! Dual-network NNUE evaluation: network selection, blending, accumulator caches

pub mod board;
pub mod error;
pub mod eval;
pub mod init;

pub use board::cozy::Position;
pub use error::EvalError;
pub use eval::blend::Blended;
pub use eval::context::{EvalContext, Evaluation};
pub use eval::evaluator::{EvalConfig, EvalResult, Evaluator};
pub use eval::nnue::NetSize;
pub use init::global_init;
