use cozy_chess::{Board, Color};
use crate::error::{EvalError, Result};
use super::accumulator::{Accumulator, AccumulatorStack};
use super::cache::AccumulatorCache;
use super::features::{halfkp_dim, HalfKp};
use super::loader::{NetworkMeta, NET_VERSION};

/// Clipped-ReLU ceiling for accumulator activations.
pub const QA: i32 = 255;
/// Output weight quantization factor.
pub const QB: i32 = 64;

/// HalfKP network producing a (psqt, positional) pair.
#[derive(Debug, Clone)]
pub struct Network {
    pub meta: NetworkMeta,
    pub ft_weights: Vec<i16>,   // input_dim x hidden_dim, one row per feature
    pub ft_biases: Vec<i16>,    // hidden_dim
    pub psqt_weights: Vec<i32>, // input_dim
    pub out_weights: Vec<i16>,  // 2 x hidden_dim: side to move, then opponent
    pub out_bias: i32,
}

impl Network {
    /// All-zero network; `positional` equals `out_bias` and `psqt` is zero.
    pub fn zeroed(hidden_dim: usize) -> Self {
        let input_dim = halfkp_dim();
        Self {
            meta: NetworkMeta { version: NET_VERSION, input_dim, hidden_dim },
            ft_weights: vec![0; input_dim * hidden_dim],
            ft_biases: vec![0; hidden_dim],
            psqt_weights: vec![0; input_dim],
            out_weights: vec![0; 2 * hidden_dim],
            out_bias: 0,
        }
    }

    #[inline]
    fn row(&self, idx: usize) -> &[i16] {
        let h = self.meta.hidden_dim;
        &self.ft_weights[idx * h..(idx + 1) * h]
    }

    #[inline]
    pub fn add_feature(&self, acc: &mut [i16], psqt: &mut i32, idx: usize) {
        for (a, &w) in acc.iter_mut().zip(self.row(idx)) { *a = a.wrapping_add(w); }
        *psqt = psqt.wrapping_add(self.psqt_weights[idx]);
    }

    #[inline]
    pub fn sub_feature(&self, acc: &mut [i16], psqt: &mut i32, idx: usize) {
        for (a, &w) in acc.iter_mut().zip(self.row(idx)) { *a = a.wrapping_sub(w); }
        *psqt = psqt.wrapping_sub(self.psqt_weights[idx]);
    }

    /// Evaluate through the accumulator stack, filling missing perspectives
    /// from `cache`. The cache's size class selects the stack slot.
    pub fn evaluate(&self, board: &Board, stack: &mut AccumulatorStack, cache: &mut AccumulatorCache) -> Result<(i32, i32)> {
        let acc = stack.current_mut(cache.size());
        for persp in Color::ALL {
            if !acc.is_computed(persp) {
                cache.refresh(self, board, persp, acc)?;
            }
        }
        self.output(acc, board.side_to_move())
    }

    /// From-scratch evaluation without stack or cache; reference path for parity checks.
    pub fn eval_full(&self, board: &Board) -> Result<(i32, i32)> {
        let mut acc = Accumulator::default();
        for persp in Color::ALL {
            let p = persp as usize;
            let mut values = self.ft_biases.clone();
            let mut psqt = 0i32;
            for idx in HalfKp.active_indices(board, persp) {
                self.add_feature(&mut values, &mut psqt, idx);
            }
            acc.values[p] = values;
            acc.psqt[p] = psqt;
            acc.computed[p] = true;
        }
        self.output(&acc, board.side_to_move())
    }

    fn output(&self, acc: &Accumulator, stm: Color) -> Result<(i32, i32)> {
        let h = self.meta.hidden_dim;
        let us = &acc.values[stm as usize];
        let them = &acc.values[!stm as usize];
        if us.len() != h || them.len() != h || self.out_weights.len() != 2 * h {
            return Err(EvalError::Internal(format!(
                "accumulator width {}/{} does not match hidden_dim {}", us.len(), them.len(), h
            )));
        }
        let mut sum: i64 = 0;
        for j in 0..h {
            sum += (us[j] as i32).clamp(0, QA) as i64 * self.out_weights[j] as i64;
            sum += (them[j] as i32).clamp(0, QA) as i64 * self.out_weights[h + j] as i64;
        }
        let positional = self.out_bias as i64 + sum / (QA * QB) as i64;
        let psqt = (acc.psqt[stm as usize] as i64 - acc.psqt[!stm as usize] as i64) / 2;
        let narrow = |v: i64, what: &str| {
            i32::try_from(v).map_err(|_| EvalError::Internal(format!("{} output {} out of range", what, v)))
        };
        Ok((narrow(psqt, "psqt")?, narrow(positional, "positional")?))
    }
}
