use cozy_chess::{Board, Color};
use crate::error::{EvalError, Result};
use super::accumulator::Accumulator;
use super::features::{feature_index, layout, Layout, EMPTY_LAYOUT, HALFKP_PIECE_ORDER};
use super::network::Network;
use super::NetSize;

#[derive(Clone)]
struct CacheEntry {
    acc: Vec<i16>,
    psqt: i32,
    layout: Layout,
}

/// Last-seen accumulator per (king square, perspective). Refreshing a
/// position only folds in the pieces that differ from the cached layout.
///
/// Entries start at the network's feature biases, so a cache must be built
/// from a network that has already been loaded.
pub struct AccumulatorCache {
    size: NetSize,
    hidden_dim: usize,
    entries: Vec<[CacheEntry; 2]>,
}

impl AccumulatorCache {
    pub fn new(net: &Network, size: NetSize) -> Self {
        let seed = CacheEntry { acc: net.ft_biases.clone(), psqt: 0, layout: EMPTY_LAYOUT };
        Self {
            size,
            hidden_dim: net.meta.hidden_dim,
            entries: vec![[seed.clone(), seed]; 64],
        }
    }

    pub fn size(&self) -> NetSize { self.size }

    pub fn hidden_dim(&self) -> usize { self.hidden_dim }

    /// Bring the entry for `persp`'s king square up to date with `board` and
    /// copy it into `acc`.
    pub fn refresh(&mut self, net: &Network, board: &Board, persp: Color, acc: &mut Accumulator) -> Result<()> {
        if net.meta.hidden_dim != self.hidden_dim {
            return Err(EvalError::Internal(format!(
                "{} cache built for hidden_dim {}, network has {}", self.size, self.hidden_dim, net.meta.hidden_dim
            )));
        }
        let king = board.king(persp);
        let entry = &mut self.entries[king as usize][persp as usize];
        let now = layout(board);
        for color in Color::ALL {
            for pi in 0..HALFKP_PIECE_ORDER.len() {
                let old = entry.layout[color as usize][pi];
                let new = now[color as usize][pi];
                for sq in new & !old {
                    net.add_feature(&mut entry.acc, &mut entry.psqt, feature_index(persp, king, color, pi, sq));
                }
                for sq in old & !new {
                    net.sub_feature(&mut entry.acc, &mut entry.psqt, feature_index(persp, king, color, pi, sq));
                }
            }
        }
        entry.layout = now;

        let p = persp as usize;
        acc.values[p].clear();
        acc.values[p].extend_from_slice(&entry.acc);
        acc.psqt[p] = entry.psqt;
        acc.computed[p] = true;
        Ok(())
    }
}

/// One cache per network size.
pub struct AccumulatorCaches {
    pub big: AccumulatorCache,
    pub small: AccumulatorCache,
}

impl AccumulatorCaches {
    pub fn new(big: &Network, small: &Network) -> Self {
        Self { big: AccumulatorCache::new(big, NetSize::Big), small: AccumulatorCache::new(small, NetSize::Small) }
    }

    pub fn get_mut(&mut self, size: NetSize) -> &mut AccumulatorCache {
        match size { NetSize::Big => &mut self.big, NetSize::Small => &mut self.small }
    }
}
