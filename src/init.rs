use log::debug;
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Number of non-king piece types that carry HalfKP features.
pub const FEATURE_PIECES: usize = 5;

/// Static HalfKP offset tables, built once per process.
pub struct FeatureTables {
    /// Base offset per [perspective][king square] (king square already oriented).
    pub king_base: [[usize; 64]; 2],
    /// Offset per [perspective][piece colour][piece][square] within a king block.
    pub piece_square: [[[[usize; 64]; FEATURE_PIECES]; 2]; 2],
}

static TABLES: OnceCell<FeatureTables> = OnceCell::new();
static BUILDS: AtomicUsize = AtomicUsize::new(0);

fn build_tables() -> FeatureTables {
    BUILDS.fetch_add(1, Ordering::SeqCst);
    let block = 2 * FEATURE_PIECES * 64;
    let mut king_base = [[0usize; 64]; 2];
    let mut piece_square = [[[[0usize; 64]; FEATURE_PIECES]; 2]; 2];
    for persp in 0..2 {
        let flip = if persp == 0 { 0 } else { 56 };
        for sq in 0..64 {
            king_base[persp][sq] = (sq ^ flip) * block;
        }
        for colour in 0..2 {
            // colour relative to the perspective: 0 = own pieces
            let rel = colour ^ persp;
            for piece in 0..FEATURE_PIECES {
                for sq in 0..64 {
                    piece_square[persp][colour][piece][sq] = (rel * FEATURE_PIECES + piece) * 64 + (sq ^ flip);
                }
            }
        }
    }
    debug!("feature tables built ({} features per perspective)", 64 * block);
    FeatureTables { king_base, piece_square }
}

/// Build the process-wide tables. Safe to call from any thread, any number of
/// times; every caller returns only once the tables exist.
pub fn global_init() {
    tables();
}

#[inline]
pub fn tables() -> &'static FeatureTables {
    TABLES.get_or_init(build_tables)
}

pub(crate) fn build_count() -> usize {
    BUILDS.load(Ordering::SeqCst)
}
