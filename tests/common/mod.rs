#![allow(dead_code)]

use cozy_chess::{Color, Square};
use nnue_blend::eval::nnue::features::feature_index;
use nnue_blend::eval::nnue::Network;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const QUEEN_UP_W: &str = "4k3/8/8/8/8/8/8/3QK3 w - - 0 1";
pub const QUEEN_UP_B: &str = "4k3/8/8/8/8/8/8/3QK3 b - - 0 1";
pub const IN_CHECK: &str = "4k3/8/8/8/8/8/8/4R1K1 b - - 0 1";
pub const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
pub const MIDDLEGAME: &str = "r1bq1rk1/ppp2ppp/2np1n2/2b1p3/2B1P3/2NP1N2/PPP2PPP/R1BQ1RK1 w - - 0 7";
pub const ENDGAME: &str = "8/5pk1/6p1/8/3R4/6P1/5PK1/2r5 b - - 12 44";

/// Zero weights: psqt is 0 and positional equals `out_bias`.
pub fn bias_net(hidden: usize, out_bias: i32) -> Network {
    let mut n = Network::zeroed(hidden);
    n.out_bias = out_bias;
    n
}

/// Psqt weight `w` on every feature for the perspective's own queens.
pub fn own_queen_psqt(net: &mut Network, w: i32) {
    for persp in Color::ALL {
        for king in Square::ALL {
            for sq in Square::ALL {
                net.psqt_weights[feature_index(persp, king, persp, 4, sq)] = w;
            }
        }
    }
}

pub fn random_net(hidden: usize, seed: u64) -> Network {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut n = Network::zeroed(hidden);
    for w in n.ft_weights.iter_mut() { *w = rng.gen_range(-24i16..=24); }
    for b in n.ft_biases.iter_mut() { *b = rng.gen_range(0i16..=96); }
    for p in n.psqt_weights.iter_mut() { *p = rng.gen_range(-400i32..=400); }
    for w in n.out_weights.iter_mut() { *w = rng.gen_range(-64i16..=64); }
    n.out_bias = rng.gen_range(-50..=50);
    n
}

/// Write under target/ and return the path.
pub fn write_net(name: &str, net: &Network) -> String {
    std::fs::create_dir_all("target").unwrap();
    let path = format!("target/{}.nnue", name);
    net.save(&path).unwrap();
    path
}
