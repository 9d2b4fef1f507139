mod common;

use nnue_blend::{EvalContext, Evaluation};
use rayon::prelude::*;

fn fens() -> Vec<&'static str> {
    vec![
        common::STARTPOS,
        common::MIDDLEGAME,
        common::ENDGAME,
        common::QUEEN_UP_W,
        common::QUEEN_UP_B,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    ]
}

#[test]
fn one_context_per_worker_matches_sequential() {
    let big = common::random_net(16, 91);
    let small = common::random_net(8, 92);
    let positions: Vec<&str> = fens().into_iter().cycle().take(64).collect();

    let mut seq_ctx = EvalContext::create(".");
    seq_ctx.install_networks(big.clone(), small.clone()).unwrap();
    let sequential: Vec<Evaluation> = positions.iter().map(|f| seq_ctx.evaluate_fen(f, false, 5).unwrap()).collect();

    let pool = rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();
    let parallel: Vec<Evaluation> = pool.install(|| {
        positions
            .par_iter()
            .map_init(
                || {
                    let mut ctx = EvalContext::create(".");
                    ctx.install_networks(big.clone(), small.clone()).unwrap();
                    ctx
                },
                |ctx, f| ctx.evaluate_fen(f, false, 5).unwrap(),
            )
            .collect()
    });
    assert_eq!(parallel, sequential);
}

#[test]
fn contexts_created_concurrently_share_one_table_build() {
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| EvalContext::create(".").is_ready()))
        .collect();
    for h in handles {
        assert!(!h.join().unwrap());
    }
    let t = nnue_blend::init::tables();
    assert_eq!(t.king_base[0][0], 0);
}
