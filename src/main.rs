use anyhow::{anyhow, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use nnue_blend::{EvalConfig, EvalContext, EvalError, EvalResult, Evaluator, NetSize, Position};
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Parser, Debug)]
#[command(name = "nnue-blend", version, about = "Evaluate positions with a blended big/small NNUE pair")]
struct Args {
    /// Big network file (relative paths resolve against --root-dir)
    #[arg(long)]
    big: String,

    /// Small network file; empty reuses the big network
    #[arg(long, default_value = "")]
    small: String,

    /// Directory used to resolve relative network paths
    #[arg(long, default_value = ".")]
    root_dir: PathBuf,

    /// FEN to evaluate (repeatable); startpos when no FEN is given
    #[arg(long)]
    fen: Vec<String>,

    /// File with one FEN per line ('#' starts a comment)
    #[arg(long)]
    fen_file: Option<PathBuf>,

    /// Parse castling rights as Chess960 (Shredder-FEN)
    #[arg(long, default_value_t = false)]
    chess960: bool,

    /// JSON EvalConfig file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Optimism term (overrides the config file)
    #[arg(long)]
    optimism: Option<i32>,

    /// Damp centipawn scores as the fifty-move counter grows
    #[arg(long, default_value_t = false)]
    rule50_damping: bool,

    /// Fall back to the material score when NNUE evaluation fails
    #[arg(long, default_value_t = false)]
    hce_fallback: bool,

    /// Worker threads, each with its own evaluation context
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Print one JSON object per position
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(serde::Serialize)]
struct Line<'a> {
    fen: &'a str,
    #[serde(flatten)]
    result: EvalResult,
}

fn load_config(args: &Args) -> Result<EvalConfig> {
    let mut cfg = match &args.config {
        Some(p) => {
            let s = std::fs::read_to_string(p).with_context(|| format!("read config {}", p.display()))?;
            serde_json::from_str(&s).with_context(|| format!("parse config {}", p.display()))?
        }
        None => EvalConfig::default(),
    };
    if let Some(o) = args.optimism { cfg.optimism = o; }
    if args.rule50_damping { cfg.apply_rule50_damping = true; }
    Ok(cfg)
}

fn collect_fens(args: &Args) -> Result<Vec<String>> {
    let mut fens = args.fen.clone();
    if let Some(p) = &args.fen_file {
        let s = std::fs::read_to_string(p).with_context(|| format!("read fen file {}", p.display()))?;
        fens.extend(s.lines().map(str::trim).filter(|l| !l.is_empty() && !l.starts_with('#')).map(String::from));
    }
    if fens.is_empty() { fens.push(STARTPOS_FEN.to_string()); }
    Ok(fens)
}

fn eval_one(ev: &mut Evaluator, fen: &str, chess960: bool, fallback: bool) -> Result<EvalResult, EvalError> {
    let pos = Position::from_fen(fen, chess960)?;
    if fallback { Ok(ev.evaluate_or_fallback(&pos)) } else { ev.evaluate_position(&pos) }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = load_config(&args)?;
    let fens = collect_fens(&args)?;

    // Load once, then hand each worker its own copy of the weights.
    let mut ctx = EvalContext::create(&args.root_dir);
    if let Err(e) = ctx.load_networks(&args.big, &args.small) {
        eprintln!("error: {}", e);
        std::process::exit(e.code().abs());
    }
    let big = ctx.network(NetSize::Big).cloned().ok_or_else(|| anyhow!("big network missing after load"))?;
    let small = ctx.network(NetSize::Small).cloned().ok_or_else(|| anyhow!("small network missing after load"))?;
    ctx.destroy();

    let pb = if fens.len() > 1 && !args.json {
        let pb = ProgressBar::new(fens.len() as u64);
        pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {elapsed_precise}").unwrap_or_else(|_| ProgressStyle::default_bar()));
        Some(pb)
    } else {
        None
    };

    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build().context("build thread pool")?;
    let results: Vec<Result<EvalResult, EvalError>> = pool.install(|| {
        fens.par_iter()
            .map_init(
                || {
                    let mut ctx = EvalContext::create(&args.root_dir);
                    ctx.install_networks(big.clone(), small.clone()).map(|_| Evaluator::new(cfg, ctx))
                },
                |ev, fen| {
                    let r = match ev {
                        Ok(ev) => eval_one(ev, fen, args.chess960, args.hce_fallback),
                        Err(e) => Err(EvalError::Internal(format!("worker context: {}", e))),
                    };
                    if let Some(pb) = &pb { pb.inc(1); }
                    r
                },
            )
            .collect()
    });
    if let Some(pb) = &pb { pb.finish_and_clear(); }
    info!("evaluated {} positions in {:.3}s", fens.len(), t0.elapsed().as_secs_f64());

    for (fen, r) in fens.iter().zip(results) {
        match r {
            Ok(result) if args.json => println!("{}", serde_json::to_string(&Line { fen, result })?),
            Ok(r) => println!("cp={} value={} nnue={} fen={}", r.cp, r.value, r.used_nnue, fen),
            Err(e) => {
                eprintln!("error: {} (fen={})", e, fen);
                std::process::exit(e.code().abs());
            }
        }
    }
    Ok(())
}
