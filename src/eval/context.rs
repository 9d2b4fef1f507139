//! Per-worker evaluation context: owns both networks, their accumulator
//! caches and the accumulator stack.
//!
//! A context is not meant to be shared; `evaluate` takes `&mut self`, so one
//! context per worker thread is the way to evaluate in parallel.

use std::path::{Path, PathBuf};
use log::{debug, info, warn};

use crate::board::cozy::Position;
use crate::error::{EvalError, Result};
use crate::eval::blend::{self, Blended};
use crate::eval::nnue::{AccumulatorCaches, AccumulatorStack, NetSize, Network, Networks};
use crate::eval::score::to_cp;
use crate::init::global_init;

enum ContextState {
    Unloaded,
    /// Caches exist only here: they are seeded from the loaded biases.
    Ready(AccumulatorCaches),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Evaluation {
    /// Internal units, side to move.
    pub value: i32,
    /// Normalised centipawns.
    pub cp: i32,
}

pub struct EvalContext {
    root_dir: PathBuf,
    big: Option<Network>,
    small: Option<Network>,
    state: ContextState,
    stack: AccumulatorStack,
}

impl EvalContext {
    pub fn create<P: AsRef<Path>>(root_dir: P) -> Self {
        global_init();
        Self {
            root_dir: root_dir.as_ref().to_path_buf(),
            big: None,
            small: None,
            state: ContextState::Unloaded,
            stack: AccumulatorStack::new(),
        }
    }

    pub fn destroy(self) {
        debug!("destroying eval context (ready={})", self.is_ready());
    }

    pub fn root_dir(&self) -> &Path { &self.root_dir }

    pub fn is_ready(&self) -> bool { matches!(self.state, ContextState::Ready(_)) }

    pub fn network(&self, size: NetSize) -> Option<&Network> {
        match size { NetSize::Big => self.big.as_ref(), NetSize::Small => self.small.as_ref() }
    }

    fn resolve(&self, p: &str) -> PathBuf {
        let path = Path::new(p);
        if path.is_absolute() { path.to_path_buf() } else { self.root_dir.join(path) }
    }

    pub fn load_networks_from<P: AsRef<Path>>(&mut self, root_dir: P, big: &str, small: &str) -> Result<()> {
        self.root_dir = root_dir.as_ref().to_path_buf();
        self.load_networks(big, small)
    }

    /// Load both networks. An empty `small` reuses `big`. On failure the
    /// context stays unusable until a later load succeeds; a network loaded
    /// before the failing one is kept but not usable on its own.
    pub fn load_networks(&mut self, big: &str, small: &str) -> Result<()> {
        if big.trim().is_empty() { return Err(EvalError::BadArg("big network path is empty")); }
        let small = if small.trim().is_empty() { big } else { small };
        self.state = ContextState::Unloaded;

        let big_path = self.resolve(big);
        match Network::load(&big_path) {
            Ok(n) => self.big = Some(n),
            Err(e) => {
                warn!("big network load failed: {:#}", e);
                return Err(EvalError::load(big_path, e));
            }
        }
        let small_path = self.resolve(small);
        match Network::load(&small_path) {
            Ok(n) => self.small = Some(n),
            Err(e) => {
                warn!("small network load failed: {:#}", e);
                return Err(EvalError::load(small_path, e));
            }
        }
        info!("loaded networks big={} small={}", big_path.display(), small_path.display());
        self.finish_load()
    }

    /// Use networks that are already in memory, with the same post-load steps
    /// as `load_networks`.
    pub fn install_networks(&mut self, big: Network, small: Network) -> Result<()> {
        self.state = ContextState::Unloaded;
        self.big = Some(big);
        self.small = Some(small);
        self.finish_load()
    }

    fn finish_load(&mut self) -> Result<()> {
        let (Some(big), Some(small)) = (self.big.as_ref(), self.small.as_ref()) else {
            return Err(EvalError::Internal("network slot empty after load".into()));
        };
        self.state = ContextState::Ready(AccumulatorCaches::new(big, small));
        self.stack.reset();
        Ok(())
    }

    pub fn evaluate(&mut self, pos: &Position, optimism: i32) -> Result<Blended> {
        let ContextState::Ready(caches) = &mut self.state else { return Err(EvalError::NotReady) };
        let (Some(big), Some(small)) = (self.big.as_ref(), self.small.as_ref()) else {
            return Err(EvalError::Internal("ready context without networks".into()));
        };
        if pos.in_check() { return Err(EvalError::InCheck); }
        self.stack.reset();
        blend::evaluate(Networks { big, small }, pos, &mut self.stack, caches, optimism)
    }

    pub fn evaluate_fen(&mut self, fen: &str, is_chess960: bool, optimism: i32) -> Result<Evaluation> {
        if !self.is_ready() { return Err(EvalError::NotReady); }
        let pos = Position::from_fen(fen, is_chess960)?;
        let b = self.evaluate(&pos, optimism)?;
        Ok(Evaluation { value: b.value, cp: to_cp(b.value, &pos) })
    }
}
