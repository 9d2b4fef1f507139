use cozy_chess::Color;
use super::NetSize;

/// Hidden-layer sums and PSQT sums for both perspectives, indexed by colour.
#[derive(Clone, Debug, Default)]
pub struct Accumulator {
    pub values: [Vec<i16>; 2],
    pub psqt: [i32; 2],
    pub computed: [bool; 2],
}

impl Accumulator {
    pub fn clear(&mut self) { self.computed = [false; 2]; }

    pub fn is_computed(&self, persp: Color) -> bool { self.computed[persp as usize] }
}

/// One stack entry: each network size keeps its own accumulator.
#[derive(Clone, Debug, Default)]
pub struct AccumulatorState {
    pub big: Accumulator,
    pub small: Accumulator,
}

impl AccumulatorState {
    pub fn get(&self, size: NetSize) -> &Accumulator {
        match size { NetSize::Big => &self.big, NetSize::Small => &self.small }
    }

    pub fn get_mut(&mut self, size: NetSize) -> &mut Accumulator {
        match size { NetSize::Big => &mut self.big, NetSize::Small => &mut self.small }
    }

    fn clear(&mut self) {
        self.big.clear();
        self.small.clear();
    }
}

/// Per-evaluation accumulator scratch. Entries above the root belong to
/// positions reached by playing moves from it; every entry is filled lazily
/// from the accumulator cache the first time a network reads it.
pub struct AccumulatorStack {
    states: Vec<AccumulatorState>,
    current: usize,
}

impl Default for AccumulatorStack {
    fn default() -> Self { Self::new() }
}

impl AccumulatorStack {
    pub fn new() -> Self {
        Self { states: vec![AccumulatorState::default()], current: 0 }
    }

    /// Drop back to an empty root. Required before every independent evaluation.
    pub fn reset(&mut self) {
        self.current = 0;
        self.states[0].clear();
    }

    /// Open a child entry for a position one move past the current one.
    /// `evaluate` only resets; push/pop serve callers that walk a line move by move.
    pub fn push(&mut self) {
        self.current += 1;
        if self.states.len() <= self.current {
            self.states.push(AccumulatorState::default());
        }
        self.states[self.current].clear();
    }

    /// Return to the parent entry, which keeps its computed state.
    pub fn pop(&mut self) {
        debug_assert!(self.current > 0, "pop on root accumulator");
        self.current = self.current.saturating_sub(1);
    }

    pub fn depth(&self) -> usize { self.current }

    pub fn current(&self, size: NetSize) -> &Accumulator {
        self.states[self.current].get(size)
    }

    pub fn current_mut(&mut self, size: NetSize) -> &mut Accumulator {
        self.states[self.current].get_mut(size)
    }
}
