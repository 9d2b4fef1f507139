pub mod accumulator;
pub mod cache;
pub mod features;
pub mod loader;
pub mod network;

use std::fmt;

pub use accumulator::{Accumulator, AccumulatorStack};
pub use cache::{AccumulatorCache, AccumulatorCaches};
pub use network::Network;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetSize {
    Small,
    Big,
}

impl fmt::Display for NetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetSize::Small => write!(f, "small"),
            NetSize::Big => write!(f, "big"),
        }
    }
}

/// Borrowed pair of loaded networks.
#[derive(Clone, Copy)]
pub struct Networks<'a> {
    pub big: &'a Network,
    pub small: &'a Network,
}

impl<'a> Networks<'a> {
    pub fn get(&self, size: NetSize) -> &'a Network {
        match size { NetSize::Big => self.big, NetSize::Small => self.small }
    }
}
