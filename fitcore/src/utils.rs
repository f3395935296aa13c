pub use std::{
    hash::BuildHasherDefault,
    time::Instant,
};
pub use thiserror::Error;
pub use itertools::Itertools;
pub use rayon::prelude::*;
pub use rand::prelude::*;
pub use rand_chacha::ChaCha8Rng;
pub use clap::{Parser, ValueEnum};
pub use serde::{Serialize, Deserialize};
pub use log::{debug, info};
use indexmap::IndexMap;
use ahash::AHasher;

pub use crate::{
    layout::*,
    requests::*,
    fit::*,
    sim::*,
    trials::*,
};

/// The unit for addresses, capacities and request sizes. `fitcore` does
/// not care about what a "unit" is (bytes, pages, megabytes...), as long as
/// all of the above are measured in it.
pub type ByteSteps = usize;

/// The arrival-ordered sizes of allocation requests.
pub type RequestList = Vec<ByteSteps>;

/// Per-strategy collections. Insertion-ordered, so that anything
/// built from [FitStrategy::ALL] iterates First, Best, Worst.
pub type StrategyMap<V> = IndexMap<FitStrategy, V, BuildHasherDefault<AHasher>>;

pub type Result<T, E = InvalidInput> = std::result::Result<T, E>;

/// Names the piece of input that [InvalidInput] complains about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Culprit {
    MemorySize,
    BlockRange { min: ByteSteps, max: ByteSteps },
    FreeCapacities,
    Requests,
    Trials,
    Strategies,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid input: {message}")]
/// The only error `fitcore` ever raises. It is detected before any
/// random draw takes place, and no partial result accompanies it.
pub struct InvalidInput {
    pub message: String,
    pub culprit: Culprit,
}

impl InvalidInput {
    pub fn new(culprit: Culprit, message: &str) -> Self {
        Self {
            message: String::from(message),
            culprit,
        }
    }
}
