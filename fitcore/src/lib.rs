//! Welcome to `fitcore`!
//!
//! A simulator of the classic placement policies for dynamic memory
//! allocation: [First-Fit](FitStrategy::First), [Best-Fit](FitStrategy::Best)
//! and [Worst-Fit](FitStrategy::Worst).
//!
//! A trial goes like this:
//!
//! 1. [generate_layout] chops some memory into alternating used/free
//!     regions of random length.
//! 2. [generate_requests] draws request sizes calibrated to the
//!     layout's free regions, until 80% of the free space is demanded.
//! 3. Each [FitStrategy] places the requests, in arrival order, into
//!     its own copy of the free regions. The fraction of requests that
//!     found a home is the strategy's *success rate*.
//!
//! [run_simulation] performs one trial, [run_trials] many.
//!
//! > ***ATTENTION:*** a request fits into a free region only if it leaves
//! > *some* space behind: `occupied + request < capacity`. Exact fills are
//! > refused, by every strategy.
//!
//! Randomness is always passed in explicitly, so that seeding a
//! [ChaCha8Rng] reproduces a trial exactly.

pub mod layout;
pub mod requests;
pub mod fit;
pub mod sim;
pub mod trials;
pub mod utils;

/// Imports, type aliases, traits ... in general
/// useful stuff that shall be needed in many places.
pub use crate::utils::*;
