use crate::utils::*;

/// The three placement policies under comparison.
///
/// For each request, every policy considers only the free regions that
/// can host it *strictly*: `occupied + request < capacity`. A request
/// that would fill a region exactly is refused by that region.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Debug, Serialize, Deserialize)]
pub enum FitStrategy {
    /// Lowest-index region that fits.
    First,
    /// Region left with the least space after placement.
    Best,
    /// Region left with the most space after placement.
    Worst,
}

impl FitStrategy {
    pub const ALL: [FitStrategy; 3] = [FitStrategy::First, FitStrategy::Best, FitStrategy::Worst];

    pub fn label(&self) -> &'static str {
        match self {
            FitStrategy::First  => "First-Fit",
            FitStrategy::Best   => "Best-Fit",
            FitStrategy::Worst  => "Worst-Fit",
        }
    }

    /// Picks the region that shall receive `request`, if any.
    ///
    /// Ties in leftover space go to the lowest index: a candidate
    /// replaces the current choice only if it is strictly better.
    pub fn select(&self, state: &FitState, request: ByteSteps) -> Option<usize> {
        let mut candidates = (0..state.capacities.len())
            .filter(|&idx| state.fits(idx, request));

        match self {
            FitStrategy::First  => candidates.next(),
            FitStrategy::Best   => {
                let mut best: Option<(usize, ByteSteps)> = None;
                for idx in candidates {
                    let left = state.leftover(idx, request);
                    if best.map_or(true, |(_, b)| left < b) {
                        best = Some((idx, left));
                    }
                }

                best.map(|(idx, _)| idx)
            },
            FitStrategy::Worst  => {
                let mut worst: Option<(usize, ByteSteps)> = None;
                for idx in candidates {
                    let left = state.leftover(idx, request);
                    if worst.map_or(true, |(_, w)| left > w) {
                        worst = Some((idx, left));
                    }
                }

                worst.map(|(idx, _)| idx)
            },
        }
    }

    /// Offers `requests`, in order, to the regions described by
    /// `capacities`. Each call starts from empty regions, so
    /// strategies never observe each other's placements.
    pub fn apply(&self, capacities: &[ByteSteps], requests: &[ByteSteps]) -> Result<FitOutcome> {
        if requests.is_empty() {
            return Err(InvalidInput::new(Culprit::Requests, "Success rate of 0 requests is undefined."));
        }
        if requests.iter().any(|&r| r == 0) {
            return Err(InvalidInput::new(Culprit::Requests, "Request of 0 size found!"));
        }

        let mut state = FitState::new(capacities);
        for &req in requests {
            if let Some(idx) = self.select(&state, req) {
                state.place(idx, req);
            }
        }

        Ok(state.finish(*self, requests.len()))
    }
}

impl std::fmt::Display for FitStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Running book-keeping of one strategy's pass over a request list.
#[derive(Clone, Debug)]
pub struct FitState<'c> {
    pub capacities: &'c [ByteSteps],
    pub occupied:   Vec<ByteSteps>,
    pub placements: Vec<Vec<ByteSteps>>,
    pub satisfied:  usize,
}

impl<'c> FitState<'c> {
    pub fn new(capacities: &'c [ByteSteps]) -> Self {
        Self {
            capacities,
            occupied:   vec![0; capacities.len()],
            placements: vec![vec![]; capacities.len()],
            satisfied:  0,
        }
    }

    /// `occupied < capacity` holds at all times, so the subtraction
    /// cannot wrap.
    #[inline]
    pub fn fits(&self, idx: usize, request: ByteSteps) -> bool {
        request < self.capacities[idx] - self.occupied[idx]
    }

    /// Space left in region `idx` if `request` were placed there.
    /// Only meaningful if the request [fits](FitState::fits).
    #[inline]
    pub fn leftover(&self, idx: usize, request: ByteSteps) -> ByteSteps {
        self.capacities[idx] - self.occupied[idx] - request
    }

    pub fn place(&mut self, idx: usize, request: ByteSteps) {
        debug_assert!(self.fits(idx, request), "Placement into a region that cannot host it.");
        self.occupied[idx] += request;
        self.placements[idx].push(request);
        self.satisfied += 1;
    }

    fn finish(self, strategy: FitStrategy, total: usize) -> FitOutcome {
        FitOutcome {
            strategy,
            placements:     self.placements,
            occupied:       self.occupied,
            satisfied:      self.satisfied,
            total,
            success_rate:   self.satisfied as f64 / total as f64,
        }
    }
}

/// What a strategy made of a request list. Index `i` of
/// [placements](FitOutcome::placements) and [occupied](FitOutcome::occupied)
/// refers to the `i`-th free region.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct FitOutcome {
    pub strategy:       FitStrategy,
    pub placements:     Vec<Vec<ByteSteps>>,
    pub occupied:       Vec<ByteSteps>,
    pub satisfied:      usize,
    pub total:          usize,
    pub success_rate:   f64,
}

impl FitOutcome {
    pub fn dropped(&self) -> usize {
        self.total - self.satisfied
    }

    /// Lays each free region's placed sizes back-to-back,
    /// starting from the region's start address.
    pub fn placed_regions(&self, free: &[Region]) -> Vec<Region> {
        let mut res = vec![];
        for (region, sizes) in free.iter().zip(&self.placements) {
            let mut addr = region.start;
            for &s in sizes {
                res.push(Region::new(addr, addr + s, RegionKind::Placed));
                addr += s;
            }
        }

        res
    }
}
