use crate::utils::*;

/// Everything a single trial produced. The layout and the request
/// list are shared, read-only, by all strategies' outcomes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationResult {
    pub layout:     Layout,
    pub requests:   RequestList,
    pub outcomes:   StrategyMap<FitOutcome>,
    /// Per strategy, the [RegionKind::Placed] regions derived from
    /// its outcome and the layout's free regions.
    pub placed:     StrategyMap<Vec<Region>>,
}

impl SimulationResult {
    pub fn success_rate(&self, strategy: FitStrategy) -> Option<f64> {
        self.outcomes
            .get(&strategy)
            .map(|o| o.success_rate)
    }
}

/// Runs one trial: generates a layout, generates requests out of its
/// free capacities, and has every requested strategy place them.
///
/// Duplicate strategies are evaluated once. Strategies are evaluated
/// in the order given.
pub fn run_simulation<R: Rng + ?Sized>(
    cfg:        &LayoutConfig,
    strategies: &[FitStrategy],
    rng:        &mut R,
) -> Result<SimulationResult> {
    if strategies.is_empty() {
        return Err(InvalidInput::new(Culprit::Strategies, "At least one fit strategy is needed."));
    }
    let layout = generate_layout(cfg, rng)?;
    let capacities = layout.free_capacities();
    let requests = generate_requests(&capacities, rng)?;

    let mut outcomes = StrategyMap::default();
    let mut placed = StrategyMap::default();
    for &s in strategies.iter().unique() {
        let outcome = s.apply(&capacities, &requests)?;
        placed.insert(s, outcome.placed_regions(&layout.free));
        outcomes.insert(s, outcome);
    }

    debug!(
        "Trial done: {}",
        outcomes.values()
            .map(|o| format!("{} {:.3}", o.strategy, o.success_rate))
            .join(", ")
    );

    Ok(SimulationResult {
        layout,
        requests,
        outcomes,
        placed,
    })
}

impl std::fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Memory:\t\t{} units\nFree:\t\t{} units in {} regions\nRequests:\t{} ({} units)",
            self.layout.memory_size,
            self.layout.total_free(),
            self.layout.free.len(),
            self.requests.len(),
            total_demand(&self.requests),
        )?;
        for o in self.outcomes.values() {
            writeln!(f, "{}:\t{:.1}% ({} placed, {} dropped)",
                o.strategy,
                o.success_rate * 100.0,
                o.satisfied,
                o.dropped(),
            )?;
        }

        Ok(())
    }
}
