use crate::utils::*;

/// Per-strategy success rates over a number of independent trials.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrialSeriesResult {
    /// Trial-ordered success rates.
    pub series:     StrategyMap<Vec<f64>>,
    /// Arithmetic mean of each series.
    pub averages:   StrategyMap<f64>,
}

impl TrialSeriesResult {
    fn from_runs(runs: Vec<StrategyMap<f64>>) -> Self {
        let mut series: StrategyMap<Vec<f64>> = StrategyMap::default();
        for run in &runs {
            for (s, rate) in run {
                series.entry(*s)
                    .or_default()
                    .push(*rate);
            }
        }
        let averages = series.iter()
            .map(|(s, rates)| (*s, rates.iter().sum::<f64>() / rates.len() as f64))
            .collect();

        Self { series, averages }
    }

    pub fn num_trials(&self) -> usize {
        self.series
            .values()
            .next()
            .map_or(0, |v| v.len())
    }

    pub fn mean(&self, strategy: FitStrategy) -> Option<f64> {
        self.averages.get(&strategy).copied()
    }

    /// The strategy with the highest mean success rate. On a tie, the
    /// one that comes first (First, Best, Worst) wins.
    pub fn best(&self) -> Option<FitStrategy> {
        let mut res: Option<(FitStrategy, f64)> = None;
        for (s, avg) in &self.averages {
            if res.map_or(true, |(_, b)| *avg > b) {
                res = Some((*s, *avg));
            }
        }

        res.map(|(s, _)| s)
    }
}

fn check_trials(num_trials: usize) -> Result<()> {
    if num_trials == 0 {
        Err(InvalidInput::new(Culprit::Trials, "Average over 0 trials is undefined."))
    } else { Ok(()) }
}

fn rates_of(res: SimulationResult) -> StrategyMap<f64> {
    res.outcomes
        .into_iter()
        .map(|(s, o)| (s, o.success_rate))
        .collect()
}

/// Runs `num_trials` independent trials, all three strategies
/// taking part in each, drawing from a single random source.
pub fn run_trials<R: Rng + ?Sized>(
    num_trials: usize,
    cfg:        &LayoutConfig,
    rng:        &mut R,
) -> Result<TrialSeriesResult> {
    check_trials(num_trials)?;
    cfg.validate()?;
    let start = Instant::now();

    let runs = (0..num_trials)
        .map(|_| run_simulation(cfg, &FitStrategy::ALL, &mut *rng).map(rates_of))
        .collect::<Result<Vec<_>>>()?;
    let res = TrialSeriesResult::from_runs(runs);

    info!("{} trials done in {} μs", num_trials, start.elapsed().as_micros());

    Ok(res)
}

/// Same as [run_trials], with trials spread over `rayon`'s thread pool.
///
/// Trial `i` draws from its own [ChaCha8Rng], seeded with `seed` and set
/// to stream `i`. The result depends only on `seed`, not on scheduling.
pub fn run_trials_par(
    num_trials: usize,
    cfg:        &LayoutConfig,
    seed:       u64,
) -> Result<TrialSeriesResult> {
    check_trials(num_trials)?;
    cfg.validate()?;
    let start = Instant::now();

    let runs = (0..num_trials)
        .into_par_iter()
        .map(|i| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            rng.set_stream(i as u64);
            run_simulation(cfg, &FitStrategy::ALL, &mut rng).map(rates_of)
        })
        .collect::<Result<Vec<_>>>()?;
    let res = TrialSeriesResult::from_runs(runs);

    info!("{} trials done in {} μs (parallel)", num_trials, start.elapsed().as_micros());

    Ok(res)
}

impl std::fmt::Display for TrialSeriesResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Trials:\t\t{}", self.num_trials())?;
        for (s, avg) in &self.averages {
            writeln!(f, "{}:\t{:.2}%", s, avg * 100.0)?;
        }
        if let Some(s) = self.best() {
            writeln!(f, "Best:\t\t{}", s)?;
        }

        Ok(())
    }
}
