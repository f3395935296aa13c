use fitcore::*;

/// A simulator of first/best/worst-fit memory placement
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Size of the simulated memory
    #[arg(short, long, default_value_t = LayoutConfig::default().memory_size)]
    memory_size:    ByteSteps,

    /// Minimum length of a generated used/free block
    #[arg(long, default_value_t = LayoutConfig::default().block_min)]
    block_min:      ByteSteps,

    /// Maximum length of a generated used/free block
    #[arg(long, default_value_t = LayoutConfig::default().block_max)]
    block_max:      ByteSteps,

    /// Number of trials (1 prints the trial in detail)
    #[arg(short, long, default_value_t = 50)]
    trials:         usize,

    /// Seed for the random source (drawn from entropy if absent)
    #[arg(short, long)]
    seed:           Option<u64>,

    /// Spread trials over all cores
    #[arg(short, long)]
    parallel:       bool,

    /// Strategies to evaluate in a detailed single trial
    #[arg(long, value_enum, num_args = 1.., default_values_t = FitStrategy::ALL)]
    strategies:     Vec<FitStrategy>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Args::parse();
    let cfg = LayoutConfig::new(cli.memory_size, cli.block_min, cli.block_max);
    let seed = cli.seed.unwrap_or_else(|| thread_rng().gen());
    info!("Seed: {}", seed);

    if cli.trials == 1 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let res = run_simulation(&cfg, &cli.strategies, &mut rng)?;
        print!("{}", res);
    } else {
        let res = if cli.parallel {
            run_trials_par(cli.trials, &cfg, seed)?
        } else {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            run_trials(cli.trials, &cfg, &mut rng)?
        };
        print!("{}", res);
    }

    Ok(())
}
