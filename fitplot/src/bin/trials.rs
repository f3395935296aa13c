use fitplot::*;
use fitcore::*;

/// Runs a series of placement trials and
/// plots each strategy's success rates.
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

    /// Number of trials
    #[arg(short, long, default_value_t = 50)]
    trials:         usize,

    /// Seed for the random source (drawn from entropy if absent)
    #[arg(short, long)]
    seed:           Option<u64>,

    /// Spread trials over all cores
    #[arg(short, long)]
    parallel:       bool,

    /// Where to draw the success-rate chart (PNG)
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    output:         Option<PathBuf>,

    /// Where to dump the series (JSON)
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    json:           Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Args::parse();
    let cfg = LayoutConfig::new(cli.memory_size, cli.block_min, cli.block_max);
    let seed = cli.seed.unwrap_or_else(|| thread_rng().gen());
    info!("Seed: {}", seed);

    let res = if cli.parallel {
        run_trials_par(cli.trials, &cfg, seed)?
    } else {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        run_trials(cli.trials, &cfg, &mut rng)?
    };
    print!("{}", res);

    if let Some(p) = cli.output {
        plot::plot_series(&res, &p)?;
        info!("Chart written to {:?}", p);
    }
    if let Some(p) = cli.json {
        report::write_json(&res, &p)?;
        info!("Series written to {:?}", p);
    }

    Ok(())
}
