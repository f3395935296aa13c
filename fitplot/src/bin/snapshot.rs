use fitplot::*;
use fitcore::*;

/// Runs a single placement trial and draws the memory
/// each strategy ended up with.
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

    /// Seed for the random source (drawn from entropy if absent)
    #[arg(short, long)]
    seed:           Option<u64>,

    /// Strategies to evaluate
    #[arg(long, value_enum, num_args = 1.., default_values_t = FitStrategy::ALL)]
    strategies:     Vec<FitStrategy>,

    /// Where to draw the memory columns (PNG)
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    output:         Option<PathBuf>,

    /// Where to dump the trial (JSON)
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    json:           Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Args::parse();
    let cfg = LayoutConfig::new(cli.memory_size, cli.block_min, cli.block_max);
    let seed = cli.seed.unwrap_or_else(|| thread_rng().gen());
    info!("Seed: {}", seed);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let res = run_simulation(&cfg, &cli.strategies, &mut rng)?;
    print!("{}", res);

    if let Some(p) = cli.output {
        plot::plot_snapshot(&res, &p)?;
        info!("Snapshot written to {:?}", p);
    }
    if let Some(p) = cli.json {
        report::write_json(&res, &p)?;
        info!("Trial written to {:?}", p);
    }

    Ok(())
}
