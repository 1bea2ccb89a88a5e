use clap::Parser;
use std::io;
use tracing::info;
use tracing_subscriber::EnvFilter;
use workload_gen::{generate_to, GeneratorConfig, Workload};

/// Emit a benchmark script (schema, inserts, queries) for a vector-capable
/// SQLite build on stdout.
#[derive(Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Seed the RNG for reproducible output
    #[clap(long)]
    seed: Option<u64>,

    /// no_vectors | simple_workload
    mode: String,

    /// no_vectors: N Q, simple_workload: DIM N Q (options go before MODE)
    #[clap(allow_hyphen_values = true)]
    params: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(io::stderr)
    .with_target(false)
    .with_level(true)
    .init();

    let args = Args::parse();

    // Resolve everything before the first byte hits stdout
    let workload = Workload::from_args(&args.mode, &args.params)?;
    let mut config = GeneratorConfig::new();
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    } else {
        info!("No --seed given, seeding from OS entropy");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let shape = generate_to(&workload, &config, &mut out)?;

    info!("Workload emitted ({}): {}", workload.mode(), serde_json::to_string(&shape)?);
    Ok(())
}
