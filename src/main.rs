use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{prelude::*, EnvFilter};

use codeweight::{
    enumerate_masks, CodeResult, ColumnMasks, EnumerationConfig, EnumerationMode,
    GeneratorMethod, SparseBinaryMatrix,
};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Compute the Hamming-weight distribution of a binary linear code from an alist matrix"
)]
struct Args {
    /// Alist file holding the generator matrix (or parity-check matrix with --parity)
    alist: PathBuf,

    /// Treat the input as a parity-check matrix and derive the generator first
    #[arg(long)]
    parity: bool,

    /// Derive a systematic generator (rounded real inverse, verified)
    #[arg(long, requires = "parity")]
    systematic: bool,

    /// Evaluate only the first N message indices instead of all 2^K
    #[arg(long, value_name = "N")]
    samples: Option<u64>,

    /// Column masks per batch; 1 selects the scalar kernel
    #[arg(long)]
    lanes: Option<usize>,

    /// Worker threads
    #[arg(long)]
    threads: Option<usize>,

    /// Write the derived generator matrix to this alist file
    #[arg(long, value_name = "PATH", requires = "parity")]
    save_generator: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(Args::parse()) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> CodeResult<()> {
    let input = SparseBinaryMatrix::load(&args.alist)?;
    info!(rows = input.n_rows, cols = input.n_cols, "loaded {}", args.alist.display());

    let generator = if args.parity {
        let method = if args.systematic {
            GeneratorMethod::Systematic
        } else {
            GeneratorMethod::Elimination
        };
        let g = SparseBinaryMatrix::from_dense(&method.derive(&input)?);

        if let Some(path) = &args.save_generator {
            g.save(path)?;
            info!("saved generator to {}", path.display());
        }
        g
    } else {
        input
    };

    let mut config = EnumerationConfig::default();
    if let Some(n) = args.samples {
        config = config.with_mode(EnumerationMode::Sampled(n));
    }
    if let Some(lanes) = args.lanes {
        config = config.with_lane_width(lanes);
    }
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }

    let hist = enumerate_masks(&ColumnMasks::from_sparse(&generator), &config)?;

    match hist.mode {
        EnumerationMode::Exhaustive => println!("mode: exhaustive"),
        EnumerationMode::Sampled(n) => println!("mode: sampled ({} messages)", n),
    }
    println!("Use Time: {:.6}", hist.elapsed.as_secs_f64());
    print!("{}", hist);

    Ok(())
}
