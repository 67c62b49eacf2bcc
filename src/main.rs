use anyhow::{Context, Result, bail};
use bitonic::display::render;
use bitonic::generator::random_sequence;
use bitonic::harness::{self, human_size};
use bitonic::verify::{is_sorted, same_multiset};
use bitonic::{DEFAULT_SEQUENTIAL_CUTOFF, Sorter, available_parallelism};
use clap::{Parser, Subcommand};
use log::{LevelFilter, debug};

#[derive(Parser)]
#[command(name = "bitonic")]
#[command(version)]
#[command(about = "Parallel bitonic sort and its scaling benchmarks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Seed for the random data generator
    #[arg(long, global = true, default_value_t = 0)]
    seed: u64,

    /// Ranges at or below this length are sorted without spawning tasks
    #[arg(long, global = true, default_value_t = DEFAULT_SEQUENTIAL_CUTOFF)]
    cutoff: usize,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Sort the eight-element example and print it
    Demo,
    /// Sort 2^lg_size random integers once
    Sort {
        #[arg(long, default_value_t = 20)]
        lg_size: u32,
        #[arg(short, long, default_value_t = available_parallelism())]
        parallelism: usize,
        /// Print the sequence before and after sorting
        #[arg(long)]
        print: bool,
    },
    /// Fixed work per worker: n = base * p
    WeakScaling {
        #[arg(long, default_value_t = 1024 * 8)]
        base: usize,
        #[arg(long, default_value_t = 32)]
        max_parallelism: usize,
    },
    /// Fixed total work, increasing workers
    StrongScaling {
        #[arg(long, default_value_t = 21)]
        lg_size: u32,
        #[arg(long, default_value_t = 32)]
        max_parallelism: usize,
    },
    /// Time the bitonic sort against other sorts on the same data
    Compare {
        #[arg(long, default_value_t = 20)]
        lg_size: u32,
        #[arg(short, long, default_value_t = available_parallelism())]
        parallelism: usize,
        #[arg(long, default_value_t = 5)]
        repeats: usize,
    },
}

fn size_from_lg(lg_size: u32) -> Result<usize> {
    1usize
        .checked_shl(lg_size)
        .with_context(|| format!("--lg-size {} is too large", lg_size))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::builder()
        .filter_level(log_level)
        .parse_default_env()
        .init();

    let mut rng = fastrand::Rng::with_seed(cli.seed);
    match cli.command {
        Command::Demo => {
            let mut data = [3, 6, 5, 7, 4, 1, 8, 2];
            let sorter = Sorter::builder()
                .parallelism(8)
                .sequential_cutoff(cli.cutoff)
                .build()?;
            sorter.sort(&mut data)?;
            println!("{}", render(&data));
        }
        Command::Sort {
            lg_size,
            parallelism,
            print,
        } => {
            let n = size_from_lg(lg_size)?;
            println!("size: {}", human_size(std::mem::size_of::<i32>() * n));
            let sorter = Sorter::builder()
                .parallelism(parallelism)
                .sequential_cutoff(cli.cutoff)
                .build()?;
            let orig = random_sequence(n, &mut rng);
            let mut data = orig.clone();
            if print {
                println!("{}", render(&data));
            }
            let start = std::time::Instant::now();
            sorter.sort(&mut data)?;
            let m = harness::Measurement {
                n,
                parallelism,
                duration: start.elapsed(),
            };
            if print {
                println!("{}", render(&data));
            }
            println!("{}", m);
            if !is_sorted(&data) || !same_multiset(&orig, &data) {
                bail!("output is not a sorted permutation of the input");
            }
            debug!("verified {} elements", n);
        }
        Command::WeakScaling {
            base,
            max_parallelism,
        } => {
            for m in harness::weak_scaling(base, max_parallelism, cli.cutoff, &mut rng)? {
                println!("{}", m);
            }
        }
        Command::StrongScaling {
            lg_size,
            max_parallelism,
        } => {
            let n = size_from_lg(lg_size)?;
            for m in harness::strong_scaling(n, max_parallelism, cli.cutoff, &mut rng)? {
                println!("{}", m);
            }
        }
        Command::Compare {
            lg_size,
            parallelism,
            repeats,
        } => {
            let n = size_from_lg(lg_size)?;
            println!(
                "size: {}, threads: {}",
                human_size(std::mem::size_of::<i32>() * n),
                parallelism
            );
            for t in harness::compare_baselines(n, parallelism, cli.cutoff, repeats, &mut rng)? {
                println!("{}", t);
            }
        }
    }
    Ok(())
}
