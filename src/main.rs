use anyhow::{bail, Context};
use clap::Parser;
use knnreg::{load_table, Evaluator, EvaluatorConfig, Mode, OutputFormat, Reporter, DEFAULT_K_MIN};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// k-nearest-neighbors regression with mean squared error scoring
#[derive(Parser, Debug)]
#[command(name = "knnreg")]
#[command(about = "k-nearest-neighbors regression over numeric tables", long_about = None)]
struct Args {
    /// Training data (whitespace separated numbers, one row per line)
    #[arg(short = 'r', long = "train")]
    train: PathBuf,

    /// Test data, same layout as the training data
    #[arg(short = 's', long = "test")]
    test: PathBuf,

    /// Number of neighbors
    #[arg(short, long, default_value_t = 3)]
    k: usize,

    /// Column holding the response variable
    #[arg(short = 'i', long, default_value_t = 0)]
    response_index: usize,

    /// Output detail: 0 bare MSE, 1 summary, 2 sweep candidates, 3 every row
    #[arg(short, long, default_value_t = 1)]
    verbosity: u8,

    /// Sweep k over [2, MAX_K) and report the best one instead of using -k
    #[arg(short = 'x', long)]
    max_k: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Predict test rows in parallel
    #[arg(long)]
    parallel: bool,

    /// Fail on constant feature columns instead of propagating NaN
    #[arg(long)]
    strict: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting knnreg v{}", env!("CARGO_PKG_VERSION"));

    let mode = match args.max_k {
        Some(max_k) if max_k <= DEFAULT_K_MIN => {
            bail!("--max-k must be greater than {}, got {}", DEFAULT_K_MIN, max_k)
        }
        Some(max_k) => Mode::Sweep { k_min: DEFAULT_K_MIN, k_max: max_k },
        None => Mode::Fixed(args.k),
    };

    let train = load_table(&args.train)
        .with_context(|| format!("loading training data from {}", args.train.display()))?;
    let test = load_table(&args.test)
        .with_context(|| format!("loading test data from {}", args.test.display()))?;
    info!(
        train_rows = train.row_count(),
        test_rows = test.row_count(),
        columns = train.column_count(),
        "Data loaded"
    );

    let evaluator = Evaluator::new(EvaluatorConfig {
        response_index: args.response_index,
        parallel: args.parallel,
        strict_degenerate: args.strict,
    });

    let stdout = std::io::stdout();
    let mut reporter = Reporter::new(stdout.lock(), args.verbosity, args.format);
    knnreg::run(mode, &evaluator, &train, &test, &mut reporter)?;

    Ok(())
}
