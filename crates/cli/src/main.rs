use algoinvest_core::config::{parse_delimiter, Settings};
use algoinvest_core::ingest::csv_source::{CsvOptions, CsvShareSource};
use algoinvest_core::ingest::ShareSource;
use algoinvest_core::solver::budget::FillPolicy;
use algoinvest_core::solver::{solve, SolveOptions, SolverMode};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod report;

#[derive(Debug, Parser)]
#[command(name = "algoinvest", about = "Pick the most profitable shares under a spending cap")]
struct Args {
    /// Delimited file with `name, price, profit_rate` rows.
    input: PathBuf,

    /// `exhaustive` (every subset) or `greedy` (profit-rate order).
    #[arg(long, default_value = "exhaustive")]
    mode: SolverMode,

    /// Spending cap. Overrides ALGOINVEST_MAX_SPENDING.
    #[arg(long)]
    budget: Option<f64>,

    /// Field delimiter, e.g. `;` or `tab`. Overrides ALGOINVEST_CSV_DELIMITER.
    #[arg(long)]
    delimiter: Option<String>,

    /// Input encoding label, e.g. `windows-1252`. Overrides ALGOINVEST_CSV_ENCODING.
    #[arg(long)]
    encoding: Option<String>,

    /// Refuse exhaustive search above this many shares.
    #[arg(long)]
    max_exhaustive_shares: Option<usize>,

    /// `stop` at the first unaffordable share, or `skip` it and keep going.
    #[arg(long, default_value = "stop")]
    fill_policy: FillPolicy,

    /// Number of ranked strategies to print (exhaustive mode).
    #[arg(long, default_value_t = 1)]
    top: usize,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    // The returned error is printed by anyhow and sets a non-zero exit code.
    let result = run(&args, settings);
    if let Err(err) = &result {
        sentry_anyhow::capture_anyhow(err);
    }
    result
}

fn run(args: &Args, settings: Settings) -> anyhow::Result<()> {
    let settings = apply_overrides(args, settings)?;

    let source = CsvShareSource::new(&args.input, CsvOptions::from_settings(&settings)?);
    tracing::debug!(source = source.source_name(), path = %source.path().display(), "loading shares");
    let loaded = source.load()?;
    if loaded.shares.is_empty() {
        tracing::warn!(skipped = loaded.skipped, "no valid shares in input");
    }

    let opts = SolveOptions {
        fill_policy: args.fill_policy,
        top: args.top,
        ..SolveOptions::from_settings(args.mode, &settings)
    };
    let solution = solve(&loaded.shares, &opts)?;

    let report = report::RunReport::new(&solution, &loaded, opts.budget, chrono::Utc::now());
    if args.json {
        let json = serde_json::to_string_pretty(&report).context("serialize report failed")?;
        println!("{json}");
    } else {
        print!("{}", report.render_text());
    }

    Ok(())
}

fn apply_overrides(args: &Args, mut settings: Settings) -> anyhow::Result<Settings> {
    if let Some(budget) = args.budget {
        settings.max_spending = budget;
    }
    if let Some(d) = args.delimiter.as_deref() {
        settings.csv_delimiter = parse_delimiter(d).context("--delimiter")?;
    }
    if let Some(e) = &args.encoding {
        settings.csv_encoding = e.clone();
    }
    if let Some(n) = args.max_exhaustive_shares {
        settings.max_exhaustive_shares = n;
    }
    Ok(settings)
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
