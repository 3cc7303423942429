use anyhow::{Context, Result};
use clap::Parser;
use role_metrics::analysis::fight::DEFAULT_FIGHT_KEY;
use role_metrics::analysis::pipeline::{ReportOptions, RoleReport};
use role_metrics::analysis::role::RoleSelection;
use role_metrics::analysis::champion_stats::StatSpec;
use role_metrics::config::Config;
use role_metrics::data::{loader, rates};
use role_metrics::display::output::{
    display_baseline, display_error, display_info, display_player_summaries, display_success,
    player_progress,
};
use role_metrics::report;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "Role Metrics")]
#[command(about = "Compare players against the expected stats of their role's champions", long_about = None)]
struct Args {
    /// Game records: a .csv export or a SQLite database
    input: PathBuf,

    /// Role to compare within (top, jungle, mid, bot, support, or none)
    #[arg(short, long, default_value = "top")]
    role: String,

    /// Stat to compare as name=column; repeat for more (default: per-minute set)
    #[arg(short, long = "stat", value_parser = parse_stat)]
    stats: Vec<(String, String)>,

    /// Stat summed into the fight metric; repeat for more (default: dmg, dmgTaken, dmgMit, cc)
    #[arg(long = "fight-stat")]
    fight_stats: Vec<String>,

    /// Name the fight metric is stored under
    #[arg(long, default_value = DEFAULT_FIGHT_KEY)]
    fight_key: String,

    /// SQLite table holding the records
    #[arg(long)]
    table: Option<String>,

    /// Skip deriving per-minute rate columns from game totals
    #[arg(long)]
    no_derive: bool,

    /// CSV report path (default: ~/.role_metrics/avg_<role>_diff.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the full report as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Number of rows to display
    #[arg(short, long, default_value = "10")]
    top_n: usize,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn parse_stat(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((stat, column)) if !stat.trim().is_empty() && !column.trim().is_empty() => {
            Ok((stat.trim().to_string(), column.trim().to_string()))
        }
        _ => Err(format!("expected name=column, got '{}'", raw)),
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(&args.log_level);

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::from_env()?;
    if let Some(table) = args.table {
        config.table = table;
    }

    let role: RoleSelection = args.role.parse()?;

    let mut options = ReportOptions::new(role, &config);
    if !args.stats.is_empty() {
        let mut spec = StatSpec::new();
        for (stat, column) in &args.stats {
            spec.insert(stat, column);
        }
        options.stat_spec = spec;
    }
    if !args.fight_stats.is_empty() {
        options.fight_stats = args.fight_stats;
    }
    options.fight_key = args.fight_key;

    display_info(&format!("Loading records from {}", args.input.display()));
    let mut dataset = loader::load(&args.input, &config)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    display_success(&format!("Loaded {} records", dataset.len()));

    if !args.no_derive {
        if dataset.has_column(&config.duration_col) {
            let derivable: Vec<_> = rates::default_rate_columns()
                .into_iter()
                .filter(|rate| dataset.has_column(&rate.total))
                .collect();
            rates::derive_rates(&mut dataset, &config.duration_col, &derivable)
                .context("failed to derive per-minute columns")?;
            info!("Derived {} per-minute columns", derivable.len());
        } else {
            warn!(
                "duration column {} not found, per-minute columns not derived",
                config.duration_col
            );
        }
    }

    let pb = player_progress(0);
    let report = RoleReport::build_with(&dataset, &options, |summary| {
        pb.inc_length(1);
        pb.inc(1);
        pb.set_message(summary.player.clone());
    })
    .with_context(|| format!("failed to build the {} report", role))?;
    pb.finish_with_message("✓ Players compared");

    display_baseline(&report, &options.fight_key, args.top_n);
    display_player_summaries(&report, args.top_n);

    let csv_path = args
        .output
        .unwrap_or_else(|| report::default_report_path(role.label()));
    report::save_csv(&report, &csv_path)
        .with_context(|| format!("failed to write {}", csv_path.display()))?;
    display_success(&format!("Report written to {}", csv_path.display()));

    if let Some(json_path) = args.json {
        report::save_json(&report, &json_path)
            .with_context(|| format!("failed to write {}", json_path.display()))?;
        display_success(&format!("JSON report written to {}", json_path.display()));
    }

    Ok(())
}
