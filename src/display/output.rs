use crate::analysis::pipeline::{PlayerSummary, RoleReport};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct PlayerRow {
    rank: String,
    player: String,
    champions: String,
    overall: String,
    best: String,
    worst: String,
}

#[derive(Tabled)]
struct BaselineRow {
    champion: String,
    games: String,
    win_rate: String,
    fight: String,
}

fn percent(value: f64) -> String {
    format!("{:+.1}%", value)
}

fn colored_percent(value: f64) -> String {
    if value >= 0.0 {
        percent(value).green().to_string()
    } else {
        percent(value).red().to_string()
    }
}

/// Highest and lowest per-stat averages of a player.
fn extremes(summary: &PlayerSummary) -> (String, String) {
    let mut stats: Vec<(&String, &f64)> = summary
        .stat_averages
        .iter()
        .filter(|(_, v)| v.is_finite())
        .collect();
    stats.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));

    let show = |entry: Option<&(&String, &f64)>| {
        entry
            .map(|(stat, value)| format!("{} {}", stat, percent(**value)))
            .unwrap_or_else(|| "-".to_string())
    };
    (show(stats.first()), show(stats.last()))
}

pub fn display_player_summaries(report: &RoleReport, top_n: usize) {
    println!(
        "\n{}",
        format!("📊 Performance vs. expected ({} role)", report.role)
            .bold()
            .cyan()
    );
    println!("{}\n", "=".repeat(70).cyan());

    let ranked = report.ranked();
    if ranked.is_empty() {
        println!(
            "{}",
            "No player could be compared (no champion has a baseline)".yellow()
        );
        return;
    }

    let mut rows = vec![];
    for (idx, summary) in ranked.iter().take(top_n).enumerate() {
        let (best, worst) = extremes(summary);
        rows.push(PlayerRow {
            rank: format!("#{}", idx + 1),
            player: summary.player.clone(),
            champions: summary.champions_compared.to_string(),
            overall: summary.overall.map(colored_percent).unwrap_or_default(),
            best,
            worst,
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    println!("\n{}", "Interpretation".bold().yellow());
    println!("• Overall: mean deviation across the champions a player was compared on");
    println!("• Best/Worst: stats furthest above and below the champion baseline\n");

    let skipped = report.players.len() - ranked.len();
    if skipped > 0 {
        println!(
            "{} {} players had no champion with a baseline\n",
            "ℹ️".cyan(),
            skipped
        );
    }
}

pub fn display_baseline(report: &RoleReport, fight_key: &str, top_n: usize) {
    if report.baseline.is_empty() {
        return;
    }

    println!("\n{}", "🎯 CHAMPION BASELINES".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let mut entries: Vec<_> = report.baseline.iter().collect();
    entries.sort_by(|a, b| b.games.cmp(&a.games));

    let rows: Vec<BaselineRow> = entries
        .iter()
        .take(top_n)
        .map(|entry| BaselineRow {
            champion: entry.champion.clone(),
            games: entry.games.to_string(),
            win_rate: format!("{:.1}%", entry.win_rate() * 100.0),
            fight: entry
                .get(fight_key)
                .map(|v| format!("{:.1}", v))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn player_progress(players: u64) -> ProgressBar {
    let pb = ProgressBar::new(players);
    if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Comparing players");
    pb
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
