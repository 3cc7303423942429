// Role report: baselines per champion, then each player's deviation from them.

use super::averager::{average_across, champion_averages, mean, AVG_OF_STATS};
use super::champion_stats::{compute_baseline, compute_for_player, ChampionStatMap, StatSpec};
use super::fight::{add_fight_metric, default_fight_stats, DEFAULT_FIGHT_KEY};
use super::percent_diff::percent_diff_in_place;
use super::role::{filter_role, RoleSelection};
use crate::config::Config;
use crate::data::Dataset;
use crate::error::MetricsError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub role: RoleSelection,
    pub stat_spec: StatSpec,
    pub fight_stats: Vec<String>,
    pub fight_key: String,
    pub outcome_col: String,
    pub game_col: Option<String>,
}

impl ReportOptions {
    pub fn new(role: RoleSelection, config: &Config) -> Self {
        ReportOptions {
            role,
            stat_spec: StatSpec::standard(),
            fight_stats: default_fight_stats(),
            fight_key: DEFAULT_FIGHT_KEY.to_string(),
            outcome_col: config.outcome_col.clone(),
            game_col: config.game_col.clone(),
        }
    }

    /// Stats averaged per player: the stat set's names, then the fight key.
    pub fn stat_names(&self) -> Vec<String> {
        let mut names = self.stat_spec.stat_names();
        if !names.contains(&self.fight_key) {
            names.push(self.fight_key.clone());
        }
        names
    }
}

/// How far one player sits from the role's baseline, in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub player: String,
    /// Per stat, averaged over the champions the player was compared on.
    pub stat_averages: BTreeMap<String, f64>,
    /// Per champion, averaged over that champion's stats.
    pub champion_averages: BTreeMap<String, f64>,
    /// Mean of the per-champion averages.
    pub overall: Option<f64>,
    pub champions_compared: usize,
}

impl PlayerSummary {
    pub fn from_diff(player: &str, diff: &ChampionStatMap, stat_names: &[String]) -> Self {
        let champion_averages: BTreeMap<String, f64> = champion_averages(diff)
            .iter()
            .filter_map(|entry| entry.get(AVG_OF_STATS).map(|v| (entry.champion.clone(), v)))
            .collect();
        let overall = mean(&champion_averages.values().copied().collect::<Vec<_>>());

        PlayerSummary {
            player: player.to_string(),
            stat_averages: average_across(diff, stat_names),
            champions_compared: champion_averages.len(),
            champion_averages,
            overall,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleReport {
    pub role: String,
    pub generated_at: DateTime<Utc>,
    pub records: usize,
    pub stat_names: Vec<String>,
    pub baseline: ChampionStatMap,
    pub players: Vec<PlayerSummary>,
}

impl RoleReport {
    pub fn build(dataset: &Dataset, options: &ReportOptions) -> Result<Self, MetricsError> {
        Self::build_with(dataset, options, |_| {})
    }

    /// Builds the report, calling `on_player` after each player is summarised.
    pub fn build_with<F>(
        dataset: &Dataset,
        options: &ReportOptions,
        mut on_player: F,
    ) -> Result<Self, MetricsError>
    where
        F: FnMut(&PlayerSummary),
    {
        if let Some(game_col) = &options.game_col {
            dataset.check_game_blocks(game_col)?;
        }

        let filtered = filter_role(dataset, options.role);
        let champions = filtered.champions();
        info!(
            "Role {}: {} records, {} champions",
            options.role,
            filtered.len(),
            champions.len()
        );

        let mut baseline =
            compute_baseline(&filtered, &champions, &options.outcome_col, &options.stat_spec)?;
        add_fight_metric(&mut baseline, &options.fight_stats, &options.fight_key);
        info!("Baseline covers {} champions", baseline.len());

        let stat_names = options.stat_names();
        let mut players = Vec::new();
        for player in filtered.players() {
            let mut actual = compute_for_player(
                &filtered,
                &player,
                &champions,
                &options.outcome_col,
                &options.stat_spec,
            )?;
            add_fight_metric(&mut actual, &options.fight_stats, &options.fight_key);
            percent_diff_in_place(&mut actual, &baseline)?;

            let summary = PlayerSummary::from_diff(&player, &actual, &stat_names);
            debug!(
                "player {} compared on {} champions",
                summary.player, summary.champions_compared
            );
            on_player(&summary);
            players.push(summary);
        }

        Ok(RoleReport {
            role: options.role.to_string(),
            generated_at: Utc::now(),
            records: filtered.len(),
            stat_names,
            baseline,
            players,
        })
    }

    pub fn player(&self, name: &str) -> Option<&PlayerSummary> {
        let upper = name.to_uppercase();
        self.players.iter().find(|p| p.player == upper)
    }

    /// Players with an overall score, best first. NaN scores sort last.
    pub fn ranked(&self) -> Vec<&PlayerSummary> {
        let mut ranked: Vec<(&PlayerSummary, f64)> = self
            .players
            .iter()
            .filter_map(|p| p.overall.map(|overall| (p, overall)))
            .collect();
        ranked.sort_by(|(_, a), (_, b)| a.is_nan().cmp(&b.is_nan()).then_with(|| b.total_cmp(a)));
        ranked.into_iter().map(|(p, _)| p).collect()
    }
}
