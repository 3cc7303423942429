use crate::data::{Dataset, GameRecord};
use crate::error::MetricsError;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Fewest records a champion needs before a population baseline is computed
/// for it. Single-player computations have no such floor.
pub const MIN_BASELINE_RECORDS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChampionStats {
    pub champion: String,
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub stats: BTreeMap<String, f64>,
}

impl ChampionStats {
    pub fn new(champion: impl Into<String>) -> Self {
        ChampionStats {
            champion: champion.into(),
            games: 0,
            wins: 0,
            losses: 0,
            stats: BTreeMap::new(),
        }
    }

    pub fn with_stat(mut self, stat: &str, value: f64) -> Self {
        self.stats.insert(stat.to_string(), value);
        self
    }

    pub fn get(&self, stat: &str) -> Option<f64> {
        self.stats.get(stat).copied()
    }

    pub fn win_rate(&self) -> f64 {
        let decided = self.wins + self.losses;
        if decided == 0 {
            0.0
        } else {
            self.wins as f64 / decided as f64
        }
    }

    /// Mean of every stat value, `None` when there are no stats.
    pub fn mean(&self) -> Option<f64> {
        if self.stats.is_empty() {
            None
        } else {
            Some(self.stats.values().sum::<f64>() / self.stats.len() as f64)
        }
    }
}

/// Champion → per-stat values. Also used to hold percent deviations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChampionStatMap {
    champions: BTreeMap<String, ChampionStats>,
}

pub type PercentDiffMap = ChampionStatMap;

impl ChampionStatMap {
    pub fn new() -> Self {
        ChampionStatMap::default()
    }

    /// Inserts an entry, replacing any previous one for the same champion.
    pub fn insert(&mut self, entry: ChampionStats) {
        self.champions.insert(entry.champion.clone(), entry);
    }

    pub fn get(&self, champion: &str) -> Option<&ChampionStats> {
        self.champions.get(champion)
    }

    pub fn contains(&self, champion: &str) -> bool {
        self.champions.contains_key(champion)
    }

    pub fn len(&self) -> usize {
        self.champions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.champions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChampionStats> {
        self.champions.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ChampionStats> {
        self.champions.values_mut()
    }

    pub fn retain<F: FnMut(&ChampionStats) -> bool>(&mut self, mut keep: F) {
        self.champions.retain(|_, entry| keep(entry));
    }
}

impl FromIterator<ChampionStats> for ChampionStatMap {
    fn from_iter<I: IntoIterator<Item = ChampionStats>>(iter: I) -> Self {
        let mut map = ChampionStatMap::new();
        for entry in iter {
            map.insert(entry);
        }
        map
    }
}

/// Logical stat name → the dataset column holding its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatSpec {
    entries: Vec<(String, String)>,
}

impl StatSpec {
    pub fn new() -> Self {
        StatSpec::default()
    }

    /// The per-minute stats compared by default, plus early-lane harass.
    pub fn standard() -> Self {
        StatSpec::new()
            .with("dmg", "dmg/min")
            .with("dmgTaken", "dmgTaken/min")
            .with("dmgMit", "dmgMit/min")
            .with("cc", "cc/min")
            .with("vs", "vs/min")
            .with("harass", "dTPMD0to10")
    }

    pub fn with(mut self, stat: &str, column: &str) -> Self {
        self.insert(stat, column);
        self
    }

    /// Maps `stat` to `column`; an existing mapping for `stat` is replaced.
    pub fn insert(&mut self, stat: &str, column: &str) {
        match self.entries.iter_mut().find(|(s, _)| s == stat) {
            Some(entry) => entry.1 = column.to_string(),
            None => self.entries.push((stat.to_string(), column.to_string())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, c)| (s.as_str(), c.as_str()))
    }

    pub fn stat_names(&self) -> Vec<String> {
        self.entries.iter().map(|(s, _)| s.clone()).collect()
    }
}

/// Population baseline: the win/loss-weighted stats of every champion in
/// `champions` with at least [`MIN_BASELINE_RECORDS`] records.
pub fn compute_baseline(
    dataset: &Dataset,
    champions: &[String],
    outcome_col: &str,
    spec: &StatSpec,
) -> Result<ChampionStatMap, MetricsError> {
    check_columns(dataset, outcome_col, spec)?;

    let mut map = ChampionStatMap::new();
    for champion in champions {
        let selection: Vec<&GameRecord> = dataset
            .iter()
            .filter(|r| &r.champion == champion)
            .collect();

        if selection.len() < MIN_BASELINE_RECORDS {
            debug!(
                "champion {} has {} records, below the baseline minimum",
                champion,
                selection.len()
            );
            continue;
        }

        if let Some(entry) = weighted_stats(champion, &selection, outcome_col, spec) {
            map.insert(entry);
        }
    }

    Ok(map)
}

/// A single player's win/loss-weighted stats on each champion in `champions`.
/// Player names match case-insensitively. Any number of records qualifies,
/// unlike [`compute_baseline`].
pub fn compute_for_player(
    dataset: &Dataset,
    player: &str,
    champions: &[String],
    outcome_col: &str,
    spec: &StatSpec,
) -> Result<ChampionStatMap, MetricsError> {
    check_columns(dataset, outcome_col, spec)?;

    let mut map = ChampionStatMap::new();
    for champion in champions {
        let selection: Vec<&GameRecord> = dataset
            .iter()
            .filter(|r| &r.champion == champion && r.is_player(player))
            .collect();

        if let Some(entry) = weighted_stats(champion, &selection, outcome_col, spec) {
            map.insert(entry);
        }
    }

    Ok(map)
}

fn check_columns(dataset: &Dataset, outcome_col: &str, spec: &StatSpec) -> Result<(), MetricsError> {
    let kind = dataset
        .column_kind(outcome_col)
        .ok_or_else(|| MetricsError::MissingColumn(outcome_col.to_string()))?;
    if !kind.is_numeric() {
        return Err(MetricsError::NonNumericOutcome {
            column: outcome_col.to_string(),
            dtype: kind.to_string(),
        });
    }

    for (_, column) in spec.iter() {
        let kind = dataset
            .column_kind(column)
            .ok_or_else(|| MetricsError::MissingColumn(column.to_string()))?;
        if !kind.is_numeric() {
            return Err(MetricsError::NonNumericStat {
                column: column.to_string(),
                dtype: kind.to_string(),
            });
        }
    }

    Ok(())
}

/// Weighted value per stat:
/// `(wins * mean_in_wins + losses * mean_in_losses) / (wins + losses)`.
///
/// A side with no values contributes a mean of 0. Stats are dropped when the
/// selection holds neither a win nor a loss, and the champion is dropped when
/// no stat survives.
fn weighted_stats(
    champion: &str,
    selection: &[&GameRecord],
    outcome_col: &str,
    spec: &StatSpec,
) -> Option<ChampionStats> {
    let (won, lost): (Vec<&GameRecord>, Vec<&GameRecord>) = selection
        .iter()
        .copied()
        .filter(|r| matches!(r.get(outcome_col).as_f64(), Some(o) if o == 1.0 || o == 0.0))
        .partition(|r| r.get(outcome_col).as_f64() == Some(1.0));

    let mut entry = ChampionStats::new(champion);
    entry.games = selection.len();
    entry.wins = won.len();
    entry.losses = lost.len();

    let decided = entry.wins + entry.losses;
    if decided == 0 {
        if !selection.is_empty() {
            debug!("champion {} has no decided games, skipping its stats", champion);
        }
        return None;
    }

    for (stat, column) in spec.iter() {
        let win_mean = column_mean(&won, column).unwrap_or(0.0);
        let loss_mean = column_mean(&lost, column).unwrap_or(0.0);
        let value = (entry.wins as f64 * win_mean + entry.losses as f64 * loss_mean) / decided as f64;
        entry.stats.insert(stat.to_string(), value);
    }

    if entry.stats.is_empty() {
        None
    } else {
        Some(entry)
    }
}

/// Mean over the non-null cells of `column`.
fn column_mean(records: &[&GameRecord], column: &str) -> Option<f64> {
    let values: Vec<f64> = records.iter().filter_map(|r| r.get(column).as_f64()).collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
