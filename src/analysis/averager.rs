use super::champion_stats::{ChampionStats, PercentDiffMap};
use std::collections::BTreeMap;

/// Stat name under which a champion's collapsed average is stored.
pub const AVG_OF_STATS: &str = "avg_of_stats";

/// Collapses each champion's stats into their mean, stored under
/// [`AVG_OF_STATS`]. Champions with no stats produce no entry.
pub fn champion_averages(diff: &PercentDiffMap) -> PercentDiffMap {
    diff.iter().filter_map(collapse).collect()
}

/// In-place form of [`champion_averages`]: champions with no stats are
/// removed, the rest have their stats replaced by the single average.
pub fn champion_averages_in_place(diff: &mut PercentDiffMap) {
    diff.retain(|entry| !entry.stats.is_empty());
    for entry in diff.iter_mut() {
        if let Some(collapsed) = collapse(entry) {
            *entry = collapsed;
        }
    }
}

fn collapse(entry: &ChampionStats) -> Option<ChampionStats> {
    let mean = entry.mean()?;
    let mut collapsed = ChampionStats {
        stats: BTreeMap::new(),
        ..entry.clone()
    };
    collapsed.stats.insert(AVG_OF_STATS.to_string(), mean);
    Some(collapsed)
}

/// Mean of each named stat across the champions that carry it. A stat no
/// champion carries has no average and is absent from the result.
pub fn average_across(diff: &PercentDiffMap, stats: &[String]) -> BTreeMap<String, f64> {
    let mut averages = BTreeMap::new();
    for stat in stats {
        let values: Vec<f64> = diff.iter().filter_map(|entry| entry.get(stat)).collect();
        if values.is_empty() {
            continue;
        }
        averages.insert(stat.clone(), values.iter().sum::<f64>() / values.len() as f64);
    }
    averages
}

/// Plain mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
