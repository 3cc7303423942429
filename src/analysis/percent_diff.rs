use super::champion_stats::{ChampionStatMap, ChampionStats, PercentDiffMap};
use crate::error::MetricsError;
use tracing::debug;

/// `((actual / expected) - 1) * 100`. An expected value of zero is not
/// guarded: the result is infinite or NaN.
pub fn percent_change(actual: f64, expected: f64) -> f64 {
    ((actual / expected) - 1.0) * 100.0
}

/// Percent deviation of every stat in `actual` from the matching stat in
/// `expected`, for champions present in both maps.
///
/// Champions without a baseline are left out. A stat with no expected
/// counterpart fails the whole computation with [`MetricsError::KeyLookup`].
pub fn percent_diff(
    actual: &ChampionStatMap,
    expected: &ChampionStatMap,
) -> Result<PercentDiffMap, MetricsError> {
    let mut diff = PercentDiffMap::new();

    for entry in actual.iter() {
        let Some(baseline) = expected.get(&entry.champion) else {
            debug!("no baseline for champion {}, skipping", entry.champion);
            continue;
        };

        let mut deviation = ChampionStats {
            stats: Default::default(),
            ..entry.clone()
        };
        for (stat, &value) in &entry.stats {
            let reference = baseline.get(stat).ok_or_else(|| MetricsError::KeyLookup {
                champion: entry.champion.clone(),
                stat: stat.clone(),
            })?;
            deviation.stats.insert(stat.clone(), percent_change(value, reference));
        }
        diff.insert(deviation);
    }

    Ok(diff)
}

/// Replaces `actual` with its percent deviations from `expected`. On error
/// `actual` is left unchanged.
pub fn percent_diff_in_place(
    actual: &mut ChampionStatMap,
    expected: &ChampionStatMap,
) -> Result<(), MetricsError> {
    *actual = percent_diff(actual, expected)?;
    Ok(())
}
