use super::champion_stats::ChampionStatMap;

pub const DEFAULT_FIGHT_KEY: &str = "fightMetric";

/// Stats summed into the fight metric by default.
pub fn default_fight_stats() -> Vec<String> {
    ["dmg", "dmgTaken", "dmgMit", "cc"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Stores, for every champion, the sum of its `fight_stats` values under
/// `key`. Stats a champion lacks add nothing; an existing `key` is
/// overwritten.
pub fn add_fight_metric(map: &mut ChampionStatMap, fight_stats: &[String], key: &str) {
    for entry in map.iter_mut() {
        let fight: f64 = fight_stats
            .iter()
            .filter_map(|stat| entry.stats.get(stat))
            .sum();
        entry.stats.insert(key.to_string(), fight);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::champion_stats::ChampionStats;

    fn sample() -> ChampionStatMap {
        vec![
            ChampionStats::new("54")
                .with_stat("dmg", 500.0)
                .with_stat("dmgTaken", 700.0)
                .with_stat("cc", 12.5)
                .with_stat("vs", 1.0),
            ChampionStats::new("64").with_stat("vs", 2.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn sums_present_fight_stats_only() {
        let mut map = sample();
        add_fight_metric(&mut map, &default_fight_stats(), DEFAULT_FIGHT_KEY);
        assert_eq!(map.get("54").unwrap().get("fightMetric"), Some(1212.5));
        assert_eq!(map.get("64").unwrap().get("fightMetric"), Some(0.0));
    }

    #[test]
    fn custom_key_and_rerun_overwrite() {
        let mut map = sample();
        let stats = vec!["dmg".to_string(), "cc".to_string()];
        add_fight_metric(&mut map, &stats, "fight");
        add_fight_metric(&mut map, &stats, "fight");
        let entry = map.get("54").unwrap();
        assert_eq!(entry.get("fight"), Some(512.5));
        assert_eq!(entry.get("fightMetric"), None);
    }

    #[test]
    fn key_listed_among_fight_stats_folds_previous_value() {
        let mut map = sample();
        let stats = vec!["dmg".to_string(), "fight".to_string()];
        add_fight_metric(&mut map, &stats, "fight");
        add_fight_metric(&mut map, &stats, "fight");
        assert_eq!(map.get("54").unwrap().get("fight"), Some(1000.0));
    }
}
