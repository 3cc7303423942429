use crate::error::MetricsError;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub player_col: String,
    pub champion_col: String,
    pub outcome_col: String,
    /// When set, every block of five records is checked to share one game id.
    pub game_col: Option<String>,
    pub duration_col: String,
    pub table: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            player_col: "summonerName".to_string(),
            champion_col: "championId".to_string(),
            outcome_col: "win".to_string(),
            game_col: None,
            duration_col: "gameDuration".to_string(),
            table: "playerStats".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, MetricsError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source, falling back to
    /// defaults for anything unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MetricsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let text = |key: &str, fallback: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
        };
        let table = text("ROLE_METRICS_TABLE", defaults.table);
        if !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(MetricsError::ConfigError(format!(
                "ROLE_METRICS_TABLE must be a plain table name, got '{}'",
                table
            )));
        }

        Ok(Config {
            player_col: text("ROLE_METRICS_PLAYER_COL", defaults.player_col),
            champion_col: text("ROLE_METRICS_CHAMPION_COL", defaults.champion_col),
            outcome_col: text("ROLE_METRICS_OUTCOME_COL", defaults.outcome_col),
            game_col: lookup("ROLE_METRICS_GAME_COL")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            duration_col: text("ROLE_METRICS_DURATION_COL", defaults.duration_col),
            table,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.player_col, "summonerName");
        assert_eq!(config.champion_col, "championId");
        assert_eq!(config.outcome_col, "win");
        assert_eq!(config.game_col, None);
        assert_eq!(config.duration_col, "gameDuration");
        assert_eq!(config.table, "playerStats");
    }

    #[test]
    fn variables_override_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("ROLE_METRICS_OUTCOME_COL", "result"),
            ("ROLE_METRICS_GAME_COL", "gameId"),
            ("ROLE_METRICS_TABLE", "stats_2024"),
        ]))
        .unwrap();
        assert_eq!(config.outcome_col, "result");
        assert_eq!(config.game_col.as_deref(), Some("gameId"));
        assert_eq!(config.table, "stats_2024");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("ROLE_METRICS_PLAYER_COL", "  "),
            ("ROLE_METRICS_GAME_COL", ""),
        ]))
        .unwrap();
        assert_eq!(config.player_col, "summonerName");
        assert_eq!(config.game_col, None);
    }

    #[test]
    fn table_name_must_be_an_identifier() {
        let err = Config::from_lookup(lookup_from(&[("ROLE_METRICS_TABLE", "stats; DROP")])).unwrap_err();
        assert!(matches!(err, MetricsError::ConfigError(_)));
    }
}
