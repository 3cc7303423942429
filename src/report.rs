use crate::analysis::pipeline::RoleReport;
use crate::error::MetricsError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default report location: `~/.role_metrics/avg_<role>_diff.csv`.
pub fn default_report_path(role: &str) -> PathBuf {
    let report_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".role_metrics");

    report_dir.join(format!("avg_{}_diff.csv", role))
}

/// Writes one row per player: `player,<stat...>,overall`. Averages a player
/// has no value for are left empty.
pub fn write_csv<W: Write>(report: &RoleReport, writer: W) -> Result<(), MetricsError> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["player".to_string()];
    header.extend(report.stat_names.iter().cloned());
    header.push("overall".to_string());
    wtr.write_record(&header)?;

    for summary in &report.players {
        let mut row = vec![summary.player.clone()];
        for stat in &report.stat_names {
            row.push(cell(summary.stat_averages.get(stat).copied()));
        }
        row.push(cell(summary.overall));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn save_csv(report: &RoleReport, path: &Path) -> Result<(), MetricsError> {
    ensure_parent(path)?;
    let file = fs::File::create(path).map_err(|e| {
        MetricsError::IoError(format!("Failed to create {}: {}", path.display(), e))
    })?;
    write_csv(report, file)
}

pub fn save_json(report: &RoleReport, path: &Path) -> Result<(), MetricsError> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| MetricsError::JsonError(format!("Failed to serialize report: {}", e)))?;

    fs::write(path, json).map_err(|e| {
        MetricsError::IoError(format!("Failed to write {}: {}", path.display(), e))
    })?;

    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), MetricsError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir).map_err(|e| {
            MetricsError::IoError(format!("Failed to create {}: {}", dir.display(), e))
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::champion_stats::ChampionStatMap;
    use crate::analysis::pipeline::PlayerSummary;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn report() -> RoleReport {
        let mut stat_averages = BTreeMap::new();
        stat_averages.insert("dmg".to_string(), 12.5);
        RoleReport {
            role: "top".to_string(),
            generated_at: Utc::now(),
            records: 10,
            stat_names: vec!["dmg".to_string(), "vs".to_string()],
            baseline: ChampionStatMap::new(),
            players: vec![PlayerSummary {
                player: "ZIV".to_string(),
                stat_averages,
                champion_averages: BTreeMap::new(),
                overall: Some(-3.0),
                champions_compared: 1,
            }],
        }
    }

    #[test]
    fn csv_has_one_row_per_player() {
        let mut out = Vec::new();
        write_csv(&report(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "player,dmg,vs,overall\nZIV,12.5,,-3\n");
    }

    #[test]
    fn files_land_in_nested_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let csv_path = tmp.path().join("reports/top.csv");
        let json_path = tmp.path().join("reports/top.json");

        save_csv(&report(), &csv_path).unwrap();
        save_json(&report(), &json_path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["role"], "top");
        assert_eq!(json["players"][0]["player"], "ZIV");
        assert!(fs::read_to_string(&csv_path).unwrap().starts_with("player,"));
    }

    #[test]
    fn default_path_is_named_after_role() {
        let path = default_report_path("jungle");
        assert!(path.ends_with(".role_metrics/avg_jungle_diff.csv"));
    }
}
