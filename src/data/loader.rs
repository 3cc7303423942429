// Dataset ingestion from CSV exports and the crawler's SQLite database.

use super::record::{Dataset, GameRecord, Value};
use crate::config::Config;
use crate::error::MetricsError;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Loads a dataset, picking the reader from the file extension: `.csv` is
/// read as CSV, anything else as a SQLite database.
pub fn load(path: &Path, config: &Config) -> Result<Dataset, MetricsError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let dataset = if is_csv {
        load_csv(path, config)?
    } else {
        load_sqlite(path, config)?
    };

    info!("Loaded {} records from {}", dataset.len(), path.display());
    Ok(dataset)
}

pub fn load_csv(path: &Path, config: &Config) -> Result<Dataset, MetricsError> {
    let file = File::open(path)
        .map_err(|e| MetricsError::IoError(format!("Failed to open {}: {}", path.display(), e)))?;
    load_csv_from_reader(file, config)
}

pub fn load_csv_from_reader<R: Read>(rdr: R, config: &Config) -> Result<Dataset, MetricsError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let player_idx = column_index(&headers, &config.player_col)?;
    let champion_idx = column_index(&headers, &config.champion_col)?;

    let mut records = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let row = result?;
        if row.len() != headers.len() {
            warn!("row {} has {} cells, expected {}", line + 1, row.len(), headers.len());
        }

        let columns: HashMap<String, Value> = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), Value::parse(row.get(i).unwrap_or(""))))
            .collect();

        records.push(GameRecord {
            player: row.get(player_idx).unwrap_or("").trim().to_string(),
            champion: row.get(champion_idx).unwrap_or("").trim().to_string(),
            columns,
        });
    }

    debug!("parsed {} CSV rows over {} columns", records.len(), headers.len());
    Ok(Dataset::with_columns(headers, records))
}

pub fn load_sqlite(path: &Path, config: &Config) -> Result<Dataset, MetricsError> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    load_sqlite_table(&conn, &config.table, config)
}

/// Reads every row of `table` into a dataset, in rowid order.
pub fn load_sqlite_table(
    conn: &Connection,
    table: &str,
    config: &Config,
) -> Result<Dataset, MetricsError> {
    if table.is_empty() || !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(MetricsError::ConfigError(format!("Invalid table name: {}", table)));
    }

    let mut stmt = conn.prepare(&format!("SELECT * FROM {}", table))?;
    let headers: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let player_idx = column_index(&headers, &config.player_col)?;
    let champion_idx = column_index(&headers, &config.champion_col)?;

    let mut rows = stmt.query([])?;
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        let mut columns = HashMap::with_capacity(headers.len());
        for (i, name) in headers.iter().enumerate() {
            columns.insert(name.clone(), from_sql(row.get_ref(i)?));
        }
        let player = columns[&headers[player_idx]].to_string();
        let champion = columns[&headers[champion_idx]].to_string();
        records.push(GameRecord {
            player,
            champion,
            columns,
        });
    }

    Ok(Dataset::with_columns(headers, records))
}

fn from_sql(cell: ValueRef<'_>) -> Value {
    match cell {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(_) => Value::Null,
    }
}

fn column_index(headers: &[String], column: &str) -> Result<usize, MetricsError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| MetricsError::MissingColumn(column.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
summonerName,championId,win,dmg/min
Ziv,54,1,512.5
Karsa,64,1,
Maple,7,0,430
";

    #[test]
    fn csv_rows_become_records() {
        let ds = load_csv_from_reader(SAMPLE.as_bytes(), &Config::default()).unwrap();
        assert_eq!(ds.len(), 3);
        let first = &ds.records()[0];
        assert_eq!(first.player, "Ziv");
        assert_eq!(first.champion, "54");
        assert_eq!(first.get("win"), &Value::Integer(1));
        assert_eq!(first.get("dmg/min"), &Value::Real(512.5));
        assert!(ds.records()[1].get("dmg/min").is_null());
    }

    #[test]
    fn header_only_csv_keeps_its_columns() {
        let ds = load_csv_from_reader("summonerName,championId,win\n".as_bytes(), &Config::default())
            .unwrap();
        assert!(ds.is_empty());
        assert!(ds.has_column("win"));
    }

    #[test]
    fn csv_without_player_column_is_rejected() {
        let err = load_csv_from_reader("championId,win\n1,1\n".as_bytes(), &Config::default())
            .unwrap_err();
        assert!(matches!(err, MetricsError::MissingColumn(c) if c == "summonerName"));
    }

    #[test]
    fn sqlite_table_is_read_in_order() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE playerStats (summonerName TEXT, championId INTEGER, win INTEGER, visionScore REAL);
             INSERT INTO playerStats VALUES ('ahq', 54, 1, 31.0);
             INSERT INTO playerStats VALUES ('Karsa', 64, 0, NULL);",
        )
        .unwrap();

        let ds = load_sqlite_table(&conn, "playerStats", &Config::default()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].champion, "54");
        assert_eq!(ds.records()[0].get("visionScore"), &Value::Real(31.0));
        assert_eq!(ds.records()[1].player, "Karsa");
        assert!(ds.records()[1].get("visionScore").is_null());
    }

    #[test]
    fn sqlite_table_name_is_validated() {
        let conn = Connection::open_in_memory().unwrap();
        let err = load_sqlite_table(&conn, "x; DROP TABLE y", &Config::default()).unwrap_err();
        assert!(matches!(err, MetricsError::ConfigError(_)));
    }
}
