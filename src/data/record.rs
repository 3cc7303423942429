use crate::error::MetricsError;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A single cell as read from the source table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Text(String),
    Null,
}

static NULL: Value = Value::Null;

impl Value {
    /// Numeric view of the cell. Text and Null have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Real(f) => Some(*f),
            Value::Text(_) | Value::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Parses a raw text cell the way a CSV reader would infer it.
    pub fn parse(raw: &str) -> Value {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Value::Null
        } else if let Ok(i) = trimmed.parse::<i64>() {
            Value::Integer(i)
        } else if let Ok(f) = trimmed.parse::<f64>() {
            // "NaN" marks a missing value in exported frames
            if f.is_nan() {
                Value::Null
            } else {
                Value::Real(f)
            }
        } else {
            Value::Text(raw.to_string())
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", r),
            Value::Text(s) => write!(f, "{}", s),
            Value::Null => Ok(()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

/// The inferred type of a whole column, ignoring null cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Real,
    Text,
    Mixed,
    Empty,
}

impl ColumnKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Real | ColumnKind::Empty)
    }

    fn widen(self, cell: &Value) -> ColumnKind {
        let cell_kind = match cell {
            Value::Integer(_) => ColumnKind::Integer,
            Value::Real(_) => ColumnKind::Real,
            Value::Text(_) => ColumnKind::Text,
            Value::Null => return self,
        };
        match (self, cell_kind) {
            (ColumnKind::Empty, k) => k,
            (a, b) if a == b => a,
            (ColumnKind::Integer, ColumnKind::Real) | (ColumnKind::Real, ColumnKind::Integer) => {
                ColumnKind::Real
            }
            _ => ColumnKind::Mixed,
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Integer => "integer",
            ColumnKind::Real => "real",
            ColumnKind::Text => "text",
            ColumnKind::Mixed => "mixed",
            ColumnKind::Empty => "empty",
        };
        f.write_str(name)
    }
}

/// One player's performance in one game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub player: String,
    pub champion: String,
    pub columns: HashMap<String, Value>,
}

impl GameRecord {
    pub fn new(player: impl Into<String>, champion: impl Into<String>) -> Self {
        GameRecord {
            player: player.into(),
            champion: champion.into(),
            columns: HashMap::new(),
        }
    }

    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.columns.insert(column.to_string(), value.into());
        self
    }

    /// Cell lookup; an absent column reads as null.
    pub fn get(&self, column: &str) -> &Value {
        self.columns.get(column).unwrap_or(&NULL)
    }

    pub fn set(&mut self, column: &str, value: Value) {
        self.columns.insert(column.to_string(), value);
    }

    pub fn is_player(&self, player: &str) -> bool {
        self.player.to_uppercase() == player.to_uppercase()
    }
}

/// Ordered game records. Each game is expected to appear as five consecutive
/// records in role order (top, jungle, mid, bot, support).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<GameRecord>,
}

impl Dataset {
    /// Builds a dataset whose columns are every column any record carries.
    pub fn new(records: Vec<GameRecord>) -> Self {
        let columns: Vec<String> = records
            .iter()
            .flat_map(|r| r.columns.keys().cloned())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();
        Dataset { columns, records }
    }

    /// Builds a dataset with a known header, which holds even with no rows.
    /// Columns only present on records are appended after the header.
    pub fn with_columns(columns: Vec<String>, records: Vec<GameRecord>) -> Self {
        let inferred = Dataset::new(records);
        let mut dataset = Dataset {
            columns: Vec::with_capacity(columns.len()),
            records: inferred.records,
        };
        for column in columns.iter().chain(inferred.columns.iter()) {
            dataset.add_column(column);
        }
        dataset
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn add_column(&mut self, column: &str) {
        if !self.has_column(column) {
            self.columns.push(column.to_string());
        }
    }

    /// A dataset with the same columns holding only `records`.
    pub fn subset<I: IntoIterator<Item = GameRecord>>(&self, records: I) -> Dataset {
        Dataset {
            columns: self.columns.clone(),
            records: records.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [GameRecord] {
        &mut self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameRecord> {
        self.records.iter()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Inferred type of a column, or `None` when the dataset has no such
    /// column. A column with no rows is `Empty`.
    pub fn column_kind(&self, column: &str) -> Option<ColumnKind> {
        if !self.has_column(column) {
            return None;
        }
        Some(
            self.records
                .iter()
                .fold(ColumnKind::Empty, |kind, r| kind.widen(r.get(column))),
        )
    }

    /// Distinct champions in order of first appearance.
    pub fn champions(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.champion.as_str()))
            .map(|r| r.champion.clone())
            .collect()
    }

    /// Distinct players, upper-cased, most records first.
    pub fn players(&self) -> Vec<String> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for record in &self.records {
            *counts.entry(record.player.to_uppercase()).or_insert(0) += 1;
        }
        let mut players: Vec<(String, usize)> = counts.into_iter().collect();
        players.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        players.into_iter().map(|(name, _)| name).collect()
    }

    /// Checks that records come in blocks of five sharing one game id.
    pub fn check_game_blocks(&self, game_col: &str) -> Result<(), MetricsError> {
        if !self.has_column(game_col) {
            return Err(MetricsError::MissingColumn(game_col.to_string()));
        }

        for (idx, block) in self.records.chunks(5).enumerate() {
            let start = idx * 5;
            let end = start + block.len();
            if block.len() != 5 {
                return Err(MetricsError::BrokenGameBlock {
                    start,
                    end,
                    reason: format!("trailing block has {} records", block.len()),
                });
            }
            let game = block[0].get(game_col);
            if game.is_null() {
                return Err(MetricsError::BrokenGameBlock {
                    start,
                    end,
                    reason: format!("record {} has no game id", start),
                });
            }
            if let Some((offset, other)) = block
                .iter()
                .enumerate()
                .find(|(_, r)| r.get(game_col) != game)
            {
                return Err(MetricsError::BrokenGameBlock {
                    start,
                    end,
                    reason: format!(
                        "record {} belongs to game {} but block started with game {}",
                        start + offset,
                        other.get(game_col),
                        game
                    ),
                });
            }
        }

        Ok(())
    }
}

impl FromIterator<GameRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = GameRecord>>(iter: I) -> Self {
        Dataset::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: i64) -> Vec<GameRecord> {
        (0..5)
            .map(|i| GameRecord::new(format!("p{}", i), format!("c{}", i)).with("gameId", id))
            .collect()
    }

    #[test]
    fn nan_cells_read_as_missing() {
        assert_eq!(Value::parse("NaN"), Value::Null);
        assert_eq!(Value::parse("nan"), Value::Null);
        assert_eq!(Value::parse("inf"), Value::Real(f64::INFINITY));
    }

    #[test]
    fn header_survives_without_rows() {
        let ds = Dataset::with_columns(vec!["win".to_string(), "dmg/min".to_string()], Vec::new());
        assert!(ds.has_column("win"));
        assert_eq!(ds.column_kind("win"), Some(ColumnKind::Empty));
        assert_eq!(ds.column_kind("vs/min"), None);
        assert!(ds.check_game_blocks("win").is_ok());

        let subset = ds.subset(Vec::new());
        assert_eq!(subset.columns(), ds.columns());
    }

    #[test]
    fn header_is_extended_by_record_columns() {
        let ds = Dataset::with_columns(
            vec!["win".to_string()],
            vec![GameRecord::new("a", "1").with("win", 1).with("gameId", 4)],
        );
        assert_eq!(ds.columns(), &["win".to_string(), "gameId".to_string()]);
    }

    #[test]
    fn parse_infers_cell_types() {
        assert_eq!(Value::parse("3"), Value::Integer(3));
        assert_eq!(Value::parse("2.5"), Value::Real(2.5));
        assert_eq!(Value::parse(""), Value::Null);
        assert_eq!(Value::parse("Faker"), Value::Text("Faker".to_string()));
    }

    #[test]
    fn column_kind_widens_and_ignores_nulls() {
        let ds = Dataset::new(vec![
            GameRecord::new("a", "1").with("win", 1).with("x", 1),
            GameRecord::new("a", "1").with("win", Value::Null).with("x", 2.0),
            GameRecord::new("a", "1").with("win", 0).with("x", "oops"),
        ]);
        assert_eq!(ds.column_kind("win"), Some(ColumnKind::Integer));
        assert_eq!(ds.column_kind("x"), Some(ColumnKind::Mixed));
        assert_eq!(ds.column_kind("nope"), None);
        assert!(ColumnKind::Empty.is_numeric());
        assert!(!ColumnKind::Text.is_numeric());
    }

    #[test]
    fn players_are_upper_cased_and_ordered_by_count() {
        let ds = Dataset::new(vec![
            GameRecord::new("ahq", "1"),
            GameRecord::new("Bjerg", "2"),
            GameRecord::new("AHQ", "3"),
        ]);
        assert_eq!(ds.players(), vec!["AHQ".to_string(), "BJERG".to_string()]);
        assert_eq!(ds.champions(), vec!["1", "2", "3"]);
    }

    #[test]
    fn player_match_is_case_insensitive() {
        let record = GameRecord::new("Ziv", "7");
        assert!(record.is_player("ZIV"));
        assert!(!record.is_player("Zi"));
    }

    #[test]
    fn intact_blocks_pass_validation() {
        let mut records = game(1);
        records.extend(game(2));
        assert!(Dataset::new(records).check_game_blocks("gameId").is_ok());
    }

    #[test]
    fn split_game_is_reported() {
        let mut records = game(1);
        records[3] = records[3].clone().with("gameId", 9);
        let err = Dataset::new(records).check_game_blocks("gameId").unwrap_err();
        assert!(matches!(err, MetricsError::BrokenGameBlock { start: 0, end: 5, .. }));
    }

    #[test]
    fn partial_trailing_block_is_reported() {
        let mut records = game(1);
        records.extend(game(2).into_iter().take(3));
        let err = Dataset::new(records).check_game_blocks("gameId").unwrap_err();
        assert!(matches!(err, MetricsError::BrokenGameBlock { start: 5, end: 8, .. }));
    }
}
