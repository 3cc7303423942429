use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Invalid role '{0}'. Use: top, jungle, jung, mid, middle, bot, adc, support, supp, sup, or none")]
    InvalidRole(String),

    #[error("Outcome column '{column}' needs to be numeric (integer/real), it is: {dtype}")]
    NonNumericOutcome { column: String, dtype: String },

    #[error("Stat column '{column}' needs to be numeric (integer/real), it is: {dtype}")]
    NonNumericStat { column: String, dtype: String },

    #[error("Column not found in dataset: {0}")]
    MissingColumn(String),

    #[error("Stat '{stat}' for champion {champion} has no expected value")]
    KeyLookup { champion: String, stat: String },

    #[error("Records {start}..{end} do not form one five-player game block: {reason}")]
    BrokenGameBlock {
        start: usize,
        end: usize,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV error: {0}")]
    CsvError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("JSON error: {0}")]
    JsonError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<csv::Error> for MetricsError {
    fn from(e: csv::Error) -> Self {
        MetricsError::CsvError(e.to_string())
    }
}

impl From<rusqlite::Error> for MetricsError {
    fn from(e: rusqlite::Error) -> Self {
        MetricsError::DatabaseError(e.to_string())
    }
}

impl From<std::io::Error> for MetricsError {
    fn from(e: std::io::Error) -> Self {
        MetricsError::IoError(e.to_string())
    }
}
