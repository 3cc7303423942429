pub mod loader;
pub mod rates;
pub mod record;

pub use record::{ColumnKind, Dataset, GameRecord, Value};
