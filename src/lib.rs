pub mod analysis;
pub mod config;
pub mod data;
pub mod display;
pub mod error;
pub mod report;

pub use analysis::champion_stats::{ChampionStatMap, ChampionStats, PercentDiffMap, StatSpec};
pub use analysis::pipeline::{PlayerSummary, ReportOptions, RoleReport};
pub use analysis::role::{Role, RoleSelection};
pub use config::Config;
pub use data::{Dataset, GameRecord, Value};
pub use error::MetricsError;
