pub mod averager;
pub mod champion_stats;
pub mod fight;
pub mod indices;
pub mod percent_diff;
pub mod pipeline;
pub mod role;
