// Per-minute rate columns derived from raw game totals.

use super::record::{Dataset, Value};
use crate::error::MetricsError;
use tracing::debug;

/// A derived column: `name = total / duration`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateColumn {
    pub name: String,
    pub total: String,
}

impl RateColumn {
    pub fn new(name: &str, total: &str) -> Self {
        RateColumn {
            name: name.to_string(),
            total: total.to_string(),
        }
    }
}

/// The rate columns the default stat set reads from.
pub fn default_rate_columns() -> Vec<RateColumn> {
    vec![
        RateColumn::new("dmg/min", "totalDamageDealtToChampions"),
        RateColumn::new("dmgTaken/min", "totalDamageTaken"),
        RateColumn::new("dmgMit/min", "damageSelfMitigated"),
        RateColumn::new("cc/min", "totalTimeCrowdControlDealt"),
        RateColumn::new("vs/min", "visionScore"),
    ]
}

/// Adds each rate column to every record. A null operand gives a null rate;
/// a zero duration gives an infinite or NaN rate.
pub fn derive_rates(
    dataset: &mut Dataset,
    duration_col: &str,
    rates: &[RateColumn],
) -> Result<(), MetricsError> {
    if !dataset.has_column(duration_col) {
        return Err(MetricsError::MissingColumn(duration_col.to_string()));
    }
    for rate in rates {
        if !dataset.has_column(&rate.total) {
            return Err(MetricsError::MissingColumn(rate.total.clone()));
        }
        if let Some(kind) = dataset.column_kind(&rate.total).filter(|k| !k.is_numeric()) {
            return Err(MetricsError::NonNumericStat {
                column: rate.total.clone(),
                dtype: kind.to_string(),
            });
        }
    }

    for rate in rates {
        dataset.add_column(&rate.name);
    }
    for record in dataset.records_mut() {
        let duration = record.get(duration_col).as_f64();
        for rate in rates {
            let value = match (record.get(&rate.total).as_f64(), duration) {
                (Some(total), Some(duration)) => Value::Real(total / duration),
                _ => Value::Null,
            };
            record.set(&rate.name, value);
        }
    }

    debug!("derived {} rate columns over {}", rates.len(), duration_col);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::GameRecord;

    #[test]
    fn rates_divide_totals_by_duration() {
        let mut ds = Dataset::new(vec![
            GameRecord::new("a", "1").with("gameDuration", 30).with("visionScore", 45),
            GameRecord::new("b", "2").with("gameDuration", 20).with("visionScore", Value::Null),
        ]);
        derive_rates(&mut ds, "gameDuration", &[RateColumn::new("vs/min", "visionScore")]).unwrap();
        assert_eq!(ds.records()[0].get("vs/min"), &Value::Real(1.5));
        assert!(ds.records()[1].get("vs/min").is_null());
        assert!(ds.has_column("vs/min"));
    }

    #[test]
    fn zero_duration_is_not_an_error() {
        let mut ds = Dataset::new(vec![GameRecord::new("a", "1")
            .with("gameDuration", 0)
            .with("visionScore", 10)]);
        derive_rates(&mut ds, "gameDuration", &[RateColumn::new("vs/min", "visionScore")]).unwrap();
        assert_eq!(ds.records()[0].get("vs/min").as_f64(), Some(f64::INFINITY));
    }

    #[test]
    fn missing_total_column_is_reported() {
        let mut ds = Dataset::new(vec![GameRecord::new("a", "1").with("gameDuration", 30)]);
        let err = derive_rates(&mut ds, "gameDuration", &default_rate_columns()).unwrap_err();
        assert!(matches!(err, MetricsError::MissingColumn(c) if c == "totalDamageDealtToChampions"));
    }
}
