// Single-formula laning and skirmish indices.

use serde::Serialize;

/// Weights for [`kda_index`]. The defaults come from a player survey on how
/// punishing isolated deaths feel compared to regular ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KdaWeights {
    /// Weight of isolated kills and isolated deaths.
    pub w1: f64,
    /// Weight of kills plus assists.
    pub w2: f64,
    /// Weight of all deaths.
    pub w3: f64,
}

impl Default for KdaWeights {
    fn default() -> Self {
        KdaWeights {
            w1: 0.1336,
            w2: 0.90,
            w3: 0.95,
        }
    }
}

/// Lane lead: `team_prox * (csd10 + xpd10) / (total_cs + total_xp)`.
///
/// `csd10`/`xpd10` are the creep-score and experience differences at ten
/// minutes, the totals cover both laners, and `team_prox` is how often a
/// teammate was nearby.
pub fn lane_lead(csd10: f64, xpd10: f64, total_cs: f64, total_xp: f64, team_prox: f64) -> f64 {
    (team_prox * (csd10 + xpd10)) / (total_cs + total_xp)
}

/// `(iso_kills*w1 + kills_assists*w2) / (iso_deaths*w1 + deaths*w3)`
pub fn kda_index(
    iso_kills: f64,
    kills_assists: f64,
    iso_deaths: f64,
    deaths: f64,
    weights: &KdaWeights,
) -> f64 {
    (iso_kills * weights.w1 + kills_assists * weights.w2)
        / (iso_deaths * weights.w1 + deaths * weights.w3)
}

/// Share of lane damage that player one did not take:
/// `1 - p1 / (p1 + p2)`.
pub fn harass_index(damage_taken_p1: f64, damage_taken_p2: f64) -> f64 {
    1.0 - (damage_taken_p1 / (damage_taken_p1 + damage_taken_p2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_lead_scales_by_proximity() {
        assert_eq!(lane_lead(10.0, 200.0, 150.0, 4050.0, 0.5), 0.025);
    }

    #[test]
    fn kda_uses_default_survey_weights() {
        let w = KdaWeights::default();
        let expected = (2.0 * 0.1336 + 10.0 * 0.90) / (1.0 * 0.1336 + 4.0 * 0.95);
        assert!((kda_index(2.0, 10.0, 1.0, 4.0, &w) - expected).abs() < 1e-12);
    }

    #[test]
    fn kda_accepts_custom_weights() {
        let w = KdaWeights { w1: 1.0, w2: 1.0, w3: 1.0 };
        assert_eq!(kda_index(1.0, 5.0, 1.0, 2.0, &w), 2.0);
    }

    #[test]
    fn harass_is_share_of_damage_dealt() {
        assert_eq!(harass_index(300.0, 900.0), 0.75);
        assert!(harass_index(0.0, 0.0).is_nan());
    }
}
