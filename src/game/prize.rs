//! End-of-run reward buckets. Presentation only; never feeds back into play.

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrizeTier {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
}

/// Lower bound of each tier, ascending. Each tier runs up to the next bound.
pub const PRIZE_THRESHOLDS: [(f64, PrizeTier); 5] = [
    (800.0, PrizeTier::First),
    (1200.0, PrizeTier::Second),
    (1500.0, PrizeTier::Third),
    (1800.0, PrizeTier::Fourth),
    (2400.0, PrizeTier::Fifth),
];

impl PrizeTier {
    pub fn number(self) -> u8 {
        match self {
            PrizeTier::First => 1,
            PrizeTier::Second => 2,
            PrizeTier::Third => 3,
            PrizeTier::Fourth => 4,
            PrizeTier::Fifth => 5,
        }
    }

    /// DOM id of the panel announcing this tier.
    pub fn panel_id(self) -> String {
        format!("modal-{}", self.number())
    }
}

pub fn prize_tier(score: f64) -> Option<PrizeTier> {
    PRIZE_THRESHOLDS
        .iter()
        .rev()
        .find(|(threshold, _)| score >= *threshold)
        .map(|&(_, tier)| tier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_open_boundaries() {
        assert_eq!(prize_tier(0.0), None);
        assert_eq!(prize_tier(799.99), None);
        assert_eq!(prize_tier(800.0), Some(PrizeTier::First));
        assert_eq!(prize_tier(1199.9), Some(PrizeTier::First));
        assert_eq!(prize_tier(1200.0), Some(PrizeTier::Second));
        assert_eq!(prize_tier(1499.999), Some(PrizeTier::Second));
        assert_eq!(prize_tier(1500.0), Some(PrizeTier::Third));
        assert_eq!(prize_tier(1800.0), Some(PrizeTier::Fourth));
        assert_eq!(prize_tier(2399.99), Some(PrizeTier::Fourth));
        assert_eq!(prize_tier(2400.0), Some(PrizeTier::Fifth));
        assert_eq!(prize_tier(1e9), Some(PrizeTier::Fifth));
    }

    #[test]
    fn nan_score_earns_nothing() {
        assert_eq!(prize_tier(f64::NAN), None);
    }

    #[test]
    fn panel_ids() {
        assert_eq!(PrizeTier::First.panel_id(), "modal-1");
        assert_eq!(PrizeTier::Fifth.panel_id(), "modal-5");
    }
}
