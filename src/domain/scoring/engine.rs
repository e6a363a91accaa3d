//! Recommendation and tilt computation over weighted totals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pros must outweigh cons by at least this ratio for a clear "Yes".
pub const YES_RATIO_THRESHOLD: f64 = 2.0;

/// An absolute lead of this many points is also a "Yes".
pub const YES_DIFFERENCE_THRESHOLD: i128 = 10;

/// At or below this ratio the answer is "No".
pub const NO_RATIO_THRESHOLD: f64 = 0.5;

/// An absolute deficit of this many points is also a "No".
pub const NO_DIFFERENCE_THRESHOLD: i128 = -10;

/// Difference points per degree of beam rotation.
pub const TILT_DIVISOR: f64 = 3.0;

/// The beam never rotates further than this in either direction.
pub const MAX_TILT_DEGREES: f64 = 30.0;

/// Categorical outcome of scoring a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "RecommendationBody", try_from = "RecommendationBody")]
pub enum Recommendation {
    Yes,
    No,
    Maybe,
}

impl Recommendation {
    /// Machine-readable type tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Recommendation::Yes => "yes",
            Recommendation::No => "no",
            Recommendation::Maybe => "maybe",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::Yes => "Yes",
            Recommendation::No => "No",
            Recommendation::Maybe => "Maybe",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Wire form: `{ "type": "yes", "text": "Yes" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RecommendationBody {
    #[serde(rename = "type")]
    kind: String,
    text: String,
}

impl From<Recommendation> for RecommendationBody {
    fn from(rec: Recommendation) -> Self {
        Self {
            kind: rec.kind().to_string(),
            text: rec.label().to_string(),
        }
    }
}

impl TryFrom<RecommendationBody> for Recommendation {
    type Error = String;

    fn try_from(body: RecommendationBody) -> Result<Self, Self::Error> {
        match body.kind.as_str() {
            "yes" => Ok(Recommendation::Yes),
            "no" => Ok(Recommendation::No),
            "maybe" => Ok(Recommendation::Maybe),
            other => Err(format!("unknown recommendation type '{}'", other)),
        }
    }
}

/// Full engine output for one decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub pros_total: i64,
    pub cons_total: i64,
    pub recommendation: Recommendation,
    pub tilt_degree: f64,
}

/// Stateless scoring engine.
pub struct ScoringEngine;

impl ScoringEngine {
    /// Scores a decision from its pro weights (>= 0) and con weights (<= 0).
    pub fn evaluate<P, C>(pro_weights: P, con_weights: C) -> Score
    where
        P: IntoIterator<Item = i32>,
        C: IntoIterator<Item = i32>,
    {
        let pros_total = Self::total(pro_weights);
        let cons_total = Self::total(con_weights);
        Self::score_totals(pros_total, cons_total)
    }

    /// Scores precomputed totals.
    pub fn score_totals(pros_total: i64, cons_total: i64) -> Score {
        Score {
            pros_total,
            cons_total,
            recommendation: Self::recommend(pros_total, cons_total),
            tilt_degree: Self::tilt(pros_total, cons_total),
        }
    }

    /// Saturating sum of a set of weights.
    pub fn total<I>(weights: I) -> i64
    where
        I: IntoIterator<Item = i32>,
    {
        weights
            .into_iter()
            .fold(0i64, |acc, w| acc.saturating_add(i64::from(w)))
    }

    /// Pros divided by the con magnitude, with the denominator floored at 1.
    pub fn ratio(total_pros: i64, total_cons: i64) -> f64 {
        let denominator = total_cons.unsigned_abs().max(1);
        total_pros as f64 / denominator as f64
    }

    /// Pros minus the con magnitude. Widened so no input overflows.
    pub fn difference(total_pros: i64, total_cons: i64) -> i128 {
        i128::from(total_pros) - i128::from(total_cons.unsigned_abs())
    }

    /// Maps weighted totals to a recommendation.
    ///
    /// Rules in precedence order: ratio >= 2 is Yes; a lead of 10 or more is
    /// Yes; ratio <= 0.5 or a deficit of 10 or more is No; anything else is
    /// Maybe. A decision with no weight on either side is Maybe.
    pub fn recommend(total_pros: i64, total_cons: i64) -> Recommendation {
        if total_pros == 0 && total_cons == 0 {
            return Recommendation::Maybe;
        }

        let ratio = Self::ratio(total_pros, total_cons);
        let difference = Self::difference(total_pros, total_cons);

        if ratio >= YES_RATIO_THRESHOLD {
            Recommendation::Yes
        } else if difference >= YES_DIFFERENCE_THRESHOLD {
            Recommendation::Yes
        } else if ratio <= NO_RATIO_THRESHOLD || difference <= NO_DIFFERENCE_THRESHOLD {
            Recommendation::No
        } else {
            Recommendation::Maybe
        }
    }

    /// Beam rotation in degrees, `clamp(difference / 3, -30, 30)`.
    pub fn tilt(total_pros: i64, total_cons: i64) -> f64 {
        let difference = Self::difference(total_pros, total_cons) as f64;
        (difference / TILT_DIVISOR).clamp(-MAX_TILT_DEGREES, MAX_TILT_DEGREES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn no_cons_is_yes() {
        assert_eq!(ScoringEngine::recommend(10, 0), Recommendation::Yes);
    }

    #[test]
    fn ratio_of_two_is_yes() {
        assert_eq!(ScoringEngine::recommend(6, -3), Recommendation::Yes);
    }

    #[test]
    fn balanced_is_maybe() {
        assert_eq!(ScoringEngine::recommend(4, -4), Recommendation::Maybe);
    }

    #[test]
    fn heavy_cons_is_no() {
        assert_eq!(ScoringEngine::recommend(1, -8), Recommendation::No);
    }

    #[test]
    fn empty_decision_is_maybe() {
        assert_eq!(ScoringEngine::recommend(0, 0), Recommendation::Maybe);
    }

    #[test]
    fn large_lead_below_ratio_is_yes() {
        // ratio 1.5, difference 10
        assert_eq!(ScoringEngine::recommend(30, -20), Recommendation::Yes);
    }

    #[test]
    fn large_deficit_above_ratio_is_no() {
        // ratio 0.6, difference -10
        assert_eq!(ScoringEngine::recommend(15, -25), Recommendation::No);
    }

    #[test]
    fn only_cons_is_no() {
        assert_eq!(ScoringEngine::recommend(0, -3), Recommendation::No);
    }

    #[test]
    fn tilt_scales_difference() {
        assert_eq!(ScoringEngine::tilt(20, -5), 5.0);
        assert_eq!(ScoringEngine::tilt(4, -5), -1.0 / 3.0);
    }

    #[test]
    fn tilt_is_clamped() {
        assert_eq!(ScoringEngine::tilt(100, 0), 30.0);
        assert_eq!(ScoringEngine::tilt(0, -100), -30.0);
    }

    #[test]
    fn evaluate_sums_each_side() {
        let score = ScoringEngine::evaluate(vec![5, 3, 2], vec![-4, -1]);
        assert_eq!(score.pros_total, 10);
        assert_eq!(score.cons_total, -5);
        assert_eq!(score.recommendation, Recommendation::Yes);
        assert_eq!(score.tilt_degree, 5.0 / 3.0);
    }

    #[test]
    fn extreme_totals_do_not_overflow() {
        assert_eq!(ScoringEngine::recommend(i64::MAX, i64::MIN), Recommendation::Maybe);
        assert_eq!(ScoringEngine::tilt(i64::MIN, i64::MIN), -30.0);
        assert_eq!(ScoringEngine::total(vec![i32::MAX; 4]), 4 * i64::from(i32::MAX));
    }

    #[test]
    fn score_serializes_in_wire_shape() {
        let json = serde_json::to_value(ScoringEngine::score_totals(6, -3)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "prosTotal": 6,
                "consTotal": -3,
                "recommendation": { "type": "yes", "text": "Yes" },
                "tiltDegree": 1.0
            })
        );
    }

    #[test]
    fn recommendation_round_trips_through_wire_shape() {
        let parsed: Recommendation =
            serde_json::from_str(r#"{"type":"maybe","text":"Maybe"}"#).unwrap();
        assert_eq!(parsed, Recommendation::Maybe);
        assert!(serde_json::from_str::<Recommendation>(r#"{"type":"perhaps","text":"?"}"#).is_err());
    }

    proptest! {
        #[test]
        fn recommend_is_total_and_deterministic(pros in 0i64..=i64::MAX, cons in i64::MIN..=0i64) {
            let first = ScoringEngine::recommend(pros, cons);
            let second = ScoringEngine::recommend(pros, cons);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn tilt_stays_within_bounds(pros in any::<i64>(), cons in any::<i64>()) {
            let tilt = ScoringEngine::tilt(pros, cons);
            prop_assert!((-MAX_TILT_DEGREES..=MAX_TILT_DEGREES).contains(&tilt));
        }

        #[test]
        fn tilt_never_changes_recommendation(pros in 0i64..200, cons in -200i64..=0) {
            let score = ScoringEngine::score_totals(pros, cons);
            prop_assert_eq!(score.recommendation, ScoringEngine::recommend(pros, cons));
        }

        #[test]
        fn tilt_follows_sign_of_difference(pros in 0i64..1_000, cons in -1_000i64..=0) {
            let tilt = ScoringEngine::tilt(pros, cons);
            let difference = ScoringEngine::difference(pros, cons);
            prop_assert_eq!(tilt > 0.0, difference > 0);
            prop_assert_eq!(tilt < 0.0, difference < 0);
        }
    }
}
