//! Cascading risk score calculation
//!
//! Global invariants enforced:
//! - Deterministic scoring: identical inputs yield identical scores
//! - Score is bounded to [0, 100] for all finite, non-negative inputs
//! - Monotone: raising any input never lowers the score

/// Normalization divisors for the three tactical measurements.
///
/// Inputs are scaled into [0, 1] fractions before blending. Values beyond
/// the divisor saturate at 1.0.
const SPEED_NORM_KMH: f64 = 150.0;
const RAIN_NORM_MMH: f64 = 200.0;
const TRAFFIC_NORM_PCT: f64 = 100.0;

/// Escalation terms for extreme events. Above the onset, an extra
/// contribution grows linearly with the raw (un-normalized) excess.
const SPEED_ESCALATION_ONSET: f64 = 100.0;
const SPEED_ESCALATION_SPAN: f64 = 50.0;
const RAIN_ESCALATION_ONSET: f64 = 120.0;
const RAIN_ESCALATION_SPAN: f64 = 80.0;
const ESCALATION_GAIN: f64 = 0.12;

/// Risk tier classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    Low,    // < 30
    Medium, // 30-60
    High,   // >= 60
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }

    /// Display color hint for the tier banner
    pub fn color(&self) -> &'static str {
        match self {
            RiskTier::Low => "green",
            RiskTier::Medium => "orange",
            RiskTier::High => "red",
        }
    }
}

/// Configurable weights for the base risk blend
#[derive(Debug, Clone, Copy)]
pub struct RiskWeights {
    pub speed: f64,
    pub rain: f64,
    pub traffic: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        RiskWeights {
            speed: 0.5,
            rain: 0.35,
            traffic: 0.15,
        }
    }
}

/// Configurable risk tier thresholds
#[derive(Debug, Clone, Copy)]
pub struct TierThresholds {
    pub medium: f64,
    pub high: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        TierThresholds {
            medium: 30.0,
            high: 60.0,
        }
    }
}

/// Complete risk assessment for one set of measurements
#[derive(Debug, Clone)]
pub struct RiskAssessment {
    pub score: f64,
    pub label: String,
    pub tier: RiskTier,
}

/// Predict cascading risk score with default weights
///
/// Formula:
/// - v = clamp(speed / 150, 0, 1)
/// - r = clamp(rain / 200, 0, 1)
/// - t = clamp(traffic / 100, 0, 1)
/// - base = 0.5*v + 0.35*r + 0.15*t
/// - bonus = 0.12*(speed-100)/50 if speed > 100, plus 0.12*(rain-120)/80 if rain > 120
/// - score = clamp((base + bonus) * 100, 0, 100)
pub fn predict_risk(speed: f64, rain: f64, traffic: f64) -> f64 {
    predict_risk_with_weights(speed, rain, traffic, &RiskWeights::default())
}

/// Predict cascading risk score with custom weights
///
/// Inputs are clamped, never rejected: out-of-range values saturate and the
/// function cannot fail. Callers must supply finite numbers; NaN propagates.
pub fn predict_risk_with_weights(speed: f64, rain: f64, traffic: f64, weights: &RiskWeights) -> f64 {
    let v = (speed / SPEED_NORM_KMH).clamp(0.0, 1.0);
    let r = (rain / RAIN_NORM_MMH).clamp(0.0, 1.0);
    let t = (traffic / TRAFFIC_NORM_PCT).clamp(0.0, 1.0);

    let base = weights.speed * v + weights.rain * r + weights.traffic * t;

    let mut bonus = 0.0;
    if speed > SPEED_ESCALATION_ONSET {
        bonus += ESCALATION_GAIN * (speed - SPEED_ESCALATION_ONSET) / SPEED_ESCALATION_SPAN;
    }
    if rain > RAIN_ESCALATION_ONSET {
        bonus += ESCALATION_GAIN * (rain - RAIN_ESCALATION_ONSET) / RAIN_ESCALATION_SPAN;
    }

    ((base + bonus) * 100.0).clamp(0.0, 100.0)
}

/// Assign risk tier based on score with default thresholds
pub fn assign_tier(score: f64) -> RiskTier {
    assign_tier_with_thresholds(score, &TierThresholds::default())
}

/// Assign risk tier with custom thresholds
///
/// Lower bound of each tier is inclusive: exactly 30 is Medium, exactly 60
/// is High.
pub fn assign_tier_with_thresholds(score: f64, thresholds: &TierThresholds) -> RiskTier {
    if score < thresholds.medium {
        RiskTier::Low
    } else if score < thresholds.high {
        RiskTier::Medium
    } else {
        RiskTier::High
    }
}

/// Render the display label for a score: rounded percent plus tier name,
/// e.g. `"62% - HIGH"`
pub fn risk_label(score: f64, tier: RiskTier) -> String {
    format!("{:.0}% - {}", score, tier.as_str().to_uppercase())
}

/// Complete risk assessment from raw measurements (default weights/thresholds)
pub fn assess_risk(speed: f64, rain: f64, traffic: f64) -> RiskAssessment {
    assess_risk_with_config(
        speed,
        rain,
        traffic,
        &RiskWeights::default(),
        &TierThresholds::default(),
    )
}

/// Complete risk assessment with custom weights and thresholds
pub fn assess_risk_with_config(
    speed: f64,
    rain: f64,
    traffic: f64,
    weights: &RiskWeights,
    thresholds: &TierThresholds,
) -> RiskAssessment {
    let score = predict_risk_with_weights(speed, rain, traffic, weights);
    let tier = assign_tier_with_thresholds(score, thresholds);
    let label = risk_label(score, tier);
    RiskAssessment { score, label, tier }
}
