//! Cascade core library - risk scoring and emergency protocol selection

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Decisions are strictly per-evaluation; no memory between calls
// - No global mutable state
// - No randomness, clocks, threads, or async
// - Inputs are clamped, never rejected; the decision functions cannot fail
// - Identical input yields identical output

pub mod config;
pub mod history;
pub mod protocol;
pub mod report;
pub mod risk;

pub use config::{load_and_resolve, CascadeConfig, ResolvedConfig};
pub use history::{AlertEvent, AlertKind, AlertLog};
pub use protocol::{
    catalog, get_protocol, select_protocol, Protocol, ProtocolDecision, ProtocolId,
    ProtocolThresholds,
};
pub use report::{render_json, render_protocol_text, render_risk_text, ProtocolReport, RiskReport};
pub use risk::{
    assess_risk, predict_risk, RiskAssessment, RiskTier, RiskWeights, TierThresholds,
};

/// Assess risk with a resolved configuration
pub fn assess_risk_with_config(
    speed: f64,
    rain: f64,
    traffic: f64,
    config: &ResolvedConfig,
) -> RiskAssessment {
    risk::assess_risk_with_config(
        speed,
        rain,
        traffic,
        &config.risk_weights,
        &config.tier_thresholds,
    )
}

/// Select the active protocol with a resolved configuration
pub fn select_protocol_with_config(wind: f64, flood: f64, config: &ResolvedConfig) -> ProtocolDecision {
    protocol::select_protocol_with_thresholds(wind, flood, &config.protocol_thresholds)
}
