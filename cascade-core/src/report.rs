//! Report structures handed to the display layer
//!
//! Global invariants enforced:
//! - Deterministic output: identical decisions render byte-for-byte
//!   identical text and JSON

use crate::protocol::{get_protocol, ProtocolDecision, ProtocolId};
use crate::risk::RiskAssessment;
use serde::{Deserialize, Serialize};

/// Risk assessment in report format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RiskReport {
    pub score: f64,
    pub label: String,
    pub tier: String,
    pub color: String,
}

impl From<&RiskAssessment> for RiskReport {
    fn from(assessment: &RiskAssessment) -> Self {
        RiskReport {
            score: assessment.score,
            label: assessment.label.clone(),
            tier: assessment.tier.as_str().to_string(),
            color: assessment.tier.color().to_string(),
        }
    }
}

/// Protocol decision in report format, joined with its catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProtocolReport {
    pub protocol: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub reason: String,
    pub trigger: String,
    pub actions: Vec<String>,
    pub color: String,
}

impl ProtocolReport {
    /// Catalog entry without a selection reason (for catalog listings)
    pub fn catalog_entry(id: ProtocolId) -> Self {
        let entry = get_protocol(id);
        ProtocolReport {
            protocol: entry.id.as_str().to_string(),
            name: entry.name.to_string(),
            reason: String::new(),
            trigger: entry.trigger.to_string(),
            actions: entry.actions.iter().map(|a| a.to_string()).collect(),
            color: entry.id.severity_color().to_string(),
        }
    }
}

impl From<&ProtocolDecision> for ProtocolReport {
    fn from(decision: &ProtocolDecision) -> Self {
        let entry = get_protocol(decision.protocol);
        ProtocolReport {
            protocol: decision.protocol.as_str().to_string(),
            name: entry.name.to_string(),
            reason: decision.reason.clone(),
            trigger: entry.trigger.to_string(),
            actions: entry.actions.iter().map(|a| a.to_string()).collect(),
            color: decision.protocol.severity_color().to_string(),
        }
    }
}

/// Render a risk report as text output
pub fn render_risk_text(report: &RiskReport) -> String {
    format!("Cascading risk level: {}\n", report.label)
}

/// Render a protocol report as text output
pub fn render_protocol_text(report: &ProtocolReport) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "ACTIVE PROTOCOL: {} ({})\n",
        report.protocol.to_uppercase(),
        report.name
    ));
    output.push_str(&format!("Reason:  {}\n", report.reason));
    output.push_str(&format!("Trigger: {}\n", report.trigger));
    output.push_str("Actions:\n");
    for (i, action) in report.actions.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, action));
    }
    output
}

/// Render any report as JSON output
pub fn render_json<T: Serialize>(report: &T) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::select_protocol;
    use crate::risk::assess_risk;

    #[test]
    fn test_risk_report_fields() {
        let assessment = assess_risk(150.0, 200.0, 100.0);
        let report = RiskReport::from(&assessment);
        assert_eq!(report.tier, "high");
        assert_eq!(report.color, "red");
        assert_eq!(report.score, 100.0);
    }

    #[test]
    fn test_protocol_report_joins_catalog_entry() {
        let decision = select_protocol(120.0, 0.0);
        let report = ProtocolReport::from(&decision);
        assert_eq!(report.protocol, "red_code");
        assert_eq!(report.name, "Código Rojo");
        assert_eq!(report.actions.len(), 3);
        assert_eq!(report.color, "red");
    }

    #[test]
    fn test_text_rendering_is_deterministic() {
        let decision = select_protocol(50.0, 10.0);
        let a = render_protocol_text(&ProtocolReport::from(&decision));
        let b = render_protocol_text(&ProtocolReport::from(&decision));
        assert_eq!(a, b);
        assert!(a.starts_with("ACTIVE PROTOCOL: PRE_ALERT"));
    }

    #[test]
    fn test_json_round_trip() {
        let decision = select_protocol(0.0, 0.0);
        let json = render_json(&ProtocolReport::from(&decision));
        let parsed: ProtocolReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.protocol, "recovery");
    }

    #[test]
    fn test_numbered_action_checklist() {
        let decision = select_protocol(0.0, 90.0);
        let text = render_protocol_text(&ProtocolReport::from(&decision));
        assert!(text.contains("  1. Immediate evacuation of at-risk zones"));
        assert!(text.contains("  3. Activate the TITAN team and public communications"));
    }
}
