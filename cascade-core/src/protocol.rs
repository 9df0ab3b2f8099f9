//! Emergency protocol catalog and selection
//!
//! Global invariants enforced:
//! - The catalog is static and immutable; lookups never fail
//! - Selection is total: every sensor reading maps to exactly one protocol
//! - Rules are evaluated most-severe first; the first match wins

use serde::{Deserialize, Serialize};

/// Closed set of protocol identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolId {
    PreAlert,
    RedCode,
    Recovery,
}

impl ProtocolId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolId::PreAlert => "pre_alert",
            ProtocolId::RedCode => "red_code",
            ProtocolId::Recovery => "recovery",
        }
    }

    /// Display color hint for the protocol banner
    pub fn severity_color(&self) -> &'static str {
        match self {
            ProtocolId::PreAlert => "orange",
            ProtocolId::RedCode => "red",
            ProtocolId::Recovery => "green",
        }
    }
}

/// Static catalog entry: trigger description plus ordered action checklist
#[derive(Debug)]
pub struct Protocol {
    pub id: ProtocolId,
    pub name: &'static str,
    pub trigger: &'static str,
    pub actions: &'static [&'static str],
}

/// Protocol catalog, defined once and shared by reference for the process
/// lifetime. Order matches severity: most severe first.
static CATALOG: [Protocol; 3] = [
    Protocol {
        id: ProtocolId::RedCode,
        name: "Código Rojo",
        trigger: "Extreme event: winds > 90 km/h or flooding > 80 cm",
        actions: &[
            "Immediate evacuation of at-risk zones",
            "Selective supply cut-off",
            "Activate the TITAN team and public communications",
        ],
    },
    Protocol {
        id: ProtocolId::PreAlert,
        name: "Víspera",
        trigger: "Pre-alert conditions: moderate wind or localized rainfall",
        actions: &[
            "Activate inspection patrols",
            "Prepare shelter centers",
            "Notify key stakeholders",
        ],
    },
    Protocol {
        id: ProtocolId::Recovery,
        name: "Renacimiento",
        trigger: "Post-event: damage stabilized, begin recovery",
        actions: &[
            "Damage assessment",
            "Prioritized reconstruction planning",
            "Review and adapt protocols",
        ],
    },
];

/// Look up a catalog entry. Infallible: the identifier space is closed and
/// every id has exactly one entry.
pub fn get_protocol(id: ProtocolId) -> &'static Protocol {
    match id {
        ProtocolId::RedCode => &CATALOG[0],
        ProtocolId::PreAlert => &CATALOG[1],
        ProtocolId::Recovery => &CATALOG[2],
    }
}

/// All catalog entries, most severe first
pub fn catalog() -> &'static [Protocol; 3] {
    &CATALOG
}

/// Configurable sensor thresholds for protocol selection
#[derive(Debug, Clone, Copy)]
pub struct ProtocolThresholds {
    pub red_wind: f64,
    pub red_flood: f64,
    pub pre_alert_wind: f64,
    pub pre_alert_flood: f64,
}

impl Default for ProtocolThresholds {
    fn default() -> Self {
        ProtocolThresholds {
            red_wind: 95.0,
            red_flood: 80.0,
            pre_alert_wind: 40.0,
            pre_alert_flood: 30.0,
        }
    }
}

/// Selected protocol plus the reason the rule fired
#[derive(Debug, Clone)]
pub struct ProtocolDecision {
    pub protocol: ProtocolId,
    pub reason: String,
}

/// Select the active protocol for a sensor reading with default thresholds
///
/// Flat first-match rule list, no memory of previous decisions: repeated
/// calls near a threshold may flip between protocols on every evaluation.
pub fn select_protocol(wind: f64, flood: f64) -> ProtocolDecision {
    select_protocol_with_thresholds(wind, flood, &ProtocolThresholds::default())
}

/// Select the active protocol with custom thresholds
pub fn select_protocol_with_thresholds(
    wind: f64,
    flood: f64,
    thresholds: &ProtocolThresholds,
) -> ProtocolDecision {
    if wind >= thresholds.red_wind || flood >= thresholds.red_flood {
        return ProtocolDecision {
            protocol: ProtocolId::RedCode,
            reason: format!(
                "wind >= {} km/h or flood >= {} cm",
                thresholds.red_wind, thresholds.red_flood
            ),
        };
    }
    if wind >= thresholds.pre_alert_wind || flood >= thresholds.pre_alert_flood {
        return ProtocolDecision {
            protocol: ProtocolId::PreAlert,
            reason: format!(
                "pre-alert conditions: wind >= {} km/h or flood >= {} cm",
                thresholds.pre_alert_wind, thresholds.pre_alert_flood
            ),
        };
    }
    ProtocolDecision {
        protocol: ProtocolId::Recovery,
        reason: "normal / post-event condition".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wind_only_triggers_red_code() {
        let decision = select_protocol(100.0, 0.0);
        assert_eq!(decision.protocol, ProtocolId::RedCode);
    }

    #[test]
    fn test_flood_only_triggers_red_code() {
        let decision = select_protocol(0.0, 90.0);
        assert_eq!(decision.protocol, ProtocolId::RedCode);
    }

    #[test]
    fn test_moderate_wind_triggers_pre_alert() {
        let decision = select_protocol(50.0, 0.0);
        assert_eq!(decision.protocol, ProtocolId::PreAlert);
    }

    #[test]
    fn test_moderate_flood_triggers_pre_alert() {
        let decision = select_protocol(0.0, 35.0);
        assert_eq!(decision.protocol, ProtocolId::PreAlert);
    }

    #[test]
    fn test_calm_conditions_yield_recovery() {
        let decision = select_protocol(0.0, 0.0);
        assert_eq!(decision.protocol, ProtocolId::Recovery);
    }

    #[test]
    fn test_red_code_wins_over_pre_alert_at_shared_threshold() {
        // wind 95 satisfies both rules; the more severe rule fires first
        let decision = select_protocol(95.0, 0.0);
        assert_eq!(decision.protocol, ProtocolId::RedCode);
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        assert_eq!(select_protocol(94.9, 0.0).protocol, ProtocolId::PreAlert);
        assert_eq!(select_protocol(95.0, 0.0).protocol, ProtocolId::RedCode);
        assert_eq!(select_protocol(39.9, 29.9).protocol, ProtocolId::Recovery);
        assert_eq!(select_protocol(40.0, 0.0).protocol, ProtocolId::PreAlert);
        assert_eq!(select_protocol(0.0, 30.0).protocol, ProtocolId::PreAlert);
        assert_eq!(select_protocol(0.0, 80.0).protocol, ProtocolId::RedCode);
    }

    #[test]
    fn test_selection_is_idempotent() {
        let a = select_protocol(42.0, 15.0);
        let b = select_protocol(42.0, 15.0);
        assert_eq!(a.protocol, b.protocol);
        assert_eq!(a.reason, b.reason);
    }

    #[test]
    fn test_reason_names_the_rule() {
        let decision = select_protocol(100.0, 0.0);
        assert_eq!(decision.reason, "wind >= 95 km/h or flood >= 80 cm");
        let calm = select_protocol(0.0, 0.0);
        assert_eq!(calm.reason, "normal / post-event condition");
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = ProtocolThresholds {
            red_wind: 120.0,
            red_flood: 100.0,
            pre_alert_wind: 60.0,
            pre_alert_flood: 50.0,
        };
        assert_eq!(
            select_protocol_with_thresholds(100.0, 0.0, &thresholds).protocol,
            ProtocolId::PreAlert
        );
        assert_eq!(
            select_protocol_with_thresholds(120.0, 0.0, &thresholds).protocol,
            ProtocolId::RedCode
        );
    }

    #[test]
    fn test_catalog_lookup_covers_every_id() {
        for id in [ProtocolId::PreAlert, ProtocolId::RedCode, ProtocolId::Recovery] {
            let protocol = get_protocol(id);
            assert_eq!(protocol.id, id);
            assert!(!protocol.trigger.is_empty());
            assert_eq!(protocol.actions.len(), 3);
        }
    }

    #[test]
    fn test_catalog_ordered_most_severe_first() {
        let entries: &'static [Protocol; 3] = catalog();
        let ids: Vec<ProtocolId> = entries.iter().map(|p| p.id).collect();
        assert_eq!(
            ids,
            vec![ProtocolId::RedCode, ProtocolId::PreAlert, ProtocolId::Recovery]
        );
    }

    #[test]
    fn test_severity_colors() {
        assert_eq!(ProtocolId::RedCode.severity_color(), "red");
        assert_eq!(ProtocolId::PreAlert.severity_color(), "orange");
        assert_eq!(ProtocolId::Recovery.severity_color(), "green");
    }
}
