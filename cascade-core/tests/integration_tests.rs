//! Integration tests for cascade decision components

use cascade_core::{
    assess_risk, assess_risk_with_config, predict_risk, select_protocol,
    select_protocol_with_config, AlertLog, CascadeConfig, ProtocolId, ProtocolReport,
    ResolvedConfig, RiskReport, RiskTier,
};

#[test]
fn test_score_stays_in_bounds_across_documented_ranges() {
    let mut speed = 0.0;
    while speed <= 160.0 {
        let mut rain = 0.0;
        while rain <= 300.0 {
            for traffic in [0.0, 25.0, 50.0, 75.0, 100.0] {
                let score = predict_risk(speed, rain, traffic);
                assert!((0.0..=100.0).contains(&score));
            }
            rain += 20.0;
        }
        speed += 10.0;
    }
}

#[test]
fn test_reference_evaluation_is_reproducible() {
    let first = predict_risk(60.0, 20.0, 45.0);
    for _ in 0..100 {
        assert_eq!(predict_risk(60.0, 20.0, 45.0).to_bits(), first.to_bits());
    }
}

#[test]
fn test_raising_speed_never_lowers_the_score() {
    let mut prev = predict_risk(0.0, 20.0, 45.0);
    let mut speed = 0.0;
    while speed <= 160.0 {
        let score = predict_risk(speed, 20.0, 45.0);
        assert!(score >= prev, "score dropped between {} km/h steps", speed);
        prev = score;
        speed += 1.0;
    }
}

#[test]
fn test_tier_boundaries() {
    assert_eq!(cascade_core::risk::assign_tier(29.9), RiskTier::Low);
    assert_eq!(cascade_core::risk::assign_tier(30.0), RiskTier::Medium);
    assert_eq!(cascade_core::risk::assign_tier(59.9), RiskTier::Medium);
    assert_eq!(cascade_core::risk::assign_tier(60.0), RiskTier::High);
}

#[test]
fn test_protocol_trigger_matrix() {
    assert_eq!(select_protocol(100.0, 0.0).protocol, ProtocolId::RedCode);
    assert_eq!(select_protocol(0.0, 90.0).protocol, ProtocolId::RedCode);
    assert_eq!(select_protocol(50.0, 0.0).protocol, ProtocolId::PreAlert);
    assert_eq!(select_protocol(0.0, 0.0).protocol, ProtocolId::Recovery);
}

#[test]
fn test_first_match_priority_at_shared_threshold() {
    // 95 km/h satisfies both the red-code and pre-alert wind rules
    assert_eq!(select_protocol(95.0, 0.0).protocol, ProtocolId::RedCode);
}

#[test]
fn test_config_overrides_flow_through_both_components() {
    let config: CascadeConfig = serde_json::from_str(
        r#"{
        "weights": {"speed": 1.0, "rain": 0.0, "traffic": 0.0},
        "tier_thresholds": {"medium": 10.0, "high": 40.0},
        "protocol_thresholds": {"red_wind": 150.0, "pre_alert_wind": 100.0}
    }"#,
    )
    .unwrap();
    let resolved = config.resolve().unwrap();

    let assessment = assess_risk_with_config(75.0, 0.0, 0.0, &resolved);
    assert!((assessment.score - 50.0).abs() < 1e-9);
    assert_eq!(assessment.tier, RiskTier::High);

    // default thresholds would have made 120 km/h a red code
    let decision = select_protocol_with_config(120.0, 0.0, &resolved);
    assert_eq!(decision.protocol, ProtocolId::PreAlert);
}

#[test]
fn test_default_config_matches_unconfigured_path() {
    let resolved = ResolvedConfig::defaults().unwrap();
    let configured = assess_risk_with_config(60.0, 20.0, 45.0, &resolved);
    let plain = assess_risk(60.0, 20.0, 45.0);
    assert_eq!(configured.score.to_bits(), plain.score.to_bits());
    assert_eq!(configured.tier, plain.tier);
}

#[test]
fn test_reports_expose_display_fields() {
    let risk = RiskReport::from(&assess_risk(150.0, 250.0, 90.0));
    assert_eq!(risk.tier, "high");
    assert_eq!(risk.color, "red");

    let protocol = ProtocolReport::from(&select_protocol(0.0, 85.0));
    assert_eq!(protocol.protocol, "red_code");
    assert_eq!(protocol.actions.len(), 3);
    assert!(!protocol.trigger.is_empty());
}

#[test]
fn test_session_log_collects_both_event_kinds() {
    let mut log = AlertLog::new();
    let assessment = assess_risk(110.0, 130.0, 80.0);
    let decision = select_protocol(96.0, 10.0);

    log.record_risk(1_700_000_000_000, &assessment);
    log.record_protocol(1_700_000_000_500, &decision);

    assert_eq!(log.len(), 2);
    let json = serde_json::to_string(&log).unwrap();
    assert!(json.contains("\"kind\":\"risk\""));
    assert!(json.contains("\"kind\":\"protocol\""));
}
