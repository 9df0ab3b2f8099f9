//! Configuration file support for Cascade
//!
//! Loads project-specific tuning from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.cascaderc.json` in the working root
//! 3. `cascade.config.json` in the working root
//!
//! All fields are optional; missing fields fall back to the built-in
//! defaults, which reproduce the reference model exactly.

use crate::protocol::ProtocolThresholds;
use crate::risk::{RiskWeights, TierThresholds};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Cascade configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CascadeConfig {
    /// Custom weights for the base risk blend
    #[serde(default)]
    pub weights: Option<WeightConfig>,

    /// Custom risk tier thresholds
    #[serde(default)]
    pub tier_thresholds: Option<TierThresholdConfig>,

    /// Custom sensor thresholds for protocol selection
    #[serde(default)]
    pub protocol_thresholds: Option<ProtocolThresholdConfig>,
}

/// Custom weights for the risk blend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightConfig {
    /// Weight for average speed (default: 0.5)
    pub speed: Option<f64>,
    /// Weight for rain intensity (default: 0.35)
    pub rain: Option<f64>,
    /// Weight for traffic occupancy (default: 0.15)
    pub traffic: Option<f64>,
}

/// Custom risk tier thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierThresholdConfig {
    /// Score threshold for the medium tier (default: 30.0)
    pub medium: Option<f64>,
    /// Score threshold for the high tier (default: 60.0)
    pub high: Option<f64>,
}

/// Custom sensor thresholds for protocol selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProtocolThresholdConfig {
    /// Wind speed that triggers RED_CODE, km/h (default: 95.0)
    pub red_wind: Option<f64>,
    /// Flood level that triggers RED_CODE, cm (default: 80.0)
    pub red_flood: Option<f64>,
    /// Wind speed that triggers PRE_ALERT, km/h (default: 40.0)
    pub pre_alert_wind: Option<f64>,
    /// Flood level that triggers PRE_ALERT, cm (default: 30.0)
    pub pre_alert_flood: Option<f64>,
}

/// Resolved configuration ready for use
#[derive(Debug)]
pub struct ResolvedConfig {
    pub risk_weights: RiskWeights,
    pub tier_thresholds: TierThresholds,
    pub protocol_thresholds: ProtocolThresholds,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl CascadeConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        // Validate weights are non-negative fractions
        if let Some(ref w) = self.weights {
            for (name, val) in [("speed", w.speed), ("rain", w.rain), ("traffic", w.traffic)] {
                if let Some(v) = val {
                    if v < 0.0 {
                        anyhow::bail!("weights.{} must be non-negative (got {})", name, v);
                    }
                    if v > 1.0 {
                        anyhow::bail!("weights.{} must be at most 1.0 (got {})", name, v);
                    }
                }
            }
        }

        // Validate tier thresholds are positive and ordered
        if let Some(ref t) = self.tier_thresholds {
            let medium = t.medium.unwrap_or(30.0);
            let high = t.high.unwrap_or(60.0);

            if medium <= 0.0 {
                anyhow::bail!("tier_thresholds.medium must be positive (got {})", medium);
            }
            if high > 100.0 {
                anyhow::bail!("tier_thresholds.high must be at most 100 (got {})", high);
            }
            if medium >= high {
                anyhow::bail!(
                    "tier_thresholds.medium ({}) must be less than tier_thresholds.high ({})",
                    medium,
                    high
                );
            }
        }

        // Validate protocol thresholds are positive and ordered per sensor
        if let Some(ref p) = self.protocol_thresholds {
            let red_wind = p.red_wind.unwrap_or(95.0);
            let red_flood = p.red_flood.unwrap_or(80.0);
            let pre_alert_wind = p.pre_alert_wind.unwrap_or(40.0);
            let pre_alert_flood = p.pre_alert_flood.unwrap_or(30.0);

            for (name, v) in [
                ("red_wind", red_wind),
                ("red_flood", red_flood),
                ("pre_alert_wind", pre_alert_wind),
                ("pre_alert_flood", pre_alert_flood),
            ] {
                if v <= 0.0 {
                    anyhow::bail!("protocol_thresholds.{} must be positive (got {})", name, v);
                }
            }
            if pre_alert_wind >= red_wind {
                anyhow::bail!(
                    "protocol_thresholds.pre_alert_wind ({}) must be less than red_wind ({})",
                    pre_alert_wind,
                    red_wind
                );
            }
            if pre_alert_flood >= red_flood {
                anyhow::bail!(
                    "protocol_thresholds.pre_alert_flood ({}) must be less than red_flood ({})",
                    pre_alert_flood,
                    red_flood
                );
            }
        }

        Ok(())
    }

    /// Resolve config into concrete weights and thresholds
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let defaults = RiskWeights::default();
        let risk_weights = match &self.weights {
            Some(w) => RiskWeights {
                speed: w.speed.unwrap_or(defaults.speed),
                rain: w.rain.unwrap_or(defaults.rain),
                traffic: w.traffic.unwrap_or(defaults.traffic),
            },
            None => defaults,
        };

        let defaults = TierThresholds::default();
        let tier_thresholds = match &self.tier_thresholds {
            Some(t) => TierThresholds {
                medium: t.medium.unwrap_or(defaults.medium),
                high: t.high.unwrap_or(defaults.high),
            },
            None => defaults,
        };

        let defaults = ProtocolThresholds::default();
        let protocol_thresholds = match &self.protocol_thresholds {
            Some(p) => ProtocolThresholds {
                red_wind: p.red_wind.unwrap_or(defaults.red_wind),
                red_flood: p.red_flood.unwrap_or(defaults.red_flood),
                pre_alert_wind: p.pre_alert_wind.unwrap_or(defaults.pre_alert_wind),
                pre_alert_flood: p.pre_alert_flood.unwrap_or(defaults.pre_alert_flood),
            },
            None => defaults,
        };

        Ok(ResolvedConfig {
            risk_weights,
            tier_thresholds,
            protocol_thresholds,
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        CascadeConfig::default().resolve()
    }
}

/// Discover and load a config file from the working root
///
/// Search order:
/// 1. `.cascaderc.json`
/// 2. `cascade.config.json`
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(root: &Path) -> Result<Option<(CascadeConfig, PathBuf)>> {
    let rc_path = root.join(".cascaderc.json");
    if rc_path.exists() {
        let config = load_config_file(&rc_path)?;
        return Ok(Some((config, rc_path)));
    }

    let config_path = root.join("cascade.config.json");
    if config_path.exists() {
        let config = load_config_file(&config_path)?;
        return Ok(Some((config, config_path)));
    }

    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<CascadeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: CascadeConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config for a working root
///
/// If `config_path` is provided, loads from that file. Otherwise discovers
/// config from the root. Returns default config if nothing is found.
pub fn load_and_resolve(root: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(root)? {
            Some((config, path)) => (config, Some(path)),
            None => (CascadeConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}
