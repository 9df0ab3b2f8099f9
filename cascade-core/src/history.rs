//! Session-scoped alert history
//!
//! The log is caller-owned and append-only: the decision functions never
//! touch it, and the core never reads a clock. Callers stamp each event
//! with wall-clock time at the recording boundary. Nothing here persists
//! beyond the owning process.

use crate::protocol::{ProtocolDecision, ProtocolId};
use crate::risk::RiskAssessment;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One recorded decision
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AlertKind {
    Risk { score: f64, tier: String },
    Protocol { protocol: ProtocolId, reason: String },
}

/// Timestamped log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    /// Caller-supplied wall-clock time, milliseconds since the Unix epoch
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub alert: AlertKind,
}

/// Append-only alert log for one interactive session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertLog {
    events: Vec<AlertEvent>,
}

impl AlertLog {
    pub fn new() -> Self {
        AlertLog::default()
    }

    /// Record a risk assessment
    pub fn record_risk(&mut self, timestamp_ms: u64, assessment: &RiskAssessment) {
        self.events.push(AlertEvent {
            timestamp_ms,
            alert: AlertKind::Risk {
                score: assessment.score,
                tier: assessment.tier.as_str().to_string(),
            },
        });
    }

    /// Record a protocol decision
    pub fn record_protocol(&mut self, timestamp_ms: u64, decision: &ProtocolDecision) {
        self.events.push(AlertEvent {
            timestamp_ms,
            alert: AlertKind::Protocol {
                protocol: decision.protocol,
                reason: decision.reason.clone(),
            },
        });
    }

    /// Events in insertion order
    pub fn events(&self) -> &[AlertEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Load a log from a JSON file, or start a new one if the file doesn't
    /// exist. Lets a one-shot caller carry a session across invocations.
    pub fn load_or_new(path: &Path) -> Result<Self> {
        if path.exists() {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read log file: {}", path.display()))?;
            Self::from_json(&json)
        } else {
            Ok(Self::new())
        }
    }

    /// Deserialize a log from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to deserialize alert log from JSON")
    }

    /// Serialize the log to a JSON string (deterministic ordering)
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize alert log to JSON")
    }

    /// Write the log to a file atomically using temp file + rename
    pub fn save(&self, path: &Path) -> Result<()> {
        use std::io::Write;

        let json = self.to_json()?;
        let temp_path = path.with_extension("tmp");

        let mut file = std::fs::File::create(&temp_path)
            .with_context(|| format!("failed to create temp file: {}", temp_path.display()))?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("failed to write to temp file: {}", temp_path.display()))?;
        file.sync_all()
            .with_context(|| format!("failed to sync temp file: {}", temp_path.display()))?;
        drop(file);

        std::fs::rename(&temp_path, path)
            .with_context(|| format!("failed to rename temp file to: {}", path.display()))?;

        Ok(())
    }
}
