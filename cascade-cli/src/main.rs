//! Cascade CLI - command-line interface for risk scoring and protocol selection

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output for identical inputs and configuration
// - Non-finite sensor values are rejected here, at the caller boundary;
//   the core performs no defensive checks

use anyhow::Context;
use cascade_core::{
    catalog, get_protocol, load_and_resolve, render_json, render_protocol_text, render_risk_text,
    AlertLog, ProtocolId, ProtocolReport, RiskReport,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser)]
#[command(name = "cascade")]
#[command(about = "Cascading-risk scoring and emergency protocol selection")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the cascading risk level from tactical measurements
    Risk {
        /// Average speed (km/h)
        #[arg(long)]
        speed: f64,

        /// Rain intensity (mm/h)
        #[arg(long)]
        rain: f64,

        /// Traffic occupancy (%)
        #[arg(long)]
        traffic: f64,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to a config file (overrides discovery)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Append the stamped assessment to a session log file
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Select the active protocol from sensor readings
    Protocol {
        /// Wind speed (km/h)
        #[arg(long)]
        wind: f64,

        /// Flood level (cm)
        #[arg(long)]
        flood: f64,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to a config file (overrides discovery)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Append the stamped decision to a session log file
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Show the protocol catalog, or one entry
    Catalog {
        /// Protocol to show (default: all)
        id: Option<CatalogId>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum CatalogId {
    PreAlert,
    RedCode,
    Recovery,
}

impl From<CatalogId> for ProtocolId {
    fn from(id: CatalogId) -> Self {
        match id {
            CatalogId::PreAlert => ProtocolId::PreAlert,
            CatalogId::RedCode => ProtocolId::RedCode,
            CatalogId::Recovery => ProtocolId::Recovery,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Risk {
            speed,
            rain,
            traffic,
            format,
            config,
            log,
        } => {
            require_finite("speed", speed)?;
            require_finite("rain", rain)?;
            require_finite("traffic", traffic)?;

            let resolved = resolve_config(config.as_deref())?;
            let assessment = cascade_core::assess_risk_with_config(speed, rain, traffic, &resolved);
            let report = RiskReport::from(&assessment);

            match format {
                OutputFormat::Text => {
                    print!("{}", render_risk_text(&report));
                }
                OutputFormat::Json => {
                    println!("{}", render_json(&report));
                }
            }

            if let Some(log_path) = log {
                append_to_log(&log_path, |alert_log, stamp| {
                    alert_log.record_risk(stamp, &assessment);
                })?;
            }
        }
        Commands::Protocol {
            wind,
            flood,
            format,
            config,
            log,
        } => {
            require_finite("wind", wind)?;
            require_finite("flood", flood)?;

            let resolved = resolve_config(config.as_deref())?;
            let decision = cascade_core::select_protocol_with_config(wind, flood, &resolved);
            let report = ProtocolReport::from(&decision);

            match format {
                OutputFormat::Text => {
                    print!("{}", render_protocol_text(&report));
                }
                OutputFormat::Json => {
                    println!("{}", render_json(&report));
                }
            }

            if let Some(log_path) = log {
                append_to_log(&log_path, |alert_log, stamp| {
                    alert_log.record_protocol(stamp, &decision);
                })?;
            }
        }
        Commands::Catalog { id, format } => {
            let ids: Vec<ProtocolId> = match id {
                Some(id) => vec![ProtocolId::from(id)],
                None => catalog().iter().map(|p| p.id).collect(),
            };
            match format {
                OutputFormat::Text => {
                    for (i, id) in ids.iter().enumerate() {
                        if i > 0 {
                            println!();
                        }
                        print_catalog_entry(*id);
                    }
                }
                OutputFormat::Json => {
                    let reports: Vec<ProtocolReport> =
                        ids.into_iter().map(ProtocolReport::catalog_entry).collect();
                    println!("{}", render_json(&reports));
                }
            }
        }
    }

    Ok(())
}

/// Reject NaN and infinity before they reach the core
fn require_finite(name: &str, value: f64) -> anyhow::Result<()> {
    if !value.is_finite() {
        anyhow::bail!("{} must be a finite number (got {})", name, value);
    }
    Ok(())
}

/// Load the session log, record one stamped event, and write it back
fn append_to_log(path: &Path, record: impl FnOnce(&mut AlertLog, u64)) -> anyhow::Result<()> {
    let mut alert_log = AlertLog::load_or_new(path)?;
    record(&mut alert_log, unix_millis()?);
    alert_log.save(path)
}

/// Current wall-clock time, milliseconds since the Unix epoch
fn unix_millis() -> anyhow::Result<u64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is set before the Unix epoch")?;
    Ok(elapsed.as_millis() as u64)
}

/// Load config from an explicit path or discover it in the current directory
fn resolve_config(config_path: Option<&std::path::Path>) -> anyhow::Result<cascade_core::ResolvedConfig> {
    let root = std::env::current_dir().context("failed to resolve current directory")?;
    load_and_resolve(&root, config_path)
}

/// Print one catalog entry as a technical sheet
fn print_catalog_entry(id: ProtocolId) {
    let entry = get_protocol(id);
    println!("{} ({})", entry.id.as_str().to_uppercase(), entry.name);
    println!("Trigger: {}", entry.trigger);
    println!("Actions:");
    for (i, action) in entry.actions.iter().enumerate() {
        println!("  {}. {}", i + 1, action);
    }
}
