use anyhow::Context;
use resident_registry::{
    Transition,
    audit::LineageAudit,
    config::Config,
    signature::SignedTransition,
};
use std::fs;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// The main entry point for the audit tool.
///
/// Loads the configuration, initializes logging, recovers the signer keys of every
/// transition in the exported history and replays it against an empty lineage index.
/// Exits with an error when any transition fails to apply.
fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/default.toml".to_string());
    let config = Config::load(&config_path)
        .with_context(|| format!("loading configuration from {config_path}"))?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    info!("Resident audit starting with config: {:?}", config);

    let history_path = &config.audit.history_path;
    let content = fs::read_to_string(history_path)
        .with_context(|| format!("reading history from {}", history_path.display()))?;
    let signed: Vec<SignedTransition> = serde_json::from_str(&content)
        .with_context(|| format!("parsing history from {}", history_path.display()))?;
    info!("Loaded {} transitions", signed.len());

    // An unrecoverable signature means the export itself is corrupt
    let history = signed
        .into_iter()
        .enumerate()
        .map(|(position, tx)| {
            tx.recover()
                .with_context(|| format!("recovering signers of transition #{position}"))
        })
        .collect::<anyhow::Result<Vec<Transition>>>()?;

    let (report, index) = LineageAudit::new(config.audit.clone()).replay(history);
    for record in index.records() {
        debug!(
            "Live record {} held by {} at {}",
            record.record_id, record.current_city.name, record.current_address
        );
    }

    if !report.is_clean() {
        for entry in report.failures() {
            warn!("Transition #{} ({:?}) failed: {:?}", entry.position, entry.digest, entry.outcome);
        }
        anyhow::bail!(
            "{} of {} transitions failed the audit",
            report.failures().count(),
            report.entries.len()
        );
    }

    info!("Audit clean: {} transitions applied", report.applied());
    Ok(())
}
