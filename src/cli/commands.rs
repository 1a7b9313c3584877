//! CLI command implementations.

use std::path::{Path, PathBuf};

use crate::cache::{FileStorage, StatusCache};
use crate::eligibility::EligibilityEvaluator;
use crate::source::{JsonFileSource, MembershipSource};
use crate::tracker::{StatusReport, StatusTracker};
use crate::types::config::Config;
use crate::types::status::{RsoId, RsoStatus};
use crate::RsoResult;

/// Opens the status cache described by the configuration.
pub fn open_cache(config: &Config) -> StatusCache<FileStorage> {
    tracing::debug!(
        dir = %config.storage.dir.display(),
        key = %config.storage.key,
        "Opening status cache"
    );
    StatusCache::new(FileStorage::new(&config.storage.dir)).with_key(config.storage.key.clone())
}

/// Initializes configuration in the specified directory.
pub async fn init(path: Option<PathBuf>) -> RsoResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join("rso-status.toml");

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        return Ok(());
    }

    let config = Config::default_config();
    config.save(&config_path)?;

    println!("rso-status initialized.");
    println!("Configuration created at: {}", config_path.display());
    println!("Status cache directory: {}", config.storage.dir.display());

    Ok(())
}

/// Evaluates a membership file for one RSO.
pub async fn evaluate(
    rso_id: RsoId,
    members_path: &Path,
    no_record: bool,
    json: bool,
    config: &Config,
) -> RsoResult<()> {
    let source = JsonFileSource::new(members_path);
    let evaluator = EligibilityEvaluator::from_config(&config.eligibility);
    let cache = open_cache(config);

    let report = if no_record {
        let previous = cache.get(rso_id);
        let members = source.fetch_members(rso_id).await?;
        StatusReport::new(rso_id, previous, evaluator.evaluate(&members, rso_id))
    } else {
        StatusTracker::new(source, evaluator, cache)
            .refresh(rso_id)
            .await?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    if no_record {
        println!("(not recorded)");
    }

    Ok(())
}

fn print_report(report: &StatusReport) {
    let verdict = &report.verdict;
    let icon = if report.status.is_active() { "✓" } else { "○" };

    println!("{} RSO {} - {}", icon, report.rso_id, report.status);
    println!("  members: {}", verdict.total_members);
    match &verdict.dominant_domain {
        Some(domain) => println!(
            "  largest email domain: {} ({})",
            domain, verdict.same_domain_count
        ),
        None => println!("  largest email domain: none"),
    }
    for shortfall in verdict.shortfalls() {
        println!("  ⚠ {}", shortfall);
    }
    if report.changed() {
        println!("  changed from {}", report.previous);
    }
}

/// Shows the cached status of one RSO.
pub fn status(rso_id: RsoId, config: &Config) -> RsoResult<()> {
    let cache = open_cache(config);
    match cache.lookup(rso_id) {
        Some(status) => println!("RSO {}: {}", rso_id, status),
        None => println!("RSO {}: {} (no cached status)", rso_id, RsoStatus::default()),
    }
    Ok(())
}

/// Lists the whole cached table.
pub fn list(json: bool, config: &Config) -> RsoResult<()> {
    let table = open_cache(config).get_all();

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    if table.is_empty() {
        println!("No cached statuses.");
        return Ok(());
    }

    for (rso_id, status) in &table {
        println!("{:>8}  {}", rso_id, status);
    }
    let active = table.values().filter(|s| s.is_active()).count();
    println!();
    println!("{} RSO(s), {} active", table.len(), active);

    Ok(())
}

/// Overwrites one cached status.
pub fn set(rso_id: RsoId, status: &str, config: &Config) -> RsoResult<()> {
    let status: RsoStatus = status.parse()?;
    open_cache(config).set(rso_id, status);
    println!("RSO {}: {}", rso_id, status);
    Ok(())
}

/// Removes one cached status or the whole table.
pub fn clear(rso_id: Option<RsoId>, config: &Config) -> RsoResult<()> {
    let cache = open_cache(config);
    match rso_id {
        Some(id) => {
            if cache.remove(id) {
                println!("Removed cached status of RSO {}", id);
            } else {
                println!("RSO {} has no cached status", id);
            }
        }
        None => {
            cache.clear();
            println!("Cleared all cached statuses");
        }
    }
    Ok(())
}

/// Shows version.
pub fn version() {
    println!("rso-status {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("RSO activation eligibility and cached status");
}
