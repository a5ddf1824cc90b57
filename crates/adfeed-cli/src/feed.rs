//! Feed pipeline: fetch ads, normalize them, write items as JSON.

use std::io::Write;
use std::path::Path;

use anyhow::Context;

use adfeed_core::{
    AppConfig, FeedItem, DEFAULT_LOG_LEVEL, DEFAULT_SITE_URL, DEFAULT_STORAGE_URL,
};
use adfeed_hasura::types::ads_from_document;
use adfeed_hasura::{normalize_ads, AdsFilter, FeedTemplates, HasuraClient, NormalizedBatch};

/// Fetches the configured window of ads and normalizes them.
///
/// Any query failure aborts the run; no partial feed is produced.
pub(crate) async fn run_fetch(
    config: &AppConfig,
    window_hours: Option<u64>,
) -> anyhow::Result<NormalizedBatch> {
    let client = HasuraClient::new(
        &config.graphql_endpoint,
        &config.admin_secret,
        config.request_timeout_secs,
        &config.user_agent,
    )?;

    let window_hours = window_hours.unwrap_or(config.window_hours);
    let filter = AdsFilter::trailing_window(config.category_id, window_hours);
    tracing::info!(
        window_hours,
        since = %filter.updated_since,
        category_id = %filter.category_id,
        "fetching ads"
    );

    let ads = client
        .fetch_ads(&filter)
        .await
        .context("ads query failed")?;

    let templates = FeedTemplates::new(&config.site_url, &config.storage_url);
    Ok(normalize_ads(&ads, &templates))
}

/// Normalizes a saved ads document from disk.
pub(crate) fn run_normalize(
    input: &Path,
    templates: &FeedTemplates,
) -> anyhow::Result<NormalizedBatch> {
    let body = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let ads = ads_from_document(&body)
        .with_context(|| format!("failed to decode ads from {}", input.display()))?;
    Ok(normalize_ads(&ads, templates))
}

/// Link templates for offline runs, where the full config may be absent.
pub(crate) fn templates_from_env() -> FeedTemplates {
    let site = std::env::var("ADFEED_SITE_URL").unwrap_or_else(|_| DEFAULT_SITE_URL.to_owned());
    let storage =
        std::env::var("ADFEED_STORAGE_URL").unwrap_or_else(|_| DEFAULT_STORAGE_URL.to_owned());
    FeedTemplates::new(&site, &storage)
}

/// Fallback log filter for offline runs, read the same way the config does.
pub(crate) fn log_level_from_env() -> String {
    std::env::var("ADFEED_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_owned())
}

/// Writes `items` as a JSON array followed by a newline.
pub(crate) fn write_items<W: Write>(
    items: &[FeedItem],
    pretty: bool,
    mut out: W,
) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut out, items)?;
    } else {
        serde_json::to_writer(&mut out, items)?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
