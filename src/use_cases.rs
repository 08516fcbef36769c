use anyhow::Result;
use reqwest::Client;
use std::io::Write;

use crate::api::{fetch_page, parse_document};
use crate::config::{Config, OutputFormat};
use crate::extract::{RowScope, extract_draws};
use crate::reports::{write_json, write_text};
use crate::types::RunSummary;

pub struct DrawUseCase {
    client: Client,
    config: Config,
    scope: RowScope,
}

impl DrawUseCase {
    /// Fails on an invalid table selector, before anything touches the network.
    pub fn new(config: Config) -> Result<Self> {
        let scope = RowScope::new(config.table_selector.as_deref())?;
        Ok(Self {
            client: Client::new(),
            config,
            scope,
        })
    }

    /// Fetches the archive, extracts every complete draw and writes it out.
    ///
    /// Nothing is written unless the page was fetched and parsed.
    pub async fn run<W: Write>(&self, writer: &mut W) -> Result<RunSummary> {
        let url = &self.config.url;
        tracing::info!("fetching draw archive from {}", url);

        let body = fetch_page(&self.client, url, &self.config.user_agent).await?;
        let document = parse_document(url, &body)?;
        drop(body);

        let extraction = extract_draws(&document, &self.scope);
        let stats = extraction.stats;

        match self.config.output {
            OutputFormat::Text => write_text(&extraction.draws, writer)?,
            OutputFormat::Json => write_json(&extraction.draws, writer)?,
        }

        let summary = RunSummary {
            printed: extraction.draws.len(),
            skipped: stats.skipped(),
            stats,
        };
        if summary.printed == 0 {
            tracing::warn!("no draws found in {} rows", stats.rows_seen);
        }
        tracing::info!(
            "printed {} draws, skipped {} rows ({} without date, {} with wrong ball count), \
             dropped {} non-numeric values, {} dates unparsed",
            summary.printed,
            summary.skipped,
            stats.missing_date,
            stats.wrong_ball_count,
            stats.dropped_values,
            stats.unparsed_dates
        );
        Ok(summary)
    }
}

/// Loads the configuration through `lookup` and runs the archive once.
///
/// Any error here is fatal for the process.
pub async fn run<F, W>(lookup: F, writer: &mut W) -> Result<RunSummary>
where
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    let config = Config::from_lookup(lookup)?;
    let use_case = DrawUseCase::new(config)?;
    use_case.run(writer).await
}
