use anyhow::{Context, Result, bail};
use reqwest::Client;
use reqwest::header::USER_AGENT;
use scraper::Html;

/// Downloads the archive page and returns its body.
pub async fn fetch_page(client: &Client, url: &str, user_agent: &str) -> Result<String> {
    let response = client
        .get(url)
        .header(USER_AGENT, user_agent)
        .send()
        .await
        .with_context(|| format!("perform GET {}", url))?;

    let status = response.status();
    if !status.is_success() {
        bail!("GET {} returned HTTP {}", url, status);
    }

    let body = response
        .text()
        .await
        .with_context(|| format!("read body of {}", url))?;
    tracing::debug!("fetched {} bytes from {}", body.len(), url);
    Ok(body)
}

pub fn parse_document(url: &str, body: &str) -> Result<Html> {
    if body.trim().is_empty() {
        bail!("parse HTML of {}: empty document", url);
    }
    Ok(Html::parse_document(body))
}
