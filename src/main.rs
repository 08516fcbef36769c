use anyhow::Result;
use tracing_subscriber::EnvFilter;

use lotto_archive::config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    lotto_archive::run(config::from_env, &mut out)
        .await
        .inspect_err(|e| {
            tracing::error!("draw archive run failed: {:#}", e);
        })?;

    Ok(())
}
