use anyhow::{Result, bail};
use std::env;
use std::str::FromStr;

pub const DEFAULT_URL: &str = "https://www.irishlottery.com/daily-million-archive";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:93.0) Gecko/20100101 Firefox/93.0";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => bail!("unknown output format {:?} (expected text or json)", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub user_agent: String,
    /// CSS selector for the table(s) holding draws; all rows when unset.
    pub table_selector: Option<String>,
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            url: DEFAULT_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            table_selector: None,
            output: OutputFormat::Text,
        }
    }
}

impl Config {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let output = match var("LOTTERY_OUTPUT") {
            Some(v) => v.parse()?,
            None => defaults.output,
        };

        Ok(Config {
            url: var("LOTTERY_URL").unwrap_or(defaults.url),
            user_agent: var("LOTTERY_USER_AGENT").unwrap_or(defaults.user_agent),
            table_selector: var("LOTTERY_TABLE_SELECTOR"),
            output,
        })
    }
}

/// Reads a variable from the process environment.
pub fn from_env(name: &str) -> Option<String> {
    env::var(name).ok()
}
