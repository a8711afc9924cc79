use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, Environment};
use serde::Deserialize;

const ENV_PREFIX: &str = "BLOG_SCRAPER";
const DEFAULT_LISTING_URL: &str = "https://pauljarley.wordpress.com/";
const DEFAULT_OUTPUT: &str = "dean_scraping.csv";
const DEFAULT_USER_AGENT: &str = concat!("blog_scraper/", env!("CARGO_PKG_VERSION"));

/// Runtime settings: built-in defaults, then `BLOG_SCRAPER_*` env vars.
/// CLI flags are applied on top by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub listing_url: String,
    pub output: String,
    pub user_agent: String,
    /// Request timeout. Unset means the transport default.
    pub timeout_secs: Option<u64>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_env(env: Environment) -> Result<Self> {
        defaults()?
            .add_source(env.try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .context("Failed to load settings")
    }

    pub fn with_overrides(mut self, url: Option<String>, output: Option<String>) -> Self {
        if let Some(url) = url {
            self.listing_url = url;
        }
        if let Some(output) = output {
            self.output = output;
        }
        self
    }
}

fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>> {
    Ok(Config::builder()
        .set_default("listing_url", DEFAULT_LISTING_URL)?
        .set_default("output", DEFAULT_OUTPUT)?
        .set_default("user_agent", DEFAULT_USER_AGENT)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults_only() -> Settings {
        defaults().unwrap().build().unwrap().try_deserialize().unwrap()
    }

    #[test]
    fn defaults_point_at_the_blog() {
        let s = defaults_only();
        assert_eq!(s.listing_url, "https://pauljarley.wordpress.com/");
        assert_eq!(s.output, "dean_scraping.csv");
        assert!(s.user_agent.starts_with("blog_scraper/"));
        assert_eq!(s.timeout_secs, None);
    }

    #[test]
    fn env_vars_override_defaults() {
        let mut vars = config::Map::new();
        vars.insert("BLOG_SCRAPER_LISTING_URL".to_string(), "http://localhost:8080/".to_string());
        vars.insert("BLOG_SCRAPER_TIMEOUT_SECS".to_string(), "30".to_string());
        vars.insert("OTHER_OUTPUT".to_string(), "ignored.csv".to_string());

        let s = Settings::from_env(Environment::with_prefix(ENV_PREFIX).source(Some(vars))).unwrap();

        assert_eq!(s.listing_url, "http://localhost:8080/");
        assert_eq!(s.timeout_secs, Some(30));
        assert_eq!(s.output, "dean_scraping.csv");
    }

    #[test]
    fn cli_flags_override() {
        let s = defaults_only().with_overrides(Some("http://localhost/".into()), None);
        assert_eq!(s.listing_url, "http://localhost/");
        assert_eq!(s.output, "dean_scraping.csv");
    }
}
