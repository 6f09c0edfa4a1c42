//! Command implementations.

pub mod audit;
pub mod config;

use dangle::{RateLimit, ZoneClient};

use crate::config::Config;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded configuration file
    pub config: Config,

    /// Endpoint from the command line or environment
    pub endpoint: Option<String>,

    /// Token from the command line or environment
    pub token: Option<String>,

    /// Output format
    pub output_format: OutputFormat,

    /// Number of `-v` flags
    pub verbose: u8,

    /// Disable colors
    pub no_color: bool,
}

impl Context {
    /// Endpoint from flag or environment, then config; there is no default
    pub fn endpoint(&self) -> anyhow::Result<&str> {
        self.endpoint
            .as_deref()
            .or(self.config.endpoint.as_deref())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Endpoint required.\n\n\
                     Point dangle at a JSON gateway for the record-set listing API with one of:\n  \
                     1. --endpoint <URL>\n  \
                     2. DANGLE_ENDPOINT environment variable\n  \
                     3. dangle config set endpoint <URL>"
                )
            })
    }

    /// Get the API token, returning an error if not set.
    pub fn require_token(&self) -> anyhow::Result<&str> {
        self.token
            .as_deref()
            .or(self.config.token.as_deref())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "API token required.\n\n\
                     Set it with one of:\n  \
                     1. --token <TOKEN>\n  \
                     2. DANGLE_API_TOKEN environment variable\n  \
                     3. dangle config set token <TOKEN>"
                )
            })
    }

    /// Create a zone client from the resolved endpoint, token and transport settings.
    pub fn client(&self) -> anyhow::Result<ZoneClient> {
        let endpoint = self.endpoint()?;
        let token = self.require_token()?;
        let client = ZoneClient::builder()
            .endpoint(endpoint)
            .token(token)
            .transport(self.config.timeouts.transport())
            .rate_limit(RateLimit::per_second(self.config.rate_limit))
            .build()?;
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(config: Config) -> Context {
        Context {
            config,
            endpoint: None,
            token: None,
            output_format: OutputFormat::Pretty,
            verbose: 0,
            no_color: true,
        }
    }

    #[test]
    fn flag_wins_over_config() {
        let mut config = Config::default();
        config.endpoint = Some("https://gateway.example.com".into());
        config.token = Some("from-config".into());

        let mut ctx = context(config);
        assert_eq!(ctx.endpoint().unwrap(), "https://gateway.example.com");
        assert_eq!(ctx.require_token().unwrap(), "from-config");

        ctx.endpoint = Some("http://127.0.0.1:9000".into());
        ctx.token = Some("from-flag".into());
        assert_eq!(ctx.endpoint().unwrap(), "http://127.0.0.1:9000");
        assert_eq!(ctx.require_token().unwrap(), "from-flag");
    }

    #[test]
    fn endpoint_has_no_default() {
        let mut ctx = context(Config::default());
        ctx.token = Some("t".into());
        let err = ctx.endpoint().unwrap_err();
        assert!(err.to_string().contains("Endpoint required"));
        assert!(ctx.client().err().unwrap().to_string().contains("Endpoint required"));

        ctx.endpoint = Some("http://127.0.0.1:9000".into());
        ctx.token = None;
        assert!(ctx.require_token().is_err());
        assert!(ctx.client().is_err());
    }
}
