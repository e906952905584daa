use {
    crate::adapters::stripe::signature::DEFAULT_TOLERANCE_SECS,
    std::{env, net::SocketAddr},
    thiserror::Error,
};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_WEBHOOK_PATH: &str = "/stripe/webhook";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_ADDR is not a socket address: {0}")]
    BindAddr(String),

    #[error("STRIPE_WEBHOOK_TOLERANCE_SECS must be a non-negative integer, got: {0}")]
    Tolerance(String),

    #[error("WEBHOOK_PATH must start with '/', got: {0}")]
    WebhookPath(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub webhook_path: String,
    /// Empty when unset; requests are then refused one by one.
    pub stripe_webhook_secret: String,
    pub tolerance_secs: i64,
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|_| ConfigError::BindAddr(bind_addr))?;

        let webhook_path =
            lookup("WEBHOOK_PATH").unwrap_or_else(|| DEFAULT_WEBHOOK_PATH.into());
        if !webhook_path.starts_with('/') {
            return Err(ConfigError::WebhookPath(webhook_path));
        }

        let tolerance_secs = match lookup("STRIPE_WEBHOOK_TOLERANCE_SECS") {
            None => DEFAULT_TOLERANCE_SECS,
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(secs) if secs >= 0 => secs,
                _ => return Err(ConfigError::Tolerance(raw)),
            },
        };

        let stripe_webhook_secret = lookup("STRIPE_WEBHOOK_SECRET").unwrap_or_default();
        if stripe_webhook_secret.is_empty() {
            tracing::warn!("STRIPE_WEBHOOK_SECRET is not set, every webhook will be refused");
        }

        Ok(Self {
            bind_addr,
            webhook_path,
            stripe_webhook_secret,
            tolerance_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(config.webhook_path, DEFAULT_WEBHOOK_PATH);
        assert_eq!(config.tolerance_secs, DEFAULT_TOLERANCE_SECS);
        assert!(config.stripe_webhook_secret.is_empty());
    }

    #[test]
    fn reads_all_values() {
        let config = load(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("WEBHOOK_PATH", "/hooks/stripe"),
            ("STRIPE_WEBHOOK_TOLERANCE_SECS", "0"),
            ("STRIPE_WEBHOOK_SECRET", "whsec_abc"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.webhook_path, "/hooks/stripe");
        assert_eq!(config.tolerance_secs, 0);
        assert_eq!(config.stripe_webhook_secret, "whsec_abc");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            load(&[("BIND_ADDR", "localhost")]),
            Err(ConfigError::BindAddr(_))
        ));
        assert!(matches!(
            load(&[("STRIPE_WEBHOOK_TOLERANCE_SECS", "-5")]),
            Err(ConfigError::Tolerance(_))
        ));
        assert!(matches!(
            load(&[("WEBHOOK_PATH", "stripe")]),
            Err(ConfigError::WebhookPath(_))
        ));
    }
}
