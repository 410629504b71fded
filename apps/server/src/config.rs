use std::{net::SocketAddr, time::Duration};

use anyhow::{anyhow, Context};
use pledgewall_core::constants::{DEFAULT_RECENT_LIMIT, STATS_POLL_PERIOD, WALL_POLL_PERIOD};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub store_url: String,
    pub store_anon_key: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub stats_poll_period: Duration,
    pub wall_poll_period: Duration,
    pub wall_limit: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr: SocketAddr = lookup("PLEDGE_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid PLEDGE_LISTEN_ADDR")?;
        let store_url = required(&lookup, "PLEDGE_STORE_URL")?;
        let store_anon_key = required(&lookup, "PLEDGE_STORE_ANON_KEY")?;
        let cors_allow = lookup("PLEDGE_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = lookup("PLEDGE_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30000);
        let stats_poll_period = lookup("PLEDGE_STATS_POLL_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(STATS_POLL_PERIOD);
        let wall_poll_period = lookup("PLEDGE_WALL_POLL_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(WALL_POLL_PERIOD);
        let wall_limit = lookup("PLEDGE_WALL_LIMIT")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_RECENT_LIMIT);

        Ok(Self {
            listen_addr,
            store_url,
            store_anon_key,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            stats_poll_period,
            wall_poll_period,
            wall_limit,
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| anyhow!("{} must be set", key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("PLEDGE_STORE_URL", "https://demo.supabase.co"),
            ("PLEDGE_STORE_ANON_KEY", "anon"),
        ]))
        .unwrap();

        assert_eq!(config.listen_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.cors_allow, vec!["*".to_string()]);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.stats_poll_period, Duration::from_secs(5));
        assert_eq!(config.wall_poll_period, Duration::from_secs(10));
        assert_eq!(config.wall_limit, 50);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PLEDGE_STORE_URL", "https://demo.supabase.co"),
            ("PLEDGE_STORE_ANON_KEY", "anon"),
            ("PLEDGE_LISTEN_ADDR", "127.0.0.1:9000"),
            ("PLEDGE_CORS_ALLOW_ORIGINS", "https://a.org, https://b.org"),
            ("PLEDGE_WALL_POLL_SECS", "20"),
            ("PLEDGE_WALL_LIMIT", "0"),
        ]))
        .unwrap();

        assert_eq!(config.listen_addr.port(), 9000);
        assert_eq!(
            config.cors_allow,
            vec!["https://a.org".to_string(), "https://b.org".to_string()]
        );
        assert_eq!(config.wall_poll_period, Duration::from_secs(20));
        assert_eq!(config.wall_limit, 50);
    }

    #[test]
    fn test_store_settings_are_required() {
        let err = Config::from_lookup(lookup_from(&[("PLEDGE_STORE_ANON_KEY", "anon")]))
            .err()
            .unwrap();
        assert!(err.to_string().contains("PLEDGE_STORE_URL"));

        let err = Config::from_lookup(lookup_from(&[
            ("PLEDGE_STORE_URL", "https://demo.supabase.co"),
            ("PLEDGE_STORE_ANON_KEY", "  "),
        ]))
        .err()
        .unwrap();
        assert!(err.to_string().contains("PLEDGE_STORE_ANON_KEY"));
    }
}
