use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use credvest_core::simulation::MAX_SIMULATIONS;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub max_simulations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: "./db/credvest.db".into(),
            cors_allow: vec!["*".into()],
            request_timeout: Duration::from_millis(30_000),
            max_simulations: MAX_SIMULATIONS,
        }
    }
}

impl Config {
    /// Reads `CV_*` variables, loading a `.env` file first when present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("CV_LISTEN_ADDR") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid CV_LISTEN_ADDR '{}'", raw))?,
            Err(_) => defaults.listen_addr,
        };
        let db_path = std::env::var("CV_DB_PATH").unwrap_or(defaults.db_path);
        let cors_allow = std::env::var("CV_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("CV_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        // Never above the hard ceiling
        let max_simulations = std::env::var("CV_MAX_SIMULATIONS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|v| *v > 0)
            .map_or(defaults.max_simulations, |v| v.min(MAX_SIMULATIONS));

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            max_simulations,
        })
    }
}
