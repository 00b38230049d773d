use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub log_level: String,
    pub state_db_path: PathBuf,
    pub default_region: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let listen_addr = std::env::var("PLATEREG_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()?;

        let log_level =
            std::env::var("PLATEREG_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let state_db_path = std::env::var("PLATEREG_STATE_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("plates.db"));

        let default_region =
            std::env::var("PLATEREG_REGION").unwrap_or_else(|_| "116 RUS".to_string());

        Ok(Self {
            listen_addr,
            log_level,
            state_db_path,
            default_region,
        })
    }
}
