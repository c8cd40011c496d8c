use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// YAML file with the initial influencers, brands, campaigns and notifications.
    pub seed_path: PathBuf,
    /// Fixed delay applied to every store call, simulating a remote backend.
    pub store_latency_ms: u64,
    /// Reject campaigns whose influencer or brand does not exist.
    pub enforce_campaign_refs: bool,
    /// Base URL the CLI talks to.
    pub api_url: String,
    pub client_timeout_secs: u64,
}
