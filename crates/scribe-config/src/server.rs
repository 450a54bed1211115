use std::time::Duration;

use crate::{env_or, env_string};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: String,
    /// Public host used in generated links and API docs.
    pub api_url: String,
    pub request_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            addr: env_string("LISTEN_ADDR", "0.0.0.0:3000"),
            api_url: env_string("API_URL", "localhost:3000"),
            request_timeout: Duration::from_secs(env_or("REQUEST_TIMEOUT_SECS", 60)),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:3000".to_string(),
            api_url: "localhost:3000".to_string(),
            request_timeout: Duration::from_secs(60),
        }
    }
}
