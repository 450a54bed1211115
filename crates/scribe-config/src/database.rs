use std::time::Duration;

use crate::{env_or, env_string};

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_idle_time: Duration,
    /// Upper bound on every single storage call.
    pub query_timeout: Duration,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env_string("DATABASE_URL", ""),
            max_connections: env_or("DB_MAX_CONNECTIONS", 30),
            min_connections: env_or("DB_MIN_CONNECTIONS", 0),
            max_idle_time: Duration::from_secs(env_or("DB_MAX_IDLE_SECS", 900)),
            query_timeout: Duration::from_secs(env_or("DB_QUERY_TIMEOUT_SECS", 5)),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 30,
            min_connections: 0,
            max_idle_time: Duration::from_secs(900),
            query_timeout: Duration::from_secs(5),
        }
    }
}
