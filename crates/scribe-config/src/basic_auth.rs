use crate::env_string;

#[derive(Clone, Debug)]
pub struct BasicAuthConfig {
    pub username: String,
    pub password: String,
}

impl BasicAuthConfig {
    pub fn from_env() -> Self {
        Self {
            username: env_string("ADMIN_NAME", "admin"),
            password: env_string("ADMIN_PASSWORD", ""),
        }
    }
}
