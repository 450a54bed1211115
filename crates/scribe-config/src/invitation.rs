use crate::env_or;

#[derive(Clone, Debug)]
pub struct InvitationConfig {
    /// Seconds an invitation stays redeemable after registration.
    pub expiry: i64,
}

impl InvitationConfig {
    pub fn from_env() -> Self {
        Self {
            expiry: env_or("INVITATION_EXPIRY_SECS", 3 * 24 * 60 * 60),
        }
    }
}

impl Default for InvitationConfig {
    fn default() -> Self {
        Self {
            expiry: 3 * 24 * 60 * 60,
        }
    }
}
