use anyhow::anyhow;
use chrono::Duration;
use scribe_auth::{Authenticator, Claims};
use scribe_config::{InvitationConfig, TokenConfig};
use scribe_core::{AppError, hash_password, verify_password};
use scribe_db::invitation::generate_token;
use scribe_db::{Storage, StoreError};
use scribe_models::{LoginRequest, NewUser, RegisterUserRequest, UserWithToken, system_roles};
use scribe_observability::{
    track_login_failure, track_login_success, track_token_issued, track_user_registered,
};
use tracing::instrument;

pub struct AuthService;

impl AuthService {
    /// Creates an inactive `user` account and its invitation.
    ///
    /// The plain invitation token is returned once, here; only its hash is
    /// stored.
    #[instrument(skip(storage, config, dto), fields(username = %dto.username))]
    pub async fn register_user(
        storage: &Storage,
        config: &InvitationConfig,
        dto: RegisterUserRequest,
    ) -> Result<UserWithToken, AppError> {
        let password_hash = hash_password(&dto.password)?;
        let token = generate_token();

        let user = storage
            .users
            .create_and_invite(
                NewUser {
                    username: dto.username,
                    email: dto.email,
                    password_hash,
                    role: system_roles::USER.to_string(),
                    is_active: false,
                },
                &token,
                Duration::seconds(config.expiry),
            )
            .await?;

        track_user_registered();
        tracing::info!(user_id = %user.id, "user registered");

        Ok(UserWithToken { user, token })
    }

    /// Exchanges active-user credentials for a signed session token.
    ///
    /// Unknown users, inactive users and wrong passwords are all reported as
    /// the same 401.
    #[instrument(skip(storage, authenticator, config, dto), fields(username = %dto.username))]
    pub async fn login_user(
        storage: &Storage,
        authenticator: &dyn Authenticator,
        config: &TokenConfig,
        dto: LoginRequest,
    ) -> Result<String, AppError> {
        let user = match storage.users.get_by_username(&dto.username).await {
            Ok(user) => user,
            Err(StoreError::NotFound) => {
                track_login_failure("unknown_user");
                return Err(AppError::unauthorized(anyhow!(
                    "no active user named '{}'",
                    dto.username
                )));
            }
            Err(e) => return Err(e.into()),
        };

        if !verify_password(&dto.password, &user.password_hash)? {
            track_login_failure("invalid_password");
            return Err(AppError::unauthorized(anyhow!(
                "invalid password for user {}",
                user.id
            )));
        }

        let token = authenticator.generate_token(&Claims::new(user.id, config))?;

        track_login_success(&user.role.name);
        track_token_issued();

        Ok(token)
    }
}
