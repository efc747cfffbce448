//! Authentication service: registration, login and bearer-token
//! identity resolution.

use std::sync::OnceLock;

use rootpilot_core::error::{RootPilotError, RootPilotResult};
use rootpilot_core::models::user::{CreateUser, User};
use rootpilot_core::repository::UserRepository;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Input for the registration flow.
#[derive(Debug)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Successful register/login result.
#[derive(Debug)]
pub struct AuthOutput {
    pub user: User,
    /// Signed session token.
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}

/// Caller identity decoded from a verified session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
}

/// Authentication service.
///
/// Generic over the user repository so the auth layer has no
/// dependency on the store crate.
pub struct AuthService<U: UserRepository> {
    user_repo: U,
    config: AuthConfig,
    /// Hash verified against when the email is unknown, so both login
    /// failures pay for one Argon2 run.
    dummy_hash: OnceLock<Option<String>>,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: U, config: AuthConfig) -> Self {
        Self {
            user_repo,
            config,
            dummy_hash: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Create an account and issue a session token for it.
    pub async fn register(&self, input: RegisterInput) -> RootPilotResult<AuthOutput> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(RootPilotError::validation("name is required"));
        }
        let email = normalize_email(&input.email)?;
        if input.password.chars().count() < self.config.min_password_length {
            return Err(RootPilotError::validation(format!(
                "password must be at least {} characters",
                self.config.min_password_length
            )));
        }

        // 1. Reject a taken email before paying for the hash. The store
        //    re-checks atomically on insert.
        match self.user_repo.get_by_email(&email).await {
            Ok(_) => {
                return Err(RootPilotError::AlreadyExists {
                    entity: "User".into(),
                });
            }
            Err(RootPilotError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        // 2. Hash and persist.
        let password_hash = password::hash_password(&input.password, &self.config)?;
        let user = self
            .user_repo
            .create(CreateUser {
                email,
                password_hash,
                name,
                company: None,
                role: None,
            })
            .await?;

        info!(user_id = %user.id, "User registered");

        // 3. Issue token.
        let token = token::issue_session_token(user.id, &user.email, &self.config)?;
        Ok(AuthOutput {
            user,
            token,
            expires_in: self.config.token_lifetime_secs,
        })
    }

    /// Authenticate with email + password and issue a fresh token.
    ///
    /// An unknown email and a wrong password produce the same
    /// `InvalidCredentials` error.
    pub async fn login(&self, input: LoginInput) -> RootPilotResult<AuthOutput> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(RootPilotError::validation(
                "email and password are required",
            ));
        }

        // 1. Look up user.
        let email = input.email.trim().to_ascii_lowercase();
        let user = match self.user_repo.get_by_email(&email).await {
            Ok(u) => u,
            Err(RootPilotError::NotFound { .. }) => {
                self.burn_verification(&input.password);
                warn!("Login rejected: unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        // 2. Verify password.
        let valid = password::verify_password(
            &input.password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )?;
        if !valid {
            warn!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        // 3. Issue token.
        let token = token::issue_session_token(user.id, &user.email, &self.config)?;
        info!(user_id = %user.id, "User logged in");

        Ok(AuthOutput {
            user,
            token,
            expires_in: self.config.token_lifetime_secs,
        })
    }

    fn dummy_hash(&self) -> Option<&str> {
        self.dummy_hash
            .get_or_init(|| password::hash_password("rootpilot-dummy-password", &self.config).ok())
            .as_deref()
    }

    /// Run a verification whose result is discarded.
    fn burn_verification(&self, password: &str) {
        if let Some(hash) = self.dummy_hash() {
            let _ = password::verify_password(password, hash, self.config.pepper.as_deref());
        }
    }

    /// Verify a bearer token and return the caller's identity.
    ///
    /// Purely stateless: no store lookup is performed.
    pub fn authenticate(&self, bearer: &str) -> Result<Identity, AuthError> {
        let claims = token::decode_session_token(bearer, &self.config)?;
        let user_id = Uuid::parse_str(&claims.user_id)
            .map_err(|e| AuthError::TokenInvalid(format!("bad userId claim: {e}")))?;
        Ok(Identity {
            user_id,
            email: claims.email,
        })
    }
}

/// Trim, lowercase and sanity-check an email address.
fn normalize_email(raw: &str) -> RootPilotResult<String> {
    let email = raw.trim().to_ascii_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(email)
    } else {
        Err(RootPilotError::validation("a valid email is required"))
    }
}

#[cfg(test)]
mod tests {
    use rootpilot_db::MemStore;
    use rootpilot_db::repository::MemUserRepository;

    use super::*;

    #[test]
    fn dummy_hash_uses_configured_cost() {
        let config = AuthConfig {
            password_hash_memory_kib: 1024,
            password_hash_iterations: 2,
            ..AuthConfig::default()
        };
        let svc = AuthService::new(MemUserRepository::new(MemStore::new()), config);

        let hash = svc.dummy_hash().unwrap().to_string();
        assert!(hash.starts_with("$argon2id$v=19$m=1024,t=2,p=1$"), "{hash}");
        assert_eq!(svc.dummy_hash(), Some(hash.as_str()));
    }

    #[test]
    fn email_is_normalized() {
        assert_eq!(
            normalize_email("  Alice@Example.COM ").unwrap(),
            "alice@example.com"
        );
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for bad in ["", "alice", "@example.com", "alice@", "a@b@c", "al ice@example.com"] {
            assert!(normalize_email(bad).is_err(), "accepted {bad:?}");
        }
    }
}
