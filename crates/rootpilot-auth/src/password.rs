//! Password hashing and verification using Argon2id.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::config::AuthConfig;
use crate::error::AuthError;

fn peppered<'a>(password: &'a str, pepper: Option<&str>, buf: &'a mut String) -> &'a [u8] {
    match pepper {
        Some(p) => {
            *buf = format!("{p}{password}");
            buf.as_bytes()
        }
        None => password.as_bytes(),
    }
}

/// Hash a password with Argon2id using the cost parameters from
/// `config`.
///
/// If a pepper is configured it is prepended to the password before
/// hashing. The salt is randomly generated for each call.
pub fn hash_password(password: &str, config: &AuthConfig) -> Result<String, AuthError> {
    let params = argon2::Params::new(
        config.password_hash_memory_kib,
        config.password_hash_iterations,
        1,
        None,
    )
    .map_err(|e| AuthError::Crypto(format!("argon2 params error: {e}")))?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let mut buf = String::new();
    let input = peppered(password, config.pepper.as_deref(), &mut buf);

    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    let hash = argon2
        .hash_password(input, &salt)
        .map_err(|e| AuthError::Crypto(format!("password hash error: {e}")))?;

    Ok(hash.to_string())
}

/// Verify a plaintext password against an Argon2id PHC-format hash.
///
/// If `pepper` is provided it is prepended to the password before
/// verification; this must match the pepper used during hashing.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or
/// `Err(AuthError::Crypto)` if the stored hash is malformed.
pub fn verify_password(
    password: &str,
    hash: &str,
    pepper: Option<&str>,
) -> Result<bool, AuthError> {
    let mut buf = String::new();
    let input = peppered(password, pepper, &mut buf);

    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("invalid hash format: {e}")))?;

    // Cost parameters are read back from the PHC string.
    let argon2 = Argon2::default();
    match argon2.verify_password(input, &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("verify error: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_config(pepper: Option<&str>) -> AuthConfig {
        AuthConfig {
            pepper: pepper.map(Into::into),
            password_hash_memory_kib: 1024,
            password_hash_iterations: 1,
            ..AuthConfig::default()
        }
    }

    #[test]
    fn correct_password_matches() {
        let hash = hash_password("hunter2", &cheap_config(None)).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("hunter2", &hash, None).unwrap());
    }

    #[test]
    fn wrong_password_does_not_match() {
        let hash = hash_password("hunter2", &cheap_config(None)).unwrap();
        assert!(!verify_password("wrong", &hash, None).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let config = cheap_config(None);
        let a = hash_password("pw123456", &config).unwrap();
        let b = hash_password("pw123456", &config).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn pepper_is_applied() {
        let hash = hash_password("hunter2", &cheap_config(Some("pepper!"))).unwrap();
        assert!(verify_password("hunter2", &hash, Some("pepper!")).unwrap());
        // Without pepper should fail.
        assert!(!verify_password("hunter2", &hash, None).unwrap());
    }

    #[test]
    fn malformed_hash_returns_error() {
        let result = verify_password("pw", "not-a-hash", None);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_cost_parameters_are_rejected() {
        let config = AuthConfig {
            password_hash_memory_kib: 0,
            ..cheap_config(None)
        };
        assert!(matches!(
            hash_password("pw", &config),
            Err(AuthError::Crypto(_))
        ));
    }
}
