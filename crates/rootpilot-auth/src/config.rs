//! Authentication configuration.

/// Configuration for the authentication service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared HMAC secret for signing and verifying session tokens.
    pub jwt_secret: String,
    /// Session token lifetime in seconds (default: 604_800 = 7 days).
    pub token_lifetime_secs: u64,
    /// JWT issuer (`iss` claim).
    pub jwt_issuer: String,
    /// Optional pepper prepended to passwords before Argon2id hashing
    /// and verification.
    pub pepper: Option<String>,
    /// Minimum password length for registration.
    pub min_password_length: usize,
    /// Argon2id memory cost in KiB (default: 19_456 = 19 MiB).
    pub password_hash_memory_kib: u32,
    /// Argon2id iteration count (default: 2).
    pub password_hash_iterations: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_lifetime_secs: 604_800,
            jwt_issuer: "rootpilot".into(),
            pepper: None,
            min_password_length: 8,
            password_hash_memory_kib: 19_456,
            password_hash_iterations: 2,
        }
    }
}
