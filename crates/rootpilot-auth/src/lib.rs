//! RootPilot Auth: Argon2id password hashing, HS256 session token
//! issuance/validation, and the register/login flows.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AuthOutput, AuthService, Identity, LoginInput, RegisterInput};
pub use token::SessionClaims;
