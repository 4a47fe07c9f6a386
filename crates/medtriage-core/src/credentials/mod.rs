//! Password hashing and bearer tokens.

mod password;
mod token;

pub use password::*;
pub use token::*;

use thiserror::Error;

/// Credential machinery errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

pub type CredentialResult<T> = Result<T, CredentialError>;
