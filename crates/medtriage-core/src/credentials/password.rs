//! PBKDF2-HMAC-SHA256 password hashing.
//!
//! Encoded form: `pbkdf2-sha256$<iterations>$<salt hex>$<hash hex>`

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::{CredentialError, CredentialResult};

pub const PBKDF2_ITERATIONS: u32 = 600_000;
pub const SALT_LENGTH: usize = 32;
pub const HASH_LENGTH: usize = 32;

const SCHEME: &str = "pbkdf2-sha256";

/// Hashes and verifies patient passwords.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    iterations: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(PBKDF2_ITERATIONS)
    }
}

impl PasswordHasher {
    /// Iterations apply to new hashes only; verification reads them from the stored hash.
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Hash `password` with a fresh random salt.
    pub fn hash(&self, password: &str) -> String {
        let mut salt = [0u8; SALT_LENGTH];
        rand::thread_rng().fill_bytes(&mut salt);
        let digest = derive(password, &salt, self.iterations);
        format!(
            "{}${}${}${}",
            SCHEME,
            self.iterations,
            hex::encode(salt),
            hex::encode(digest)
        )
    }

    /// Check `password` against an encoded hash.
    pub fn verify(&self, password: &str, encoded: &str) -> CredentialResult<bool> {
        let parsed = ParsedHash::parse(encoded)?;
        let candidate = derive(password, &parsed.salt, parsed.iterations);
        Ok(candidate[..].ct_eq(&parsed.digest[..]).into())
    }

    /// Spend the same work as [`verify`](Self::verify) on a login with no stored hash.
    pub fn verify_absent(&self, password: &str) {
        let _ = derive(password, &[0u8; SALT_LENGTH], self.iterations);
    }
}

fn derive(password: &str, salt: &[u8], iterations: u32) -> [u8; HASH_LENGTH] {
    let mut out = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut out);
    out
}

struct ParsedHash {
    iterations: u32,
    salt: Vec<u8>,
    digest: [u8; HASH_LENGTH],
}

impl ParsedHash {
    fn parse(encoded: &str) -> CredentialResult<Self> {
        let malformed = |why: &str| CredentialError::MalformedHash(why.to_string());

        let mut parts = encoded.split('$');
        let (Some(scheme), Some(iterations), Some(salt), Some(digest), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return Err(malformed("expected 4 fields"));
        };

        if scheme != SCHEME {
            return Err(malformed("unknown scheme"));
        }
        let iterations: u32 = iterations
            .parse()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| malformed("bad iteration count"))?;
        let salt = hex::decode(salt).map_err(|_| malformed("bad salt"))?;
        let digest: [u8; HASH_LENGTH] = hex::decode(digest)
            .ok()
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or_else(|| malformed("bad digest"))?;

        Ok(Self {
            iterations,
            salt,
            digest,
        })
    }
}
