use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::ports::security::{PasswordEncoder, PasswordEncodingError};

/// Argon2id password encoder producing PHC strings
#[derive(Clone, Default)]
pub struct Argon2PasswordEncoder {
    argon2: Argon2<'static>,
}

impl Argon2PasswordEncoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordEncoder for Argon2PasswordEncoder {
    fn encode(&self, raw: &str) -> Result<String, PasswordEncodingError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(raw.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordEncodingError(e.to_string()))
    }

    fn matches(&self, raw: &str, encoded: &str) -> Result<bool, PasswordEncodingError> {
        let parsed =
            PasswordHash::new(encoded).map_err(|e| PasswordEncodingError(e.to_string()))?;
        Ok(self
            .argon2
            .verify_password(raw.as_bytes(), &parsed)
            .is_ok())
    }
}
