/// Failure while encoding or parsing an encoded password
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct PasswordEncodingError(pub String);

/// One-way password encoding used at registration.
///
/// `matches` exists for the authentication layer, which verifies
/// credentials against the stored hash.
pub trait PasswordEncoder: Send + Sync + 'static {
    fn encode(&self, raw: &str) -> Result<String, PasswordEncodingError>;

    fn matches(&self, raw: &str, encoded: &str) -> Result<bool, PasswordEncodingError>;
}
