//! Driven port for password digests and session tokens.
//!
//! The domain never sees the hashing algorithm or the signing key. Adapters
//! decide both; the contract only fixes the observable behaviour:
//!
//! - hashing is salted, so equal passwords give different digests;
//! - verifying a malformed digest answers `false` instead of failing;
//! - a token stops verifying once the adapter's clock reaches its expiry.

use std::time::Duration;

use crate::domain::{Identity, IssuedToken, Password, PasswordDigest};

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential adapters.
    pub enum CredentialError {
        /// The password could not be hashed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// The token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
        /// The token is malformed, forged or expired.
        TokenInvalid { reason: String } => "token rejected: {reason}",
    }
}

/// Password hashing and session token handling.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialService: Send + Sync {
    /// Produce a salted digest of `plaintext`.
    fn hash_password(&self, plaintext: &Password) -> Result<PasswordDigest, CredentialError>;

    /// Check `plaintext` against a stored digest.
    fn verify_password(&self, plaintext: &Password, digest: &PasswordDigest) -> bool;

    /// Sign a token for `identity` that expires after `ttl`.
    fn issue_token(&self, identity: &Identity, ttl: Duration)
    -> Result<IssuedToken, CredentialError>;

    /// Validate a token and return the identity it carries.
    fn verify_token(&self, token: &str) -> Result<Identity, CredentialError>;
}
