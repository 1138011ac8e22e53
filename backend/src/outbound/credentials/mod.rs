//! Credential adapter: Argon2id password digests and HS256 session tokens.
//!
//! Token expiry is checked against an injected [`Clock`] with zero leeway
//! instead of the system time used by `jsonwebtoken`, so a token is rejected
//! from the exact second its `exp` claim names.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::ports::{CredentialError, CredentialService};
use crate::domain::{Identity, IssuedToken, Password, PasswordDigest, UserId};

const SALT_LEN: usize = 16;

/// Shared secret used to sign and verify session tokens.
///
/// The bytes are wiped when the last copy is dropped.
#[derive(Clone)]
pub struct TokenSecret(Zeroizing<Vec<u8>>);

impl TokenSecret {
    /// Wrap raw secret bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// Length of the secret in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenSecret({} bytes)", self.len())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionClaims {
    user_id: String,
    name: String,
    iat: i64,
    exp: i64,
}

/// [`CredentialService`] backed by `argon2` and `jsonwebtoken`.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use taskboard::domain::ports::CredentialService;
/// use taskboard::domain::Password;
/// use taskboard::outbound::credentials::{JwtCredentialService, TokenSecret};
///
/// let service = JwtCredentialService::new(
///     TokenSecret::new(b"0123456789abcdef0123456789abcdef".to_vec()),
///     Arc::new(DefaultClock),
/// );
/// let digest = service.hash_password(&Password::new("secret1")).expect("hash");
/// assert!(service.verify_password(&Password::new("secret1"), &digest));
/// ```
#[derive(Clone)]
pub struct JwtCredentialService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    clock: Arc<dyn Clock>,
}

impl JwtCredentialService {
    /// Build the service from a signing secret and a clock.
    pub fn new(secret: TokenSecret, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            clock,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation
    }
}

impl CredentialService for JwtCredentialService {
    fn hash_password(&self, plaintext: &Password) -> Result<PasswordDigest, CredentialError> {
        let mut salt_bytes = [0_u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|err| CredentialError::hashing(err.to_string()))?;
        let digest = Argon2::default()
            .hash_password(plaintext.expose().as_bytes(), &salt)
            .map_err(|err| CredentialError::hashing(err.to_string()))?
            .to_string();
        Ok(PasswordDigest::new(digest))
    }

    fn verify_password(&self, plaintext: &Password, digest: &PasswordDigest) -> bool {
        let Ok(parsed) = PasswordHash::new(digest.as_str()) else {
            return false;
        };
        Argon2::default()
            .verify_password(plaintext.expose().as_bytes(), &parsed)
            .is_ok()
    }

    fn issue_token(
        &self,
        identity: &Identity,
        ttl: Duration,
    ) -> Result<IssuedToken, CredentialError> {
        let now = self.clock.utc();
        let ttl_secs = i64::try_from(ttl.as_secs())
            .map_err(|_| CredentialError::signing("token lifetime out of range"))?;
        let claims = SessionClaims {
            user_id: identity.user_id.to_string(),
            name: identity.name.clone(),
            iat: now.timestamp(),
            exp: now.timestamp().saturating_add(ttl_secs),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| CredentialError::signing(err.to_string()))?;
        Ok(IssuedToken {
            token,
            expires_at_epoch_millis: now
                .timestamp_millis()
                .saturating_add(ttl_secs.saturating_mul(1000)),
        })
    }

    fn verify_token(&self, token: &str) -> Result<Identity, CredentialError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &Self::validation())
            .map_err(|err| CredentialError::token_invalid(err.to_string()))?;
        let claims = data.claims;
        if self.clock.utc().timestamp() >= claims.exp {
            return Err(CredentialError::token_invalid("token expired"));
        }
        let user_id = UserId::new(&claims.user_id)
            .map_err(|err| CredentialError::token_invalid(err.to_string()))?;
        Ok(Identity {
            user_id,
            name: claims.name,
        })
    }
}
