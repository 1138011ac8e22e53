//! Uniform procedure response envelope.
//!
//! A procedure answers HTTP 200 with either its payload or
//! `{"error": "<message>"}`. Internal failures are reduced to
//! "An unknown error occurred" before they reach the wire.

use actix_web::body::BoxBody;
use actix_web::{HttpRequest, HttpResponse, Responder};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{BoardList, Error, Item, User};

/// Failure half of the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Caller-safe description of the failure.
    #[schema(example = "List not found or user does not have permission")]
    pub error: String,
}

impl From<&Error> for ErrorEnvelope {
    fn from(error: &Error) -> Self {
        Self {
            error: error.public_message().to_owned(),
        }
    }
}

/// Procedure outcome rendered as an envelope.
///
/// # Examples
/// ```
/// use taskboard::domain::Error;
/// use taskboard::inbound::http::envelope::Envelope;
///
/// let failed: Envelope<()> = Envelope::from(Err(Error::internal("pool exhausted")));
/// assert_eq!(
///     serde_json::to_value(failed.body()).unwrap(),
///     serde_json::json!({ "error": "An unknown error occurred" })
/// );
/// ```
#[derive(Debug)]
pub struct Envelope<T>(Result<T, Error>);

impl<T> From<Result<T, Error>> for Envelope<T> {
    fn from(result: Result<T, Error>) -> Self {
        Self(result)
    }
}

/// Serialised form of an [`Envelope`].
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum EnvelopeBody<'a, T> {
    /// The procedure's payload, unwrapped.
    Payload(&'a T),
    /// `{"error": ...}`.
    Failure(ErrorEnvelope),
}

impl<T: Serialize> Envelope<T> {
    /// Body that will be written to the wire.
    pub fn body(&self) -> EnvelopeBody<'_, T> {
        match &self.0 {
            Ok(payload) => EnvelopeBody::Payload(payload),
            Err(error) => EnvelopeBody::Failure(ErrorEnvelope::from(error)),
        }
    }
}

impl<T: Serialize> Responder for Envelope<T> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        if let Err(error) = &self.0 {
            debug!(code = ?error.code(), "procedure returned an error envelope");
        }
        HttpResponse::Ok().json(self.body())
    }
}

/// `{"message": ...}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Logout successful")]
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

/// Payload of a successful `register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RegisterResponse {
    #[schema(example = "User registered successfully")]
    pub message: String,
    pub user: User,
}

/// Payload of a successful `login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    /// Bearer token for subsequent calls.
    pub token: String,
    /// Advisory expiry in milliseconds since the Unix epoch.
    #[schema(example = 1_767_229_200_000_i64)]
    pub expiration_time: i64,
    pub user: User,
}

/// Payload of a successful `editList`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ListUpdatedResponse {
    #[schema(example = "List updated successfully")]
    pub message: String,
    pub list: BoardList,
}

/// Payload of a successful `editItem`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ItemUpdatedResponse {
    #[schema(example = "Item updated successfully")]
    pub message: String,
    pub item: Item,
}
