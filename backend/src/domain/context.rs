//! Per-call authorisation context.
//!
//! Every procedure call is classified before its body runs: `login` and
//! `register` proceed anonymously, everything else needs a bearer token that
//! the credential service accepts.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::CredentialService;
use crate::domain::{Error, Identity, UserId};

/// Message used whenever a call lacks a usable session.
pub const NOT_AUTHENTICATED: &str = "Not authenticated";

/// The RPC procedures exposed by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Procedure {
    /// Create an account.
    Register,
    /// Exchange credentials for a session token.
    Login,
    /// Acknowledge a client-side logout.
    Logout,
    /// Every list with its items.
    GetLists,
    /// Every registered user.
    GetUsers,
    /// Create a list.
    CreateList,
    /// Add an item to a list.
    AddItem,
    /// Items of one list.
    GetItems,
    /// Rename or restage a list.
    EditList,
    /// Change an item.
    EditItem,
    /// Remove an item.
    DeleteItem,
    /// Remove a list and its items.
    DeleteList,
    /// Change a list's stage.
    MoveListStatus,
}

impl Procedure {
    /// All procedures in declaration order.
    pub const ALL: [Self; 13] = [
        Self::Register,
        Self::Login,
        Self::Logout,
        Self::GetLists,
        Self::GetUsers,
        Self::CreateList,
        Self::AddItem,
        Self::GetItems,
        Self::EditList,
        Self::EditItem,
        Self::DeleteItem,
        Self::DeleteList,
        Self::MoveListStatus,
    ];

    /// Wire name of the procedure.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Login => "login",
            Self::Logout => "logout",
            Self::GetLists => "getLists",
            Self::GetUsers => "getUsers",
            Self::CreateList => "createList",
            Self::AddItem => "addItem",
            Self::GetItems => "getItems",
            Self::EditList => "editList",
            Self::EditItem => "editItem",
            Self::DeleteItem => "deleteItem",
            Self::DeleteList => "deleteList",
            Self::MoveListStatus => "moveListStatus",
        }
    }

    /// Whether the procedure runs without a session.
    pub fn is_public(self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// Whether the procedure only reads state.
    pub fn is_query(self) -> bool {
        matches!(self, Self::GetLists | Self::GetUsers | Self::GetItems)
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for names that are not procedures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown procedure: {name}")]
pub struct UnknownProcedure {
    /// Rejected name.
    pub name: String,
}

impl FromStr for Procedure {
    type Err = UnknownProcedure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|procedure| procedure.as_str() == s)
            .ok_or_else(|| UnknownProcedure { name: s.to_owned() })
    }
}

/// Context handed to procedure bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestContext {
    /// No session; only public procedures receive this.
    Anonymous,
    /// A verified session.
    Authenticated(Identity),
}

impl RequestContext {
    /// Identity of the caller, if authenticated.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(identity) => Some(identity),
        }
    }

    /// Identity of the caller or an `Unauthorized` error.
    pub fn require_identity(&self) -> Result<&Identity, Error> {
        self.identity()
            .ok_or_else(|| Error::unauthorized(NOT_AUTHENTICATED))
    }
}

/// Builds a [`RequestContext`] for each inbound call.
#[derive(Clone)]
pub struct ContextResolver {
    credentials: Arc<dyn CredentialService>,
}

impl ContextResolver {
    /// Create a resolver backed by the given credential service.
    pub fn new(credentials: Arc<dyn CredentialService>) -> Self {
        Self { credentials }
    }

    /// Classify a call.
    ///
    /// `authorization` is the raw `Authorization` header value. The token is
    /// the second space-separated segment, so `Bearer <token>` works and any
    /// scheme word is accepted. Missing and rejected tokens produce the same
    /// error.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use taskboard::domain::ports::{CredentialError, CredentialService};
    /// use taskboard::domain::{
    ///     ContextResolver, Identity, IssuedToken, Password, PasswordDigest, Procedure,
    ///     RequestContext,
    /// };
    ///
    /// struct RejectAll;
    ///
    /// impl CredentialService for RejectAll {
    ///     fn hash_password(&self, _: &Password) -> Result<PasswordDigest, CredentialError> {
    ///         Err(CredentialError::hashing("unused"))
    ///     }
    ///     fn verify_password(&self, _: &Password, _: &PasswordDigest) -> bool {
    ///         false
    ///     }
    ///     fn issue_token(
    ///         &self,
    ///         _: &Identity,
    ///         _: std::time::Duration,
    ///     ) -> Result<IssuedToken, CredentialError> {
    ///         Err(CredentialError::signing("unused"))
    ///     }
    ///     fn verify_token(&self, _: &str) -> Result<Identity, CredentialError> {
    ///         Err(CredentialError::token_invalid("rejected"))
    ///     }
    /// }
    ///
    /// let resolver = ContextResolver::new(Arc::new(RejectAll));
    /// assert_eq!(
    ///     resolver.resolve(Procedure::Login, None),
    ///     Ok(RequestContext::Anonymous)
    /// );
    /// assert!(resolver.resolve(Procedure::GetLists, Some("Bearer x")).is_err());
    /// ```
    pub fn resolve(
        &self,
        procedure: Procedure,
        authorization: Option<&str>,
    ) -> Result<RequestContext, Error> {
        if procedure.is_public() {
            return Ok(RequestContext::Anonymous);
        }

        let Some(token) = authorization.and_then(bearer_token) else {
            debug!(%procedure, "no token provided");
            return Err(Error::unauthorized(NOT_AUTHENTICATED));
        };

        match self.credentials.verify_token(token) {
            Ok(identity) => Ok(RequestContext::Authenticated(identity)),
            Err(error) => {
                debug!(%procedure, %error, "invalid token");
                Err(Error::unauthorized(NOT_AUTHENTICATED))
            }
        }
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    header.split(' ').nth(1).filter(|token| !token.is_empty())
}

/// Chooses whose identity a mutating procedure acts as.
///
/// `ClientSupplied` trusts the `userId` in the request body and is what
/// existing clients expect. `VerifiedIdentity` uses the token's subject and
/// ignores the body field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActorPolicy {
    /// Act as the `userId` the client sent.
    #[default]
    ClientSupplied,
    /// Act as the verified token subject.
    VerifiedIdentity,
}

impl ActorPolicy {
    /// Resolve the actor used for ownership checks and new records.
    ///
    /// `None` means the body named nobody who could exist; such an actor owns
    /// nothing and cannot create records.
    pub fn effective_actor(
        self,
        context: &RequestContext,
        claimed: &ClaimedUserId,
    ) -> Result<Option<UserId>, Error> {
        match self {
            Self::ClientSupplied => Ok(claimed.user_id()),
            Self::VerifiedIdentity => context
                .require_identity()
                .map(|identity| Some(identity.user_id)),
        }
    }
}

/// The `userId` a request body carried, kept exactly as sent.
///
/// Any string is accepted on the wire. Only a UUID can name a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimedUserId(String);

impl ClaimedUserId {
    /// Wrap the raw body value.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw value as sent.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The user this claim names, if it is a well-formed id.
    pub fn user_id(&self) -> Option<UserId> {
        UserId::new(&self.0).ok()
    }
}

impl From<UserId> for ClaimedUserId {
    fn from(id: UserId) -> Self {
        Self(id.to_string())
    }
}

/// Error returned for unrecognised actor policy names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("actor policy must be client or verified; got {value}")]
pub struct ActorPolicyParseError {
    /// Rejected input.
    pub value: String,
}

impl FromStr for ActorPolicy {
    type Err = ActorPolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Self::ClientSupplied),
            "verified" => Ok(Self::VerifiedIdentity),
            _ => Err(ActorPolicyParseError { value: s.to_owned() }),
        }
    }
}
