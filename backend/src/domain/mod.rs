//! Domain primitives, services and ports.
//!
//! Purpose: Define strongly typed entities for the board (users, lists,
//! items), the per-call authorisation context, and the services that run the
//! RPC procedures. Types are immutable once validated and document their
//! serialisation contracts (serde) in Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, BoardList, Item: records returned by procedures.
//! - RequestContext / ContextResolver: who is calling.
//! - AccountServiceImpl / BoardServiceImpl: driving-port implementations.

pub mod account_service;
pub mod auth;
pub mod board;
pub mod board_service;
pub mod context;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::{AccountServiceImpl, SESSION_TTL};
pub use self::auth::{
    Identity, IssuedToken, LoginCredentials, PASSWORD_MIN, Password, Registration,
    RegistrationValidationError,
};
pub use self::board::{
    BoardList, Item, ItemId, ItemPatch, ListId, ListPatch, ListStatus, ListStatusParseError,
    ListWithItems, NewItem, NewList,
};
pub use self::board_service::BoardServiceImpl;
pub use self::context::{
    ActorPolicy, ActorPolicyParseError, ClaimedUserId, ContextResolver, NOT_AUTHENTICATED,
    Procedure, RequestContext, UnknownProcedure,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, UNKNOWN_ERROR_MESSAGE};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DisplayName, NewUser, PasswordDigest, User, UserAccount, UserId, UserValidationError,
    Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use taskboard::domain::{ApiResult, Error};
///
/// fn body() -> ApiResult<()> {
///     Err(Error::unauthorized("Not authenticated"))
/// }
/// assert!(body().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
