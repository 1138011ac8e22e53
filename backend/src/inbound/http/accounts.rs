//! Account procedures.
//!
//! ```text
//! POST /api/v1/rpc/register {"username":"ann","password":"secret1","name":"Ann A"}
//! POST /api/v1/rpc/login {"username":"ann","password":"secret1"}
//! POST /api/v1/rpc/logout
//! GET /api/v1/rpc/getUsers
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::LoginOutcome;
use crate::domain::{Error, LoginCredentials, Registration, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::caller::Caller;
use crate::inbound::http::envelope::{
    Envelope, LoginResponse, MessageResponse, RegisterResponse,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_registration_error;

const REGISTERED: &str = "User registered successfully";
const LOGGED_IN: &str = "Login successful";
const LOGGED_OUT: &str = "Logout successful";

/// Request body for `register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    #[schema(example = "ann", min_length = 3)]
    pub username: String,
    #[schema(example = "secret1", min_length = 6)]
    pub password: String,
    #[schema(example = "Ann A", min_length = 1)]
    pub name: String,
}

impl TryFrom<RegisterBody> for Registration {
    type Error = Error;

    fn try_from(value: RegisterBody) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password, &value.name)
            .map_err(map_registration_error)
    }
}

/// Request body for `login`. Any string shape is accepted.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    #[schema(example = "ann")]
    pub username: String,
    #[schema(example = "secret1")]
    pub password: String,
}

impl From<LoginBody> for LoginCredentials {
    fn from(value: LoginBody) -> Self {
        Self::new(value.username, value.password)
    }
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            message: LOGGED_IN.to_owned(),
            token: outcome.token.token,
            expiration_time: outcome.token.expires_at_epoch_millis,
            user: outcome.user,
        }
    }
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/v1/rpc/register",
    request_body = RegisterBody,
    responses(
        (status = 200, description = "Registered user, or `{error}` when the username is taken", body = RegisterResponse),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterBody>,
) -> ApiResult<Envelope<RegisterResponse>> {
    let registration = Registration::try_from(payload.into_inner())?;
    let result = state
        .accounts
        .register(registration)
        .await
        .map(|user| RegisterResponse {
            message: REGISTERED.to_owned(),
            user,
        });
    Ok(result.into())
}

/// Exchange credentials for a one-hour bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/rpc/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Token and user, or `{error}` on bad credentials", body = LoginResponse),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginBody>,
) -> ApiResult<Envelope<LoginResponse>> {
    let credentials = LoginCredentials::from(payload.into_inner());
    let result = state
        .accounts
        .login(credentials)
        .await
        .map(LoginResponse::from);
    Ok(result.into())
}

/// Acknowledge a logout. Tokens stay valid until they expire.
#[utoipa::path(
    post,
    path = "/api/v1/rpc/logout",
    responses(
        (status = 200, description = "Logout acknowledged", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<Envelope<MessageResponse>> {
    let result = state
        .accounts
        .logout(caller.context())
        .await
        .map(|()| MessageResponse::new(LOGGED_OUT));
    Ok(result.into())
}

/// Every registered user, without password digests.
#[utoipa::path(
    get,
    path = "/api/v1/rpc/getUsers",
    responses(
        (status = 200, description = "Registered users", body = [User]),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "getUsers"
)]
#[get("/getUsers")]
pub async fn get_users(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<Envelope<Vec<User>>> {
    Ok(state.accounts.list_users(caller.context()).await.into())
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
