//! HTTP inbound adapter exposing the board procedures.
//!
//! Each procedure is mounted under [`RPC_PREFIX`]. Queries use `GET`, and
//! mutations use `POST` with a camelCase JSON body.

use actix_web::{Scope, web};

pub mod accounts;
pub mod board;
mod board_dto;
pub mod caller;
pub mod envelope;
pub mod error;
pub mod health;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod token_config;
pub mod validation;

pub use error::ApiResult;

/// Mount point of the procedure endpoints.
pub const RPC_PREFIX: &str = "/api/v1/rpc";

/// Scope registering every procedure with the standard extractor error
/// handling.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use taskboard::inbound::http::rpc_scope;
///
/// let app = App::new().service(rpc_scope());
/// ```
pub fn rpc_scope() -> Scope {
    web::scope(RPC_PREFIX)
        .app_data(validation::json_config())
        .app_data(validation::query_config())
        .service(accounts::register)
        .service(accounts::login)
        .service(accounts::logout)
        .service(accounts::get_users)
        .service(board::get_lists)
        .service(board::get_items)
        .service(board::create_list)
        .service(board::add_item)
        .service(board::edit_list)
        .service(board::edit_item)
        .service(board::delete_item)
        .service(board::delete_list)
        .service(board::move_list_status)
}
