//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the procedure API. It registers:
//!
//! - **Paths**: the thirteen procedures under `/api/v1/rpc` and the health
//!   probes
//! - **Schemas**: board records, the `{error}` envelope, success payloads and
//!   request bodies
//! - **Security**: bearer token authentication scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::domain::{BoardList, Error, ErrorCode, Item, ListStatus, ListWithItems, User};
use crate::inbound::http::accounts::{LoginBody, RegisterBody};
use crate::inbound::http::board::{
    AddItemBody, CreateListBody, DeleteItemBody, DeleteListBody, EditItemBody, EditListBody,
    MoveListStatusBody,
};
use crate::inbound::http::envelope::{
    ErrorEnvelope, ItemUpdatedResponse, ListUpdatedResponse, LoginResponse, MessageResponse,
    RegisterResponse,
};
use crate::inbound::http::health::{ProbeReport, StoreBackend};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/v1/rpc/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the procedure API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Task board API",
        description = "Token-authenticated procedures for users, lists and items, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::get_users,
        crate::inbound::http::board::get_lists,
        crate::inbound::http::board::get_items,
        crate::inbound::http::board::create_list,
        crate::inbound::http::board::add_item,
        crate::inbound::http::board::edit_list,
        crate::inbound::http::board::edit_item,
        crate::inbound::http::board::delete_item,
        crate::inbound::http::board::delete_list,
        crate::inbound::http::board::move_list_status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        BoardList,
        Item,
        ListWithItems,
        ListStatus,
        Error,
        ErrorCode,
        ErrorEnvelope,
        MessageResponse,
        RegisterResponse,
        LoginResponse,
        ListUpdatedResponse,
        ItemUpdatedResponse,
        RegisterBody,
        LoginBody,
        CreateListBody,
        AddItemBody,
        EditListBody,
        EditItemBody,
        DeleteItemBody,
        DeleteListBody,
        MoveListStatusBody,
        ProbeReport,
        StoreBackend,
    )),
    tags(
        (name = "accounts", description = "Registration, login and user listing"),
        (name = "board", description = "Lists and items"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the OpenAPI document structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", &["code", "message"])]
    #[case("User", &["id", "username", "name"])]
    #[case("BoardList", &["id", "name", "status", "userId"])]
    #[case("Item", &["id", "name", "description", "listId", "userId"])]
    #[case("LoginResponse", &["message", "token", "expirationTime", "user"])]
    #[case("ErrorEnvelope", &["error"])]
    fn schemas_expose_wire_field_names(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");

        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[rstest]
    fn user_schema_has_no_digest_field() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let Some(RefOr::T(Schema::Object(user))) = schemas.get("User") else {
            panic!("expected User object schema");
        };

        assert!(
            !user
                .properties
                .keys()
                .any(|key| key.to_lowercase().contains("password"))
        );
    }

    #[rstest]
    fn every_procedure_is_documented() {
        let doc = ApiDoc::openapi();
        let procedures = [
            "register",
            "login",
            "logout",
            "getUsers",
            "getLists",
            "getItems",
            "createList",
            "addItem",
            "editList",
            "editItem",
            "deleteItem",
            "deleteList",
            "moveListStatus",
        ];

        for procedure in procedures {
            let path = format!("/api/v1/rpc/{procedure}");
            assert!(doc.paths.paths.contains_key(&path), "missing {path}");
        }
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");

        assert!(components.security_schemes.contains_key("BearerToken"));
    }
}
