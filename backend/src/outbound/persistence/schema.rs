//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key minted by the registering service.
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Display name.
        name -> Varchar,
        /// Argon2id digest in PHC string form.
        password_digest -> Text,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Board columns.
    lists (id) {
        id -> Int8,
        name -> Varchar,
        /// One of `TODO`, `IN_PROGRESS`, `DONE` (check constraint).
        status -> Varchar,
        /// Owner.
        user_id -> Uuid,
    }
}

diesel::table! {
    /// Tasks inside a list.
    items (id) {
        id -> Int8,
        name -> Varchar,
        description -> Nullable<Text>,
        list_id -> Int8,
        /// Creator.
        user_id -> Uuid,
    }
}

diesel::joinable!(items -> lists (list_id));
diesel::joinable!(lists -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(items, lists, users);
