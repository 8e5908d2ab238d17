//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key (`BIGSERIAL`).
        id -> Int8,
        /// Normalised login address, unique.
        email -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// User-owned map markers.
    points (id) {
        /// Primary key (`BIGSERIAL`).
        id -> Int8,
        /// Owning user; rows are removed with their owner.
        owner_id -> Int8,
        longitude -> Float8,
        latitude -> Float8,
        description -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(points -> users (owner_id));

diesel::allow_tables_to_appear_in_same_query!(points, users);
