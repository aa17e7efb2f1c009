//! Row structs for the reminder service tables.
//!
//! Each submodule holds a `FromRow` struct matching the database row and
//! the conversion into the corresponding core type where one exists.

pub mod email_log;
pub mod kv;
