//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod email_log_repo;
pub mod kv_repo;

pub use email_log_repo::EmailLogRepo;
pub use kv_repo::KvRepo;
