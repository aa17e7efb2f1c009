//! Sitecraft domain core.
//!
//! Holds the project record as stored by the portal, the reminder
//! eligibility rules, the customer-facing copy tables, and the collaborator
//! traits (key-value store, mailer, email log) that the API and storage
//! crates implement. This crate has no I/O of its own.

pub mod email_log;
pub mod error;
pub mod mailer;
pub mod project;
pub mod reminder;
pub mod store;
pub mod types;
