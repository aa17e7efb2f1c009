//! Outbound customer email.
//!
//! - [`delivery::email`] — SMTP transport via `lettre`, configured from the
//!   environment, implementing [`ReminderMailer`](sitecraft_core::mailer::ReminderMailer).
//! - [`templates`] — plain-text rendering of reminder emails.

pub mod delivery;
pub mod templates;

pub use delivery::email::{EmailConfig, EmailDelivery, EmailError};
