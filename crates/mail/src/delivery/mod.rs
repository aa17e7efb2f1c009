//! External delivery channels for customer emails.

pub mod email;
