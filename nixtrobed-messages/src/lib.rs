//! nixtrobed-messages
//!
//! Centralized messaging for the nixtrobed CLI.
//! Provides the message templates and a small builder that fills in
//! `{variable}` placeholders for user-facing output.

pub mod builder;
pub mod macros;
pub mod messages;

pub use messages::{Messages, MESSAGES};
