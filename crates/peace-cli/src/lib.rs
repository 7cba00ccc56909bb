//! # peace-cli: Peace Message Command-Line Interface
//!
//! A thin external caller over `peace-zkp`. Every handler builds the
//! protocol components from the resolved configuration and delegates.
//!
//! ## Subcommands
//!
//! - `commit`: Print the field elements and commitment for a message
//! - `prove`: Generate a proof and write the transport document
//! - `verify`: Check a transport document against a claimed message
//! - `message-id`: Derive the deterministic message identifier
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic.
//! - Handlers return an exit code; errors propagate as `anyhow::Error`.
//! - Secrets are never printed or logged.

pub mod commit;
pub mod context;
pub mod message_id;
pub mod prove;
pub mod verify;
