//! Operator console for the booking API.
//!
//! # Overview
//! Hosts the I/O-free `booking-core` client: `UreqTransport` executes its
//! requests, the pages in [`pages`] hold per-view form and list state, and
//! [`shell::Shell`] ties navigation, the health indicator and REPL commands
//! together. Everything renders to plain text.

pub mod command;
pub mod pages;
pub mod shell;
pub mod transport;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use command::{Command, CommandError};
pub use shell::{HealthStatus, Outcome, PageKind, Shell};
pub use transport::UreqTransport;
