//! Synchronous API client core for the booking service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The host executes the actual
//! HTTP round-trip through a `Transport`, making the core deterministic and
//! testable.
//!
//! # Design
//! - `BookingClient` is stateless: it holds only an immutable `ClientConfig`.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - Non-2xx responses are normalized into `ApiError::Http` whose display is
//!   the server's `message` or `HTTP <status>`.
//! - List responses are accepted bare or wrapped under the entity name.
//! - `BookingApi` composes client and transport into one call per operation.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::BookingApi;
pub use client::BookingClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::Transport;
pub use types::{
    Booking, BookingResource, BookingStatus, BookingUser, CreateBooking, CreateResource, CreateUser, Health, Resource,
    ResourceType, User,
};
