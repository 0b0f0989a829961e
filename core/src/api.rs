//! Domain accessors: one round-trip per call over a `Transport`.

use tracing::{debug, warn};

use crate::client::BookingClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Booking, CreateBooking, CreateResource, CreateUser, Health, Resource, User};

/// Pairs a `BookingClient` with the host's `Transport`.
///
/// Each accessor builds the request, executes it and parses the response.
/// Nothing is cached or retried.
#[derive(Debug, Clone)]
pub struct BookingApi<T> {
    client: BookingClient,
    transport: T,
}

impl<T: Transport> BookingApi<T> {
    pub fn new(client: BookingClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn health(&self) -> Result<Health, ApiError> {
        let response = self.send(self.client.build_health())?;
        self.client.parse_health(response).inspect_err(log_failure)
    }

    pub fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let response = self.send(self.client.build_list_users())?;
        self.client.parse_list_users(response).inspect_err(log_failure)
    }

    pub fn create_user(&self, input: &CreateUser) -> Result<User, ApiError> {
        let response = self.send(self.client.build_create_user(input)?)?;
        self.client.parse_create_user(response).inspect_err(log_failure)
    }

    pub fn list_resources(&self) -> Result<Vec<Resource>, ApiError> {
        let response = self.send(self.client.build_list_resources())?;
        self.client.parse_list_resources(response).inspect_err(log_failure)
    }

    pub fn create_resource(&self, input: &CreateResource) -> Result<Resource, ApiError> {
        let response = self.send(self.client.build_create_resource(input)?)?;
        self.client.parse_create_resource(response).inspect_err(log_failure)
    }

    pub fn list_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        let response = self.send(self.client.build_list_bookings())?;
        self.client.parse_list_bookings(response).inspect_err(log_failure)
    }

    pub fn create_booking(&self, input: &CreateBooking) -> Result<Booking, ApiError> {
        let response = self.send(self.client.build_create_booking(input)?)?;
        self.client.parse_create_booking(response).inspect_err(log_failure)
    }

    pub fn cancel_booking(&self, id: &str) -> Result<Booking, ApiError> {
        let response = self.send(self.client.build_cancel_booking(id))?;
        self.client.parse_cancel_booking(response).inspect_err(log_failure)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.path, "sending request");
        let response = self.transport.execute(request).inspect_err(log_failure)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}

fn log_failure(err: &ApiError) {
    warn!(status = ?err.status(), error = %err, "request failed");
}
