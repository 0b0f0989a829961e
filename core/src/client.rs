//! Stateless HTTP request builder and response parser for the booking API.
//!
//! # Design
//! `BookingClient` holds only its immutable `ClientConfig` and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. The host executes the actual HTTP round-trip, keeping
//! the core deterministic and free of I/O dependencies.
//!
//! Failure normalization lives here: any status outside 2xx becomes
//! `ApiError::Http` carrying the body's `message` string, or `HTTP <status>`
//! when the body has none.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Booking, CreateBooking, CreateResource, CreateUser, Health, Resource, User};

pub const API_KEY_HEADER: &str = "x-api-key";

/// Synchronous, stateless client for the booking API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. Every built request carries the JSON content type
/// and the configured API key.
#[derive(Debug, Clone)]
pub struct BookingClient {
    config: ClientConfig,
}

impl BookingClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn build_health(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/health", None)
    }

    pub fn build_list_users(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/users", None)
    }

    pub fn build_create_user(&self, input: &CreateUser) -> Result<HttpRequest, ApiError> {
        Ok(self.request(HttpMethod::Post, "/users", Some(to_body(input)?)))
    }

    pub fn build_list_resources(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/resources", None)
    }

    pub fn build_create_resource(&self, input: &CreateResource) -> Result<HttpRequest, ApiError> {
        Ok(self.request(HttpMethod::Post, "/resources", Some(to_body(input)?)))
    }

    pub fn build_list_bookings(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/bookings", None)
    }

    pub fn build_create_booking(&self, input: &CreateBooking) -> Result<HttpRequest, ApiError> {
        Ok(self.request(HttpMethod::Post, "/bookings", Some(to_body(input)?)))
    }

    pub fn build_cancel_booking(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Patch, &format!("/bookings/{id}/cancel"), None)
    }

    pub fn parse_health(&self, response: HttpResponse) -> Result<Health, ApiError> {
        check_status(&response)?;
        parse_json(&response.body)
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        check_status(&response)?;
        normalize_list(&response.body, "users")
    }

    pub fn parse_create_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_status(&response)?;
        parse_json(&response.body)
    }

    pub fn parse_list_resources(&self, response: HttpResponse) -> Result<Vec<Resource>, ApiError> {
        check_status(&response)?;
        normalize_list(&response.body, "resources")
    }

    pub fn parse_create_resource(&self, response: HttpResponse) -> Result<Resource, ApiError> {
        check_status(&response)?;
        parse_json(&response.body)
    }

    pub fn parse_list_bookings(&self, response: HttpResponse) -> Result<Vec<Booking>, ApiError> {
        check_status(&response)?;
        normalize_list(&response.body, "bookings")
    }

    pub fn parse_create_booking(&self, response: HttpResponse) -> Result<Booking, ApiError> {
        check_status(&response)?;
        parse_json(&response.body)
    }

    pub fn parse_cancel_booking(&self, response: HttpResponse) -> Result<Booking, ApiError> {
        check_status(&response)?;
        parse_json(&response.body)
    }

    fn request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.config.base_url()),
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                (API_KEY_HEADER.to_string(), self.config.api_key().to_string()),
            ],
            body,
        }
    }
}

fn to_body<T: Serialize>(input: &T) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map a non-2xx response to `ApiError::Http` with its normalized message.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        message: error_message(response.status, &response.body),
    })
}

/// Human-readable message for a failed response: the body's `message` string
/// when present, otherwise `HTTP <status>`. Only a JSON object can carry a
/// message; arrays, scalars and unparsable bodies fall back to the status.
pub fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => map.get("message").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
    .unwrap_or_else(|| format!("HTTP {status}"))
}

/// Accept a list either as a bare array or wrapped under `field`.
pub fn normalize_list<T: DeserializeOwned>(body: &str, field: &str) -> Result<Vec<T>, ApiError> {
    let value: Value = parse_json(body)?;
    let items = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => map.remove(field).ok_or_else(|| {
            ApiError::Deserialization(format!("expected an array or an object with a `{field}` field"))
        })?,
        other => {
            return Err(ApiError::Deserialization(format!(
                "expected an array or an object with a `{field}` field, got {other}"
            )))
        }
    };
    serde_json::from_value(items).map_err(|e| ApiError::Deserialization(e.to_string()))
}
