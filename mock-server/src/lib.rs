use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateResource {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub status: String,
    pub user: UserSummary,
    pub resource: ResourceSummary,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub user_id: String,
    pub resource_id: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

pub const CONFIRMED: &str = "CONFIRMED";
pub const CANCELED: &str = "CANCELED";
const RESOURCE_TYPES: [&str; 3] = ["ROOM", "EQUIPMENT", "COURT"];

#[derive(Default)]
pub struct Store {
    pub users: Vec<User>,
    pub resources: Vec<Resource>,
    pub bookings: Vec<Booking>,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
pub struct AppState {
    db: Db,
    api_key: Arc<str>,
}

/// Failure responses, rendered as `{ "message": ... }`.
#[derive(Debug, Error)]
pub enum MockError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let status = match &self {
            MockError::BadRequest(_) => StatusCode::BAD_REQUEST,
            MockError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            MockError::NotFound(_) => StatusCode::NOT_FOUND,
            MockError::Conflict(_) => StatusCode::CONFLICT,
        };
        tracing::debug!(%status, message = %self, "rejecting request");
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

pub fn app(api_key: &str) -> Router {
    let state = AppState {
        db: Db::default(),
        api_key: Arc::from(api_key),
    };
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/resources", get(list_resources).post(create_resource))
        .route("/bookings", get(list_bookings).post(create_booking))
        .route("/bookings/{id}/cancel", patch(cancel_booking))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let provided = request
        .headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok());
    if provided != Some(&*state.api_key) {
        return MockError::Unauthorized("Invalid API key".to_string()).into_response();
    }
    next.run(request).await
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

async fn list_users(State(state): State<AppState>) -> Json<serde_json::Value> {
    let store = state.db.read().await;
    Json(json!({ "users": store.users }))
}

async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> Result<(StatusCode, Json<User>), MockError> {
    let name = input.name.trim();
    let email = input.email.trim().to_lowercase();
    if name.is_empty() {
        return Err(MockError::BadRequest("Name is required".to_string()));
    }
    if !email.contains('@') {
        return Err(MockError::BadRequest("Invalid email".to_string()));
    }

    let mut store = state.db.write().await;
    if store.users.iter().any(|u| u.email == email) {
        return Err(MockError::Conflict("Email already in use".to_string()));
    }
    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        email,
        created_at: now,
        updated_at: now,
    };
    store.users.push(user.clone());
    Ok((StatusCode::CREATED, Json(user)))
}

/// Served as a bare array, unlike the other lists.
async fn list_resources(State(state): State<AppState>) -> Json<Vec<Resource>> {
    let store = state.db.read().await;
    Json(store.resources.clone())
}

async fn create_resource(
    State(state): State<AppState>,
    Json(input): Json<CreateResource>,
) -> Result<(StatusCode, Json<Resource>), MockError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(MockError::BadRequest("Name is required".to_string()));
    }
    if !RESOURCE_TYPES.contains(&input.kind.as_str()) {
        return Err(MockError::BadRequest(format!("Invalid resource type: {}", input.kind)));
    }

    let now = Utc::now();
    let resource = Resource {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        kind: input.kind,
        created_at: now,
        updated_at: now,
    };
    state.db.write().await.resources.push(resource.clone());
    Ok((StatusCode::CREATED, Json(resource)))
}

async fn list_bookings(State(state): State<AppState>) -> Json<serde_json::Value> {
    let store = state.db.read().await;
    Json(json!({ "bookings": store.bookings }))
}

async fn create_booking(
    State(state): State<AppState>,
    Json(input): Json<CreateBooking>,
) -> Result<(StatusCode, Json<Booking>), MockError> {
    if input.end_at <= input.start_at {
        return Err(MockError::BadRequest("endAt must be after startAt".to_string()));
    }

    let mut store = state.db.write().await;
    let user = store
        .users
        .iter()
        .find(|u| u.id == input.user_id)
        .map(|u| UserSummary {
            id: u.id.clone(),
            name: u.name.clone(),
        })
        .ok_or_else(|| MockError::NotFound("User not found".to_string()))?;
    let resource = store
        .resources
        .iter()
        .find(|r| r.id == input.resource_id)
        .map(|r| ResourceSummary {
            id: r.id.clone(),
            name: r.name.clone(),
            kind: r.kind.clone(),
        })
        .ok_or_else(|| MockError::NotFound("Resource not found".to_string()))?;

    let overlaps = store.bookings.iter().any(|b| {
        b.resource.id == resource.id
            && b.status == CONFIRMED
            && b.start_at < input.end_at
            && input.start_at < b.end_at
    });
    if overlaps {
        return Err(MockError::Conflict(
            "Resource is already booked for this time range".to_string(),
        ));
    }

    let booking = Booking {
        id: Uuid::new_v4().to_string(),
        start_at: input.start_at,
        end_at: input.end_at,
        status: CONFIRMED.to_string(),
        user,
        resource,
    };
    store.bookings.push(booking.clone());
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Cancelling an already canceled booking returns it unchanged.
async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, MockError> {
    let mut store = state.db.write().await;
    let booking = store
        .bookings
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or_else(|| MockError::NotFound("Booking not found".to_string()))?;
    booking.status = CANCELED.to_string();
    Ok(Json(booking.clone()))
}
