//! In-memory `Transport` for page and shell unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use booking_core::{ApiError, BookingApi, BookingClient, ClientConfig, HttpRequest, HttpResponse, Transport};

pub(crate) const BASE_URL: &str = "http://api.test";

/// Replays canned responses keyed by `"METHOD /path"` and records every
/// request it sees. The last response of a route is sticky so lists can be
/// reloaded any number of times. Unknown routes fail like a dead network.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    routes: Mutex<HashMap<String, VecDeque<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn respond(&self, route: &str, status: u16, body: &str) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry(route.to_string())
            .or_default()
            .push_back(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            });
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| route_of(r))
            .collect()
    }

    pub(crate) fn count(&self, route: &str) -> usize {
        self.requests().iter().filter(|r| *r == route).count()
    }

    pub(crate) fn last_body(&self, route: &str) -> Option<serde_json::Value> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| route_of(r) == route)
            .and_then(|r| r.body.as_deref())
            .map(|b| serde_json::from_str(b).unwrap())
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let route = route_of(&request);
        self.requests.lock().unwrap().push(request);

        let mut routes = self.routes.lock().unwrap();
        let queue = routes
            .get_mut(&route)
            .ok_or_else(|| ApiError::Transport(format!("connection refused: {route}")))?;
        if queue.len() > 1 {
            Ok(queue.pop_front().unwrap())
        } else {
            queue
                .front()
                .cloned()
                .ok_or_else(|| ApiError::Transport(format!("connection refused: {route}")))
        }
    }
}

fn route_of(request: &HttpRequest) -> String {
    let path = request.path.strip_prefix(BASE_URL).unwrap_or(&request.path);
    format!("{} {path}", request.method)
}

pub(crate) fn api(transport: &ScriptedTransport) -> BookingApi<&ScriptedTransport> {
    let config = ClientConfig::new(Some(BASE_URL.to_string()), Some("test-key".to_string())).unwrap();
    BookingApi::new(BookingClient::new(config), transport)
}

pub(crate) fn user_json(id: &str, name: &str) -> String {
    format!(r#"{{"id":"{id}","name":"{name}","email":"{}@example.com"}}"#, name.to_lowercase())
}

pub(crate) fn resource_json(id: &str, name: &str, kind: &str) -> String {
    format!(
        r#"{{"id":"{id}","name":"{name}","type":"{kind}","createdAt":"2030-01-01T00:00:00Z","updatedAt":"2030-01-01T00:00:00Z"}}"#
    )
}

pub(crate) fn booking_json(id: &str, status: &str) -> String {
    format!(
        r#"{{"id":"{id}","startAt":"2030-05-01T09:00:00Z","endAt":"2030-05-01T10:00:00Z","status":"{status}",
            "user":{{"id":"u1","name":"Ana"}},"resource":{{"id":"r1","name":"Room 04","type":"ROOM"}}}}"#
    )
}
