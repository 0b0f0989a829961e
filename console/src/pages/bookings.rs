//! Bookings page: create and cancel bookings against the resources list.

use std::panic;
use std::thread;

use booking_core::{ApiError, Booking, BookingApi, BookingStatus, CreateBooking, Resource, Transport};
use chrono::{Local, TimeZone};
use tracing::{info, warn};

use super::{unknown_field, ListState, PageState};
use crate::view;

pub const END_BEFORE_START: &str = "The end date must be later than the start date.";

const FIELDS: [&str; 4] = ["user", "resource", "start", "end"];

#[derive(Debug, Clone, Default)]
pub struct BookingsPage {
    list: ListState<Booking>,
    resources: Vec<Resource>,
    user_id: String,
    resource_id: String,
    start: String,
    end: String,
}

impl BookingsPage {
    pub fn state(&self) -> PageState {
        self.list.state()
    }

    pub fn bookings(&self) -> &[Booking] {
        self.list.items()
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn error(&self) -> Option<&str> {
        self.list.error()
    }

    pub fn selected_resource(&self) -> Option<&str> {
        Some(self.resource_id.as_str()).filter(|id| !id.is_empty())
    }

    /// Fetch bookings and resources concurrently and wait for both.
    ///
    /// The first resource is preselected when none is chosen yet. If either
    /// request fails, both lists keep their previous contents.
    pub fn load<T: Transport + Sync>(&mut self, api: &BookingApi<T>) {
        self.list.begin_load();
        let (bookings, resources) = thread::scope(|s| {
            let bookings = s.spawn(|| api.list_bookings());
            let resources = api.list_resources();
            (bookings.join().unwrap_or_else(|e| panic::resume_unwind(e)), resources)
        });

        match (bookings, resources) {
            (Ok(bookings), Ok(resources)) => {
                if self.resource_id.is_empty() {
                    if let Some(first) = resources.first() {
                        self.resource_id = first.id.clone();
                    }
                }
                self.resources = resources;
                self.list.finish_load(Ok(bookings));
            }
            (Err(err), _) | (_, Err(err)) => {
                warn!(error = %err, "failed to load bookings");
                self.list.finish_load(Err(err));
            }
        }
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), String> {
        match field {
            "user" => self.user_id = value.to_string(),
            "resource" => {
                let value = value.trim();
                if !self.resources.iter().any(|r| r.id == value) {
                    return Err(format!("unknown resource id: {value}"));
                }
                self.resource_id = value.to_string();
            }
            "start" => self.start = value.to_string(),
            "end" => self.end = value.to_string(),
            other => return Err(unknown_field(other, &FIELDS)),
        }
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        !self.list.is_submitting()
            && !self.user_id.trim().is_empty()
            && !self.resource_id.is_empty()
            && !self.start.trim().is_empty()
            && !self.end.trim().is_empty()
    }

    /// Build the request payload, interpreting the form's date-times in `tz`.
    pub fn booking_input_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<CreateBooking, ApiError> {
        let start_at = view::parse_local_input(&self.start, tz)
            .ok_or_else(|| ApiError::Validation("Invalid start date.".to_string()))?;
        let end_at = view::parse_local_input(&self.end, tz)
            .ok_or_else(|| ApiError::Validation("Invalid end date.".to_string()))?;
        if end_at <= start_at {
            return Err(ApiError::Validation(END_BEFORE_START.to_string()));
        }
        Ok(CreateBooking {
            user_id: self.user_id.trim().to_string(),
            resource_id: self.resource_id.clone(),
            start_at,
            end_at,
        })
    }

    pub fn booking_input(&self) -> Result<CreateBooking, ApiError> {
        self.booking_input_in(&Local)
    }

    /// Validation failures never reach the network.
    pub fn submit<T: Transport + Sync>(&mut self, api: &BookingApi<T>) {
        if !self.can_submit() {
            return;
        }
        self.list.begin_submit();
        match self.booking_input().and_then(|input| api.create_booking(&input)) {
            Ok(booking) => {
                info!(id = %booking.id, resource = %booking.resource.id, "booking created");
                self.start.clear();
                self.end.clear();
                self.load(api);
            }
            Err(err) => self.list.fail(&err),
        }
        self.list.finish_submit();
    }

    /// Only listed CONFIRMED bookings can be cancelled, and not mid-submit.
    pub fn can_cancel(&self, id: &str) -> bool {
        !self.list.is_submitting()
            && self
                .bookings()
                .iter()
                .any(|b| b.id == id && b.status == BookingStatus::Confirmed)
    }

    pub fn cancel<T: Transport + Sync>(&mut self, api: &BookingApi<T>, id: &str) {
        if !self.can_cancel(id) {
            return;
        }
        self.list.begin_submit();
        match api.cancel_booking(id) {
            Ok(booking) => {
                info!(id = %booking.id, "booking canceled");
                self.load(api);
            }
            Err(err) => self.list.fail(&err),
        }
        self.list.finish_submit();
    }

    pub fn render(&self) -> String {
        let mut out = vec![
            "Bookings".to_string(),
            "Create bookings and view conflicts/validations returned from the backend.".to_string(),
        ];
        if let Some(error) = self.list.error() {
            out.push(view::error_message(error));
        }

        out.push(format!("  user:     {}", self.user_id));
        if self.resources.is_empty() {
            out.push("  resource: (none available)".to_string());
        } else {
            out.push("  resource:".to_string());
            for resource in &self.resources {
                let marker = if resource.id == self.resource_id { '*' } else { ' ' };
                out.push(format!("   {marker} {} ({}) {}", resource.name, resource.kind, resource.id));
            }
        }
        out.push(format!("  start:    {}", self.start));
        out.push(format!("  end:      {}", self.end));
        let label = if self.list.is_submitting() { "Submitting..." } else { "Create booking" };
        out.push(format!("  {}", view::button(label, self.can_submit())));
        out.push(String::new());
        out.push("All bookings".to_string());

        if self.list.is_loading() {
            out.push(view::loading("Loading bookings"));
        } else if self.bookings().is_empty() {
            out.push("No booking yet.".to_string());
        } else {
            for booking in self.bookings() {
                out.push(format!(
                    "- [{}] {} — {}",
                    booking.status, booking.resource.name, booking.user.name
                ));
                out.push(format!(
                    "    {} → {}",
                    view::format_instant(&booking.start_at),
                    view::format_instant(&booking.end_at)
                ));
                let cancel = if booking.is_canceled() { "already canceled" } else { "cancel available" };
                out.push(format!("    {} ({})", booking.id, view::button(cancel, self.can_cancel(&booking.id))));
            }
        }
        out.join("\n")
    }
}
