//! Root shell: page navigation plus the one-shot health indicator.

use std::fmt;
use std::str::FromStr;

use booking_core::{BookingApi, Transport};
use tracing::{info, warn};

use crate::command::{Command, HELP};
use crate::pages::{BookingsPage, ResourcesPage, UsersPage};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageKind {
    Users,
    #[default]
    Resources,
    Bookings,
}

impl PageKind {
    pub const ALL: [PageKind; 3] = [PageKind::Users, PageKind::Resources, PageKind::Bookings];

    pub fn title(self) -> &'static str {
        match self {
            PageKind::Users => "Users",
            PageKind::Resources => "Resources",
            PageKind::Bookings => "Bookings",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PageKind::Users => "users",
            PageKind::Resources => "resources",
            PageKind::Bookings => "bookings",
        })
    }
}

impl FromStr for PageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageKind::ALL
            .into_iter()
            .find(|k| k.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Loading,
    Online,
    Offline,
}

impl HealthStatus {
    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Loading => "Loading...",
            HealthStatus::Online => "Online",
            HealthStatus::Offline => "Offline",
        }
    }
}

/// The mounted page and its state.
#[derive(Debug, Clone)]
pub enum ActivePage {
    Users(UsersPage),
    Resources(ResourcesPage),
    Bookings(BookingsPage),
}

impl ActivePage {
    fn mount(kind: PageKind) -> Self {
        match kind {
            PageKind::Users => ActivePage::Users(UsersPage::default()),
            PageKind::Resources => ActivePage::Resources(ResourcesPage::default()),
            PageKind::Bookings => ActivePage::Bookings(BookingsPage::default()),
        }
    }

    pub fn kind(&self) -> PageKind {
        match self {
            ActivePage::Users(_) => PageKind::Users,
            ActivePage::Resources(_) => PageKind::Resources,
            ActivePage::Bookings(_) => PageKind::Bookings,
        }
    }

    fn load<T: Transport + Sync>(&mut self, api: &BookingApi<T>) {
        match self {
            ActivePage::Users(page) => page.load(api),
            ActivePage::Resources(page) => page.load(api),
            ActivePage::Bookings(page) => page.load(api),
        }
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), String> {
        match self {
            ActivePage::Users(page) => page.set_field(field, value),
            ActivePage::Resources(page) => page.set_field(field, value),
            ActivePage::Bookings(page) => page.set_field(field, value),
        }
    }

    fn submit<T: Transport + Sync>(&mut self, api: &BookingApi<T>) {
        match self {
            ActivePage::Users(page) => page.submit(api),
            ActivePage::Resources(page) => page.submit(api),
            ActivePage::Bookings(page) => page.submit(api),
        }
    }

    fn render(&self) -> String {
        match self {
            ActivePage::Users(page) => page.render(),
            ActivePage::Resources(page) => page.render(),
            ActivePage::Bookings(page) => page.render(),
        }
    }
}

/// What the REPL should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Render,
    Message(String),
    Quit,
}

pub struct Shell<T> {
    api: BookingApi<T>,
    health: HealthStatus,
    page: ActivePage,
}

impl<T: Transport + Sync> Shell<T> {
    /// Nothing is fetched until `start`.
    pub fn new(api: BookingApi<T>, initial: PageKind) -> Self {
        Self {
            api,
            health: HealthStatus::Loading,
            page: ActivePage::mount(initial),
        }
    }

    /// Probe health once, then load the initial page.
    pub fn start(&mut self) {
        self.health = match self.api.health() {
            Ok(health) => {
                info!(ok = health.ok, "API online");
                HealthStatus::Online
            }
            Err(err) => {
                warn!(error = %err, "API offline");
                HealthStatus::Offline
            }
        };
        self.page.load(&self.api);
    }

    pub fn health(&self) -> HealthStatus {
        self.health
    }

    pub fn active(&self) -> PageKind {
        self.page.kind()
    }

    pub fn page(&self) -> &ActivePage {
        &self.page
    }

    /// Mount a fresh page; selecting the active page keeps its state.
    pub fn navigate(&mut self, kind: PageKind) {
        if self.page.kind() == kind {
            return;
        }
        self.page = ActivePage::mount(kind);
        self.page.load(&self.api);
    }

    pub fn execute(&mut self, command: Command) -> Outcome {
        match command {
            Command::Go(kind) => self.navigate(kind),
            Command::Set { field, value } => {
                if let Err(message) = self.page.set_field(&field, &value) {
                    return Outcome::Message(message);
                }
            }
            Command::Submit => self.page.submit(&self.api),
            Command::Cancel(id) => match &mut self.page {
                ActivePage::Bookings(page) => {
                    if !page.can_cancel(&id) {
                        return Outcome::Message(format!("booking {id} cannot be canceled"));
                    }
                    page.cancel(&self.api, &id);
                }
                _ => return Outcome::Message("cancel is only available on the bookings page".to_string()),
            },
            Command::Reload => self.page.load(&self.api),
            Command::Show => {}
            Command::Help => return Outcome::Message(HELP.to_string()),
            Command::Quit => return Outcome::Quit,
        }
        Outcome::Render
    }

    pub fn render(&self) -> String {
        let nav: Vec<String> = PageKind::ALL
            .iter()
            .map(|k| {
                if *k == self.page.kind() {
                    format!("[{}]", k.title())
                } else {
                    k.title().to_string()
                }
            })
            .collect();
        format!(
            "Resource Booking\nAPI: {}\n{}\n{}\n{}",
            self.health.label(),
            nav.join(" | "),
            "-".repeat(48),
            self.page.render()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{api, booking_json, resource_json, ScriptedTransport};

    fn scripted() -> ScriptedTransport {
        let transport = ScriptedTransport::default();
        transport
            .respond("GET /health", 200, r#"{"ok":true}"#)
            .respond("GET /users", 200, r#"{"users":[]}"#)
            .respond("GET /resources", 200, &format!("[{}]", resource_json("r1", "Room 04", "ROOM")))
            .respond("GET /bookings", 200, &format!(r#"{{"bookings":[{}]}}"#, booking_json("b1", "CANCELED")));
        transport
    }

    #[test]
    fn page_kind_parses_and_defaults_to_resources() {
        assert_eq!(PageKind::default(), PageKind::Resources);
        assert_eq!("BOOKINGS".parse::<PageKind>(), Ok(PageKind::Bookings));
        assert!("settings".parse::<PageKind>().is_err());
    }

    #[test]
    fn start_probes_health_once_and_loads_default_page() {
        let transport = scripted();
        let mut shell = Shell::new(api(&transport), PageKind::default());
        assert_eq!(shell.health(), HealthStatus::Loading);
        assert!(shell.render().contains("API: Loading..."));

        shell.start();

        assert_eq!(shell.health(), HealthStatus::Online);
        assert_eq!(transport.requests(), vec!["GET /health", "GET /resources"]);
        let screen = shell.render();
        assert!(screen.contains("API: Online"));
        assert!(screen.contains("Users | [Resources] | Bookings"));
        assert!(screen.contains("- Room 04 [ROOM] r1"));

        shell.execute(Command::Go(PageKind::Users));
        shell.execute(Command::Reload);
        assert_eq!(transport.count("GET /health"), 1);
    }

    #[test]
    fn failed_probe_renders_offline() {
        for status in [None, Some(503)] {
            let transport = ScriptedTransport::default();
            if let Some(status) = status {
                transport.respond("GET /health", status, "");
            }
            let mut shell = Shell::new(api(&transport), PageKind::Users);

            shell.start();

            assert_eq!(shell.health(), HealthStatus::Offline);
            assert!(shell.render().contains("API: Offline"));
        }
    }

    #[test]
    fn navigation_mounts_and_loads_once() {
        let transport = scripted();
        let mut shell = Shell::new(api(&transport), PageKind::Resources);
        shell.start();

        assert_eq!(shell.execute(Command::Go(PageKind::Bookings)), Outcome::Render);
        assert_eq!(shell.active(), PageKind::Bookings);
        assert_eq!(transport.count("GET /bookings"), 1);

        shell.execute(Command::Go(PageKind::Bookings));
        assert_eq!(transport.count("GET /bookings"), 1, "re-selecting the active page is a no-op");
        assert!(shell.render().contains("Users | Resources | [Bookings]"));
    }

    #[test]
    fn cancel_outside_bookings_or_on_canceled_booking_is_refused() {
        let transport = scripted();
        let mut shell = Shell::new(api(&transport), PageKind::Resources);
        shell.start();

        assert!(matches!(shell.execute(Command::Cancel("b1".to_string())), Outcome::Message(_)));

        shell.execute(Command::Go(PageKind::Bookings));
        let outcome = shell.execute(Command::Cancel("b1".to_string()));
        assert_eq!(outcome, Outcome::Message("booking b1 cannot be canceled".to_string()));
        assert_eq!(transport.count("PATCH /bookings/b1/cancel"), 0);
    }

    #[test]
    fn unknown_field_is_reported() {
        let transport = scripted();
        let mut shell = Shell::new(api(&transport), PageKind::Users);
        shell.start();

        let outcome = shell.execute(Command::Set {
            field: "age".to_string(),
            value: "3".to_string(),
        });
        assert!(matches!(outcome, Outcome::Message(m) if m.contains("unknown field")));
        assert_eq!(shell.execute(Command::Quit), Outcome::Quit);
    }
}
