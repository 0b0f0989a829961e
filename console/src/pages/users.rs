use booking_core::{BookingApi, CreateUser, Transport, User};
use tracing::{info, warn};

use super::{unknown_field, ListState, PageState};
use crate::view;

const FIELDS: [&str; 2] = ["name", "email"];

/// Create/list users.
#[derive(Debug, Clone, Default)]
pub struct UsersPage {
    list: ListState<User>,
    name: String,
    email: String,
}

impl UsersPage {
    pub fn state(&self) -> PageState {
        self.list.state()
    }

    pub fn users(&self) -> &[User] {
        self.list.items()
    }

    pub fn error(&self) -> Option<&str> {
        self.list.error()
    }

    pub fn load<T: Transport>(&mut self, api: &BookingApi<T>) {
        self.list.begin_load();
        let result = api.list_users();
        if let Err(err) = &result {
            warn!(error = %err, "failed to load users");
        }
        self.list.finish_load(result);
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), String> {
        match field {
            "name" => self.name = value.to_string(),
            "email" => self.email = value.to_string(),
            other => return Err(unknown_field(other, &FIELDS)),
        }
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        !self.list.is_submitting() && !self.name.trim().is_empty() && !self.email.trim().is_empty()
    }

    pub fn submit<T: Transport>(&mut self, api: &BookingApi<T>) {
        if !self.can_submit() {
            return;
        }
        self.list.begin_submit();
        let input = CreateUser {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
        };
        match api.create_user(&input) {
            Ok(user) => {
                info!(id = %user.id, "user created");
                self.name.clear();
                self.email.clear();
                self.load(api);
            }
            Err(err) => self.list.fail(&err),
        }
        self.list.finish_submit();
    }

    pub fn render(&self) -> String {
        let mut out = vec!["Users".to_string()];
        if let Some(error) = self.list.error() {
            out.push(view::error_message(error));
        }
        out.push(format!("  name:  {}", self.name));
        out.push(format!("  email: {}", self.email));
        out.push(format!("  {}", view::button("Create user", self.can_submit())));
        out.push(String::new());
        out.push("All users".to_string());

        if self.list.is_loading() {
            out.push(view::loading("Loading"));
        } else if self.users().is_empty() {
            out.push("No users yet".to_string());
        } else {
            for user in self.users() {
                out.push(format!("- {} — {} ({})", user.name, user.email, user.id));
            }
        }
        out.join("\n")
    }
}
