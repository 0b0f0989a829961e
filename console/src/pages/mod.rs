//! Headless page state machines.
//!
//! Each page owns its form fields and a `ListState`. `load` runs on mount and
//! after every successful mutation; submissions are no-ops while the submit
//! control is disabled.

pub mod bookings;
pub mod resources;
pub mod users;

pub use bookings::BookingsPage;
pub use resources::ResourcesPage;
pub use users::UsersPage;

use booking_core::ApiError;

/// Observable phase of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Loading,
    Ready,
    Error,
}

/// The list, load/submit flags and the single display error of a page.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    items: Vec<T>,
    loading: bool,
    submitting: bool,
    error: Option<String>,
}

impl<T> Default for ListState<T> {
    /// A freshly mounted list is loading.
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            submitting: false,
            error: None,
        }
    }
}

impl<T> ListState<T> {
    pub fn state(&self) -> PageState {
        if self.loading {
            PageState::Loading
        } else if self.error.is_some() {
            PageState::Error
        } else {
            PageState::Ready
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    fn begin_load(&mut self) {
        self.error = None;
        self.loading = true;
    }

    /// A failed load keeps the previous items.
    fn finish_load(&mut self, result: Result<Vec<T>, ApiError>) {
        self.loading = false;
        match result {
            Ok(items) => self.items = items,
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    fn begin_submit(&mut self) {
        self.error = None;
        self.submitting = true;
    }

    fn finish_submit(&mut self) {
        self.submitting = false;
    }

    fn fail(&mut self, err: &ApiError) {
        self.error = Some(err.to_string());
    }
}

pub(crate) fn unknown_field(field: &str, known: &[&str]) -> String {
    format!("unknown field `{field}` (expected one of: {})", known.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mounted_list_is_loading() {
        let list = ListState::<u8>::default();
        assert_eq!(list.state(), PageState::Loading);
        assert!(list.items().is_empty());
    }

    #[test]
    fn successful_load_clears_error() {
        let mut list = ListState::default();
        list.finish_load(Err(ApiError::Transport("down".to_string())));
        assert_eq!(list.state(), PageState::Error);
        assert_eq!(list.error(), Some("down"));

        list.begin_load();
        assert_eq!(list.state(), PageState::Loading);
        list.finish_load(Ok(vec![1, 2]));
        assert_eq!(list.state(), PageState::Ready);
        assert_eq!(list.items(), &[1, 2]);
    }

    #[test]
    fn failed_reload_keeps_items() {
        let mut list = ListState::default();
        list.finish_load(Ok(vec![7]));
        list.begin_load();
        list.finish_load(Err(ApiError::Http {
            status: 503,
            message: "HTTP 503".to_string(),
        }));
        assert_eq!(list.items(), &[7]);
        assert_eq!(list.error(), Some("HTTP 503"));
    }
}
