use booking_core::{BookingApi, CreateResource, Resource, ResourceType, Transport};
use tracing::{info, warn};

use super::{unknown_field, ListState, PageState};
use crate::view;

const FIELDS: [&str; 2] = ["name", "type"];

/// Create/list resources. The type selector defaults to ROOM and survives
/// a successful create.
#[derive(Debug, Clone)]
pub struct ResourcesPage {
    list: ListState<Resource>,
    name: String,
    kind: ResourceType,
}

impl Default for ResourcesPage {
    fn default() -> Self {
        Self {
            list: ListState::default(),
            name: String::new(),
            kind: ResourceType::Room,
        }
    }
}

impl ResourcesPage {
    pub fn state(&self) -> PageState {
        self.list.state()
    }

    pub fn resources(&self) -> &[Resource] {
        self.list.items()
    }

    pub fn error(&self) -> Option<&str> {
        self.list.error()
    }

    pub fn load<T: Transport>(&mut self, api: &BookingApi<T>) {
        self.list.begin_load();
        let result = api.list_resources();
        if let Err(err) = &result {
            warn!(error = %err, "failed to load resources");
        }
        self.list.finish_load(result);
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), String> {
        match field {
            "name" => self.name = value.to_string(),
            "type" => self.kind = value.parse()?,
            other => return Err(unknown_field(other, &FIELDS)),
        }
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        !self.list.is_submitting() && !self.name.trim().is_empty()
    }

    pub fn submit<T: Transport>(&mut self, api: &BookingApi<T>) {
        if !self.can_submit() {
            return;
        }
        self.list.begin_submit();
        let input = CreateResource {
            name: self.name.trim().to_string(),
            kind: self.kind,
        };
        match api.create_resource(&input) {
            Ok(resource) => {
                info!(id = %resource.id, kind = %resource.kind, "resource created");
                self.name.clear();
                self.load(api);
            }
            Err(err) => self.list.fail(&err),
        }
        self.list.finish_submit();
    }

    pub fn render(&self) -> String {
        let mut out = vec!["Resources".to_string()];
        if let Some(error) = self.list.error() {
            out.push(view::error_message(error));
        }
        let types: Vec<String> = ResourceType::ALL
            .iter()
            .map(|t| if *t == self.kind { format!("({t})") } else { t.to_string() })
            .collect();
        out.push(format!("  name: {}", self.name));
        out.push(format!("  type: {}", types.join(" ")));
        let label = if self.list.is_submitting() { "Creating..." } else { "Create resource" };
        out.push(format!("  {}", view::button(label, self.can_submit())));
        out.push(String::new());
        out.push("All resources".to_string());

        if self.list.is_loading() {
            out.push(view::loading("Loading resources"));
        } else if self.resources().is_empty() {
            out.push("No resources yet".to_string());
        } else {
            for resource in self.resources() {
                out.push(format!("- {} [{}] {}", resource.name, resource.kind, resource.id));
            }
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{api, resource_json, ScriptedTransport};

    #[test]
    fn bare_and_wrapped_lists_render_identically() {
        let item = resource_json("1", "Room 04", "ROOM");

        let bare = ScriptedTransport::default();
        bare.respond("GET /resources", 200, &format!("[{item}]"));
        let mut from_bare = ResourcesPage::default();
        from_bare.load(&api(&bare));

        let wrapped = ScriptedTransport::default();
        wrapped.respond("GET /resources", 200, &format!(r#"{{"resources":[{item}]}}"#));
        let mut from_wrapped = ResourcesPage::default();
        from_wrapped.load(&api(&wrapped));

        assert_eq!(from_bare.resources(), from_wrapped.resources());
        assert_eq!(from_bare.render(), from_wrapped.render());
        assert!(from_bare.render().contains("- Room 04 [ROOM] 1"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let transport = ScriptedTransport::default();
        transport.respond("GET /resources", 200, "[]");
        let mut page = ResourcesPage::default();
        assert!(page.render().contains("Loading resources..."));

        page.load(&api(&transport));
        assert!(page.render().contains("No resources yet"));
    }

    #[test]
    fn create_sends_selected_type_and_keeps_it() {
        let transport = ScriptedTransport::default();
        transport
            .respond("GET /resources", 200, "[]")
            .respond("GET /resources", 200, &format!("[{}]", resource_json("c1", "Court 1", "COURT")))
            .respond("POST /resources", 201, &resource_json("c1", "Court 1", "COURT"));
        let api = api(&transport);
        let mut page = ResourcesPage::default();
        page.load(&api);

        page.set_field("name", "Court 1").unwrap();
        page.set_field("type", "court").unwrap();
        page.submit(&api);

        assert_eq!(
            transport.last_body("POST /resources").unwrap(),
            serde_json::json!({"name": "Court 1", "type": "COURT"})
        );
        assert!(page.render().contains("- Court 1 [COURT] c1"));
        assert!(page.render().contains("(COURT)"));
        assert!(!page.can_submit());
    }

    #[test]
    fn submit_is_disabled_while_a_create_is_in_flight() {
        let transport = ScriptedTransport::default();
        let mut page = ResourcesPage::default();
        page.set_field("name", "Court 1").unwrap();
        assert!(page.render().contains("[Create resource]"));

        page.list.begin_submit();

        assert!(!page.can_submit());
        page.submit(&api(&transport));
        assert!(transport.requests().is_empty());
        assert!(page.render().contains("[Creating...] (disabled)"));
    }

    #[test]
    fn invalid_type_is_rejected_locally() {
        let mut page = ResourcesPage::default();
        assert!(page.set_field("type", "desk").is_err());
        assert!(page.render().contains("(ROOM)"));
    }

    #[test]
    fn server_validation_message_is_shown() {
        let transport = ScriptedTransport::default();
        transport
            .respond("GET /resources", 200, "[]")
            .respond("POST /resources", 400, r#"{"message":"Name is required"}"#);
        let api = api(&transport);
        let mut page = ResourcesPage::default();
        page.load(&api);

        page.set_field("name", "x").unwrap();
        page.submit(&api);

        assert_eq!(page.state(), PageState::Error);
        assert!(page.render().contains("Error: Name is required"));
    }
}
