//! Hook callables contributed by the manual backend.

use hostdesk_entity::ServiceRecord;
use hostdesk_plugin::prelude::MenuItem;

/// Link to the queue of pending manual actions.
pub fn admin_menu() -> Vec<MenuItem> {
    vec![MenuItem::new("Manual actions", "/admin/manual").with_icon("clipboard")]
}

/// Reminder shown on the detail page of manually provisioned services.
pub fn service_detail(service: &ServiceRecord) -> String {
    match &service.domain {
        Some(domain) => format!(
            "<p>Service <code>{}</code> for {domain} is provisioned by hand.</p>",
            service.username
        ),
        None => format!(
            "<p>Service <code>{}</code> is provisioned by hand.</p>",
            service.username
        ),
    }
}
