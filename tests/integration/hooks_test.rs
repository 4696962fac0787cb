//! Hook integration tests: enabled-set gating and dispatch across plugins.

mod helpers;

use hostdesk_entity::ServiceStatus;
use hostdesk_plugin::hooks::{AdminMenu, ServiceDetail, UserMenu};

use helpers::TestApp;

#[tokio::test]
async fn test_disabled_plugin_is_listed_but_silent() {
    let app = TestApp::default_config().await;
    let registry = app.manager.registry();

    let ids: Vec<&str> = registry.list_all().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["manual", "ticket-notes"]);
    assert!(!registry.is_enabled("ticket-notes"));

    let dispatcher = app.manager.dispatcher();
    assert!(!dispatcher.is_plugged("user_menu"));
    assert!(dispatcher.invoke_all::<UserMenu>(&()).is_empty());
    assert_eq!(dispatcher.invoke_folded::<UserMenu>(&()), Vec::new());
}

#[tokio::test]
async fn test_enabled_plugin_joins_dispatch_after_backend() {
    let app = TestApp::new(
        r#"
        [plugins]
        enabled = '["ticket-notes"]'
        "#,
    )
    .await;
    let service = app.seed_service(ServiceStatus::Active).await;
    let dispatcher = app.manager.dispatcher();

    let details = dispatcher.invoke_all::<ServiceDetail>(&service);
    assert_eq!(details.plugin_ids(), ["manual", "ticket-notes"]);
    assert_eq!(
        details.get("ticket-notes").map(String::as_str),
        Some("<notes for alice>")
    );

    let last = dispatcher.invoke_last::<ServiceDetail>(&service);
    assert_eq!(last.as_deref(), Some("<notes for alice>"));

    let folded = dispatcher.invoke_folded::<ServiceDetail>(&service);
    assert!(folded.starts_with("<p>Service <code>alice</code>"));
    assert!(folded.ends_with("<notes for alice>"));

    let user_menu = dispatcher.invoke_folded::<UserMenu>(&());
    assert_eq!(user_menu.len(), 1);
}

#[tokio::test]
async fn test_admin_menu_from_always_on_backend() {
    let app = TestApp::default_config().await;
    let menu = app.manager.dispatcher().invoke_folded::<AdminMenu>(&());

    assert_eq!(menu.len(), 1);
    assert_eq!(menu[0].url, "/admin/manual");
    assert_eq!(app.manager.registry().list_always_on().len(), 1);
}
