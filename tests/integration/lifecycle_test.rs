//! Lifecycle integration tests: commands run through the plugin manager
//! against the manual backend.

mod helpers;

use hostdesk_core::error::ErrorKind;
use hostdesk_core::events::ServiceEvent;
use hostdesk_entity::{Product, ServiceStatus};
use hostdesk_plugin::{CommandPayload, CommandResult, LifecycleCommand};

use helpers::{TestApp, manual_product, panel_server};

#[tokio::test]
async fn test_full_lifecycle_with_manual_backend() {
    let mut app = TestApp::default_config().await;
    let service = app.seed_service(ServiceStatus::Pending).await;
    let product = manual_product();

    for (command, status) in [
        ("create", ServiceStatus::Active),
        ("suspend", ServiceStatus::Suspended),
        ("unsuspend", ServiceStatus::Active),
        ("terminate", ServiceStatus::Terminated),
    ] {
        let current = app.reload(&service).await;
        let result = app
            .manager
            .execute(
                &product,
                current,
                Some(panel_server()),
                &LifecycleCommand::from(command),
                CommandPayload::new(),
            )
            .await
            .unwrap();
        assert!(result.is_success(), "{command} failed: {}", result.message);
        assert_eq!(app.reload(&service).await.status, status);
    }

    let names: Vec<&str> = app.drain_events().iter().map(ServiceEvent::name).collect();
    assert_eq!(
        names,
        [
            "service_activated",
            "service_suspended",
            "service_unsuspended",
            "service_terminated"
        ]
    );
}

#[tokio::test]
async fn test_suspend_reason_from_config_override() {
    let mut app = TestApp::new(
        r#"
        [lifecycle]
        suspend_reason = "Invoice overdue"
        "#,
    )
    .await;
    let service = app.seed_service(ServiceStatus::Active).await;

    app.manager
        .execute(
            &manual_product(),
            service.clone(),
            None,
            &LifecycleCommand::Suspend,
            CommandPayload::new().with_mail(),
        )
        .await
        .unwrap();

    let stored = app.reload(&service).await;
    assert_eq!(stored.status, ServiceStatus::Suspended);
    assert_eq!(stored.extra.suspend_reason(), Some("Invoice overdue"));
    assert_eq!(
        app.drain_events(),
        [ServiceEvent::Suspended {
            service_id: service.id,
            mail: true
        }]
    );
}

#[tokio::test]
async fn test_terminated_service_rejects_status_commands() {
    let mut app = TestApp::default_config().await;
    let service = app.seed_service(ServiceStatus::Terminated).await;

    let result = app
        .manager
        .execute(
            &manual_product(),
            service.clone(),
            None,
            &LifecycleCommand::Create,
            CommandPayload::new(),
        )
        .await
        .unwrap();

    assert_eq!(result.code, CommandResult::TERMINATED);
    assert_eq!(app.reload(&service).await.status, ServiceStatus::Terminated);
    assert!(app.drain_events().is_empty());
}

#[tokio::test]
async fn test_named_commands_through_manager() {
    let app = TestApp::default_config().await;
    let service = app.seed_service(ServiceStatus::Active).await;
    let product = manual_product();

    let run = |command: &'static str| {
        let service = service.clone();
        let product = product.clone();
        let manager = app.manager.clone();
        async move {
            manager
                .execute(
                    &product,
                    service,
                    Some(panel_server()),
                    &LifecycleCommand::from(command),
                    CommandPayload::new(),
                )
                .await
                .unwrap()
        }
    };

    let ping = run("ping").await;
    assert!(ping.is_success());
    assert_eq!(ping.message, "panel.example.com:2086");

    assert_eq!(run("purge").await.code, CommandResult::NOT_CALLABLE);
    assert_eq!(run("not_a_real_command").await.code, CommandResult::NOT_FOUND);
    assert_eq!(app.reload(&service).await.status, ServiceStatus::Active);
}

#[tokio::test]
async fn test_change_password_updates_store() {
    let app = TestApp::default_config().await;
    let service = app.seed_service(ServiceStatus::Active).await;

    let result = app
        .manager
        .execute(
            &manual_product(),
            service.clone(),
            None,
            &LifecycleCommand::ChangePassword,
            CommandPayload::new().password("n3w-secret"),
        )
        .await
        .unwrap();

    assert!(result.is_success());
    assert_eq!(app.reload(&service).await.password, "n3w-secret");
}

#[tokio::test]
async fn test_unknown_backend_is_plugin_error() {
    let app = TestApp::default_config().await;
    let service = app.seed_service(ServiceStatus::Pending).await;

    for backend in ["cpanel", "ticket-notes"] {
        let product = Product::new("VPS", backend);
        let err = app
            .manager
            .execute(
                &product,
                service.clone(),
                None,
                &LifecycleCommand::Create,
                CommandPayload::new(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Plugin);
    }

    assert_eq!(app.reload(&service).await.status, ServiceStatus::Pending);
}
