//! Lifecycle controller: runs a command on a bound backend and applies the
//! resulting service transition.
//!
//! | command           | backend call               | on `code == 0`                      | event         |
//! |-------------------|----------------------------|-------------------------------------|---------------|
//! | `create`          | `activate()`               | status = active                     | `Activated`   |
//! | `suspend`         | `suspend()`                | status = suspended, `suspend_reason`| `Suspended`   |
//! | `unsuspend`       | `unsuspend()`              | status = active                     | `Unsuspended` |
//! | `terminate`       | `terminate()`              | status = terminated                 | `Terminated`  |
//! | `change_password` | `change_password(pw)`      | password = pw                       |               |
//! | `change_plan`     | `change_plan()`            |                                     |               |
//! | named             | `run_command(name, data)`  | backend-defined                     |               |
//!
//! A nonzero code is returned as-is and changes nothing.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use hostdesk_core::error::AppError;
use hostdesk_core::events::ServiceEvent;
use hostdesk_core::result::AppResult;
use hostdesk_core::types::id::ServiceId;
use hostdesk_entity::service::extra::SUSPEND_REASON;
use hostdesk_entity::{ServiceExtra, ServiceStatus, ServiceUpdate};

use crate::api::events::EventNotifier;
use crate::api::locale::{EXPIRE_SUSPEND, Localizer};
use crate::api::store::ServiceStore;

use super::command::{CommandAccess, CommandPayload, CommandResult, LifecycleCommand};
use super::contract::ServerPlugin;

/// Members of the [`ServerPlugin`] contract. A named command matching one of
/// them exists on every backend but is never dispatched by name.
const RESERVED_COMMANDS: &[&str] = &[
    "bind",
    "binding",
    "activate",
    "suspend",
    "unsuspend",
    "terminate",
    "change_password",
    "change_plan",
    "user_login",
    "admin_login",
    "service_info",
    "service_config",
    "config_schema",
    "default_port",
    "commands",
    "run_command",
    "host",
    "port",
];

/// Drives service status from backend results.
#[derive(Clone)]
pub struct LifecycleController {
    /// Persistence collaborator.
    store: Arc<dyn ServiceStore>,
    /// Notification collaborator.
    notifier: Arc<dyn EventNotifier>,
    /// Text provider for the default suspend reason.
    localizer: Arc<dyn Localizer>,
}

impl std::fmt::Debug for LifecycleController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleController").finish()
    }
}

impl LifecycleController {
    /// Creates a controller over its collaborators.
    pub fn new(
        store: Arc<dyn ServiceStore>,
        notifier: Arc<dyn EventNotifier>,
        localizer: Arc<dyn Localizer>,
    ) -> Self {
        Self {
            store,
            notifier,
            localizer,
        }
    }

    /// Runs `command` on `backend`.
    ///
    /// Dispatch failures and backend failures come back as a
    /// [`CommandResult`]. An `Err` means a broken contract (the backend has
    /// no bound service) or a failing store.
    pub async fn execute(
        &self,
        backend: &dyn ServerPlugin,
        command: &LifecycleCommand,
        payload: CommandPayload,
    ) -> AppResult<CommandResult> {
        let service = backend.binding().service.as_ref().ok_or_else(|| {
            AppError::plugin(format!(
                "Backend is not bound to a service, cannot run '{command}'"
            ))
        })?;
        let service_id = service.id;

        if command.target_status().is_some() && service.status.is_terminal() {
            warn!(
                service_id = %service_id,
                command = %command,
                "Refusing status change on a terminated service"
            );
            return Ok(CommandResult::terminated());
        }

        if let Some(target) = command.target_status() {
            if !service.status.can_transition_to(target) {
                debug!(
                    service_id = %service_id,
                    from = %service.status,
                    to = %target,
                    "Command leaves the usual lifecycle path"
                );
            }
        }

        debug!(service_id = %service_id, command = %command, "Running lifecycle command");

        let result = match command {
            LifecycleCommand::Create => {
                let result = backend.activate().await;
                if result.is_success() {
                    self.transition(service_id, ServiceUpdate::status(ServiceStatus::Active))
                        .await?;
                    self.notifier.notify(ServiceEvent::Activated { service_id });
                }
                result
            }
            LifecycleCommand::Suspend => {
                let result = backend.suspend().await;
                if result.is_success() {
                    let reason = match payload.reason() {
                        Some(reason) => reason.to_string(),
                        None => self.localizer.text(EXPIRE_SUSPEND),
                    };
                    let update = ServiceUpdate::status(ServiceStatus::Suspended)
                        .merge_extra(ServiceExtra::new().with(SUSPEND_REASON, reason));
                    self.transition(service_id, update).await?;
                    self.notifier.notify(ServiceEvent::Suspended {
                        service_id,
                        mail: payload.mail,
                    });
                }
                result
            }
            LifecycleCommand::Unsuspend => {
                let result = backend.unsuspend().await;
                if result.is_success() {
                    self.transition(service_id, ServiceUpdate::status(ServiceStatus::Active))
                        .await?;
                    self.notifier.notify(ServiceEvent::Unsuspended {
                        service_id,
                        mail: payload.mail,
                    });
                }
                result
            }
            LifecycleCommand::Terminate => {
                let result = backend.terminate().await;
                if result.is_success() {
                    self.transition(service_id, ServiceUpdate::status(ServiceStatus::Terminated))
                        .await?;
                    self.notifier.notify(ServiceEvent::Terminated { service_id });
                }
                result
            }
            LifecycleCommand::ChangePassword => {
                let password = payload
                    .password
                    .unwrap_or_else(|| service.password.clone());
                let result = backend.change_password(&password).await;
                if result.is_success() {
                    self.store
                        .update(service_id, &ServiceUpdate::password(password))
                        .await?;
                    info!(service_id = %service_id, "Service password changed");
                }
                result
            }
            LifecycleCommand::ChangePlan => backend.change_plan().await,
            LifecycleCommand::Named(name) => {
                self.run_named(backend, name, payload.data.as_ref()).await
            }
        };

        if !result.is_success() {
            warn!(
                service_id = %service_id,
                command = %command,
                code = result.code,
                message = %result.message,
                "Lifecycle command failed"
            );
        }

        Ok(result)
    }

    async fn transition(&self, service_id: ServiceId, update: ServiceUpdate) -> AppResult<()> {
        let service = self.store.update(service_id, &update).await?;
        info!(
            service_id = %service_id,
            status = %service.status,
            "Service status changed"
        );
        Ok(())
    }

    async fn run_named(
        &self,
        backend: &dyn ServerPlugin,
        name: &str,
        data: Option<&Value>,
    ) -> CommandResult {
        if RESERVED_COMMANDS.contains(&name) {
            return CommandResult::not_callable(name);
        }

        match backend.commands().access(name) {
            None => CommandResult::not_found(name),
            Some(CommandAccess::Restricted) => CommandResult::not_callable(name),
            Some(CommandAccess::Callable) => backend.run_command(name, data).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::api::locale::StaticLocalizer;
    use crate::api::store::MemoryServiceStore;
    use crate::server::binding::ServerBinding;
    use crate::server::command::CommandTable;
    use hostdesk_core::error::ErrorKind;
    use hostdesk_core::types::id::ProductId;
    use hostdesk_entity::{Server, ServiceRecord};

    /// Backend answering every call with a fixed code and recording calls.
    #[derive(Debug)]
    struct Scripted {
        binding: ServerBinding,
        code: i32,
        calls: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(code: i32) -> Self {
            Self {
                binding: ServerBinding::default(),
                code,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn answer(&self, call: String) -> CommandResult {
            self.calls.lock().unwrap().push(call);
            if self.code == 0 {
                CommandResult::success()
            } else {
                CommandResult::failure(self.code, "remote error")
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ServerPlugin for Scripted {
        fn bind(&mut self, binding: ServerBinding) {
            self.binding = binding;
        }

        fn binding(&self) -> &ServerBinding {
            &self.binding
        }

        async fn activate(&self) -> CommandResult {
            self.answer("activate".into())
        }

        async fn suspend(&self) -> CommandResult {
            self.answer("suspend".into())
        }

        async fn unsuspend(&self) -> CommandResult {
            self.answer("unsuspend".into())
        }

        async fn terminate(&self) -> CommandResult {
            self.answer("terminate".into())
        }

        async fn change_password(&self, password: &str) -> CommandResult {
            self.answer(format!("change_password:{password}"))
        }

        async fn change_plan(&self) -> CommandResult {
            self.answer("change_plan".into())
        }

        fn commands(&self) -> CommandTable {
            CommandTable::new().callable("reboot").restricted("purge")
        }

        async fn run_command(&self, name: &str, data: Option<&Value>) -> CommandResult {
            let data = data.map(Value::to_string).unwrap_or_default();
            self.answer(format!("{name}:{data}"))
        }
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<ServiceEvent>>);

    impl EventNotifier for Recorder {
        fn notify(&self, event: ServiceEvent) {
            self.0.lock().unwrap().push(event);
        }
    }

    impl Recorder {
        fn events(&self) -> Vec<ServiceEvent> {
            self.0.lock().unwrap().clone()
        }
    }

    struct Harness {
        controller: LifecycleController,
        store: Arc<MemoryServiceStore>,
        events: Arc<Recorder>,
        service: ServiceRecord,
    }

    impl Harness {
        async fn new(status: ServiceStatus) -> Self {
            let store = Arc::new(MemoryServiceStore::new());
            let events = Arc::new(Recorder::default());
            let service =
                ServiceRecord::new(ProductId::new(), "alice", "s3cret").with_status(status);
            store.save(&service).await.unwrap();

            let controller = LifecycleController::new(
                store.clone(),
                events.clone(),
                Arc::new(StaticLocalizer::for_locale("en")),
            );

            Self {
                controller,
                store,
                events,
                service,
            }
        }

        fn backend(&self, code: i32) -> Scripted {
            let mut backend = Scripted::new(code);
            backend.bind(ServerBinding::new(None, Some(self.service.clone()), None));
            backend
        }

        async fn run(
            &self,
            backend: &Scripted,
            command: &str,
            payload: CommandPayload,
        ) -> CommandResult {
            self.controller
                .execute(backend, &LifecycleCommand::from(command), payload)
                .await
                .unwrap()
        }

        async fn stored(&self) -> ServiceRecord {
            self.store.find(self.service.id).await.unwrap().unwrap()
        }
    }

    #[tokio::test]
    async fn test_create_activates_and_notifies() {
        let h = Harness::new(ServiceStatus::Pending).await;
        let backend = h.backend(0);

        let result = h.run(&backend, "create", CommandPayload::new()).await;

        assert!(result.is_success());
        assert_eq!(backend.calls(), ["activate"]);
        assert_eq!(h.stored().await.status, ServiceStatus::Active);
        assert_eq!(
            h.events.events(),
            [ServiceEvent::Activated {
                service_id: h.service.id
            }]
        );
    }

    #[tokio::test]
    async fn test_suspend_records_payload_reason() {
        let h = Harness::new(ServiceStatus::Active).await;
        let backend = h.backend(0);

        let payload = CommandPayload::new().suspend_reason("Abuse report").with_mail();
        h.run(&backend, "suspend", payload).await;

        let stored = h.stored().await;
        assert_eq!(stored.status, ServiceStatus::Suspended);
        assert_eq!(stored.extra.suspend_reason(), Some("Abuse report"));
        assert_eq!(
            h.events.events(),
            [ServiceEvent::Suspended {
                service_id: h.service.id,
                mail: true
            }]
        );
    }

    #[tokio::test]
    async fn test_suspend_without_reason_uses_localized_default() {
        let h = Harness::new(ServiceStatus::Active).await;
        let backend = h.backend(0);

        h.run(&backend, "suspend", CommandPayload::new().suspend_reason(""))
            .await;

        let stored = h.stored().await;
        assert_eq!(stored.extra.suspend_reason(), Some("Service expired"));
        assert_eq!(
            h.events.events(),
            [ServiceEvent::Suspended {
                service_id: h.service.id,
                mail: false
            }]
        );
    }

    #[tokio::test]
    async fn test_failed_suspend_is_inert() {
        let h = Harness::new(ServiceStatus::Active).await;
        let backend = h.backend(7);

        let result = h.run(&backend, "suspend", CommandPayload::new()).await;

        assert_eq!(result, CommandResult::failure(7, "remote error"));
        let stored = h.stored().await;
        assert_eq!(stored.status, ServiceStatus::Active);
        assert!(stored.extra.suspend_reason().is_none());
        assert!(h.events.events().is_empty());
    }

    #[tokio::test]
    async fn test_failing_terminate_never_moves_status() {
        let h = Harness::new(ServiceStatus::Suspended).await;
        let backend = h.backend(5);

        for _ in 0..3 {
            let result = h.run(&backend, "terminate", CommandPayload::new()).await;
            assert_eq!(result.code, 5);
        }

        assert_eq!(h.stored().await.status, ServiceStatus::Suspended);
        assert_eq!(backend.calls().len(), 3);
        assert!(h.events.events().is_empty());
    }

    #[tokio::test]
    async fn test_unsuspend_reactivates_with_mail_flag() {
        let h = Harness::new(ServiceStatus::Suspended).await;
        let backend = h.backend(0);

        h.run(&backend, "unsuspend", CommandPayload::new().with_mail())
            .await;

        assert_eq!(h.stored().await.status, ServiceStatus::Active);
        assert_eq!(
            h.events.events(),
            [ServiceEvent::Unsuspended {
                service_id: h.service.id,
                mail: true
            }]
        );
    }

    #[tokio::test]
    async fn test_terminated_is_absorbing() {
        let h = Harness::new(ServiceStatus::Terminated).await;
        let backend = h.backend(0);

        for command in ["create", "suspend", "unsuspend", "terminate"] {
            let result = h.run(&backend, command, CommandPayload::new()).await;
            assert_eq!(result.code, CommandResult::TERMINATED);
        }

        assert!(backend.calls().is_empty());
        assert_eq!(h.stored().await.status, ServiceStatus::Terminated);
    }

    #[tokio::test]
    async fn test_change_password_defaults_to_current_secret() {
        let h = Harness::new(ServiceStatus::Active).await;
        let backend = h.backend(0);

        let result = h.run(&backend, "change_password", CommandPayload::new()).await;

        assert!(result.is_success());
        assert_eq!(backend.calls(), ["change_password:s3cret"]);
        let stored = h.stored().await;
        assert_eq!(stored.password, "s3cret");
        assert_eq!(stored.status, ServiceStatus::Active);
        assert!(h.events.events().is_empty());
    }

    #[tokio::test]
    async fn test_change_password_persists_new_secret() {
        let h = Harness::new(ServiceStatus::Active).await;

        h.run(
            &h.backend(0),
            "change_password",
            CommandPayload::new().password("n3w"),
        )
        .await;
        assert_eq!(h.stored().await.password, "n3w");

        h.run(
            &h.backend(1),
            "change_password",
            CommandPayload::new().password("other"),
        )
        .await;
        assert_eq!(h.stored().await.password, "n3w");
    }

    #[tokio::test]
    async fn test_change_plan_only_returns_result() {
        let h = Harness::new(ServiceStatus::Active).await;
        let backend = h.backend(0);

        let result = h.run(&backend, "change_plan", CommandPayload::new()).await;

        assert!(result.is_success());
        assert_eq!(backend.calls(), ["change_plan"]);
        assert_eq!(h.stored().await.status, ServiceStatus::Active);
        assert!(h.events.events().is_empty());
    }

    #[tokio::test]
    async fn test_named_commands() {
        let h = Harness::new(ServiceStatus::Active).await;
        let backend = h.backend(0);

        let unknown = h
            .run(&backend, "not_a_real_command", CommandPayload::new())
            .await;
        assert_eq!(unknown.code, CommandResult::NOT_FOUND);

        let restricted = h.run(&backend, "purge", CommandPayload::new()).await;
        assert_eq!(restricted.code, CommandResult::NOT_CALLABLE);

        let reserved = h.run(&backend, "bind", CommandPayload::new()).await;
        assert_eq!(reserved.code, CommandResult::NOT_CALLABLE);

        assert!(backend.calls().is_empty());

        let payload = CommandPayload::new().data(serde_json::json!({"hard": true}));
        let reboot = h.run(&backend, "reboot", payload).await;
        assert!(reboot.is_success());
        assert_eq!(backend.calls(), [r#"reboot:{"hard":true}"#]);
        assert!(h.events.events().is_empty());
    }

    #[tokio::test]
    async fn test_off_graph_command_still_runs() {
        let h = Harness::new(ServiceStatus::Active).await;
        assert!(!ServiceStatus::Active.can_transition_to(ServiceStatus::Active));
        let backend = h.backend(0);

        let result = h.run(&backend, "create", CommandPayload::new()).await;

        assert!(result.is_success());
        assert_eq!(backend.calls(), ["activate"]);
        assert_eq!(h.stored().await.status, ServiceStatus::Active);
    }

    #[tokio::test]
    async fn test_contract_members_are_not_callable_by_name() {
        let h = Harness::new(ServiceStatus::Active).await;
        let backend = h.backend(0);

        for name in ["activate", "user_login", "admin_login", "service_info", "host"] {
            let result = h.run(&backend, name, CommandPayload::new()).await;
            assert_eq!(result.code, CommandResult::NOT_CALLABLE, "{name}");
        }

        for name in ["info", "hooks", "backend"] {
            let result = h.run(&backend, name, CommandPayload::new()).await;
            assert_eq!(result.code, CommandResult::NOT_FOUND, "{name}");
        }

        assert!(backend.calls().is_empty());
        assert_eq!(h.stored().await.status, ServiceStatus::Active);
    }

    #[tokio::test]
    async fn test_unbound_backend_error_omits_server_secret() {
        let h = Harness::new(ServiceStatus::Active).await;
        let mut backend = Scripted::new(0);
        backend.bind(ServerBinding::new(
            None,
            None,
            Some(Server::new("web-1", "10.0.0.5").with_credentials("root", "TOPSECRET-KEY")),
        ));

        let err = h
            .controller
            .execute(&backend, &LifecycleCommand::Create, CommandPayload::new())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Plugin);
        assert!(!err.to_string().contains("TOPSECRET-KEY"));
        assert!(err.to_string().contains("create"));
    }

    #[tokio::test]
    async fn test_unbound_backend_is_contract_violation() {
        let h = Harness::new(ServiceStatus::Active).await;
        let backend = Scripted::new(0);

        let err = h
            .controller
            .execute(&backend, &LifecycleCommand::Create, CommandPayload::new())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Plugin);
        assert!(backend.calls().is_empty());
    }
}
